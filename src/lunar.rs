//! # Lunar ephemeris
//!
//! Truncated ELP2000-style theory of the Moon (Meeus, chapter 47): four-degree polynomials for
//! the fundamental arguments, an 8-term equation of the center, a single-term ecliptic latitude
//! and a 26-term distance series.
//!
//! ## Accuracy
//!
//! The ecliptic latitude keeps only `β = 5.128° sin F`, which leaves errors of about 0.2° (up
//! to ~0.5°). Longitude is good to a few tenths of a degree. This is enough for illuminance
//! work, where the Moon's altitude enters through a cosine.
//!
//! ## Phase
//!
//! [`LunarEphemeris::phase`] derives the geocentric elongation ψ, the phase angle `i` and the
//! illuminated fraction of the disk from the Sun's apparent longitude and distance.

use crate::{
    constants::{normalize_degrees, AstronomicalUnit, Degree, JulianCentury, Kilometer, AU, RADEG},
    coordinates::{ecliptic_to_equatorial, EquatorialPosition},
};

/// Mean Earth–Moon distance of the series, in km.
const MEAN_DISTANCE: Kilometer = 385_000.56;

/// Distance terms: (amplitude in km, multiple of D, multiple of M′, multiple of F).
///
/// `Δ = 385000.56 + Σ amplitude · cos(d·D + m·M′ + f·F)`
const DISTANCE_TERMS: [(f64, f64, f64, f64); 26] = [
    (-20905.355, 0.0, 1.0, 0.0),
    (-3699.111, 2.0, 0.0, 0.0),
    (-2955.968, 0.0, 2.0, 0.0),
    (-570.0, 2.0, -1.0, 0.0),
    (246.0, 2.0, 1.0, 0.0),
    (-205.0, 0.0, 1.0, 1.0),
    (171.0, 1.0, 0.0, -1.0),
    (-152.0, 1.0, 0.0, 1.0),
    (129.0, 1.0, 0.0, -2.0),
    (63.0, 2.0, 0.0, 1.0),
    (63.0, 0.0, 1.0, 2.0),
    (-59.0, 2.0, 0.0, -2.0),
    (-58.0, 0.0, 1.0, -1.0),
    (51.0, 1.0, 0.0, 2.0),
    (-48.0, 1.0, -1.0, 0.0),
    (-46.0, 2.0, 0.0, 2.0),
    (46.0, 3.0, 0.0, 0.0),
    (29.0, 0.0, 2.0, 1.0),
    (29.0, 1.0, 1.0, 0.0),
    (26.0, 2.0, -1.0, 1.0),
    (-22.0, 0.0, 1.0, 2.0),
    (21.0, 1.0, 0.0, -2.0),
    (17.0, 2.0, 1.0, 0.0),
    (-16.0, 1.0, -1.0, -1.0),
    (-16.0, 2.0, 1.0, -1.0),
    (-15.0, 2.0, -1.0, -1.0),
];

/// Moon's mean anomaly M′, mod 360.
pub fn mean_anomaly(t: JulianCentury) -> Degree {
    normalize_degrees(
        134.96340251 + 477198.8675613 * t + 0.0087423 * t.powi(2) + t.powi(3) / 69699.0
            - t.powi(4) / 14712000.0,
    )
}

/// Moon's mean longitude L′, mod 360.
pub fn mean_longitude(t: JulianCentury) -> Degree {
    normalize_degrees(
        218.3164477 + 481267.88123421 * t - 0.0015786 * t.powi(2) + t.powi(3) / 538841.0
            - t.powi(4) / 65194000.0,
    )
}

/// Mean elongation of the Moon D, mod 360.
pub fn mean_elongation(t: JulianCentury) -> Degree {
    normalize_degrees(
        297.8501921 + 445267.1114034 * t - 0.0018819 * t.powi(2) + t.powi(3) / 545868.0
            - t.powi(4) / 113065000.0,
    )
}

/// Moon's argument of latitude F, mod 360.
pub fn argument_of_latitude(t: JulianCentury) -> Degree {
    normalize_degrees(
        93.2720950 + 483202.0175233 * t - 0.0036539 * t.powi(2) - t.powi(3) / 3526000.0
            + t.powi(4) / 863310000.0,
    )
}

/// 8-term equation of the center, in degrees.
pub fn equation_of_center(mean_anomaly: Degree, elongation: Degree, latitude_arg: Degree) -> Degree {
    let m = mean_anomaly * RADEG;
    let d = elongation * RADEG;
    let f = latitude_arg * RADEG;

    6.289 * m.sin()
        + 1.274 * (2.0 * d - m).sin()
        + 0.658 * (2.0 * d).sin()
        + 0.214 * (2.0 * m).sin()
        + 0.11 * d.sin()
        + 0.046 * (m + f).sin()
        + 0.014 * (2.0 * d - 2.0 * m).sin()
        + 0.011 * (m - f).sin()
}

/// Ecliptic latitude β from the leading term of the latitude series.
pub fn ecliptic_latitude(latitude_arg: Degree) -> Degree {
    5.128 * (latitude_arg * RADEG).sin()
}

/// Earth–Moon distance in km from the 26-term cosine series.
pub fn moon_distance(elongation: Degree, mean_anomaly: Degree, latitude_arg: Degree) -> Kilometer {
    DISTANCE_TERMS
        .iter()
        .fold(MEAN_DISTANCE, |acc, &(amplitude, d, m, f)| {
            let arg = (d * elongation + m * mean_anomaly + f * latitude_arg) * RADEG;
            acc + amplitude * arg.cos()
        })
}

/// Geocentric orbital elements and ecliptic position of the Moon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarEphemeris {
    pub mean_anomaly: Degree,
    pub mean_longitude: Degree,
    pub mean_elongation: Degree,
    pub argument_of_latitude: Degree,
    pub equation_of_center: Degree,
    /// Geometric ecliptic longitude `L′ + C`, mod 360
    pub longitude: Degree,
    pub latitude: Degree,
    /// Longitude corrected for nutation, mod 360
    pub apparent_longitude: Degree,
    pub distance: Kilometer,
}

/// Illumination geometry of the Moon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarPhase {
    /// Geocentric elongation ψ of the Moon from the Sun
    pub elongation: Degree,
    /// Sun–Moon–Earth angle `i`, 0° at full Moon and 180° at new Moon
    pub phase_angle: Degree,
    /// Illuminated fraction of the disk, in [0, 1]
    pub illuminated_fraction: f64,
}

impl LunarEphemeris {
    /// Evaluate the lunar theory at `t` Julian centuries.
    ///
    /// Arguments
    /// -----------------
    /// * `t`: Julian centuries since J2000.0.
    /// * `nutation_in_longitude`: Δψ in degrees, from
    ///   [`nutation`](crate::earth_orientation::nutation).
    pub fn at(t: JulianCentury, nutation_in_longitude: Degree) -> Self {
        let mean_anomaly = mean_anomaly(t);
        let mean_longitude = mean_longitude(t);
        let mean_elongation = mean_elongation(t);
        let argument_of_latitude = argument_of_latitude(t);

        let equation_of_center =
            equation_of_center(mean_anomaly, mean_elongation, argument_of_latitude);
        let longitude = normalize_degrees(mean_longitude + equation_of_center);

        LunarEphemeris {
            mean_anomaly,
            mean_longitude,
            mean_elongation,
            argument_of_latitude,
            equation_of_center,
            longitude,
            latitude: ecliptic_latitude(argument_of_latitude),
            apparent_longitude: normalize_degrees(longitude + nutation_in_longitude),
            distance: moon_distance(mean_elongation, mean_anomaly, argument_of_latitude),
        }
    }

    /// Apparent right ascension and declination, latitude included.
    pub fn equatorial(&self, obliquity: Degree) -> EquatorialPosition {
        ecliptic_to_equatorial(self.apparent_longitude, self.latitude, obliquity)
    }

    /// Phase geometry from the Sun's longitude and distance.
    ///
    /// ```text
    /// cos ψ = cos β cos(λ☾ − λ☉)
    /// i     = atan2(R sin ψ, Δ − R cos ψ)        R = Sun distance in km, Δ = Moon distance
    /// k     = (1 + cos i) / 2
    /// ```
    ///
    /// With `sin ψ ≥ 0` the two-argument arctangent lands in `[0°, 180°]` directly, so no
    /// quadrant fix-up of the result is needed.
    pub fn phase(&self, sun_longitude: Degree, sun_distance: AstronomicalUnit) -> LunarPhase {
        let cos_psi = ((self.latitude * RADEG).cos()
            * ((self.longitude - sun_longitude) * RADEG).cos())
        .clamp(-1.0, 1.0);
        let psi = cos_psi.acos();

        let sun_km = sun_distance * AU;
        let phase_angle = (sun_km * psi.sin())
            .atan2(self.distance - sun_km * psi.cos())
            .to_degrees();

        LunarPhase {
            elongation: psi.to_degrees(),
            phase_angle,
            illuminated_fraction: illuminated_fraction(phase_angle),
        }
    }
}

/// Illuminated fraction `(1 + cos i) / 2` of a disk seen at phase angle `i` (degrees).
pub fn illuminated_fraction(phase_angle: Degree) -> f64 {
    ((1.0 + (phase_angle * RADEG).cos()) / 2.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod lunar_test {
    use super::*;
    use approx::assert_relative_eq;

    /// Meeus, example 47.a: 1992 April 12, 0h TD
    const T_47A: f64 = -0.077221081451;

    #[test]
    fn test_fundamental_arguments_meeus() {
        assert_relative_eq!(mean_longitude(T_47A), 134.290182, epsilon = 1e-5);
        assert_relative_eq!(mean_elongation(T_47A), 113.842304, epsilon = 1e-5);
        assert_relative_eq!(mean_anomaly(T_47A), 5.150833, epsilon = 1e-5);
        assert_relative_eq!(argument_of_latitude(T_47A), 219.889721, epsilon = 1e-5);
    }

    #[test]
    fn test_position_meeus_example_47a() {
        // Full theory: λ = 133.167265°, β = −3.229126°, Δ = 368409.7 km.
        // The truncated series land within half a degree and ~4300 km.
        let moon = LunarEphemeris::at(T_47A, 0.004610);
        assert!((moon.longitude - 133.167265).abs() < 0.5);
        assert!((moon.latitude - (-3.229126)).abs() < 0.1);
        assert!((moon.distance - 368409.7).abs() < 5000.0);
        assert_relative_eq!(moon.distance, 364139.69, epsilon = 1e-2);
        assert_relative_eq!(
            moon.apparent_longitude,
            moon.longitude + 0.004610,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_distance_extremes() {
        // Perigee-like configuration: all leading terms negative
        let near = moon_distance(0.0, 0.0, 90.0);
        assert!(near < 360_000.0);
        // Apogee-like configuration
        let far = moon_distance(90.0, 180.0, 90.0);
        assert!(far > 404_000.0);
    }

    #[test]
    fn test_phase_full_and_new() {
        let mut moon = LunarEphemeris::at(0.2479, 0.0);
        moon.latitude = 0.0;

        moon.longitude = normalize_degrees(10.0 + 180.0);
        let full = moon.phase(10.0, 1.0);
        assert_relative_eq!(full.elongation, 180.0, epsilon = 1e-9);
        assert_relative_eq!(full.phase_angle, 0.0, epsilon = 1e-9);
        assert_relative_eq!(full.illuminated_fraction, 1.0, epsilon = 1e-12);

        moon.longitude = 10.0;
        let new = moon.phase(10.0, 1.0);
        assert_relative_eq!(new.phase_angle, 180.0, epsilon = 1e-9);
        assert_relative_eq!(new.illuminated_fraction, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_phase_quarter_is_slightly_past_90() {
        // At quadrature the Sun is seen from the Moon slightly beyond 90°
        let mut moon = LunarEphemeris::at(0.2479, 0.0);
        moon.latitude = 0.0;
        moon.longitude = 100.0;
        let quarter = moon.phase(10.0, 1.0);
        assert!(quarter.phase_angle > 90.0 && quarter.phase_angle < 90.2);
        assert_relative_eq!(quarter.elongation, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_phase_angle_matches_reflected_arctangent() {
        let moon = LunarEphemeris::at(0.2479, 0.0);
        for k in 0..36 {
            let sun_longitude = k as f64 * 10.0 + 3.0;
            let phase = moon.phase(sun_longitude, 0.995);

            let psi = phase.elongation * RADEG;
            let r = 0.995 * AU;
            let mut legacy = ((r * psi.sin()) / (moon.distance - r * psi.cos()))
                .atan()
                .to_degrees();
            if legacy < 0.0 {
                legacy = 180.0 - legacy.abs();
            }
            assert_relative_eq!(phase.phase_angle, legacy, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_illuminated_fraction_range() {
        for k in 0..=1800 {
            let f = illuminated_fraction(k as f64 * 0.1);
            assert!((0.0..=1.0).contains(&f));
        }
        assert_relative_eq!(illuminated_fraction(90.0), 0.5, epsilon = 1e-12);
    }
}
