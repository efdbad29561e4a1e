use crate::{
    constants::{normalize_degrees, AstronomicalUnit, Degree, JulianCentury, RADEG},
    coordinates::{ecliptic_to_equatorial, EquatorialPosition},
};

/// Semi-major axis of the Earth's orbit in AU.
const SEMI_MAJOR_AXIS: AstronomicalUnit = 1.000001018;

/// Geocentric orbital elements and ecliptic position of the Sun (Meeus, chapter 25,
/// low-accuracy theory).
///
/// All angles are in degrees; `distance` is the Sun–Earth distance in AU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarEphemeris {
    pub mean_longitude: Degree,
    pub mean_anomaly: Degree,
    pub eccentricity: f64,
    pub equation_of_center: Degree,
    pub true_longitude: Degree,
    pub true_anomaly: Degree,
    /// True longitude corrected for nutation and aberration
    pub apparent_longitude: Degree,
    pub distance: AstronomicalUnit,
}

/// Geometric mean longitude L0, mod 360.
pub fn mean_longitude(t: JulianCentury) -> Degree {
    normalize_degrees(280.46646 + 36000.76983 * t + 0.0003032 * t * t)
}

/// Mean anomaly M, mod 360.
pub fn mean_anomaly(t: JulianCentury) -> Degree {
    normalize_degrees(357.52911 + 35999.05029 * t - 0.0001537 * t * t)
}

/// Eccentricity of the Earth's orbit.
pub fn eccentricity(t: JulianCentury) -> f64 {
    0.016708634 - 0.000042037 * t - 0.0000001267 * t * t
}

/// Equation of the center C for a given mean anomaly (3-term series).
pub fn equation_of_center(t: JulianCentury, mean_anomaly: Degree) -> Degree {
    let m = mean_anomaly * RADEG;
    (1.914602 - 0.004817 * t - 0.000014 * t * t) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin()
}

/// Sun–Earth distance from the conic equation `r = a (1 − e²) / (1 + e cos v)`.
///
/// # Arguments
/// * `true_anomaly` - true anomaly v in degrees
/// * `eccentricity` - eccentricity e of the Earth's orbit
pub fn sun_earth_distance(true_anomaly: Degree, eccentricity: f64) -> AstronomicalUnit {
    SEMI_MAJOR_AXIS * (1.0 - eccentricity * eccentricity)
        / (1.0 + eccentricity * (true_anomaly * RADEG).cos())
}

impl SolarEphemeris {
    /// Evaluate the solar theory at `t` Julian centuries from J2000.0.
    ///
    /// The apparent longitude uses the short correction
    /// `λ = ☉ − 0.00569° − 0.00478° sin Ω`, `Ω = 125.04° − 1934.136° T`.
    pub fn at(t: JulianCentury) -> Self {
        let mean_longitude = mean_longitude(t);
        let mean_anomaly = mean_anomaly(t);
        let eccentricity = eccentricity(t);
        let equation_of_center = equation_of_center(t, mean_anomaly);

        let true_longitude = mean_longitude + equation_of_center;
        let true_anomaly = normalize_degrees(mean_anomaly + equation_of_center);

        let omega = 125.04 - 1934.136 * t;
        let apparent_longitude =
            normalize_degrees(true_longitude - 0.00569 - 0.00478 * (omega * RADEG).sin());

        SolarEphemeris {
            mean_longitude,
            mean_anomaly,
            eccentricity,
            equation_of_center,
            true_longitude,
            true_anomaly,
            apparent_longitude,
            distance: sun_earth_distance(true_anomaly, eccentricity),
        }
    }

    /// Apparent right ascension and declination for the given obliquity (β = 0).
    pub fn equatorial(&self, obliquity: Degree) -> EquatorialPosition {
        ecliptic_to_equatorial(self.apparent_longitude, 0.0, obliquity)
    }
}
