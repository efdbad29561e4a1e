use crate::{
    constants::{normalize_degrees, ArcSec, Degree, JulianCentury, Radian, ARCSEC_PER_DEG, RADEG},
    time::{gmst, JulianMoment},
};

/// Fundamental lunar and solar arguments of the nutation theory, in radians.
///
/// Each argument is a cubic polynomial in Julian centuries `T` (Meeus, chapter 22),
/// reduced to `[0°, 360°)` before conversion:
///
/// - `d`: mean elongation of the Moon from the Sun
/// - `m`: mean anomaly of the Sun
/// - `m_prime`: mean anomaly of the Moon
/// - `f`: Moon's argument of latitude
/// - `omega`: longitude of the ascending node of the Moon's mean orbit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FundamentalArguments {
    pub d: Radian,
    pub m: Radian,
    pub m_prime: Radian,
    pub f: Radian,
    pub omega: Radian,
}

impl FundamentalArguments {
    pub fn at(t: JulianCentury) -> Self {
        let t2 = t * t;
        let t3 = t2 * t;

        let d = 297.85036 + 445267.111480 * t - 0.0019142 * t2 + t3 / 189474.0;
        let m = 357.52772 + 35999.050340 * t - 0.0001603 * t2 - t3 / 300000.0;
        let m_prime = 134.96298 + 477198.867398 * t + 0.0086972 * t2 + t3 / 56250.0;
        let f = 93.27191 + 483202.017538 * t - 0.0036825 * t2 + t3 / 327270.0;
        let omega = 125.04452 - 1934.136261 * t + 0.0020708 * t2 + t3 / 450000.0;

        let reduce = |x: Degree| normalize_degrees(x) * RADEG;

        FundamentalArguments {
            d: reduce(d),
            m: reduce(m),
            m_prime: reduce(m_prime),
            f: reduce(f),
            omega: reduce(omega),
        }
    }
}

/// Nutation in longitude (Δψ) and in obliquity (Δε), in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    pub longitude: Degree,
    pub obliquity: Degree,
}

/// Compute the nutation angles from a truncated 4-term series.
///
/// Only four periodic terms of the IAU 1980 theory are kept, which leaves an error of about
/// one arcsecond in both angles:
///
/// ```text
/// Δψ = −17.20″ sin Ω − 1.32″ sin(2D + 2F) − 0.23″ sin 2M + 0.21″ sin 2Ω
/// Δε =   9.20″ cos Ω + 0.57″ cos(2D + 2F) + 0.10″ cos 2M − 0.09″ cos 2Ω
/// ```
///
/// Arguments
/// ---------
/// * `t`: Julian centuries since J2000.0.
///
/// Returns
/// --------
/// * [`Nutation`] with both angles converted from arcseconds to degrees.
///
/// # See also
/// * [`FundamentalArguments::at`] – the arguments D, M, F, Ω of the series
pub fn nutation(t: JulianCentury) -> Nutation {
    let args = FundamentalArguments::at(t);
    let two_lunar = 2.0 * args.d + 2.0 * args.f;

    let dpsi: ArcSec = -17.20 * args.omega.sin() - 1.32 * two_lunar.sin()
        - 0.23 * (2.0 * args.m).sin()
        + 0.21 * (2.0 * args.omega).sin();

    let deps: ArcSec = 9.20 * args.omega.cos()
        + 0.57 * two_lunar.cos()
        + 0.10 * (2.0 * args.m).cos()
        - 0.09 * (2.0 * args.omega).cos();

    Nutation {
        longitude: dpsi / ARCSEC_PER_DEG,
        obliquity: deps / ARCSEC_PER_DEG,
    }
}

/// Compute the mean obliquity of the ecliptic ε₀ in degrees (Meeus 22.2).
///
/// ```text
/// ε₀ = 23° 26′ (21.448 − 46.815 T − 0.00059 T² + 0.001813 T³)″
/// ```
pub fn mean_obliquity(t: JulianCentury) -> Degree {
    let seconds: ArcSec = 21.448 - t * (46.815 + t * (0.00059 - t * 0.001813));
    23.0 + (26.0 + seconds / 60.0) / 60.0
}

/// True obliquity of the ecliptic ε = ε₀ + Δε, in degrees.
pub fn true_obliquity(t: JulianCentury) -> Degree {
    mean_obliquity(t) + nutation(t).obliquity
}

/// Equation of the equinoxes Δψ·cos ε, in degrees.
///
/// This is the difference between apparent and mean sidereal time.
pub fn equation_of_equinoxes(t: JulianCentury) -> Degree {
    nutation(t).longitude * (true_obliquity(t) * RADEG).cos()
}

/// Greenwich Apparent Sidereal Time in degrees, normalized to [0, 360).
///
/// # Arguments
/// * `gmst` - Greenwich Mean Sidereal Time in degrees (see [`gmst`])
/// * `t` - Julian centuries since J2000.0
pub fn apparent_sidereal_time(gmst: Degree, t: JulianCentury) -> Degree {
    normalize_degrees(gmst + equation_of_equinoxes(t))
}

/// Orientation of the Earth at one instant: sidereal time, nutation and obliquity.
///
/// Computed once per [`JulianMoment`] and shared by the solar and lunar pipelines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarthOrientation {
    pub gmst: Degree,
    pub gast: Degree,
    pub nutation: Nutation,
    pub mean_obliquity: Degree,
    pub true_obliquity: Degree,
}

impl EarthOrientation {
    pub fn at(moment: &JulianMoment) -> Self {
        let gmst = gmst(moment.jd, moment.t);

        EarthOrientation {
            gmst,
            gast: apparent_sidereal_time(gmst, moment.t),
            nutation: nutation(moment.t),
            mean_obliquity: mean_obliquity(moment.t),
            true_obliquity: true_obliquity(moment.t),
        }
    }

    /// Local apparent sidereal time for an east-positive longitude, in degrees.
    pub fn local_sidereal_time(&self, longitude: Degree) -> Degree {
        normalize_degrees(self.gast + longitude)
    }
}

#[cfg(test)]
mod test_earth_orientation {
    use super::*;
    use crate::time::Instant;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_obliquity() {
        assert_relative_eq!(mean_obliquity(0.0), 23.43929111111111, epsilon = 1e-12);

        // Meeus, example 22.a: 1987 April 10, 0h TD → ε₀ = 23°26′27.407″
        let t = -0.127296372348;
        assert_relative_eq!(mean_obliquity(t), 23.440946, epsilon = 1e-6);
    }

    #[test]
    fn test_nutation_meeus_example() {
        // Meeus, example 22.a: Δψ = −3.788″, Δε = +9.443″ (full theory)
        let nut = nutation(-0.127296372348);
        assert!((nut.longitude * 3600.0 - (-3.788)).abs() < 1.5);
        assert!((nut.obliquity * 3600.0 - 9.443).abs() < 1.5);
    }

    #[test]
    fn test_nutation_is_small() {
        for k in 0..200 {
            let t = -0.5 + k as f64 * 0.005;
            let nut = nutation(t);
            assert!(nut.longitude.abs() < 19.0 / 3600.0);
            assert!(nut.obliquity.abs() < 10.0 / 3600.0);
        }
    }

    #[test]
    fn test_fundamental_arguments_in_range() {
        let args = FundamentalArguments::at(0.2479);
        for angle in [args.d, args.m, args.m_prime, args.f, args.omega] {
            assert!((0.0..std::f64::consts::TAU).contains(&angle));
        }
    }

    #[test]
    fn test_apparent_sidereal_time() {
        // Meeus, example 12.a: apparent sidereal time 13h10m46.1351s = 197.692230°
        let moment = JulianMoment::from_jd(2446895.5);
        let orientation = EarthOrientation::at(&moment);
        assert_relative_eq!(orientation.gast, 197.69223, epsilon = 5e-4);
        assert_eq!(
            orientation.gast,
            apparent_sidereal_time(orientation.gmst, moment.t)
        );
    }

    #[test]
    fn test_true_obliquity() {
        // Meeus, example 22.a: ε = 23°26′36.850″, the truncated series is within 1.5″
        let t = -0.127296372348;
        assert_relative_eq!(true_obliquity(t), 23.443569, epsilon = 1.5 / 3600.0);

        let moment = JulianMoment::from_jd(2446895.5);
        let orientation = EarthOrientation::at(&moment);
        assert_eq!(orientation.true_obliquity, true_obliquity(moment.t));
        assert_eq!(
            orientation.true_obliquity,
            orientation.mean_obliquity + orientation.nutation.obliquity
        );
    }

    #[test]
    fn test_equation_of_equinoxes_is_small() {
        let moment = JulianMoment::from_instant(&Instant::new(2024, 10, 18, 12, 0, 0));
        let eqeq = equation_of_equinoxes(moment.t);
        assert!(eqeq.abs() < 18.0 / 3600.0);
        assert_ne!(eqeq, 0.0);
    }

    #[test]
    fn test_local_sidereal_time_wraps() {
        let moment = JulianMoment::from_jd(2446895.5);
        let orientation = EarthOrientation::at(&moment);
        let lst = orientation.local_sidereal_time(200.0);
        assert!((0.0..360.0).contains(&lst));
        assert_relative_eq!(lst, orientation.gast + 200.0 - 360.0, epsilon = 1e-12);
    }
}
