//! # Coordinate transforms
//!
//! Ecliptic → equatorial → horizontal conversion for a ground observer, followed by the
//! atmospheric refraction correction.
//!
//! ```text
//! (λ, β) --obliquity ε--> (α, δ) --LST, latitude φ--> (h, A) --refraction--> h + R(h)
//! ```
//!
//! ## Conventions
//!
//! - All angles are **degrees**.
//! - Longitudes are **east positive**.
//! - Azimuth is measured from the north, eastward, in `[0, 360)`.
//! - Hour angle is wrapped to `[-180, 180)`.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{normalize_degrees, Degree, RADEG},
    illuminance_errors::IlluminanceError,
};

/// Geographic position of the observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverLocation {
    pub latitude: Degree,
    pub longitude: Degree,
}

impl ObserverLocation {
    /// Unchecked constructor; the pipeline assumes `latitude ∈ [-90, 90]`.
    pub fn new(latitude: Degree, longitude: Degree) -> Self {
        ObserverLocation {
            latitude,
            longitude,
        }
    }

    /// Validated constructor for user-supplied coordinates.
    ///
    /// Longitudes are accepted in either the `[-180, 180]` or the `[0, 360]` convention.
    pub fn try_new(latitude: Degree, longitude: Degree) -> Result<Self, IlluminanceError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(IlluminanceError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=360.0).contains(&longitude) {
            return Err(IlluminanceError::LongitudeOutOfRange(longitude));
        }
        Ok(ObserverLocation::new(latitude, longitude))
    }
}

/// Right ascension and declination, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquatorialPosition {
    pub right_ascension: Degree,
    pub declination: Degree,
}

/// Convert ecliptic coordinates to equatorial coordinates.
///
/// Arguments
/// ---------
/// * `longitude`: ecliptic longitude λ.
/// * `latitude`: ecliptic latitude β (0 for the Sun).
/// * `obliquity`: obliquity of the ecliptic ε.
///
/// Formula
/// -------
/// ```text
/// α = atan2(sin λ cos ε − tan β sin ε, cos λ)
/// δ = asin(sin β cos ε + cos β sin ε sin λ)
/// ```
pub fn ecliptic_to_equatorial(
    longitude: Degree,
    latitude: Degree,
    obliquity: Degree,
) -> EquatorialPosition {
    let (sin_lon, cos_lon) = (longitude * RADEG).sin_cos();
    let (sin_lat, cos_lat) = (latitude * RADEG).sin_cos();
    let (sin_eps, cos_eps) = (obliquity * RADEG).sin_cos();

    let alpha = (sin_lon * cos_eps - (sin_lat / cos_lat) * sin_eps).atan2(cos_lon);
    let delta = (sin_lat * cos_eps + cos_lat * sin_eps * sin_lon).asin();

    EquatorialPosition {
        right_ascension: normalize_degrees(alpha.to_degrees()),
        declination: delta.to_degrees(),
    }
}

/// Local hour angle `((LST − α + 180) mod 360) − 180`, in `[-180, 180)`.
pub fn hour_angle(local_sidereal_time: Degree, right_ascension: Degree) -> Degree {
    normalize_degrees(local_sidereal_time - right_ascension + 180.0) - 180.0
}

/// Convert a declination / hour angle pair into altitude and azimuth.
///
/// Returns `(altitude, azimuth)` in degrees, azimuth in `[0, 360)` from the north.
pub fn equatorial_to_horizontal(
    declination: Degree,
    hour_angle: Degree,
    latitude: Degree,
) -> (Degree, Degree) {
    let dec = declination * RADEG;
    let (sin_ha, cos_ha) = (hour_angle * RADEG).sin_cos();
    let (sin_lat, cos_lat) = (latitude * RADEG).sin_cos();

    let sin_alt = (dec.sin() * sin_lat + dec.cos() * cos_lat * cos_ha).clamp(-1.0, 1.0);
    let altitude = sin_alt.asin().to_degrees();

    let azimuth = (-sin_ha).atan2(dec.tan() * cos_lat - sin_lat * cos_ha);

    (altitude, normalize_degrees(azimuth.to_degrees()))
}

/// Atmospheric refraction to add to a true altitude, in degrees.
///
/// Piecewise model:
///
/// | altitude h | correction |
/// |---|---|
/// | h > 85° | 0 |
/// | 5° < h ≤ 85° | (58.1/tan h − 0.07/tan³ h + 0.000086/tan⁵ h) / 3600 |
/// | −0.575° < h ≤ 5° | (1735 − 518.2h + 103.4h² − 12.79h³ + 0.711h⁴) / 3600 |
/// | h ≤ −0.575° | 0 |
///
/// The first band is the Meeus tangent series, the second the empirical quartic
/// recommended near the horizon.
pub fn refraction_correction(altitude: Degree) -> Degree {
    if altitude > 85.0 {
        0.0
    } else if altitude > 5.0 {
        let tan_h = (altitude * RADEG).tan();
        (58.1 / tan_h - 0.07 / tan_h.powi(3) + 0.000086 / tan_h.powi(5)) / 3600.0
    } else if altitude > -0.575 {
        let h = altitude;
        (1735.0 + h * (-518.2 + h * (103.4 + h * (-12.79 + h * 0.711)))) / 3600.0
    } else {
        0.0
    }
}

/// Position of a body in the observer's sky.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalPosition {
    /// Geometric altitude, before refraction
    pub altitude: Degree,
    pub azimuth: Degree,
    /// Altitude corrected for atmospheric refraction
    pub refracted_altitude: Degree,
}

impl HorizontalPosition {
    /// Place an equatorial position in the sky of `location`.
    ///
    /// Arguments
    /// -----------------
    /// * `equatorial`: apparent right ascension and declination of the body.
    /// * `local_sidereal_time`: local apparent sidereal time in degrees.
    /// * `location`: observer latitude/longitude.
    pub fn observe(
        equatorial: &EquatorialPosition,
        local_sidereal_time: Degree,
        location: &ObserverLocation,
    ) -> Self {
        let ha = hour_angle(local_sidereal_time, equatorial.right_ascension);
        let (altitude, azimuth) =
            equatorial_to_horizontal(equatorial.declination, ha, location.latitude);

        HorizontalPosition {
            altitude,
            azimuth,
            refracted_altitude: altitude + refraction_correction(altitude),
        }
    }

    /// Unit vector pointing at the (refracted) body in the local (north, east, up) frame.
    pub fn direction(&self) -> Vector3<f64> {
        let (sin_alt, cos_alt) = (self.refracted_altitude * RADEG).sin_cos();
        let (sin_az, cos_az) = (self.azimuth * RADEG).sin_cos();
        Vector3::new(cos_alt * cos_az, cos_alt * sin_az, sin_alt)
    }

    /// Whether the refracted body is above the horizon.
    pub fn is_above_horizon(&self) -> bool {
        self.refracted_altitude > 0.0
    }
}
