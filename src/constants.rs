//! # Constants and type definitions for nightlux
//!
//! This module centralizes the **unit conversions**, **epochs** and **type aliases** shared by
//! the ephemeris and radiometry modules.
//!
//! ## Overview
//!
//! - Epochs and time scales (J2000.0, days per Julian century)
//! - Unit conversions (AU ↔ km, illuminance scaling)
//! - Core type aliases used across the crate
//!
//! Physical coefficients of the illuminance models (solar constant, atmospheric extinction,
//! lunar albedo, …) are **not** defined here: they belong to
//! [`IlluminanceConfig`](crate::config::IlluminanceConfig) so that a caller can inject its own.

// -------------------------------------------------------------------------------------------------
// Epochs and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00:00)
pub const J2000: f64 = 2_451_545.0;

/// Number of days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds per degree
pub const ARCSEC_PER_DEG: f64 = 3600.0;

/// Lux → millilux
pub const MILLILUX_PER_LUX: f64 = 1000.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Illuminance in lux (lm/m²)
pub type Lux = f64;
/// Julian Date (days)
pub type JD = f64;
/// Julian centuries elapsed since J2000.0
pub type JulianCentury = f64;

/// Reduce an angle in degrees to the interval `[0, 360)`.
///
/// `rem_euclid` can round up to exactly `360.0` for tiny negative inputs; that case is folded
/// back to `0.0` so the half-open interval holds.
pub fn normalize_degrees(angle: Degree) -> Degree {
    let reduced = angle.rem_euclid(360.0);
    if reduced >= 360.0 {
        0.0
    } else {
        reduced
    }
}
