//! # Radiometry
//!
//! Transport of a body's extraterrestrial illuminance down to a horizontal ground surface.
//! The Sun and the Moon share the same chain, only their source terms differ:
//!
//! ```text
//! E_ext ──air mass m, exp(−C_atm·m)──▶ E_DN ──cos θ──▶ E_DV ──K_norm/π──▶ R_light
//! ```
//!
//! - [`RadiometricModel::air_mass`]: Kasten-style optical air mass, capped at the configured
//!   limit (500 by default), which also serves as the sentinel below the horizon.
//! - [`RadiometricModel::incidence_cosine`]: cosine between the zenith normal and the direction
//!   of the body.
//! - [`RadiometricModel::illuminate`]: the full chain, returned as [`RadiometricTerms`].
//!
//! The source terms live in [`solar`] (extraterrestrial illuminance and twilight) and
//! [`lunar`] (phase law, opposition surge and Earthshine).

pub mod lunar;
pub mod solar;

use nalgebra::Vector3;

use crate::{
    config::AtmosphereConfig,
    constants::{Degree, Lux, RADEG},
    coordinates::HorizontalPosition,
};

/// Every intermediate quantity of the atmospheric transport of one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiometricTerms {
    /// Illuminance at the top of the atmosphere
    pub extraterrestrial: Lux,
    pub air_mass: f64,
    pub transmission: f64,
    /// Direct normal illuminance `E_DN`
    pub normal: Lux,
    pub incidence_cosine: f64,
    /// Illuminance on the horizontal surface `E_DV`, zero below the horizon
    pub surface: Lux,
    /// Light reflected by the ground `R_light`
    pub reflected: Lux,
}

/// Clear-sky transport model parameterized by an [`AtmosphereConfig`].
#[derive(Debug, Clone, Copy)]
pub struct RadiometricModel<'a> {
    atmosphere: &'a AtmosphereConfig,
}

impl<'a> RadiometricModel<'a> {
    pub fn new(atmosphere: &'a AtmosphereConfig) -> Self {
        RadiometricModel { atmosphere }
    }

    /// Optical air mass for a (refracted) altitude in degrees.
    ///
    /// ```text
    /// m = 1 / (sin h + 0.15 · (3.885 + h°)^−1.253)
    /// ```
    ///
    /// The altitude enters the sine in radians and the correction term in degrees. The
    /// configured limit is returned when `h ≤ −1 rad`, when `3.885 + h°` is not positive (the
    /// power has no real value), or when the quotient is not a finite positive number. Any
    /// larger value is capped to the limit.
    pub fn air_mass(&self, altitude: Degree) -> f64 {
        let limit = self.atmosphere.air_mass_limit;
        let altitude_rad = altitude * RADEG;
        if altitude_rad <= -1.0 {
            return limit;
        }

        let base = 3.885 + altitude;
        if base <= 0.0 {
            log::trace!("air mass sentinel at altitude {altitude:.4}°: empty power base");
            return limit;
        }

        let m = 1.0 / (altitude_rad.sin() + 0.15 * base.powf(-1.253));
        if !m.is_finite() || m <= 0.0 {
            log::trace!("air mass sentinel at altitude {altitude:.4}°: m = {m}");
            return limit;
        }
        m.min(limit)
    }

    /// Atmospheric transmission `exp(−C_atm · m)`.
    pub fn transmission(&self, air_mass: f64) -> f64 {
        (-self.atmosphere.extinction() * air_mass).exp()
    }

    /// Cosine of the angle between the zenith normal `(0, 0, 1)` and the direction of the body.
    pub fn incidence_cosine(&self, position: &HorizontalPosition) -> f64 {
        let direction = position.direction();
        direction.dot(&Vector3::z()) / direction.norm()
    }

    /// Run the full transport chain for a body of extraterrestrial illuminance `extraterrestrial`
    /// seen at `position`.
    ///
    /// The surface and reflected terms are zero unless the refracted altitude is strictly
    /// positive.
    pub fn illuminate(
        &self,
        extraterrestrial: Lux,
        position: &HorizontalPosition,
    ) -> RadiometricTerms {
        let air_mass = self.air_mass(position.refracted_altitude);
        let transmission = self.transmission(air_mass);
        let normal = extraterrestrial * transmission;
        let incidence_cosine = self.incidence_cosine(position);

        let surface = if position.is_above_horizon() {
            normal * incidence_cosine
        } else {
            0.0
        };

        RadiometricTerms {
            extraterrestrial,
            air_mass,
            transmission,
            normal,
            incidence_cosine,
            surface,
            reflected: surface * self.atmosphere.reflectance / std::f64::consts::PI,
        }
    }
}
