//! # Illuminance model configuration
//!
//! Every physical constant and empirical coefficient used by the radiometric pipeline is held
//! in an immutable [`IlluminanceConfig`] value that callers pass down to the computation.
//! [`IlluminanceConfig::default`] reproduces the reference clear-sky model:
//!
//! | Group | Coefficient | Default |
//! |---|---|---|
//! | atmosphere | aerosol / Rayleigh / ozone extinction | 0.0218 / 0.008735 / 0.02975 |
//! | atmosphere | air-mass limit | 500 |
//! | atmosphere | normal-lobe reflectance `K_norm` | 1.0 |
//! | Sun | solar illuminance constant | 127 500 lux |
//! | Sun | twilight (offset, civil, nautical) | 400 lux, 400·e^(0.7951h), 3.4·e^(0.4728(h+6)) |
//! | Moon | albedo `C`, radius | 0.072, 1737.4 km |
//! | Moon | solar irradiance, luminous efficacy | 1300 W/m², 683 lm/W |
//! | Moon | opposition surge | +1.27 over the last 6° before 7° phase |
//!
//! The configuration derives serde traits so that overrides can be read from JSON, see
//! [`IlluminanceConfig::from_json_file`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{Degree, Kilometer, Lux},
    illuminance_errors::IlluminanceError,
};

/// Root configuration injected in the illuminance pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IlluminanceConfig {
    pub atmosphere: AtmosphereConfig,
    pub solar: SolarPhotometry,
    pub lunar: LunarPhotometry,
    pub sampling: SamplingWindow,
}

/// Clear-sky extinction and ground reflectance, shared by the Sun and the Moon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmosphereConfig {
    /// Aerosol extinction coefficient (clear sky)
    pub aerosol: f64,
    /// Rayleigh scattering coefficient
    pub rayleigh: f64,
    /// Ozone absorption coefficient
    pub ozone: f64,
    /// Upper bound of the optical air mass, also used below the horizon
    pub air_mass_limit: f64,
    /// Normal lobe contribution of the ground (dull white surface)
    pub reflectance: f64,
}

impl Default for AtmosphereConfig {
    fn default() -> Self {
        AtmosphereConfig {
            aerosol: 0.0218,
            rayleigh: 0.008735,
            ozone: 0.02975,
            air_mass_limit: 500.0,
            reflectance: 1.0,
        }
    }
}

impl AtmosphereConfig {
    /// Total extinction coefficient `C_atm` (0.060285 for the default clear sky).
    pub fn extinction(&self) -> f64 {
        self.aerosol + self.rayleigh + self.ozone
    }
}

/// Sun-specific photometric coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolarPhotometry {
    /// Solar illuminance constant at 1 AU (lux)
    pub solar_constant: Lux,
    /// Period used for the annual eccentricity modulation (days)
    pub annual_period: f64,
    /// Day offset of the modulation phase (perihelion in early January)
    pub perihelion_offset: f64,
    pub twilight: TwilightModel,
}

impl Default for SolarPhotometry {
    fn default() -> Self {
        SolarPhotometry {
            solar_constant: 127_500.0,
            annual_period: 365.2,
            perihelion_offset: 2.0,
            twilight: TwilightModel::default(),
        }
    }
}

/// Piecewise sky-brightness model driven by the geometric solar altitude `h` (degrees).
///
/// ```text
/// h > 0            R = R_light + daylight_offset
/// civil ≤ h ≤ 0    R = civil_scale · e^(civil_rate · h)
/// nautical ≤ h < civil
///                  R = nautical_scale · e^(nautical_rate · (h − civil_limit))
/// h < nautical     R = 0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwilightModel {
    pub daylight_offset: Lux,
    pub civil_scale: Lux,
    pub civil_rate: f64,
    pub civil_limit: Degree,
    pub nautical_scale: Lux,
    pub nautical_rate: f64,
    pub nautical_limit: Degree,
}

impl Default for TwilightModel {
    fn default() -> Self {
        TwilightModel {
            daylight_offset: 400.0,
            civil_scale: 400.0,
            civil_rate: 0.7951,
            civil_limit: -6.0,
            nautical_scale: 3.4,
            nautical_rate: 0.4728,
            nautical_limit: -12.0,
        }
    }
}

/// Moon-specific photometric coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LunarPhotometry {
    /// Lunar albedo constant `C`
    pub albedo: f64,
    /// Mean lunar radius (km)
    pub radius: Kilometer,
    /// Solar irradiance reaching the Moon (W/m²)
    pub solar_irradiance: f64,
    /// Luminous efficacy (lm/W)
    pub luminous_efficacy: f64,
    /// Geometric factor of the Lommel–Seeliger reflectance
    pub lommel_seeliger: f64,
    /// Earth albedo used for the Earthshine term
    pub earth_albedo: f64,
    /// Scale applied to the Earthshine term
    pub earthshine_scale: f64,
    pub opposition: OppositionSurge,
    /// Zenith transmission `τ` of the direct moonlight estimate `E_MT · τ^(m^k) · sin h`
    pub direct_transmission: f64,
    /// Air-mass exponent `k` of the direct moonlight estimate
    pub direct_air_mass_exponent: f64,
}

impl Default for LunarPhotometry {
    fn default() -> Self {
        LunarPhotometry {
            albedo: 0.072,
            radius: 1737.4,
            solar_irradiance: 1300.0,
            luminous_efficacy: 683.0,
            lommel_seeliger: 2.0 / 3.0,
            earth_albedo: 0.19,
            earthshine_scale: 0.5,
            opposition: OppositionSurge::default(),
            direct_transmission: 0.7,
            direct_air_mass_exponent: 0.678,
        }
    }
}

/// Linear brightening near full phase: `1 + amplitude · (onset − i) / width` for `i ≤ onset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OppositionSurge {
    pub onset: Degree,
    pub amplitude: f64,
    pub width: Degree,
}

impl Default for OppositionSurge {
    fn default() -> Self {
        OppositionSurge {
            onset: 7.0,
            amplitude: 1.27,
            width: 6.0,
        }
    }
}

/// UTC sampling window of a daily series, in minutes after 00:00 UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingWindow {
    pub start_minute: u32,
    pub end_minute: u32,
    pub step_minutes: u32,
}

impl Default for SamplingWindow {
    fn default() -> Self {
        SamplingWindow {
            start_minute: 7 * 60,
            end_minute: 23 * 60,
            step_minutes: 10,
        }
    }
}

impl SamplingWindow {
    /// Number of samples in the window, both ends included.
    pub fn len(&self) -> usize {
        if self.step_minutes == 0 || self.end_minute < self.start_minute {
            return 0;
        }
        ((self.end_minute - self.start_minute) / self.step_minutes) as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Minute of day of the `index`-th sample.
    pub fn minute_of_day(&self, index: usize) -> u32 {
        self.start_minute + index as u32 * self.step_minutes
    }
}

impl IlluminanceConfig {
    /// Read a configuration from a JSON file. Missing fields fall back to their defaults.
    ///
    /// Return
    /// ----------
    /// * The validated configuration, or an [`IlluminanceError`] on I/O, parse or range failure.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, IlluminanceError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Same as [`IlluminanceConfig::from_json_file`] from an in-memory document.
    pub fn from_json_str(raw: &str) -> Result<Self, IlluminanceError> {
        let config: IlluminanceConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every coefficient is usable by the pipeline.
    ///
    /// Scales, rates, radii and limits must be finite and strictly positive; extinction
    /// components and the reflectance must be finite and non-negative. The twilight band
    /// limits must be ordered `nautical_limit < civil_limit ≤ 0` and the sampling window must
    /// stay within one day with a non-zero step.
    pub fn validate(&self) -> Result<(), IlluminanceError> {
        let positive = [
            ("atmosphere.air_mass_limit", self.atmosphere.air_mass_limit),
            ("solar.solar_constant", self.solar.solar_constant),
            ("solar.annual_period", self.solar.annual_period),
            ("solar.twilight.civil_scale", self.solar.twilight.civil_scale),
            ("solar.twilight.civil_rate", self.solar.twilight.civil_rate),
            (
                "solar.twilight.nautical_scale",
                self.solar.twilight.nautical_scale,
            ),
            (
                "solar.twilight.nautical_rate",
                self.solar.twilight.nautical_rate,
            ),
            ("lunar.albedo", self.lunar.albedo),
            ("lunar.radius", self.lunar.radius),
            ("lunar.solar_irradiance", self.lunar.solar_irradiance),
            ("lunar.luminous_efficacy", self.lunar.luminous_efficacy),
            ("lunar.lommel_seeliger", self.lunar.lommel_seeliger),
            ("lunar.opposition.width", self.lunar.opposition.width),
            ("lunar.direct_transmission", self.lunar.direct_transmission),
            (
                "lunar.direct_air_mass_exponent",
                self.lunar.direct_air_mass_exponent,
            ),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(IlluminanceError::InvalidConfig { field, value });
            }
        }

        let non_negative = [
            ("atmosphere.aerosol", self.atmosphere.aerosol),
            ("atmosphere.rayleigh", self.atmosphere.rayleigh),
            ("atmosphere.ozone", self.atmosphere.ozone),
            ("atmosphere.reflectance", self.atmosphere.reflectance),
            ("solar.perihelion_offset", self.solar.perihelion_offset.abs()),
            (
                "solar.twilight.daylight_offset",
                self.solar.twilight.daylight_offset,
            ),
            ("lunar.earth_albedo", self.lunar.earth_albedo),
            ("lunar.earthshine_scale", self.lunar.earthshine_scale),
            ("lunar.opposition.onset", self.lunar.opposition.onset),
            ("lunar.opposition.amplitude", self.lunar.opposition.amplitude),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(IlluminanceError::InvalidConfig { field, value });
            }
        }

        let twilight = &self.solar.twilight;
        if !(twilight.civil_limit <= 0.0) {
            return Err(IlluminanceError::InvalidConfig {
                field: "solar.twilight.civil_limit",
                value: twilight.civil_limit,
            });
        }
        if !(twilight.nautical_limit < twilight.civil_limit) {
            return Err(IlluminanceError::InvalidConfig {
                field: "solar.twilight.nautical_limit",
                value: twilight.nautical_limit,
            });
        }

        let window = &self.sampling;
        if window.step_minutes == 0
            || window.end_minute < window.start_minute
            || window.end_minute >= 24 * 60
        {
            return Err(IlluminanceError::InvalidSamplingWindow(format!(
                "{}..={} every {} min",
                window.start_minute, window.end_minute, window.step_minutes
            )));
        }

        Ok(())
    }
}
