use crate::{
    config::{IlluminanceConfig, LunarPhotometry, OppositionSurge},
    constants::{Degree, Kilometer, Lux, Radian, RADEG},
    coordinates::{EquatorialPosition, HorizontalPosition, ObserverLocation},
    earth_orientation::EarthOrientation,
    lunar::{LunarEphemeris, LunarPhase},
    radiometry::{RadiometricModel, RadiometricTerms},
    solar::SolarEphemeris,
    time::JulianMoment,
};

/// Lommel–Seeliger-like phase law of a rough sphere.
///
/// ```text
/// P(x) = 1 − sin(x/2) · tan(x/2) · ln(1 / tan(x/4))
/// ```
///
/// Arguments
/// ---------
/// * `x`: phase angle in radians, expected in `[0, π]`.
///
/// Return
/// ------
/// * `Some(1.0)` for `x ≤ 0`, the limit of the law at full phase.
/// * `None` when `tan(x/4)` is not a finite positive number or when the expression is not
///   finite; the caller then drops the term.
/// * Otherwise the value clamped to `[0, 1]`. Close to `x = π` the product `tan(x/2) · ln(…)`
///   cancels badly and would go negative.
pub fn phase_law(x: Radian) -> Option<f64> {
    if x <= 0.0 {
        return Some(1.0);
    }

    let quarter = (x / 4.0).tan();
    if !quarter.is_finite() || quarter <= 0.0 {
        log::trace!("phase law undefined at x = {x} rad: tan(x/4) = {quarter}");
        return None;
    }

    let half = x / 2.0;
    let value = 1.0 - half.sin() * half.tan() * (1.0 / quarter).ln();
    if !value.is_finite() {
        log::trace!("phase law undefined at x = {x} rad");
        return None;
    }
    Some(value.clamp(0.0, 1.0))
}

impl OppositionSurge {
    /// Brightening factor `Oef` for a phase angle in degrees.
    pub fn factor(&self, phase_angle: Degree) -> f64 {
        if phase_angle <= self.onset {
            1.0 + self.amplitude * (self.onset - phase_angle) / self.width
        } else {
            1.0
        }
    }
}

/// Moonlight at the top of the atmosphere, in lux.
///
/// ```text
/// E_MT = η · f_LS · Oef · C · R_M² / Δ² · (E_em + E_sm · P(i))
/// E_em = A_E · s · P(π − i)
/// ```
///
/// with η the luminous efficacy, `f_LS` the Lommel–Seeliger factor, `C` the lunar albedo,
/// `R_M` the lunar radius, `Δ` the Earth–Moon distance, `E_sm` the solar irradiance at the
/// Moon, `A_E` the Earth albedo and `s` the Earthshine scale. A term whose phase law is
/// undefined contributes nothing.
///
/// Arguments
/// ---------
/// * `phase_angle`: Sun–Moon–Earth angle `i` in degrees.
/// * `distance`: Earth–Moon distance in km.
/// * `photometry`: lunar photometric coefficients.
pub fn lunar_extraterrestrial_illuminance(
    phase_angle: Degree,
    distance: Kilometer,
    photometry: &LunarPhotometry,
) -> Lux {
    let phi = phase_angle * RADEG;
    let surge = photometry.opposition.factor(phase_angle);

    let earthshine = photometry.earth_albedo
        * photometry.earthshine_scale
        * phase_law(std::f64::consts::PI - phi).unwrap_or(0.0);
    let sunlight = photometry.solar_irradiance * phase_law(phi).unwrap_or(0.0);

    let geometry = (photometry.radius / distance).powi(2);

    photometry.luminous_efficacy
        * photometry.lommel_seeliger
        * surge
        * photometry.albedo
        * geometry
        * (earthshine + sunlight)
}

/// Direct moonlight on a horizontal surface from the empirical transmission `τ^(m^k)`.
///
/// ```text
/// m = 1 / sin h
/// E = E_MT · τ^(m^k) · sin h
/// ```
///
/// This is an estimate independent of [`RadiometricModel`]: plane-parallel air mass, no
/// extinction coefficients, no ground reflectance. Zero unless the (refracted) altitude `h` is
/// strictly positive.
pub fn direct_lunar_surface_illuminance(
    extraterrestrial: Lux,
    altitude: Degree,
    photometry: &LunarPhotometry,
) -> Lux {
    if altitude <= 0.0 {
        return 0.0;
    }
    let sin_h = (altitude * RADEG).sin();
    let air_mass = 1.0 / sin_h;
    let transmission = photometry
        .direct_transmission
        .powf(air_mass.powf(photometry.direct_air_mass_exponent));
    extraterrestrial * transmission * sin_h
}

/// Everything computed for the Moon at one instant and place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarObservation {
    pub ephemeris: LunarEphemeris,
    pub phase: LunarPhase,
    pub equatorial: EquatorialPosition,
    pub horizontal: HorizontalPosition,
    pub radiometry: RadiometricTerms,
    /// See [`direct_lunar_surface_illuminance`]
    pub direct_surface: Lux,
}

impl LunarObservation {
    /// Run the lunar pipeline. The Sun's ephemeris at the same instant supplies the
    /// longitude and distance needed for the phase geometry.
    pub fn observe(
        moment: &JulianMoment,
        orientation: &EarthOrientation,
        sun: &SolarEphemeris,
        location: &ObserverLocation,
        config: &IlluminanceConfig,
    ) -> Self {
        let ephemeris = LunarEphemeris::at(moment.t, orientation.nutation.longitude);
        let phase = ephemeris.phase(sun.apparent_longitude, sun.distance);

        let equatorial = ephemeris.equatorial(orientation.true_obliquity);
        let horizontal = HorizontalPosition::observe(
            &equatorial,
            orientation.local_sidereal_time(location.longitude),
            location,
        );

        let extraterrestrial =
            lunar_extraterrestrial_illuminance(phase.phase_angle, ephemeris.distance, &config.lunar);
        let radiometry =
            RadiometricModel::new(&config.atmosphere).illuminate(extraterrestrial, &horizontal);
        let direct_surface = direct_lunar_surface_illuminance(
            extraterrestrial,
            horizontal.refracted_altitude,
            &config.lunar,
        );

        LunarObservation {
            ephemeris,
            phase,
            equatorial,
            horizontal,
            radiometry,
            direct_surface,
        }
    }
}
