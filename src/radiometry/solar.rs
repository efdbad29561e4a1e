use crate::{
    config::{IlluminanceConfig, SolarPhotometry, TwilightModel},
    constants::{Degree, Lux, DPI, JD},
    coordinates::{EquatorialPosition, HorizontalPosition, ObserverLocation},
    earth_orientation::EarthOrientation,
    radiometry::{RadiometricModel, RadiometricTerms},
    solar::SolarEphemeris,
    time::JulianMoment,
};

/// Solar illuminance at the top of the atmosphere, in lux.
///
/// ```text
/// E_ST = E_SC · (1 + e · cos(2π (JD − offset) / period))² / (1 − e²)
/// ```
///
/// The annual modulation runs on a fixed calendar phase (`offset` = 2 days, `period` = 365.2
/// days by default) rather than on the true anomaly.
///
/// Arguments
/// ---------
/// * `jd`: Julian Date of the instant.
/// * `eccentricity`: eccentricity of the Earth's orbit at that instant.
/// * `photometry`: solar constant and modulation phase.
pub fn extraterrestrial_solar_illuminance(
    jd: JD,
    eccentricity: f64,
    photometry: &SolarPhotometry,
) -> Lux {
    let phase = DPI * (jd - photometry.perihelion_offset) / photometry.annual_period;
    let modulation = (1.0 + eccentricity * phase.cos()).powi(2);
    photometry.solar_constant * modulation / (1.0 - eccentricity * eccentricity)
}

impl TwilightModel {
    /// Sky brightness from the geometric solar altitude and the reflected daylight.
    ///
    /// Bands are closed on the upper side: `h = 0` falls in the civil band and
    /// `h = civil_limit` in the civil band as well. With the default coefficients the civil
    /// band ends at `400 · e^(−4.77) ≈ 3.390` lux while the nautical band starts at 3.4 lux.
    pub fn evaluate(&self, altitude: Degree, reflected: Lux) -> Lux {
        if altitude > 0.0 {
            reflected + self.daylight_offset
        } else if altitude >= self.civil_limit {
            self.civil_scale * (self.civil_rate * altitude).exp()
        } else if altitude >= self.nautical_limit {
            self.nautical_scale * (self.nautical_rate * (altitude - self.civil_limit)).exp()
        } else {
            0.0
        }
    }
}

/// Everything computed for the Sun at one instant and place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarObservation {
    pub ephemeris: SolarEphemeris,
    pub equatorial: EquatorialPosition,
    pub horizontal: HorizontalPosition,
    pub radiometry: RadiometricTerms,
    /// Twilight-aware sky illuminance `R_Twilight`
    pub twilight: Lux,
}

impl SolarObservation {
    /// Run the solar pipeline: ephemeris, apparent place, atmospheric transport and twilight.
    ///
    /// Arguments
    /// -----------------
    /// * `moment`: Julian Date and centuries of the UTC instant.
    /// * `orientation`: Earth orientation at `moment`.
    /// * `location`: observer on the ground.
    /// * `config`: photometric and atmospheric coefficients.
    pub fn observe(
        moment: &JulianMoment,
        orientation: &EarthOrientation,
        location: &ObserverLocation,
        config: &IlluminanceConfig,
    ) -> Self {
        let ephemeris = SolarEphemeris::at(moment.t);
        let equatorial = ephemeris.equatorial(orientation.true_obliquity);
        let horizontal = HorizontalPosition::observe(
            &equatorial,
            orientation.local_sidereal_time(location.longitude),
            location,
        );

        let extraterrestrial =
            extraterrestrial_solar_illuminance(moment.jd, ephemeris.eccentricity, &config.solar);
        let radiometry =
            RadiometricModel::new(&config.atmosphere).illuminate(extraterrestrial, &horizontal);

        let twilight = config
            .solar
            .twilight
            .evaluate(horizontal.altitude, radiometry.reflected);

        SolarObservation {
            ephemeris,
            equatorial,
            horizontal,
            radiometry,
            twilight,
        }
    }
}
