//! # Illuminance series
//!
//! Composition of the solar and lunar pipelines into per-instant records.
//!
//! ## Overview
//!
//! - [`sample_at`] evaluates one UTC instant and returns a rounded [`IlluminanceSample`].
//! - [`IlluminanceSeries`] iterates over the [`SamplingWindow`] of a calendar date
//!   (07:00–23:00 UTC every 10 minutes by default, 97 samples).
//! - [`generate_illuminance_series`] collects that iterator.
//! - [`surface_illuminance`] and [`evaluate_grid`] give the unrounded ground illuminance in lux,
//!   for one place or a latitude × longitude grid.
//!
//! ## Units
//!
//! The combined ground illuminance is `E_surface = R_Twilight(Sun) + R_light(Moon)`. In a
//! sample it is reported in millilux, as is the lunar reflected term; the solar terms stay in
//! lux. Angles are rounded to 2 decimals, the Sun distance (AU) to 6.

use itertools::iproduct;
use serde::{Deserialize, Serialize};

use crate::{
    config::{IlluminanceConfig, SamplingWindow},
    constants::{normalize_degrees, AstronomicalUnit, Degree, Kilometer, Lux, MILLILUX_PER_LUX},
    coordinates::ObserverLocation,
    earth_orientation::EarthOrientation,
    illuminance_errors::IlluminanceError,
    radiometry::{lunar::LunarObservation, solar::SolarObservation},
    time::{CalendarDate, Instant, JulianMoment},
};

/// One row of the illuminance series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IlluminanceSample {
    /// Local wall-clock time, `YYYY-MM-DD HH:MM`
    pub local_time: String,
    pub utc: Instant,
    /// Apparent ecliptic longitude of the Sun
    pub sun_longitude: Degree,
    /// Refracted altitude of the Sun
    pub sun_altitude: Degree,
    pub sun_azimuth: Degree,
    pub sun_distance: AstronomicalUnit,
    /// Geometric ecliptic longitude of the Moon
    pub moon_longitude: Degree,
    pub moon_latitude: Degree,
    /// Refracted altitude of the Moon
    pub moon_altitude: Degree,
    pub moon_azimuth: Degree,
    pub moon_distance: Kilometer,
    pub moon_phase_angle: Degree,
    /// Illuminated fraction of the lunar disk, in percent
    pub moon_illumination: f64,
    /// Sunlight reflected by the ground, in lux
    pub sun_reflected: Lux,
    /// Moonlight reflected by the ground, in millilux
    pub moon_reflected: f64,
    /// Twilight-aware solar term, in lux
    pub sun_twilight: Lux,
    /// Combined ground illuminance, in millilux
    pub surface: f64,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Azimuths round half-up to 360.00 just below north; fold that back to 0.
fn round_azimuth(azimuth: Degree) -> Degree {
    normalize_degrees(round_to(azimuth, 2))
}

fn observe(
    instant: &Instant,
    location: &ObserverLocation,
    config: &IlluminanceConfig,
) -> (SolarObservation, LunarObservation) {
    let moment = JulianMoment::from_instant(instant);
    let orientation = EarthOrientation::at(&moment);

    let sun = SolarObservation::observe(&moment, &orientation, location, config);
    let moon = LunarObservation::observe(&moment, &orientation, &sun.ephemeris, location, config);
    (sun, moon)
}

/// Evaluate both bodies at one UTC instant and build the rounded record.
///
/// # Arguments
/// * `instant` - UTC instant of the sample
/// * `tz_offset_hours` - offset of the local time label from UTC, fractional hours allowed
/// * `location` - observer position
/// * `config` - model coefficients
///
/// # Returns
/// * The [`IlluminanceSample`] at `instant`, local time label included.
pub fn sample_at(
    instant: &Instant,
    tz_offset_hours: f64,
    location: &ObserverLocation,
    config: &IlluminanceConfig,
) -> IlluminanceSample {
    let (sun, moon) = observe(instant, location, config);
    let surface = sun.twilight + moon.radiometry.reflected;

    log::trace!(
        "{instant}: sun h = {:.3}°, moon h = {:.3}°, i = {:.2}°, E = {:.6} lx",
        sun.horizontal.refracted_altitude,
        moon.horizontal.refracted_altitude,
        moon.phase.phase_angle,
        surface
    );

    IlluminanceSample {
        local_time: instant.shifted_hours(tz_offset_hours).label(),
        utc: *instant,
        sun_longitude: round_to(sun.ephemeris.apparent_longitude, 2),
        sun_altitude: round_to(sun.horizontal.refracted_altitude, 2),
        sun_azimuth: round_azimuth(sun.horizontal.azimuth),
        sun_distance: round_to(sun.ephemeris.distance, 6),
        moon_longitude: round_to(moon.ephemeris.longitude, 2),
        moon_latitude: round_to(moon.ephemeris.latitude, 2),
        moon_altitude: round_to(moon.horizontal.refracted_altitude, 2),
        moon_azimuth: round_azimuth(moon.horizontal.azimuth),
        moon_distance: round_to(moon.ephemeris.distance, 2),
        moon_phase_angle: round_to(moon.phase.phase_angle, 2),
        moon_illumination: round_to(moon.phase.illuminated_fraction * 100.0, 2),
        sun_reflected: round_to(sun.radiometry.reflected, 2),
        moon_reflected: round_to(moon.radiometry.reflected * MILLILUX_PER_LUX, 2),
        sun_twilight: round_to(sun.twilight, 2),
        surface: round_to(surface * MILLILUX_PER_LUX, 2),
    }
}

/// Unrounded ground illuminance `R_Twilight(Sun) + R_light(Moon)`, in lux.
pub fn surface_illuminance(
    instant: &Instant,
    location: &ObserverLocation,
    config: &IlluminanceConfig,
) -> Lux {
    let (sun, moon) = observe(instant, location, config);
    sun.twilight + moon.radiometry.reflected
}

/// Ground illuminance over every `(latitude, longitude)` pair at one instant.
///
/// The result is ordered latitude-major and holds `(latitude, longitude, E_surface)` triples,
/// `E_surface` in lux. The Earth orientation is shared by every grid point.
pub fn evaluate_grid(
    instant: &Instant,
    latitudes: &[Degree],
    longitudes: &[Degree],
    config: &IlluminanceConfig,
) -> Vec<(Degree, Degree, Lux)> {
    let moment = JulianMoment::from_instant(instant);
    let orientation = EarthOrientation::at(&moment);

    log::debug!(
        "evaluating a {}x{} grid at {instant}",
        latitudes.len(),
        longitudes.len()
    );

    iproduct!(latitudes.iter().copied(), longitudes.iter().copied())
        .map(|(latitude, longitude)| {
            let location = ObserverLocation::new(latitude, longitude);
            let sun = SolarObservation::observe(&moment, &orientation, &location, config);
            let moon = LunarObservation::observe(
                &moment,
                &orientation,
                &sun.ephemeris,
                &location,
                config,
            );
            (latitude, longitude, sun.twilight + moon.radiometry.reflected)
        })
        .collect()
}

/// Lazy, restartable iterator over the samples of one calendar date.
///
/// Cloning the iterator snapshots its position, so a clone taken before iteration replays the
/// whole day. [`IlluminanceSeries::restart`] rewinds in place.
#[derive(Debug, Clone)]
pub struct IlluminanceSeries {
    date: CalendarDate,
    tz_offset_hours: f64,
    location: ObserverLocation,
    config: IlluminanceConfig,
    next: usize,
}

impl IlluminanceSeries {
    /// Build the series of `date`.
    ///
    /// Return
    /// ------
    /// * The series, or [`IlluminanceError`] when `config` fails
    ///   [`IlluminanceConfig::validate`]. A sampling window reaching past 23:59 UTC is rejected
    ///   here since its instants would not be valid times of `date`.
    pub fn new(
        date: CalendarDate,
        tz_offset_hours: f64,
        location: ObserverLocation,
        config: IlluminanceConfig,
    ) -> Result<Self, IlluminanceError> {
        config.validate()?;
        Ok(IlluminanceSeries {
            date,
            tz_offset_hours,
            location,
            config,
            next: 0,
        })
    }

    pub fn window(&self) -> &SamplingWindow {
        &self.config.sampling
    }

    /// UTC instant of the `index`-th sample of the window.
    pub fn instant(&self, index: usize) -> Instant {
        self.date.at_minute(self.window().minute_of_day(index))
    }

    pub fn restart(&mut self) {
        self.next = 0;
    }
}

impl Iterator for IlluminanceSeries {
    type Item = IlluminanceSample;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.window().len() {
            return None;
        }
        let instant = self.instant(self.next);
        self.next += 1;
        Some(sample_at(
            &instant,
            self.tz_offset_hours,
            &self.location,
            &self.config,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.window().len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for IlluminanceSeries {}

/// Illuminance series of one calendar date.
///
/// Arguments
/// ---------
/// * `date`: UTC calendar date of the window.
/// * `tz_offset_hours`: offset used for the local time labels only; sampling stays in UTC.
/// * `location`: observer position, latitude in `[-90, 90]`.
/// * `config`: model coefficients and sampling window.
///
/// Return
/// ------
/// * One [`IlluminanceSample`] per window step, 97 with the default window.
/// * [`IlluminanceError`] when `config` does not validate.
///
/// # See also
/// * [`IlluminanceSeries`] – the same samples, lazily
/// * [`sample_at`] – a single instant
pub fn generate_illuminance_series(
    date: CalendarDate,
    tz_offset_hours: f64,
    location: ObserverLocation,
    config: &IlluminanceConfig,
) -> Result<Vec<IlluminanceSample>, IlluminanceError> {
    let series = IlluminanceSeries::new(date, tz_offset_hours, location, *config)?;
    log::debug!(
        "illuminance series for {date} at ({}, {}): {} samples",
        location.latitude,
        location.longitude,
        series.len()
    );
    Ok(series.collect())
}
