use std::{fmt, str::FromStr};

use hifitime::{Epoch, Unit};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{normalize_degrees, Degree, JulianCentury, DAYS_PER_CENTURY, J2000, JD},
    illuminance_errors::IlluminanceError,
};

/// A calendar UTC instant with whole-second resolution.
///
/// The fields are assumed valid (no range checks, no leap seconds); use
/// [`CalendarDate::from_str`] when the date comes from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Instant {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl Instant {
    pub fn new(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Instant {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Build an instant from a hifitime epoch, dropping the sub-second part.
    pub fn from_epoch(epoch: Epoch) -> Self {
        let (year, month, day, hour, minute, second, _nanos) = epoch.to_gregorian_utc();
        Instant::new(year, month, day, hour, minute, second)
    }

    pub fn to_epoch(&self) -> Epoch {
        Epoch::from_gregorian_utc(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            0,
        )
    }

    /// Shift by a fixed number of hours, rolling over day, month and year boundaries.
    ///
    /// Fractional offsets (e.g. `5.5` or `-3.5`) are supported.
    pub fn shifted_hours(&self, hours: f64) -> Self {
        Instant::from_epoch(self.to_epoch() + Unit::Hour * hours)
    }

    /// Label used in the illuminance series, `YYYY-MM-DD HH:MM`.
    pub fn label(&self) -> String {
        format!(
            "{:04}-{:02}-{:02} {:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }

    /// Fraction of the day elapsed since 00:00, in days.
    fn day_fraction(&self) -> f64 {
        (self.hour as f64 + self.minute as f64 / 60.0 + self.second as f64 / 3600.0) / 24.0
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// A calendar date, the input of a daily illuminance series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl CalendarDate {
    pub fn new(year: i32, month: u8, day: u8) -> Self {
        CalendarDate { year, month, day }
    }

    /// Instant of this date at `minute_of_day` minutes after 00:00 UTC.
    ///
    /// `minute_of_day` must be below 1440.
    pub fn at_minute(&self, minute_of_day: u32) -> Instant {
        Instant::new(
            self.year,
            self.month,
            self.day,
            (minute_of_day / 60) as u8,
            (minute_of_day % 60) as u8,
            0,
        )
    }
}

impl FromStr for CalendarDate {
    type Err = IlluminanceError;

    /// Parse a `YYYY-MM-DD` string and check that it is a real Gregorian date.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('-').collect();
        if parts.len() != 3 {
            return Err(IlluminanceError::InvalidDateFormat(s.to_string()));
        }

        let invalid = || IlluminanceError::InvalidDateFormat(s.to_string());
        let year = i32::from_str(parts[0]).map_err(|_| invalid())?;
        let month = u8::from_str(parts[1]).map_err(|_| invalid())?;
        let day = u8::from_str(parts[2]).map_err(|_| invalid())?;

        Epoch::maybe_from_gregorian_utc(year, month, day, 0, 0, 0, 0)
            .map_err(|e| IlluminanceError::InvalidCalendarDate(format!("{s}: {e}")))?;

        Ok(CalendarDate::new(year, month, day))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Julian Date of a calendar instant (Meeus, chapter 7, Gregorian calendar).
///
/// Arguments
/// ---------
/// * `instant`: UTC calendar instant.
///
/// Return
/// ------
/// * The Julian Date, including the fraction of day from `h:m:s`.
///
/// Formula
/// -------
/// ```text
/// (Y, M) = (year − 1, month + 12) if month ≤ 2
/// A = ⌊Y / 100⌋,  B = 2 − A + ⌊A / 4⌋
/// JD = ⌊365.25 (Y + 4716)⌋ + ⌊30.6001 (M + 1)⌋ + D + B − 1524.5 + (h + m/60 + s/3600) / 24
/// ```
pub fn julian_day(instant: &Instant) -> JD {
    let (mut year, mut month) = (instant.year as f64, instant.month as f64);
    if instant.month <= 2 {
        year -= 1.0;
        month += 12.0;
    }

    let a = (year / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    let jd_day = (365.25 * (year + 4716.0)).floor() + (30.6001 * (month + 1.0)).floor()
        + instant.day as f64
        + b
        - 1524.5;

    jd_day + instant.day_fraction()
}

/// Julian centuries elapsed since J2000.0.
pub fn julian_centuries(jd: JD) -> JulianCentury {
    (jd - J2000) / DAYS_PER_CENTURY
}

/// Julian Date and Julian centuries of one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JulianMoment {
    pub jd: JD,
    pub t: JulianCentury,
}

impl JulianMoment {
    pub fn from_jd(jd: JD) -> Self {
        JulianMoment {
            jd,
            t: julian_centuries(jd),
        }
    }

    pub fn from_instant(instant: &Instant) -> Self {
        Self::from_jd(julian_day(instant))
    }
}

impl From<&Instant> for JulianMoment {
    fn from(instant: &Instant) -> Self {
        JulianMoment::from_instant(instant)
    }
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in degrees.
///
/// # Arguments
/// * `jd` - Julian Date (UT)
/// * `t` - Julian centuries since J2000.0 matching `jd`
///
/// # Returns
/// * GMST angle in degrees, normalized to the interval [0, 360).
///
/// # Details
/// Meeus (12.4), valid for any instant (not only 0h UT):
///
/// ```text
/// θ0 = 280.46061837 + 360.98564736629 (JD − 2451545) + 0.000387933 T² − T³ / 38710000
/// ```
pub fn gmst(jd: JD, t: JulianCentury) -> Degree {
    const C0: f64 = 280.46061837;
    const C1: f64 = 360.98564736629;
    const C2: f64 = 0.000387933;
    const C3: f64 = 38_710_000.0;

    let gmst = C0 + C1 * (jd - J2000) + C2 * t * t - t * t * t / C3;

    normalize_degrees(gmst)
}
