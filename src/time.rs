//! # Time conversion and sidereal clock
//!
//! Calendar instants, Julian Dates and Local Sidereal Time.
//!
//! The observation instant is a **UTC calendar timestamp**; no timezone handling happens
//! inside the Julian Date formula, callers holding local wall-clock time go through
//! [`ObservationInstant::from_local`] which applies the UTC offset first.
//!
//! ```text
//! ObservationInstant --julian_date()--> JD --(JD-2451545)/36525--> T
//!                                        |
//!                                        +--greenwich_mean_sidereal_time()--> GMST [deg]
//!                                                   + longitude  --> LST [h]
//! ```
//!
//! Calendar validation and epoch arithmetic (Unix seconds, ISO strings, minute offsets
//! for time-lapse playback) are delegated to [`hifitime`].
use std::str::FromStr;

use hifitime::{Epoch, Unit};

use crate::constants::{
    Centuries, Degree, Hour, JulianDate, DEG_PER_HOUR, GMST_C0, GMST_C1, GMST_C2, GMST_C3,
    J2000_JD, JULIAN_CENTURY,
};
use crate::coordinates::{normalize_degrees, normalize_hours};
use crate::sky_errors::SkyError;

/// Gregorian calendar date to Julian Date.
///
/// Uses the integer day-number formula (`a = ⌊(14-month)/12⌋`, `y = year+4800-a`,
/// `m = month+12a-3`) and adds the fraction of day counted from noon.
///
/// Arguments
/// ---------
/// * `year`: proleptic Gregorian year
/// * `month`: month in 1..=12
/// * `day`: day of month
/// * `hour_decimal`: UTC time of day in decimal hours (minutes and seconds included)
///
/// Return
/// ------
/// * the continuous Julian Date
pub fn julian_date(year: i32, month: u8, day: u8, hour_decimal: f64) -> JulianDate {
    let year = i64::from(year);
    let month = i64::from(month);
    let day = i64::from(day);

    let a = (14 - month).div_euclid(12);
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;

    let jdn = day + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - y.div_euclid(100)
        + y.div_euclid(400)
        - 32045;

    jdn as f64 + (hour_decimal - 12.0) / 24.0
}

/// Julian centuries elapsed since J2000.0
pub fn centuries_since_j2000(jd: JulianDate) -> Centuries {
    (jd - J2000_JD) / JULIAN_CENTURY
}

/// Compute the Greenwich Mean Sidereal Time in degrees, normalized to `[0, 360)`.
///
/// Polynomial in days and Julian centuries since J2000.0:
/// `280.46061837 + 360.98564736629·d + 0.000387933·T² − T³/38710000`.
pub fn greenwich_mean_sidereal_time(jd: JulianDate) -> Degree {
    let d = jd - J2000_JD;
    let t = centuries_since_j2000(jd);

    let gmst = GMST_C0 + GMST_C1 * d + GMST_C2 * t * t - t * t * t / GMST_C3;
    normalize_degrees(gmst)
}

/// Compute the Local Sidereal Time.
///
/// Arguments
/// ---------
/// * `jd`: Julian Date (UTC)
/// * `longitude`: observer longitude in degrees, east positive; any finite value is
///   accepted, values differing by 360° give the same result
///
/// Return
/// ------
/// * the local sidereal time in hours, in `[0, 24)`
pub fn local_sidereal_time(jd: JulianDate, longitude: Degree) -> Hour {
    let lst = normalize_degrees(greenwich_mean_sidereal_time(jd) + longitude);
    normalize_hours(lst / DEG_PER_HOUR)
}

/// A UTC calendar instant supplied by the caller for one sky evaluation.
///
/// The calendar fields feed the Julian Date formula directly; the matching
/// [`hifitime::Epoch`] is kept for arithmetic (offsets, Unix time). Both are set
/// together by the constructors and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservationInstant {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    nanos: u32,
    epoch: Epoch,
}

impl ObservationInstant {
    /// Build an instant from UTC calendar fields.
    ///
    /// Return
    /// ------
    /// * the instant, or [`SkyError::InvalidInstant`] if the fields do not form a valid
    ///   Gregorian date/time (month 13, February 30th, hour 24, ...)
    pub fn from_gregorian_utc(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanos: u32,
    ) -> Result<Self, SkyError> {
        let epoch = Epoch::maybe_from_gregorian_utc(year, month, day, hour, minute, second, nanos)
            .map_err(|e| {
                SkyError::InvalidInstant(format!(
                    "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}: {e}"
                ))
            })?;

        Ok(ObservationInstant {
            year,
            month,
            day,
            hour,
            minute,
            second,
            nanos,
            epoch,
        })
    }

    /// Build an instant from local wall-clock fields and the local UTC offset.
    ///
    /// `utc_offset_minutes` is positive east of Greenwich (e.g. `+120` for UTC+02:00).
    #[allow(clippy::too_many_arguments)]
    pub fn from_local(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanos: u32,
        utc_offset_minutes: i32,
    ) -> Result<Self, SkyError> {
        let local = Self::from_gregorian_utc(year, month, day, hour, minute, second, nanos)?;
        Ok(local.plus_minutes(-f64::from(utc_offset_minutes)))
    }

    /// Convert any [`hifitime::Epoch`] into its UTC calendar instant.
    pub fn from_epoch(epoch: Epoch) -> Self {
        let (year, month, day, hour, minute, second, nanos) = epoch.to_gregorian_utc();
        ObservationInstant {
            year,
            month,
            day,
            hour,
            minute,
            second,
            nanos,
            epoch,
        }
    }

    /// Instant from seconds since the Unix epoch (the live-feed timestamp format).
    pub fn from_unix_seconds(seconds: f64) -> Self {
        Self::from_epoch(Epoch::from_unix_seconds(seconds))
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    pub fn nanos(&self) -> u32 {
        self.nanos
    }

    /// Shift the instant by a (possibly fractional, possibly negative) number of minutes.
    ///
    /// Used by time-lapse playback: `base.plus_minutes(elapsed_minutes)`.
    pub fn plus_minutes(&self, minutes: f64) -> Self {
        Self::from_epoch(self.epoch + Unit::Minute * minutes)
    }

    /// UTC time of day in decimal hours, fractional seconds included.
    pub fn hour_decimal(&self) -> f64 {
        let seconds = f64::from(self.second) + f64::from(self.nanos) * 1e-9;
        f64::from(self.hour) + f64::from(self.minute) / 60.0 + seconds / 3600.0
    }

    pub fn julian_date(&self) -> JulianDate {
        julian_date(self.year, self.month, self.day, self.hour_decimal())
    }

    pub fn centuries_since_j2000(&self) -> Centuries {
        centuries_since_j2000(self.julian_date())
    }
}

impl FromStr for ObservationInstant {
    type Err = SkyError;

    /// Parse an ISO-8601 timestamp such as `2024-03-20T12:00:00` (UTC unless a time
    /// scale suffix says otherwise).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let epoch = Epoch::from_str(s.trim())?;
        Ok(Self::from_epoch(epoch))
    }
}

impl std::fmt::Display for ObservationInstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02} UTC",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}
