//! Timezone-naive Gregorian calendar arithmetic.
//!
//! Everything here is integer or Julian-day arithmetic so that results do
//! not depend on the host calendar or time zone.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::error::PrayerError;

/// Julian day of the Unix epoch, 1970-01-01 00:00 UTC.
pub const UNIX_EPOCH_JULIAN_DAY: f64 = 2_440_587.5;
/// Julian day of J2000.0, 2000-01-01 12:00 TT.
pub const J2000: f64 = 2_451_545.0;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
pub const SECONDS_PER_DAY: i64 = 86_400;

pub fn leap_year(year: i32) -> bool {
    (year % 400 == 0) || (year % 4 == 0 && year % 100 != 0)
}

pub fn days_in_months(year: i32) -> [u32; 12] {
    [
        31,
        if leap_year(year) { 29 } else { 28 },
        31, 30, 31, 30, 31, 31, 30, 31, 30, 31,
    ]
}

pub fn days_in_year(year: i32) -> u32 {
    if leap_year(year) {
        366
    } else {
        365
    }
}

pub(crate) fn day_of_year(year: i32, month: u32, day: u32) -> u32 {
    let dim = days_in_months(year);
    let sum: u32 = dim[..(month - 1) as usize].iter().sum();
    sum + day
}

/// Julian day for a Gregorian date and fractional UTC hours
/// (Meeus, *Astronomical Algorithms*, p. 60).
pub fn julian_day(year: i32, month: u32, day: u32, hours: f64) -> f64 {
    let (y, m) = if month > 2 {
        (i64::from(year), i64::from(month))
    } else {
        (i64::from(year) - 1, i64::from(month) + 12)
    };
    let d = day as f64 + hours / 24.0;
    let a = y / 100;
    let b = 2 - a + a / 4;
    let i0 = (365.25 * (y as f64 + 4716.0)).trunc();
    let i1 = (30.6001 * (m as f64 + 1.0)).trunc();
    i0 + i1 + d + b as f64 - 1524.5
}

pub fn julian_century(julian_day: f64) -> f64 {
    (julian_day - J2000) / DAYS_PER_JULIAN_CENTURY
}

// Algorithms from http://howardhinnant.github.io/date_algorithms.html
fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year as i64 - 1 } else { year as i64 };
    let era = (if y >= 0 { y } else { y - 399 }) / 400;
    let yoe = y - era * 400;
    let m = month as i64;
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

fn civil_from_days(days_since_epoch: i64) -> (i32, u32, u32) {
    let z = days_since_epoch + 719_468;
    let era = (if z >= 0 { z } else { z - 146_096 }) / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y as i32, m as u32, d as u32)
}

/// A proleptic Gregorian calendar date with no time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CalendarDateDe"))]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct CalendarDateDe {
    year: i32,
    month: u32,
    day: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<CalendarDateDe> for CalendarDate {
    type Error = PrayerError;

    fn try_from(raw: CalendarDateDe) -> Result<Self, Self::Error> {
        CalendarDate::new(raw.year, raw.month, raw.day)
    }
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, PrayerError> {
        let valid = (1..=12).contains(&month)
            && day >= 1
            && day <= days_in_months(year)[(month - 1) as usize];
        if !valid {
            return Err(PrayerError::InvalidDate { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn day_of_year(&self) -> u32 {
        day_of_year(self.year, self.month, self.day)
    }

    /// Julian day at 00:00 UTC of this date.
    pub fn julian_day(&self) -> f64 {
        julian_day(self.year, self.month, self.day, 0.0)
    }

    /// Whole days between 1970-01-01 and this date.
    pub fn days_since_unix_epoch(&self) -> i64 {
        days_from_civil(self.year, self.month, self.day)
    }

    pub fn from_days_since_unix_epoch(days: i64) -> Self {
        let (year, month, day) = civil_from_days(days);
        Self { year, month, day }
    }

    pub fn add_days(&self, days: i64) -> Self {
        Self::from_days_since_unix_epoch(self.days_since_unix_epoch() + days)
    }

    pub fn next_day(&self) -> Self {
        self.add_days(1)
    }

    pub fn previous_day(&self) -> Self {
        self.add_days(-1)
    }

    /// The UTC calendar date an instant falls on.
    pub fn from_utc(instant: &DateTime<Utc>) -> Self {
        Self::from_days_since_unix_epoch(instant.timestamp().div_euclid(SECONDS_PER_DAY))
    }

    /// 00:00 UTC of this date, or `None` outside chrono's representable range.
    pub fn midnight_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.days_since_unix_epoch() * SECONDS_PER_DAY, 0)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl TryFrom<CalendarDate> for NaiveDate {
    type Error = PrayerError;

    fn try_from(date: CalendarDate) -> Result<Self, Self::Error> {
        NaiveDate::from_ymd_opt(date.year, date.month, date.day).ok_or(PrayerError::InvalidDate {
            year: date.year,
            month: date.month,
            day: date.day,
        })
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn civil_days_round_trip() {
        for days in [-719_468, -1, 0, 1, 10_957, 16_628, 2_932_896] {
            let (y, m, d) = civil_from_days(days);
            assert_eq!(days_from_civil(y, m, d), days, "{y}-{m}-{d}");
        }
    }

    #[test]
    fn epoch_is_julian_day_offset() {
        let epoch = CalendarDate::new(1970, 1, 1).unwrap();
        assert_eq!(epoch.days_since_unix_epoch(), 0);
        assert_eq!(epoch.julian_day(), UNIX_EPOCH_JULIAN_DAY);
    }
}
