use std::ops::RangeInclusive;

use chrono::{DateTime, Duration, Utc};
use log::debug;

use crate::prayer_times::{round_minute, PrayerTimes};
use crate::types::Rounding;

const DUHA_START_AFTER_SUNRISE: i64 = 20;
const DUHA_END_BEFORE_DHUHR: i64 = 10;
const WITR_END_BEFORE_FAJR: i64 = 5;

/// Night divisions and voluntary prayer windows derived from one day's
/// prayer times and the next day's Fajr.
///
/// Every instant is rounded to the nearest minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SunnahTimes {
    first_third_of_the_night: DateTime<Utc>,
    middle_of_the_night: DateTime<Utc>,
    last_third_of_the_night: DateTime<Utc>,
    sunrise: DateTime<Utc>,
    first_time_of_duha: DateTime<Utc>,
    last_time_of_duha: DateTime<Utc>,
    first_time_of_witr: DateTime<Utc>,
    last_time_of_witr: DateTime<Utc>,
}

impl SunnahTimes {
    /// `None` when the following day cannot be solved with the same
    /// coordinates and parameters.
    pub fn new(prayer_times: &PrayerTimes) -> Option<Self> {
        let next_day = prayer_times.next_day()?;
        Self::from_days(prayer_times, &next_day)
    }

    /// Derives the times from an already-solved following day.
    ///
    /// `None` unless `tomorrow` is the day after `today`, solved for the
    /// same coordinates and parameters.
    pub fn from_days(today: &PrayerTimes, tomorrow: &PrayerTimes) -> Option<Self> {
        if tomorrow.date() != today.date().next_day()
            || tomorrow.coordinates() != today.coordinates()
            || tomorrow.parameters() != today.parameters()
        {
            debug!("{} does not follow {}", tomorrow.date(), today.date());
            return None;
        }

        let maghrib = today.maghrib();
        let next_fajr = tomorrow.fajr();
        let night = next_fajr - maghrib;
        let round = |instant: DateTime<Utc>| round_minute(instant, Rounding::Nearest);

        Some(Self {
            first_third_of_the_night: round(maghrib + night / 3),
            middle_of_the_night: round(maghrib + night / 2),
            last_third_of_the_night: round(maghrib + (night * 2) / 3),
            sunrise: round(today.sunrise()),
            first_time_of_duha: round(today.sunrise() + Duration::minutes(DUHA_START_AFTER_SUNRISE)),
            last_time_of_duha: round(today.dhuhr() - Duration::minutes(DUHA_END_BEFORE_DHUHR)),
            first_time_of_witr: round(today.isha()),
            last_time_of_witr: round(next_fajr - Duration::minutes(WITR_END_BEFORE_FAJR)),
        })
    }

    pub fn first_third_of_the_night(&self) -> DateTime<Utc> {
        self.first_third_of_the_night
    }

    pub fn middle_of_the_night(&self) -> DateTime<Utc> {
        self.middle_of_the_night
    }

    pub fn last_third_of_the_night(&self) -> DateTime<Utc> {
        self.last_third_of_the_night
    }

    pub fn sunrise(&self) -> DateTime<Utc> {
        self.sunrise
    }

    pub fn first_time_of_duha(&self) -> DateTime<Utc> {
        self.first_time_of_duha
    }

    pub fn last_time_of_duha(&self) -> DateTime<Utc> {
        self.last_time_of_duha
    }

    /// When Isha begins, not when it has been prayed.
    pub fn first_time_of_witr(&self) -> DateTime<Utc> {
        self.first_time_of_witr
    }

    /// Five minutes before the next Fajr.
    pub fn last_time_of_witr(&self) -> DateTime<Utc> {
        self.last_time_of_witr
    }

    pub fn duha_range(&self) -> RangeInclusive<DateTime<Utc>> {
        self.first_time_of_duha..=self.last_time_of_duha
    }

    pub fn is_duha_time(&self, now: DateTime<Utc>) -> bool {
        self.duha_range().contains(&now)
    }
}
