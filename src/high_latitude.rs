//! Fallbacks for Fajr and Isha when twilight angles are unreachable or
//! fall implausibly deep into the night.

use chrono::{DateTime, Duration, Utc};

use crate::calendar::{days_in_year, leap_year};
use crate::types::{Coordinates, HighLatitudeRule, NightPortions, Shafaq};

/// Absolute latitude above which [`HighLatitudeRule::recommended`] picks
/// the seventh-of-the-night rule.
pub const RECOMMENDED_SEVENTH_LATITUDE: f64 = 48.0;

/// Latitude above which the seasonal method uses a seventh of the night
/// in place of the twilight angle.
pub const SEASONAL_SEVENTH_LATITUDE: f64 = 55.0;

impl HighLatitudeRule {
    pub fn recommended(coordinates: &Coordinates) -> Self {
        if coordinates.latitude().abs() > RECOMMENDED_SEVENTH_LATITUDE {
            HighLatitudeRule::SeventhOfTheNight
        } else {
            HighLatitudeRule::MiddleOfTheNight
        }
    }

    pub fn night_portions(&self, fajr_angle: f64, isha_angle: f64) -> NightPortions {
        match self {
            HighLatitudeRule::MiddleOfTheNight => NightPortions {
                fajr: 1.0 / 2.0,
                isha: 1.0 / 2.0,
            },
            HighLatitudeRule::SeventhOfTheNight => NightPortions {
                fajr: 1.0 / 7.0,
                isha: 1.0 / 7.0,
            },
            HighLatitudeRule::TwilightAngle => NightPortions {
                fajr: fajr_angle / 60.0,
                isha: isha_angle / 60.0,
            },
        }
    }
}

/// Earliest acceptable Fajr: `portion` of the night before sunrise.
pub fn safe_fajr(sunrise: DateTime<Utc>, night: Duration, portion: f64) -> DateTime<Utc> {
    sunrise - scale(night, portion)
}

/// Latest acceptable Isha: `portion` of the night after sunset.
pub fn safe_isha(sunset: DateTime<Utc>, night: Duration, portion: f64) -> DateTime<Utc> {
    sunset + scale(night, portion)
}

fn scale(duration: Duration, factor: f64) -> Duration {
    let ms = duration.num_milliseconds() as f64 * factor;
    Duration::milliseconds(ms as i64)
}

/// Days since the local winter solstice, shifted so that day 0 falls
/// ten days before the turn of the year in the northern hemisphere.
pub fn days_since_solstice(day_of_year: u32, year: i32, latitude: f64) -> u32 {
    let northern_offset = 10;
    let southern_offset = if leap_year(year) { 173 } else { 172 };
    let year_days = days_in_year(year) as i32;
    let day = day_of_year as i32;

    let days = if latitude >= 0.0 {
        let d = day + northern_offset;
        if d >= year_days {
            d - year_days
        } else {
            d
        }
    } else {
        let d = day - southern_offset;
        if d < 0 {
            d + year_days
        } else {
            d
        }
    };
    days as u32
}

/// Twilight length in minutes at four points of the year, each a base
/// plus a per-degree-of-latitude slope.
///
/// `a` applies at the winter solstice, `b` and `c` on either side of the
/// equinox and `d` at the summer solstice.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwilightTable {
    pub base: f64,
    pub slopes: [f64; 4],
}

impl TwilightTable {
    pub const MORNING: TwilightTable = TwilightTable {
        base: 75.0,
        slopes: [28.65, 19.44, 32.74, 48.10],
    };

    pub const EVENING_GENERAL: TwilightTable = TwilightTable {
        base: 75.0,
        slopes: [25.60, 2.050, -9.210, 6.140],
    };

    pub const EVENING_AHMER: TwilightTable = TwilightTable {
        base: 62.0,
        slopes: [17.40, -7.160, 5.120, 19.44],
    };

    pub const EVENING_ABYAD: TwilightTable = TwilightTable {
        base: 75.0,
        slopes: [25.60, 7.160, 36.84, 81.84],
    };

    pub fn evening(shafaq: Shafaq) -> TwilightTable {
        match shafaq {
            Shafaq::General => Self::EVENING_GENERAL,
            Shafaq::Ahmer => Self::EVENING_AHMER,
            Shafaq::Abyad => Self::EVENING_ABYAD,
        }
    }

    /// Twilight length in minutes for a latitude and a day counted from
    /// the winter solstice.
    pub fn minutes(&self, latitude: f64, days_since_solstice: u32) -> f64 {
        let [a, b, c, d] = self
            .slopes
            .map(|slope| self.base + (slope / 55.0) * latitude.abs());
        let dyy = days_since_solstice as f64;

        if dyy < 91.0 {
            a + (b - a) / 91.0 * dyy
        } else if dyy < 137.0 {
            b + (c - b) / 46.0 * (dyy - 91.0)
        } else if dyy < 183.0 {
            c + (d - c) / 46.0 * (dyy - 137.0)
        } else if dyy < 229.0 {
            d + (c - d) / 46.0 * (dyy - 183.0)
        } else if dyy < 275.0 {
            c + (b - c) / 46.0 * (dyy - 229.0)
        } else {
            b + (a - b) / 91.0 * (dyy - 275.0)
        }
    }
}

/// Seasonal twilight bounds. The Moonsighting Committee method uses the
/// published tables unless the parameters carry their own.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeasonalAdjustment {
    pub morning: TwilightTable,
    pub evening: TwilightTable,
}

impl SeasonalAdjustment {
    pub fn new(shafaq: Shafaq) -> Self {
        Self {
            morning: TwilightTable::MORNING,
            evening: TwilightTable::evening(shafaq),
        }
    }

    pub fn with_tables(morning: TwilightTable, evening: TwilightTable) -> Self {
        Self { morning, evening }
    }

    pub fn morning_twilight(
        &self,
        latitude: f64,
        day_of_year: u32,
        year: i32,
        sunrise: DateTime<Utc>,
    ) -> DateTime<Utc> {
        let dyy = days_since_solstice(day_of_year, year, latitude);
        let minutes = self.morning.minutes(latitude, dyy);
        sunrise - Duration::seconds((minutes * 60.0).round() as i64)
    }

    pub fn evening_twilight(
        &self,
        latitude: f64,
        day_of_year: u32,
        year: i32,
        sunset: DateTime<Utc>,
    ) -> DateTime<Utc> {
        let dyy = days_since_solstice(day_of_year, year, latitude);
        let minutes = self.evening.minutes(latitude, dyy);
        sunset + Duration::seconds((minutes * 60.0).round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solstice_offsets() {
        assert_eq!(days_since_solstice(1, 2015, 40.0), 11);
        assert_eq!(days_since_solstice(356, 2015, 40.0), 1);
        assert_eq!(days_since_solstice(365, 2016, 40.0), 9);
        assert_eq!(days_since_solstice(173, 2015, -40.0), 1);
        assert_eq!(days_since_solstice(1, 2016, -40.0), 194);
    }

    #[test]
    fn table_is_continuous_at_breakpoints() {
        let table = TwilightTable::MORNING;
        for day in [91, 137, 183, 229, 275] {
            let before = table.minutes(45.0, day - 1);
            let at = table.minutes(45.0, day);
            assert!((before - at).abs() < 1.5, "day {day}: {before} vs {at}");
        }
    }

    #[test]
    fn recommended_rule_is_symmetric_about_the_equator() {
        let south = Coordinates::new(-60.0, 0.0).unwrap();
        let north = Coordinates::new(60.0, 0.0).unwrap();
        assert_eq!(
            HighLatitudeRule::recommended(&south),
            HighLatitudeRule::SeventhOfTheNight
        );
        assert_eq!(
            HighLatitudeRule::recommended(&south),
            HighLatitudeRule::recommended(&north)
        );
    }

    #[test]
    fn equator_is_flat() {
        for day in 0..365 {
            assert_eq!(TwilightTable::MORNING.minutes(0.0, day), 75.0);
            assert_eq!(TwilightTable::EVENING_AHMER.minutes(0.0, day), 62.0);
        }
    }
}
