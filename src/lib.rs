pub mod angles;
pub mod calendar;
pub mod error;
pub mod high_latitude;
pub mod method;
pub mod parameters;
pub mod prayer_times;
pub mod solar;
pub mod solar_time;
pub mod sunnah;
pub mod timetable;
pub mod types;

pub use calendar::{julian_century, julian_day, leap_year, CalendarDate};

pub use error::PrayerError;

pub use high_latitude::{days_since_solstice, SeasonalAdjustment, TwilightTable};

pub use method::CalculationMethod;

pub use parameters::CalculationParameters;

pub use prayer_times::{round_minute, PrayerTimes};

pub use solar::SolarCoordinates;

pub use solar_time::SolarTime;

pub use sunnah::SunnahTimes;

pub use timetable::{DayEntry, Timetable, TimetableConfig};

pub use types::{
    Coordinates, HighLatitudeRule, IshaRule, Madhab, NightPortions, Prayer, PrayerAdjustments,
    Rounding, Shafaq,
};
