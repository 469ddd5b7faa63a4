use crate::calendar::{days_in_year, CalendarDate};
use crate::parameters::CalculationParameters;
use crate::prayer_times::PrayerTimes;
use crate::types::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimetableConfig {
    pub coordinates: Coordinates,
    pub start: CalendarDate,
    pub days: u32,
    pub parameters: CalculationParameters,
}

impl TimetableConfig {
    /// Every day of `year`, starting on 1 January.
    pub fn for_year(
        coordinates: Coordinates,
        year: i32,
        parameters: CalculationParameters,
    ) -> Option<Self> {
        Some(Self {
            coordinates,
            start: CalendarDate::new(year, 1, 1).ok()?,
            days: days_in_year(year),
            parameters,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayEntry {
    pub date: CalendarDate,
    pub day_of_year: u32,
    /// `None` on days the geometry cannot be resolved.
    pub times: Option<PrayerTimes>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timetable {
    pub config: TimetableConfig,
    pub days: Vec<DayEntry>,
}

impl Timetable {
    pub fn generate(config: &TimetableConfig) -> Self {
        let days = (0..config.days)
            .map(|offset| {
                let date = config.start.add_days(i64::from(offset));
                DayEntry {
                    date,
                    day_of_year: date.day_of_year(),
                    times: PrayerTimes::new(config.coordinates, date, config.parameters),
                }
            })
            .collect();

        Timetable {
            config: *config,
            days,
        }
    }

    pub fn get(&self, date: CalendarDate) -> Option<&DayEntry> {
        let offset = date.days_since_unix_epoch() - self.config.start.days_since_unix_epoch();
        usize::try_from(offset).ok().and_then(|idx| self.days.get(idx))
    }

    /// Dates on which no prayer times could be solved.
    pub fn unresolved(&self) -> Vec<CalendarDate> {
        self.days
            .iter()
            .filter(|day| day.times.is_none())
            .map(|day| day.date)
            .collect()
    }
}
