use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};

use crate::calendar::CalendarDate;
use crate::high_latitude::{safe_fajr, safe_isha, SEASONAL_SEVENTH_LATITUDE};
use crate::parameters::CalculationParameters;
use crate::solar_time::SolarTime;
use crate::types::{Coordinates, IshaRule, Prayer, PrayerAdjustments, Rounding};

/// Instant `hours` after `midnight`, truncated to whole seconds.
///
/// `None` for NaN or infinite hours, which is how the solar solver
/// reports an altitude the sun never reaches.
pub fn time_from_hours(midnight: DateTime<Utc>, hours: f64) -> Option<DateTime<Utc>> {
    if !hours.is_finite() {
        return None;
    }
    let h = hours.floor();
    let m = ((hours - h) * 60.0).floor();
    let s = ((hours - (h + m / 60.0)) * 3600.0).floor();
    let seconds = (h * 3600.0 + m * 60.0 + s) as i64;
    midnight.checked_add_signed(Duration::seconds(seconds))
}

/// Rounds an instant to a whole minute. Sub-second precision is always
/// dropped first.
pub fn round_minute(instant: DateTime<Utc>, rounding: Rounding) -> DateTime<Utc> {
    let seconds = instant.timestamp();
    let second = seconds.rem_euclid(60);
    let minute_start = seconds - second;
    let rounded = match rounding {
        Rounding::Nearest if second >= 30 => minute_start + 60,
        Rounding::Nearest => minute_start,
        Rounding::Up if second > 0 => minute_start + 60,
        Rounding::Up => minute_start,
        Rounding::None => seconds,
    };
    DateTime::from_timestamp(rounded, 0).unwrap_or(instant)
}

/// The six prayer instants for one date and place, in UTC.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrayerTimes {
    coordinates: Coordinates,
    date: CalendarDate,
    parameters: CalculationParameters,
    fajr: DateTime<Utc>,
    sunrise: DateTime<Utc>,
    dhuhr: DateTime<Utc>,
    asr: DateTime<Utc>,
    maghrib: DateTime<Utc>,
    isha: DateTime<Utc>,
}

impl PrayerTimes {
    /// Solves the prayer times for `date` at `coordinates`.
    ///
    /// Returns `None` when sunrise, sunset or Asr cannot be resolved
    /// (continuous polar day or night), or when adjustments leave the
    /// prayers out of order.
    pub fn new(
        coordinates: Coordinates,
        date: CalendarDate,
        parameters: CalculationParameters,
    ) -> Option<Self> {
        let tomorrow = date.next_day();
        let midnight = date.midnight_utc()?;
        let tomorrow_midnight = tomorrow.midnight_utc()?;

        let solar_time = SolarTime::new(date, coordinates);
        let tomorrow_solar_time = SolarTime::new(tomorrow, coordinates);

        let (Some(transit), Some(sunrise), Some(sunset), Some(tomorrow_sunrise)) = (
            time_from_hours(midnight, solar_time.transit),
            time_from_hours(midnight, solar_time.sunrise),
            time_from_hours(midnight, solar_time.sunset),
            time_from_hours(tomorrow_midnight, tomorrow_solar_time.sunrise),
        ) else {
            debug!("no sunrise or sunset on {date} at {coordinates:?}");
            return None;
        };

        let Some(asr) = time_from_hours(
            midnight,
            solar_time.afternoon(parameters.madhab().shadow_length()),
        ) else {
            debug!("asr shadow length unreachable on {date}");
            return None;
        };

        let night = tomorrow_sunrise - sunset;
        let latitude = coordinates.latitude();
        let seasonal = parameters.resolved_seasonal_adjustment();
        let seventh_of_night = seasonal.is_some() && latitude.abs() > SEASONAL_SEVENTH_LATITUDE;
        let portions = parameters.night_portions(&coordinates);

        let mut fajr = time_from_hours(
            midnight,
            solar_time.hour_angle(-parameters.fajr_angle(), false),
        );
        if seventh_of_night {
            fajr = Some(safe_fajr(sunrise, night, 1.0 / 7.0));
        }
        let fajr_bound = match &seasonal {
            Some(adjustment) => {
                adjustment.morning_twilight(latitude, date.day_of_year(), date.year(), sunrise)
            }
            None => safe_fajr(sunrise, night, portions.fajr),
        };
        let fajr = match fajr {
            Some(fajr) if fajr >= fajr_bound => fajr,
            _ => {
                debug!("fajr on {date} replaced by high-latitude bound {fajr_bound}");
                fajr_bound
            }
        };

        let angle_maghrib = if parameters.maghrib_angle() > 0.0 {
            time_from_hours(
                midnight,
                solar_time.hour_angle(-parameters.maghrib_angle(), true),
            )
            .filter(|&angle_maghrib| angle_maghrib > sunset)
        } else {
            None
        };

        let (maghrib, isha) = match parameters.isha() {
            IshaRule::Interval(minutes) => {
                let maghrib = angle_maghrib.unwrap_or(sunset);
                (maghrib, maghrib + Duration::minutes(i64::from(minutes)))
            }
            IshaRule::Angle(angle) => {
                let mut isha = time_from_hours(midnight, solar_time.hour_angle(-angle, true));
                if seventh_of_night {
                    isha = Some(safe_isha(sunset, night, 1.0 / 7.0));
                }
                let isha_bound = match &seasonal {
                    Some(adjustment) => adjustment.evening_twilight(
                        latitude,
                        date.day_of_year(),
                        date.year(),
                        sunset,
                    ),
                    None => safe_isha(sunset, night, portions.isha),
                };
                let isha = match isha {
                    Some(isha) if isha <= isha_bound => isha,
                    _ => {
                        debug!("isha on {date} replaced by high-latitude bound {isha_bound}");
                        isha_bound
                    }
                };
                // Maghrib by angle only when it still falls before Isha.
                let maghrib = angle_maghrib
                    .filter(|&angle_maghrib| angle_maghrib < isha)
                    .unwrap_or(sunset);
                (maghrib, isha)
            }
        };

        let adjustments = parameters.total_adjustments();
        let rounding = parameters.rounding();
        let finish = |instant: DateTime<Utc>, prayer: Prayer| {
            let adjusted = instant + Duration::minutes(i64::from(adjustments.minutes(prayer)));
            round_minute(adjusted, rounding)
        };

        let times = Self {
            coordinates,
            date,
            parameters,
            fajr: finish(fajr, Prayer::Fajr),
            sunrise: finish(sunrise, Prayer::Sunrise),
            dhuhr: finish(transit, Prayer::Dhuhr),
            asr: finish(asr, Prayer::Asr),
            maghrib: finish(maghrib, Prayer::Maghrib),
            isha: finish(isha, Prayer::Isha),
        };

        if !times.is_ordered() {
            warn!(
                "prayer times for {date} are out of order after adjustments {:?}",
                adjustments
            );
            return None;
        }
        Some(times)
    }

    fn is_ordered(&self) -> bool {
        let ordered = Prayer::ALL.map(|prayer| self.time(prayer));
        ordered.windows(2).all(|pair| pair[0] < pair[1])
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn date(&self) -> CalendarDate {
        self.date
    }

    pub fn parameters(&self) -> CalculationParameters {
        self.parameters
    }

    pub fn fajr(&self) -> DateTime<Utc> {
        self.fajr
    }

    pub fn sunrise(&self) -> DateTime<Utc> {
        self.sunrise
    }

    pub fn dhuhr(&self) -> DateTime<Utc> {
        self.dhuhr
    }

    pub fn asr(&self) -> DateTime<Utc> {
        self.asr
    }

    pub fn maghrib(&self) -> DateTime<Utc> {
        self.maghrib
    }

    pub fn isha(&self) -> DateTime<Utc> {
        self.isha
    }

    pub fn time(&self, prayer: Prayer) -> DateTime<Utc> {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    /// Solves the following date with the same place and parameters.
    pub fn next_day(&self) -> Option<PrayerTimes> {
        PrayerTimes::new(self.coordinates, self.date.next_day(), self.parameters)
    }

    /// The same day re-solved with extra user adjustments on top of the
    /// current ones.
    pub fn adjusted(&self, extra: PrayerAdjustments) -> Option<PrayerTimes> {
        let parameters = self
            .parameters
            .with_adjustments(self.parameters.adjustments() + extra);
        PrayerTimes::new(self.coordinates, self.date, parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn hours_are_truncated_to_seconds() {
        let midnight = at(0);
        let t = time_from_hours(midnight, 1.0 + 30.0 / 60.0 + 15.9 / 3600.0).unwrap();
        assert_eq!(t.timestamp(), 3600 + 30 * 60 + 15);
        assert!(time_from_hours(midnight, f64::NAN).is_none());
        assert_eq!(time_from_hours(midnight, -0.5).unwrap().timestamp(), -1800);
    }

    #[test]
    fn rounding_policies() {
        let t = at(60 * 100 + 29);
        assert_eq!(round_minute(t, Rounding::Nearest).timestamp(), 6000);
        assert_eq!(round_minute(t, Rounding::Up).timestamp(), 6060);
        assert_eq!(round_minute(t, Rounding::None).timestamp(), 6029);
        let half = at(60 * 100 + 30);
        assert_eq!(round_minute(half, Rounding::Nearest).timestamp(), 6060);
        let exact = at(6000);
        assert_eq!(round_minute(exact, Rounding::Up), exact);
    }
}
