use thiserror::Error;

/// Invalid input rejected at construction time.
///
/// Geometry that cannot be resolved (polar day or night beyond what the
/// high-latitude rule covers) is not an error: the solvers return `None`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrayerError {
    #[error("latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f64),

    #[error("{year:04}-{month:02}-{day:02} is not a valid Gregorian date")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("{name} angle {value} must be finite and in [0, 90)")]
    InvalidAngle { name: &'static str, value: f64 },

    #[error("isha interval of {0} minutes must be in 1..=1440")]
    InvalidIshaInterval(i64),
}
