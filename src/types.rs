use std::ops::{Add, AddAssign};

use crate::error::PrayerError;

/// A validated point on the Earth's surface, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CoordinatesDe"))]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
    altitude: Option<f64>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct CoordinatesDe {
    latitude: f64,
    longitude: f64,
    altitude: Option<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<CoordinatesDe> for Coordinates {
    type Error = PrayerError;

    fn try_from(raw: CoordinatesDe) -> Result<Self, Self::Error> {
        let coordinates = Coordinates::new(raw.latitude, raw.longitude)?;
        Ok(match raw.altitude {
            Some(altitude) => coordinates.with_altitude(altitude),
            None => coordinates,
        })
    }
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, PrayerError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(PrayerError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(PrayerError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
            altitude: None,
        })
    }

    /// Attaches an altitude in metres. It is carried along with the
    /// location and does not change the computed times.
    pub fn with_altitude(self, altitude: f64) -> Self {
        Self {
            altitude: Some(altitude),
            ..self
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn altitude(&self) -> Option<f64> {
        self.altitude
    }
}

/// Juristic school, which sets the Asr shadow length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Madhab {
    #[default]
    Shafi,
    Hanafi,
}

impl Madhab {
    pub fn shadow_length(&self) -> f64 {
        match self {
            Madhab::Shafi => 1.0,
            Madhab::Hanafi => 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    #[default]
    Nearest,
    Up,
    None,
}

/// Twilight colour used by the seasonal evening adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shafaq {
    #[default]
    General,
    Ahmer,
    Abyad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HighLatitudeRule {
    MiddleOfTheNight,
    SeventhOfTheNight,
    TwilightAngle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    pub const ALL: [Prayer; 6] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];
}

/// Isha is either a depression angle or a fixed delay after Maghrib.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IshaRule {
    Angle(f64),
    /// Minutes after Maghrib.
    Interval(u32),
}

/// Signed minute offsets per prayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrayerAdjustments {
    pub fajr: i32,
    pub sunrise: i32,
    pub dhuhr: i32,
    pub asr: i32,
    pub maghrib: i32,
    pub isha: i32,
}

impl PrayerAdjustments {
    pub fn minutes(&self, prayer: Prayer) -> i32 {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }
}

impl Add for PrayerAdjustments {
    type Output = PrayerAdjustments;

    fn add(self, rhs: Self) -> Self::Output {
        PrayerAdjustments {
            fajr: self.fajr + rhs.fajr,
            sunrise: self.sunrise + rhs.sunrise,
            dhuhr: self.dhuhr + rhs.dhuhr,
            asr: self.asr + rhs.asr,
            maghrib: self.maghrib + rhs.maghrib,
            isha: self.isha + rhs.isha,
        }
    }
}

impl AddAssign for PrayerAdjustments {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Fractions of the night used to bound Fajr and Isha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NightPortions {
    pub fajr: f64,
    pub isha: f64,
}
