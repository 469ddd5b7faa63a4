//! Preset parameter bundles for the published calculation methods.

use crate::parameters::CalculationParameters;
use crate::types::{IshaRule, PrayerAdjustments, Rounding};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CalculationMethod {
    Karachi,
    NorthAmerica,
    MuslimWorldLeague,
    UmmAlQura,
    Egyptian,
    Dubai,
    Kuwait,
    Qatar,
    Singapore,
    Algerian,
    France,
    Russia,
    Tunisia,
    Turkey,
    Morocco,
    Jordan,
    Oman,
    Munich,
    Maldives,
    NorthAmericaCanada,
    Tajikistan,
    Vienna,
    Belgium,
    Sudan,
    Libya,
    Iraq,
    Luxembourg,
    Tehran,
    MoonsightingCommittee,
    Other,
}

impl CalculationMethod {
    /// All methods, ordered by numeric code.
    pub const ALL: [CalculationMethod; 30] = [
        CalculationMethod::Karachi,
        CalculationMethod::NorthAmerica,
        CalculationMethod::MuslimWorldLeague,
        CalculationMethod::UmmAlQura,
        CalculationMethod::Egyptian,
        CalculationMethod::Dubai,
        CalculationMethod::Kuwait,
        CalculationMethod::Qatar,
        CalculationMethod::Singapore,
        CalculationMethod::Algerian,
        CalculationMethod::France,
        CalculationMethod::Russia,
        CalculationMethod::Tunisia,
        CalculationMethod::Turkey,
        CalculationMethod::Morocco,
        CalculationMethod::Jordan,
        CalculationMethod::Oman,
        CalculationMethod::Munich,
        CalculationMethod::Maldives,
        CalculationMethod::NorthAmericaCanada,
        CalculationMethod::Tajikistan,
        CalculationMethod::Vienna,
        CalculationMethod::Belgium,
        CalculationMethod::Sudan,
        CalculationMethod::Libya,
        CalculationMethod::Iraq,
        CalculationMethod::Luxembourg,
        CalculationMethod::Tehran,
        CalculationMethod::MoonsightingCommittee,
        CalculationMethod::Other,
    ];

    pub fn code(&self) -> i32 {
        Self::ALL
            .iter()
            .position(|m| m == self)
            .map_or(0, |idx| idx as i32 + 1)
    }

    /// Method for a numeric code; unknown codes give Muslim World League.
    pub fn from_code(code: i32) -> Self {
        usize::try_from(code - 1)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
            .unwrap_or(CalculationMethod::MuslimWorldLeague)
    }

    pub fn parameters(&self) -> CalculationParameters {
        use CalculationMethod::*;

        let dhuhr_plus_one = PrayerAdjustments {
            dhuhr: 1,
            ..Default::default()
        };

        match self {
            MuslimWorldLeague | Other => preset(*self, 18.0, IshaRule::Angle(17.0))
                .with_method_adjustments(dhuhr_plus_one),
            Egyptian => preset(*self, 19.5, IshaRule::Angle(17.5))
                .with_method_adjustments(dhuhr_plus_one),
            Karachi => preset(*self, 18.0, IshaRule::Angle(18.0))
                .with_method_adjustments(dhuhr_plus_one),
            UmmAlQura => preset(*self, 18.5, IshaRule::Interval(90)),
            Dubai => preset(*self, 18.2, IshaRule::Angle(18.2)).with_method_adjustments(
                PrayerAdjustments {
                    sunrise: -3,
                    dhuhr: 3,
                    asr: 3,
                    maghrib: 3,
                    ..Default::default()
                },
            ),
            MoonsightingCommittee => preset(*self, 18.0, IshaRule::Angle(18.0))
                .with_method_adjustments(PrayerAdjustments {
                    dhuhr: 5,
                    maghrib: 3,
                    ..Default::default()
                }),
            NorthAmerica => preset(*self, 15.0, IshaRule::Angle(15.0))
                .with_method_adjustments(dhuhr_plus_one),
            NorthAmericaCanada => preset(*self, 13.0, IshaRule::Angle(13.0))
                .with_method_adjustments(dhuhr_plus_one),
            Kuwait => preset(*self, 18.0, IshaRule::Angle(17.5)),
            Qatar => preset(*self, 18.0, IshaRule::Interval(90)),
            Singapore => preset(*self, 20.0, IshaRule::Angle(18.0))
                .with_method_adjustments(dhuhr_plus_one)
                .with_rounding(Rounding::Up),
            Tehran => CalculationParameters::preset(*self, 17.7, 4.5, IshaRule::Angle(14.0)),
            Turkey => preset(*self, 18.0, IshaRule::Angle(17.0)).with_method_adjustments(
                PrayerAdjustments {
                    sunrise: -7,
                    dhuhr: 5,
                    asr: 4,
                    maghrib: 7,
                    ..Default::default()
                },
            ),
            France => preset(*self, 12.0, IshaRule::Angle(12.0)),
            Russia => preset(*self, 16.0, IshaRule::Angle(15.0)),
            Tunisia => preset(*self, 18.0, IshaRule::Angle(18.0)),
            Jordan | Oman => preset(*self, 18.5, IshaRule::Interval(90)),
            Sudan | Libya => preset(*self, 19.5, IshaRule::Angle(17.5)),
            Algerian | Morocco | Munich | Maldives | Tajikistan | Vienna | Belgium | Iraq
            | Luxembourg => preset(*self, 18.0, IshaRule::Angle(17.0)),
        }
    }
}

fn preset(method: CalculationMethod, fajr_angle: f64, isha: IshaRule) -> CalculationParameters {
    CalculationParameters::preset(method, fajr_angle, 0.0, isha)
}
