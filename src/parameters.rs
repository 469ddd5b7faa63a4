use crate::error::PrayerError;
use crate::high_latitude::SeasonalAdjustment;
use crate::method::CalculationMethod;
use crate::types::{
    Coordinates, HighLatitudeRule, IshaRule, Madhab, NightPortions, PrayerAdjustments, Rounding,
    Shafaq,
};

/// Longest accepted Isha interval, one day.
pub const MAX_ISHA_INTERVAL_MINUTES: i64 = 1440;

fn check_angle(name: &'static str, value: f64) -> Result<f64, PrayerError> {
    if value.is_finite() && (0.0..90.0).contains(&value) {
        Ok(value)
    } else {
        Err(PrayerError::InvalidAngle { name, value })
    }
}

fn check_isha(isha: IshaRule) -> Result<IshaRule, PrayerError> {
    match isha {
        IshaRule::Angle(angle) => check_angle("isha", angle).map(IshaRule::Angle),
        IshaRule::Interval(minutes) => {
            if minutes == 0 || i64::from(minutes) > MAX_ISHA_INTERVAL_MINUTES {
                Err(PrayerError::InvalidIshaInterval(i64::from(minutes)))
            } else {
                Ok(isha)
            }
        }
    }
}

/// Everything that varies between calculation methods.
///
/// Values are immutable; each `with_*` method returns a copy with one
/// field replaced.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CalculationParametersDe"))]
pub struct CalculationParameters {
    method: CalculationMethod,
    fajr_angle: f64,
    maghrib_angle: f64,
    isha: IshaRule,
    madhab: Madhab,
    high_latitude_rule: Option<HighLatitudeRule>,
    method_adjustments: PrayerAdjustments,
    adjustments: PrayerAdjustments,
    rounding: Rounding,
    shafaq: Shafaq,
    seasonal_adjustment: Option<SeasonalAdjustment>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct CalculationParametersDe {
    method: CalculationMethod,
    fajr_angle: f64,
    maghrib_angle: f64,
    isha: IshaRule,
    madhab: Madhab,
    high_latitude_rule: Option<HighLatitudeRule>,
    method_adjustments: PrayerAdjustments,
    adjustments: PrayerAdjustments,
    rounding: Rounding,
    shafaq: Shafaq,
    #[serde(default)]
    seasonal_adjustment: Option<SeasonalAdjustment>,
}

#[cfg(feature = "serde")]
impl TryFrom<CalculationParametersDe> for CalculationParameters {
    type Error = PrayerError;

    fn try_from(raw: CalculationParametersDe) -> Result<Self, Self::Error> {
        Ok(Self {
            method: raw.method,
            fajr_angle: check_angle("fajr", raw.fajr_angle)?,
            maghrib_angle: check_angle("maghrib", raw.maghrib_angle)?,
            isha: check_isha(raw.isha)?,
            madhab: raw.madhab,
            high_latitude_rule: raw.high_latitude_rule,
            method_adjustments: raw.method_adjustments,
            adjustments: raw.adjustments,
            rounding: raw.rounding,
            shafaq: raw.shafaq,
            seasonal_adjustment: raw.seasonal_adjustment,
        })
    }
}

impl CalculationParameters {
    /// Custom parameters tagged [`CalculationMethod::Other`].
    pub fn new(fajr_angle: f64, isha: IshaRule) -> Result<Self, PrayerError> {
        Ok(Self {
            method: CalculationMethod::Other,
            fajr_angle: check_angle("fajr", fajr_angle)?,
            maghrib_angle: 0.0,
            isha: check_isha(isha)?,
            madhab: Madhab::default(),
            high_latitude_rule: None,
            method_adjustments: PrayerAdjustments::default(),
            adjustments: PrayerAdjustments::default(),
            rounding: Rounding::default(),
            shafaq: Shafaq::default(),
            seasonal_adjustment: None,
        })
    }

    /// Preset values from the method table, which are known to be in range.
    pub(crate) fn preset(
        method: CalculationMethod,
        fajr_angle: f64,
        maghrib_angle: f64,
        isha: IshaRule,
    ) -> Self {
        Self {
            method,
            fajr_angle,
            maghrib_angle,
            isha,
            madhab: Madhab::default(),
            high_latitude_rule: None,
            method_adjustments: PrayerAdjustments::default(),
            adjustments: PrayerAdjustments::default(),
            rounding: Rounding::default(),
            shafaq: Shafaq::default(),
            seasonal_adjustment: None,
        }
    }

    pub fn from_angles(fajr_angle: f64, isha_angle: f64) -> Result<Self, PrayerError> {
        Self::new(fajr_angle, IshaRule::Angle(isha_angle))
    }

    pub fn from_interval(fajr_angle: f64, isha_interval: i64) -> Result<Self, PrayerError> {
        let minutes = u32::try_from(isha_interval)
            .map_err(|_| PrayerError::InvalidIshaInterval(isha_interval))?;
        Self::new(fajr_angle, IshaRule::Interval(minutes))
    }

    pub fn method(&self) -> CalculationMethod {
        self.method
    }

    pub fn fajr_angle(&self) -> f64 {
        self.fajr_angle
    }

    /// Depression angle for Maghrib; `0.0` means geometric sunset.
    pub fn maghrib_angle(&self) -> f64 {
        self.maghrib_angle
    }

    pub fn isha(&self) -> IshaRule {
        self.isha
    }

    /// Isha angle, or `0.0` when Isha is interval based.
    pub fn isha_angle(&self) -> f64 {
        match self.isha {
            IshaRule::Angle(angle) => angle,
            IshaRule::Interval(_) => 0.0,
        }
    }

    pub fn isha_interval(&self) -> Option<u32> {
        match self.isha {
            IshaRule::Angle(_) => None,
            IshaRule::Interval(minutes) => Some(minutes),
        }
    }

    pub fn madhab(&self) -> Madhab {
        self.madhab
    }

    pub fn high_latitude_rule(&self) -> Option<HighLatitudeRule> {
        self.high_latitude_rule
    }

    pub fn method_adjustments(&self) -> PrayerAdjustments {
        self.method_adjustments
    }

    pub fn adjustments(&self) -> PrayerAdjustments {
        self.adjustments
    }

    /// Method and user adjustments summed.
    pub fn total_adjustments(&self) -> PrayerAdjustments {
        self.method_adjustments + self.adjustments
    }

    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    pub fn shafaq(&self) -> Shafaq {
        self.shafaq
    }

    /// Twilight tables set with [`Self::with_seasonal_adjustment`], if any.
    pub fn seasonal_adjustment(&self) -> Option<SeasonalAdjustment> {
        self.seasonal_adjustment
    }

    /// Seasonal bounds the solver applies: the configured tables, else the
    /// published ones for the Moonsighting Committee method, else none.
    pub fn resolved_seasonal_adjustment(&self) -> Option<SeasonalAdjustment> {
        match self.seasonal_adjustment {
            Some(adjustment) => Some(adjustment),
            None if self.method == CalculationMethod::MoonsightingCommittee => {
                Some(SeasonalAdjustment::new(self.shafaq))
            }
            None => None,
        }
    }

    /// The configured rule, or the one recommended for `coordinates`.
    pub fn resolved_high_latitude_rule(&self, coordinates: &Coordinates) -> HighLatitudeRule {
        self.high_latitude_rule
            .unwrap_or_else(|| HighLatitudeRule::recommended(coordinates))
    }

    pub fn night_portions(&self, coordinates: &Coordinates) -> NightPortions {
        self.resolved_high_latitude_rule(coordinates)
            .night_portions(self.fajr_angle, self.isha_angle())
    }

    pub fn with_method(self, method: CalculationMethod) -> Self {
        Self { method, ..self }
    }

    pub fn with_fajr_angle(self, fajr_angle: f64) -> Result<Self, PrayerError> {
        Ok(Self {
            fajr_angle: check_angle("fajr", fajr_angle)?,
            ..self
        })
    }

    pub fn with_maghrib_angle(self, maghrib_angle: f64) -> Result<Self, PrayerError> {
        Ok(Self {
            maghrib_angle: check_angle("maghrib", maghrib_angle)?,
            ..self
        })
    }

    pub fn with_isha(self, isha: IshaRule) -> Result<Self, PrayerError> {
        Ok(Self {
            isha: check_isha(isha)?,
            ..self
        })
    }

    pub fn with_madhab(self, madhab: Madhab) -> Self {
        Self { madhab, ..self }
    }

    pub fn with_high_latitude_rule(self, rule: HighLatitudeRule) -> Self {
        Self {
            high_latitude_rule: Some(rule),
            ..self
        }
    }

    pub fn with_method_adjustments(self, method_adjustments: PrayerAdjustments) -> Self {
        Self {
            method_adjustments,
            ..self
        }
    }

    pub fn with_adjustments(self, adjustments: PrayerAdjustments) -> Self {
        Self {
            adjustments,
            ..self
        }
    }

    pub fn with_rounding(self, rounding: Rounding) -> Self {
        Self { rounding, ..self }
    }

    pub fn with_shafaq(self, shafaq: Shafaq) -> Self {
        Self { shafaq, ..self }
    }

    pub fn with_seasonal_adjustment(self, seasonal_adjustment: SeasonalAdjustment) -> Self {
        Self {
            seasonal_adjustment: Some(seasonal_adjustment),
            ..self
        }
    }
}

impl Default for CalculationParameters {
    fn default() -> Self {
        CalculationMethod::MuslimWorldLeague.parameters()
    }
}
