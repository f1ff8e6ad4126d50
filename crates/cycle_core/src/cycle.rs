use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::{add_days, days_between};
use crate::error::CycleConfigError;

/// Days from ovulation to the next period start. Fixed by the model.
pub const LUTEAL_DAYS: i64 = 14;
/// Fertile days preceding ovulation.
pub const FERTILE_DAYS_BEFORE_OVULATION: i64 = 5;
/// Fertile days following ovulation.
pub const FERTILE_DAYS_AFTER_OVULATION: i64 = 1;

/// Point-in-time cycle parameters entered by the user.
///
/// A new period start replaces the whole value; no history of earlier cycles is kept.
/// Construction and deserialization both reject lengths that cannot be segmented.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "StoredCycleConfig", into = "StoredCycleConfig")]
pub struct CycleConfig {
    last_period_date: NaiveDate,
    cycle_length: u32,
    period_length: u32,
    is_pregnant: bool,
    pregnancy_start_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCycleConfig {
    last_period_date: NaiveDate,
    cycle_length: u32,
    period_length: u32,
    #[serde(default)]
    is_pregnant: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pregnancy_start_date: Option<NaiveDate>,
}

impl TryFrom<StoredCycleConfig> for CycleConfig {
    type Error = CycleConfigError;

    fn try_from(stored: StoredCycleConfig) -> Result<Self, Self::Error> {
        let mut config = CycleConfig::new(
            stored.last_period_date,
            stored.cycle_length,
            stored.period_length,
        )?;
        config.is_pregnant = stored.is_pregnant;
        config.pregnancy_start_date = stored.pregnancy_start_date;
        Ok(config)
    }
}

impl From<CycleConfig> for StoredCycleConfig {
    fn from(config: CycleConfig) -> Self {
        Self {
            last_period_date: config.last_period_date,
            cycle_length: config.cycle_length,
            period_length: config.period_length,
            is_pregnant: config.is_pregnant,
            pregnancy_start_date: config.pregnancy_start_date,
        }
    }
}

/// Estimated fertile days, inclusive on both ends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FertileWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FertileWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Distance in days from `start` to `end`.
    pub fn len_days(&self) -> i64 {
        days_between(self.start, self.end)
    }
}

impl CycleConfig {
    pub fn new(
        last_period_date: NaiveDate,
        cycle_length: u32,
        period_length: u32,
    ) -> Result<Self, CycleConfigError> {
        if cycle_length == 0 {
            return Err(CycleConfigError::CycleLengthNotPositive);
        }
        if period_length == 0 {
            return Err(CycleConfigError::PeriodLengthNotPositive);
        }
        if period_length >= cycle_length {
            return Err(CycleConfigError::PeriodNotShorterThanCycle {
                period_length,
                cycle_length,
            });
        }
        Ok(Self {
            last_period_date,
            cycle_length,
            period_length,
            is_pregnant: false,
            pregnancy_start_date: None,
        })
    }

    pub fn with_pregnancy(mut self, start: NaiveDate) -> Self {
        self.is_pregnant = true;
        self.pregnancy_start_date = Some(start);
        self
    }

    pub fn without_pregnancy(mut self) -> Self {
        self.is_pregnant = false;
        self.pregnancy_start_date = None;
        self
    }

    pub fn last_period_date(&self) -> NaiveDate {
        self.last_period_date
    }

    pub fn cycle_length(&self) -> u32 {
        self.cycle_length
    }

    pub fn period_length(&self) -> u32 {
        self.period_length
    }

    pub fn is_pregnant(&self) -> bool {
        self.is_pregnant
    }

    pub fn pregnancy_start_date(&self) -> Option<NaiveDate> {
        self.pregnancy_start_date
    }

    /// Pregnancy start date, only when pregnancy mode is switched on.
    pub fn active_pregnancy(&self) -> Option<NaiveDate> {
        self.pregnancy_start_date.filter(|_| self.is_pregnant)
    }

    /// 1-based day index of ovulation within the cycle. May be below 1 for very short cycles.
    pub fn ovulation_day(&self) -> i64 {
        i64::from(self.cycle_length) - LUTEAL_DAYS
    }

    /// Last day before the fertile window opens, as a 1-based cycle index.
    pub fn fertile_start_day(&self) -> i64 {
        self.ovulation_day() - FERTILE_DAYS_BEFORE_OVULATION
    }

    /// Day of the cycle `today` falls on, always within `[1, cycle_length]`.
    pub fn current_cycle_day(&self, today: NaiveDate) -> u32 {
        let days_since = days_between(self.last_period_date, today);
        // cycle_length > 0 is guaranteed by construction; rem_euclid keeps pre-start dates in range
        let offset = days_since.rem_euclid(i64::from(self.cycle_length));
        offset as u32 + 1
    }

    /// One cycle length after the stored period start. Never rolls forward past elapsed cycles.
    pub fn next_period_date(&self) -> NaiveDate {
        add_days(self.last_period_date, i64::from(self.cycle_length))
    }

    pub fn ovulation_date(&self) -> NaiveDate {
        add_days(self.last_period_date, self.ovulation_day())
    }

    pub fn fertile_window(&self) -> FertileWindow {
        let ovulation = self.ovulation_date();
        FertileWindow {
            start: add_days(ovulation, -FERTILE_DAYS_BEFORE_OVULATION),
            end: add_days(ovulation, FERTILE_DAYS_AFTER_OVULATION),
        }
    }

    /// Negative once the predicted date has passed without a new period being entered.
    pub fn days_until_next_period(&self, today: NaiveDate) -> i64 {
        days_between(today, self.next_period_date())
    }
}

pub fn current_cycle_day(config: &CycleConfig, today: NaiveDate) -> u32 {
    config.current_cycle_day(today)
}

pub fn next_period_date(config: &CycleConfig) -> NaiveDate {
    config.next_period_date()
}

pub fn ovulation_date(config: &CycleConfig) -> NaiveDate {
    config.ovulation_date()
}

pub fn fertile_window(config: &CycleConfig) -> FertileWindow {
    config.fertile_window()
}

pub fn days_until_next_period(config: &CycleConfig, today: NaiveDate) -> i64 {
    config.days_until_next_period(today)
}
