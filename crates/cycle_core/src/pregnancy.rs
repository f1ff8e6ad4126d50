use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::{add_days, days_between};

/// Gestation length used for the due date estimate.
pub const GESTATION_DAYS: i64 = 280;
pub const GESTATION_WEEKS: u32 = 40;
const MILESTONE_INTERVAL_WEEKS: u32 = 4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PregnancyStatus {
    pub start: NaiveDate,
    pub week: u32,
    pub due_date: NaiveDate,
    pub days_until_due: i64,
    pub progress_percent: f64,
    /// Most recent four-week milestone reached, if any.
    pub milestone_week: Option<u32>,
}

impl PregnancyStatus {
    pub fn from_start(start: NaiveDate, today: NaiveDate) -> Self {
        let week = pregnancy_week(start, today);
        let due_date = due_date(start);
        Self {
            start,
            week,
            due_date,
            days_until_due: days_between(today, due_date),
            progress_percent: (f64::from(week) / f64::from(GESTATION_WEEKS) * 100.0).min(100.0),
            milestone_week: milestone_week(week),
        }
    }
}

/// Completed weeks since `start`; zero before the start date.
pub fn pregnancy_week(start: NaiveDate, today: NaiveDate) -> u32 {
    let weeks = days_between(start, today).div_euclid(7).max(0);
    u32::try_from(weeks).unwrap_or(u32::MAX)
}

pub fn due_date(start: NaiveDate) -> NaiveDate {
    add_days(start, GESTATION_DAYS)
}

pub fn milestone_week(week: u32) -> Option<u32> {
    let milestone = week.min(GESTATION_WEEKS) / MILESTONE_INTERVAL_WEEKS * MILESTONE_INTERVAL_WEEKS;
    (milestone >= MILESTONE_INTERVAL_WEEKS).then_some(milestone)
}
