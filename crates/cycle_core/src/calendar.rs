use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::cycle::CycleConfig;
use crate::dates::add_days;

/// How a calendar date is highlighted relative to the stored cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DayKind {
    Period,
    Ovulation,
    Fertile,
    Normal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub kind: DayKind,
}

/// Period days cover the stored period and the predicted next one; ovulation
/// wins over the surrounding fertile window.
pub fn classify_date(config: &CycleConfig, date: NaiveDate) -> DayKind {
    let bleeding_days = i64::from(config.period_length()) - 1;
    let in_period = |start: NaiveDate| start <= date && date <= add_days(start, bleeding_days);

    if in_period(config.last_period_date()) || in_period(config.next_period_date()) {
        DayKind::Period
    } else if date == config.ovulation_date() {
        DayKind::Ovulation
    } else if config.fertile_window().contains(date) {
        DayKind::Fertile
    } else {
        DayKind::Normal
    }
}

/// Every day of `month` classified, or `None` when the year/month pair is invalid.
pub fn month_days(config: &CycleConfig, year: i32, month: u32) -> Option<Vec<CalendarDay>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let days = first
        .iter_days()
        .take_while(|date| date.month() == month)
        .map(|date| CalendarDay {
            date,
            kind: classify_date(config, date),
        })
        .collect();
    Some(days)
}
