use chrono::{Duration, NaiveDate};

/// Signed count of calendar days from `a` to `b`; negative when `b` precedes `a`.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    b.signed_duration_since(a).num_days()
}

/// The calendar date `n` days after `date`. Negative `n` walks backwards.
///
/// Results beyond chrono's representable range saturate at `NaiveDate::MIN`/`MAX`.
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    match Duration::try_days(n).and_then(|delta| date.checked_add_signed(delta)) {
        Some(shifted) => shifted,
        None if n < 0 => NaiveDate::MIN,
        None => NaiveDate::MAX,
    }
}
