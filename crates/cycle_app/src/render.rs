//! Plain-text views of the dashboard and month calendar.

use std::fmt::Write;

use chrono::{Datelike, NaiveDate};
use cycle_core::{
    calendar::{CalendarDay, DayKind},
    pregnancy::PregnancyStatus,
    service::CycleOverview,
    CyclePhase, Dashboard,
};

pub fn dashboard(dashboard: Option<&Dashboard>, today: NaiveDate) -> String {
    match dashboard {
        None => "No cycle data yet. Enter your last period date to get started.".to_string(),
        Some(Dashboard::Cycle(overview)) => cycle_overview(overview, today),
        Some(Dashboard::Pregnancy(status)) => pregnancy(status),
    }
}

fn cycle_overview(overview: &CycleOverview, today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", today.format("%A, %B %d, %Y"));
    let _ = writeln!(
        out,
        "Cycle day {} · {} phase (day {} of {})",
        overview.phase.cycle_day,
        phase_name(overview.phase.phase),
        overview.phase.day_in_phase,
        overview.phase.total_phase_days
    );
    let _ = writeln!(
        out,
        "Next period: {} ({})",
        overview.next_period_date,
        relative_label(overview.days_until_next_period)
    );
    let _ = writeln!(out, "Ovulation: {}", overview.ovulation_date);
    let _ = writeln!(
        out,
        "Fertile window: {} to {}",
        overview.fertile_window.start, overview.fertile_window.end
    );
    let phases: Vec<String> = overview
        .segments
        .iter()
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            format!(
                "{} {}-{}",
                phase_name(segment.phase),
                segment.start,
                segment.end
            )
        })
        .collect();
    let _ = writeln!(out, "Phases: {}", phases.join(" | "));
    let _ = writeln!(out, "Symptom entries logged: {}", overview.symptom_count);
    let _ = write!(
        out,
        "{} {}: {}",
        overview.tip.emoji, overview.tip.title, overview.tip.short
    );
    out
}

fn pregnancy(status: &PregnancyStatus) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Week {} of pregnancy", status.week);
    let _ = writeln!(
        out,
        "Due date: {} ({})",
        status.due_date,
        relative_label(status.days_until_due)
    );
    let _ = write!(out, "Progress: {:.0}%", status.progress_percent);
    if let Some(milestone) = status.milestone_week {
        let _ = write!(out, "\nMilestone reached: week {milestone}");
    }
    out
}

fn phase_name(phase: CyclePhase) -> &'static str {
    match phase {
        CyclePhase::Menstrual => "Menstrual",
        CyclePhase::Follicular => "Follicular",
        CyclePhase::Ovulation => "Ovulation",
        CyclePhase::Luteal => "Luteal",
    }
}

fn relative_label(days: i64) -> String {
    match days {
        -1 => "yesterday".to_string(),
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        d if d < 0 => format!("{} days ago", -d),
        d => format!("in {d} days"),
    }
}

fn marker(kind: DayKind) -> char {
    match kind {
        DayKind::Period => 'P',
        DayKind::Ovulation => 'O',
        DayKind::Fertile => 'F',
        DayKind::Normal => ' ',
    }
}

/// Monday-first month grid. Each cell is the day number plus a marker; today is bracketed.
pub fn month(days: &[CalendarDay], today: NaiveDate) -> String {
    let Some(first) = days.first() else {
        return String::new();
    };
    let mut out = String::new();
    let _ = writeln!(out, "{}", first.date.format("%B %Y"));
    let _ = writeln!(out, " Mo   Tu   We   Th   Fr   Sa   Su");

    let leading = first.date.weekday().num_days_from_monday() as usize;
    let mut cells: Vec<String> = vec!["    ".to_string(); leading];
    cells.extend(days.iter().map(|day| {
        let (open, close) = if day.date == today { ('[', ']') } else { (' ', ' ') };
        format!("{open}{:>2}{}{close}", day.date.day(), marker(day.kind))
    }));

    let rows: Vec<String> = cells
        .chunks(7)
        .map(|week| week.join(" ").trim_end().to_string())
        .collect();
    let _ = writeln!(out, "{}", rows.join("\n"));
    let _ = write!(out, "P period · O ovulation · F fertile");
    out
}
