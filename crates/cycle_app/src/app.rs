use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use cycle_core::{
    reminders::{NotificationRequest, NotificationSink, ReminderSchedule},
    store::JsonFileStore,
    symptom::{Mood, Symptom, SymptomEntry},
    CycleConfig, CycleService,
};
use tracing::{info, warn};

use crate::render;

const DEFAULT_DATA_FILE: &str = "ciclo-data.json";
const DEFAULT_CYCLE_LENGTH: u32 = 28;
const DEFAULT_PERIOD_LENGTH: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub(crate) data_file: PathBuf,
    pub(crate) today: Option<NaiveDate>,
    pub(crate) reminder_schedule: ReminderSchedule,
    pub(crate) changes: PendingChanges,
}

/// Writes requested for one run. They are applied in field order before anything
/// is rendered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingChanges {
    pub(crate) wipe: bool,
    pub(crate) last_period: Option<NaiveDate>,
    pub(crate) cycle_length: Option<u32>,
    pub(crate) period_length: Option<u32>,
    pub(crate) pregnant: Option<bool>,
    pub(crate) notifications: Option<bool>,
    pub(crate) delete_symptom: Option<usize>,
    pub(crate) symptom_log: Option<SymptomLog>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymptomLog {
    pub(crate) mood: Mood,
    pub(crate) symptoms: Vec<Symptom>,
    pub(crate) notes: String,
}

impl PendingChanges {
    fn touches_cycle(&self) -> bool {
        self.last_period.is_some() || self.cycle_length.is_some() || self.period_length.is_some()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unparseable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = lookup("CICLO_DATA_FILE") {
            if !path.trim().is_empty() {
                config.data_file = PathBuf::from(path.trim());
            }
        }
        config.today = lookup("CICLO_TODAY").and_then(|v| parse_date("CICLO_TODAY", &v));
        if let Some(hour) = lookup("CICLO_MORNING_HOUR").and_then(|v| parse_hour(&v)) {
            config.reminder_schedule.morning_hour = hour;
        }
        if let Some(hour) = lookup("CICLO_EVENING_HOUR").and_then(|v| parse_hour(&v)) {
            config.reminder_schedule.evening_hour = hour;
        }
        if let Some(window) = lookup("CICLO_REMINDER_WINDOW_HOURS") {
            if let Ok(value) = window.trim().parse::<u32>() {
                config.reminder_schedule.window_hours = value.max(1);
            }
        }

        let changes = &mut config.changes;
        changes.wipe = lookup("CICLO_WIPE")
            .and_then(|v| parse_switch("CICLO_WIPE", &v))
            .unwrap_or(false);
        changes.last_period =
            lookup("CICLO_LAST_PERIOD").and_then(|v| parse_date("CICLO_LAST_PERIOD", &v));
        changes.cycle_length =
            lookup("CICLO_CYCLE_LENGTH").and_then(|v| parse_length("CICLO_CYCLE_LENGTH", &v));
        changes.period_length =
            lookup("CICLO_PERIOD_LENGTH").and_then(|v| parse_length("CICLO_PERIOD_LENGTH", &v));
        changes.pregnant = lookup("CICLO_PREGNANT").and_then(|v| parse_switch("CICLO_PREGNANT", &v));
        changes.notifications =
            lookup("CICLO_NOTIFICATIONS").and_then(|v| parse_switch("CICLO_NOTIFICATIONS", &v));
        changes.delete_symptom = lookup("CICLO_DELETE_SYMPTOM").and_then(|v| {
            v.trim()
                .parse::<usize>()
                .map_err(|err| warn!(value = %v, %err, "ignoring invalid CICLO_DELETE_SYMPTOM"))
                .ok()
        });
        changes.symptom_log = lookup("CICLO_LOG_MOOD").and_then(|mood| {
            parse_symptom_log(
                &mood,
                lookup("CICLO_LOG_SYMPTOMS").as_deref(),
                lookup("CICLO_LOG_NOTES"),
            )
        });
        Ok(config)
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            today: None,
            reminder_schedule: ReminderSchedule::default(),
            changes: PendingChanges::default(),
        }
    }
}

fn parse_hour(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|hour| *hour < 24)
}

fn parse_date(key: &str, value: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(err) => {
            warn!(key, value, %err, "ignoring invalid date");
            None
        }
    }
}

fn parse_length(key: &str, value: &str) -> Option<u32> {
    match value.trim().parse::<u32>() {
        Ok(length) => Some(length),
        Err(err) => {
            warn!(key, value, %err, "ignoring invalid length");
            None
        }
    }
}

fn parse_switch(key: &str, value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => {
            warn!(key, value, "ignoring invalid switch");
            None
        }
    }
}

/// Comma-separated symptoms; an unknown mood drops the entry, unknown symptoms are skipped.
fn parse_symptom_log(mood: &str, symptoms: Option<&str>, notes: Option<String>) -> Option<SymptomLog> {
    let mood = match mood.parse::<Mood>() {
        Ok(mood) => mood,
        Err(err) => {
            warn!(%err, "ignoring symptom log");
            return None;
        }
    };
    let symptoms = symptoms
        .unwrap_or_default()
        .split(',')
        .filter(|name| !name.trim().is_empty())
        .filter_map(|name| {
            name.parse::<Symptom>()
                .map_err(|err| warn!(%err, "skipping symptom"))
                .ok()
        })
        .collect();
    Some(SymptomLog {
        mood,
        symptoms,
        notes: notes.unwrap_or_default(),
    })
}

/// Terminal stand-in for a platform notification adapter.
struct LogSink;

impl NotificationSink for LogSink {
    fn schedule(&self, notification: NotificationRequest) {
        info!(
            title = %notification.title,
            tag = %notification.tag,
            at = %notification.scheduled_for,
            "{}",
            notification.body
        );
    }

    fn clear_all(&self) {
        info!("cleared pending notifications");
    }
}

/// New cycle input merged over what is stored. Lengths default to 28/5 and a
/// running pregnancy is kept.
fn merged_cycle_config(
    stored: Option<CycleConfig>,
    changes: &PendingChanges,
) -> Result<CycleConfig> {
    let Some(last_period) = changes
        .last_period
        .or(stored.map(|config| config.last_period_date()))
    else {
        bail!("CICLO_LAST_PERIOD is required before cycle lengths can be saved");
    };
    let cycle_length = changes
        .cycle_length
        .or(stored.map(|config| config.cycle_length()))
        .unwrap_or(DEFAULT_CYCLE_LENGTH);
    let period_length = changes
        .period_length
        .or(stored.map(|config| config.period_length()))
        .unwrap_or(DEFAULT_PERIOD_LENGTH);
    let config = CycleConfig::new(last_period, cycle_length, period_length)
        .context("invalid cycle input")?;
    Ok(match stored.and_then(|config| config.active_pregnancy()) {
        Some(start) => config.with_pregnancy(start),
        None => config,
    })
}

fn apply_changes(service: &CycleService, changes: &PendingChanges, today: NaiveDate) -> Result<()> {
    if changes.wipe {
        service.wipe()?;
    }
    if changes.touches_cycle() {
        let config = merged_cycle_config(service.cycle_config()?, changes)?;
        service.save_cycle_config(config)?;
        service.complete_onboarding()?;
    }
    if let Some(pregnant) = changes.pregnant {
        let Some(config) = service.cycle_config()? else {
            bail!("enter cycle data before changing pregnancy mode");
        };
        let config = match (pregnant, config.active_pregnancy()) {
            (true, Some(_)) => config,
            (true, None) => config.with_pregnancy(today),
            (false, _) => config.without_pregnancy(),
        };
        service.save_cycle_config(config)?;
    }
    match changes.notifications {
        Some(true) => service.enable_notifications()?,
        Some(false) => service.disable_notifications()?,
        None => {}
    }
    if let Some(index) = changes.delete_symptom {
        service
            .delete_symptom(index)
            .with_context(|| format!("failed to delete symptom entry {index}"))?;
    }
    if let Some(log) = &changes.symptom_log {
        let entry = log
            .symptoms
            .iter()
            .fold(SymptomEntry::new(today, log.mood), |entry, symptom| {
                entry.with_symptom(*symptom)
            })
            .with_notes(log.notes.clone());
        service.log_symptom(entry)?;
    }
    Ok(())
}

/// Apply the pending changes and render the dashboard and this month's calendar.
pub fn execute(config: &AppConfig) -> Result<String> {
    info!(data_file = %config.data_file.display(), "opening store");
    let store = JsonFileStore::open(&config.data_file)
        .with_context(|| format!("failed to open {}", config.data_file.display()))?;
    let service = CycleService::builder()
        .with_store(Box::new(store))
        .with_notification_sink(Box::new(LogSink))
        .with_reminder_schedule(config.reminder_schedule)
        .build()
        .context("failed to initialize cycle service")?;

    let today = config.today();
    apply_changes(&service, &config.changes, today)?;

    let dashboard = service.dashboard(today)?;
    let mut out = render::dashboard(dashboard.as_ref(), today);
    if let Some(days) = service.calendar_month(today.year(), today.month())? {
        out.push_str("\n\n");
        out.push_str(&render::month(&days, today));
    }

    if config.today.is_none() {
        service.poll_reminders(Local::now().naive_local())?;
    }
    Ok(out)
}

pub fn run(config: AppConfig) -> Result<()> {
    println!("{}", execute(&config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn defaults_without_environment() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.data_file(), Path::new(DEFAULT_DATA_FILE));
        assert_eq!(config.changes, PendingChanges::default());
    }

    #[test]
    fn reads_overrides_and_ignores_garbage() {
        let config = AppConfig::from_lookup(lookup(&[
            ("CICLO_DATA_FILE", " /tmp/ciclo.json "),
            ("CICLO_TODAY", "2024-01-10"),
            ("CICLO_MORNING_HOUR", "7"),
            ("CICLO_EVENING_HOUR", "25"),
            ("CICLO_REMINDER_WINDOW_HOURS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.data_file, PathBuf::from("/tmp/ciclo.json"));
        assert_eq!(config.today(), ymd(2024, 1, 10));
        assert_eq!(config.reminder_schedule.morning_hour, 7);
        assert_eq!(config.reminder_schedule.evening_hour, 20);
        assert_eq!(config.reminder_schedule.window_hours, 1);

        let bad_date = AppConfig::from_lookup(lookup(&[("CICLO_TODAY", "10/01/2024")])).unwrap();
        assert!(bad_date.today.is_none());
    }

    #[test]
    fn reads_pending_changes() {
        let config = AppConfig::from_lookup(lookup(&[
            ("CICLO_LAST_PERIOD", "2024-01-01"),
            ("CICLO_CYCLE_LENGTH", "30"),
            ("CICLO_PERIOD_LENGTH", "four"),
            ("CICLO_PREGNANT", "off"),
            ("CICLO_NOTIFICATIONS", "on"),
            ("CICLO_WIPE", "maybe"),
            ("CICLO_LOG_MOOD", "Tired"),
            ("CICLO_LOG_SYMPTOMS", "cramps, tender-breasts,sneezing,"),
            ("CICLO_LOG_NOTES", "heating pad helped"),
        ]))
        .unwrap();
        let changes = config.changes;
        assert!(!changes.wipe);
        assert_eq!(changes.last_period, Some(ymd(2024, 1, 1)));
        assert_eq!(changes.cycle_length, Some(30));
        assert_eq!(changes.period_length, None);
        assert_eq!(changes.pregnant, Some(false));
        assert_eq!(changes.notifications, Some(true));
        assert_eq!(
            changes.symptom_log,
            Some(SymptomLog {
                mood: Mood::Tired,
                symptoms: vec![Symptom::Cramps, Symptom::TenderBreasts],
                notes: "heating pad helped".to_string(),
            })
        );

        let unknown_mood = AppConfig::from_lookup(lookup(&[("CICLO_LOG_MOOD", "grumpy")])).unwrap();
        assert!(unknown_mood.changes.symptom_log.is_none());
    }

    #[test]
    fn run_prints_against_fresh_store() {
        let temp = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_file: temp.path().join("ciclo.json"),
            today: Some(ymd(2024, 1, 10)),
            ..AppConfig::default()
        };
        let out = execute(&config).unwrap();
        assert!(out.contains("Enter your last period date"));
        run(config).unwrap();
    }

    #[test]
    fn cycle_input_persists_for_the_next_run() {
        let temp = tempfile::tempdir().unwrap();
        let data_file = temp.path().join("ciclo.json");
        let file = data_file.display().to_string();
        let file = file.as_str();

        let first = AppConfig::from_lookup(lookup(&[
            ("CICLO_DATA_FILE", file),
            ("CICLO_TODAY", "2024-01-10"),
            ("CICLO_LAST_PERIOD", "2024-01-01"),
            ("CICLO_CYCLE_LENGTH", "28"),
            ("CICLO_PERIOD_LENGTH", "5"),
        ]))
        .unwrap();
        assert!(execute(&first).unwrap().contains("Cycle day 10"));

        let second = AppConfig::from_lookup(lookup(&[
            ("CICLO_DATA_FILE", file),
            ("CICLO_TODAY", "2024-01-10"),
        ]))
        .unwrap();
        let out = execute(&second).unwrap();
        assert!(out.contains("Cycle day 10 · Ovulation phase (day 1 of 6)"));
        assert!(out.contains("January 2024"));

        let store = JsonFileStore::open(&data_file).unwrap();
        let service = CycleService::builder()
            .with_store(Box::new(store))
            .build()
            .unwrap();
        assert!(service.onboarding_completed().unwrap());
    }

    fn execute_with(file: &str, extra: &[(&str, &str)]) -> Result<String> {
        let mut pairs = vec![("CICLO_DATA_FILE", file), ("CICLO_TODAY", "2024-01-10")];
        pairs.extend_from_slice(extra);
        execute(&AppConfig::from_lookup(lookup(&pairs))?)
    }

    #[test]
    fn later_runs_update_lengths_log_symptoms_and_toggle_modes() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("ciclo.json").display().to_string();
        let run_with = |extra: &[(&str, &str)]| execute_with(&file, extra);

        run_with(&[("CICLO_LAST_PERIOD", "2024-01-01")]).unwrap();

        let out = run_with(&[
            ("CICLO_PERIOD_LENGTH", "4"),
            ("CICLO_LOG_MOOD", "calm"),
            ("CICLO_LOG_SYMPTOMS", "cramps"),
        ])
        .unwrap();
        assert!(out.contains("Menstrual 1-4 | Follicular 5-9"));
        assert!(out.contains("Symptom entries logged: 1"));

        let out = run_with(&[("CICLO_PREGNANT", "on")]).unwrap();
        assert!(out.contains("Week 0 of pregnancy"));
        let out = run_with(&[("CICLO_PREGNANT", "off"), ("CICLO_DELETE_SYMPTOM", "0")]).unwrap();
        assert!(out.contains("Symptom entries logged: 0"));

        assert!(run_with(&[("CICLO_DELETE_SYMPTOM", "0")]).is_err());
        assert!(run_with(&[("CICLO_CYCLE_LENGTH", "3")]).is_err());

        let out = run_with(&[("CICLO_WIPE", "yes")]).unwrap();
        assert!(out.contains("Enter your last period date"));
    }

    #[test]
    fn lengths_without_last_period_are_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_file: temp.path().join("ciclo.json"),
            today: Some(ymd(2024, 1, 10)),
            changes: PendingChanges {
                cycle_length: Some(30),
                ..PendingChanges::default()
            },
            ..AppConfig::default()
        };
        let err = execute(&config).unwrap_err();
        assert!(err.to_string().contains("CICLO_LAST_PERIOD is required"));
    }

    #[test]
    fn notification_switch_is_stored() {
        let temp = tempfile::tempdir().unwrap();
        let data_file = temp.path().join("ciclo.json");
        let config = AppConfig {
            data_file: data_file.clone(),
            today: Some(ymd(2024, 1, 10)),
            changes: PendingChanges {
                notifications: Some(true),
                ..PendingChanges::default()
            },
            ..AppConfig::default()
        };
        execute(&config).unwrap();

        let service = CycleService::builder()
            .with_store(Box::new(JsonFileStore::open(&data_file).unwrap()))
            .build()
            .unwrap();
        assert!(service.notifications_enabled().unwrap());
    }
}
