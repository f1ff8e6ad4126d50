use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    calendar::{self, CalendarDay},
    cycle::{CycleConfig, FertileWindow},
    phase::{self, PhaseInfo, PhaseSegment},
    pregnancy::PregnancyStatus,
    reminders::{
        NotificationRequest, NotificationSink, ReminderSchedule, ReminderSlot, SentReminder,
    },
    store::{CycleStore, MemoryStore},
    symptom::SymptomEntry,
    tips::{self, DailyTip},
};

/// Everything the home screen shows for one day.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum Dashboard {
    Cycle(CycleOverview),
    Pregnancy(PregnancyStatus),
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CycleOverview {
    pub today: NaiveDate,
    pub phase: PhaseInfo,
    pub next_period_date: NaiveDate,
    pub days_until_next_period: i64,
    pub ovulation_date: NaiveDate,
    pub fertile_window: FertileWindow,
    pub segments: [PhaseSegment; 4],
    pub tip: DailyTip,
    /// Entries in the symptom log; filled in by the service.
    pub symptom_count: usize,
}

impl CycleOverview {
    pub fn compute(config: &CycleConfig, today: NaiveDate) -> Self {
        let phase = phase::phase_info(config, today);
        Self {
            today,
            phase,
            next_period_date: config.next_period_date(),
            days_until_next_period: config.days_until_next_period(today),
            ovulation_date: config.ovulation_date(),
            fertile_window: config.fertile_window(),
            segments: phase::phase_segments(config),
            tip: *tips::daily_tip(phase.phase, today),
            symptom_count: 0,
        }
    }
}

impl Dashboard {
    pub fn compute(config: &CycleConfig, today: NaiveDate) -> Self {
        match config.active_pregnancy() {
            Some(start) => Dashboard::Pregnancy(PregnancyStatus::from_start(start, today)),
            None => Dashboard::Cycle(CycleOverview::compute(config, today)),
        }
    }
}

pub struct CycleService {
    store: Box<dyn CycleStore>,
    notification_sink: Option<Box<dyn NotificationSink>>,
    reminder_schedule: ReminderSchedule,
}

pub struct CycleServiceBuilder {
    store: Option<Box<dyn CycleStore>>,
    notification_sink: Option<Box<dyn NotificationSink>>,
    reminder_schedule: ReminderSchedule,
}

impl Default for CycleServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleServiceBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            notification_sink: None,
            reminder_schedule: ReminderSchedule::default(),
        }
    }

    pub fn with_store(mut self, store: Box<dyn CycleStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_notification_sink(mut self, sink: Box<dyn NotificationSink>) -> Self {
        self.notification_sink = Some(sink);
        self
    }

    pub fn with_reminder_schedule(mut self, schedule: ReminderSchedule) -> Self {
        self.reminder_schedule = schedule;
        self
    }

    pub fn build(self) -> Result<CycleService> {
        let store: Box<dyn CycleStore> = match self.store {
            Some(store) => store,
            None => Box::new(MemoryStore::new()),
        };
        let configured = store
            .cycle_config()
            .context("failed to read stored cycle config")?
            .is_some();
        info!(
            configured,
            reminders = self.notification_sink.is_some(),
            "cycle service ready"
        );
        Ok(CycleService {
            store,
            notification_sink: self.notification_sink,
            reminder_schedule: self.reminder_schedule,
        })
    }
}

impl CycleService {
    pub fn builder() -> CycleServiceBuilder {
        CycleServiceBuilder::new()
    }

    pub fn reminder_schedule(&self) -> ReminderSchedule {
        self.reminder_schedule
    }

    pub fn cycle_config(&self) -> Result<Option<CycleConfig>> {
        self.store.cycle_config()
    }

    #[instrument(skip(self))]
    pub fn save_cycle_config(&self, config: CycleConfig) -> Result<()> {
        self.store
            .save_cycle_config(config)
            .context("failed to save cycle config")?;
        info!(
            last_period = %config.last_period_date(),
            cycle_length = config.cycle_length(),
            period_length = config.period_length(),
            "cycle config saved"
        );
        Ok(())
    }

    pub fn onboarding_completed(&self) -> Result<bool> {
        self.store.onboarding_completed()
    }

    #[instrument(skip(self))]
    pub fn complete_onboarding(&self) -> Result<()> {
        self.store.set_onboarding_completed()
    }

    /// `None` until a cycle config has been entered.
    pub fn dashboard(&self, today: NaiveDate) -> Result<Option<Dashboard>> {
        let Some(config) = self.store.cycle_config()? else {
            debug!("dashboard requested without cycle config");
            return Ok(None);
        };
        let mut dashboard = Dashboard::compute(&config, today);
        if let Dashboard::Cycle(overview) = &mut dashboard {
            overview.symptom_count = self.store.symptoms()?.len();
        }
        Ok(Some(dashboard))
    }

    /// `None` until a cycle config has been entered; errors on an invalid month.
    pub fn calendar_month(&self, year: i32, month: u32) -> Result<Option<Vec<CalendarDay>>> {
        let Some(config) = self.store.cycle_config()? else {
            return Ok(None);
        };
        let days = calendar::month_days(&config, year, month)
            .with_context(|| format!("invalid calendar month {year}-{month}"))?;
        Ok(Some(days))
    }

    #[instrument(skip(self))]
    pub fn log_symptom(&self, entry: SymptomEntry) -> Result<()> {
        self.store
            .append_symptom(entry)
            .context("failed to record symptom entry")
    }

    pub fn symptoms(&self) -> Result<Vec<SymptomEntry>> {
        self.store.symptoms()
    }

    #[instrument(skip(self))]
    pub fn delete_symptom(&self, index: usize) -> Result<SymptomEntry> {
        self.store.delete_symptom(index)
    }

    pub fn notifications_enabled(&self) -> Result<bool> {
        self.store.notifications_enabled()
    }

    #[instrument(skip(self))]
    pub fn enable_notifications(&self) -> Result<()> {
        self.store
            .set_notifications_enabled(true)
            .context("failed to enable notifications")?;
        info!("notifications enabled");
        Ok(())
    }

    /// Turn reminders off and drop anything already scheduled.
    #[instrument(skip(self))]
    pub fn disable_notifications(&self) -> Result<()> {
        self.store
            .set_notifications_enabled(false)
            .context("failed to disable notifications")?;
        if let Some(sink) = &self.notification_sink {
            sink.clear_all();
        }
        info!("notifications disabled");
        Ok(())
    }

    /// Remove every stored value and pending notification.
    #[instrument(skip(self))]
    pub fn wipe(&self) -> Result<()> {
        self.store.clear().context("failed to wipe stored data")?;
        if let Some(sink) = &self.notification_sink {
            sink.clear_all();
        }
        info!("all data wiped");
        Ok(())
    }

    /// Schedule the reminder due at `now`, if any. Reminders are off without a sink
    /// or while notifications are disabled. The slot is recorded before the sink is
    /// called, so a failed write never produces a duplicate reminder.
    #[instrument(skip(self))]
    pub fn poll_reminders(&self, now: NaiveDateTime) -> Result<Option<ReminderSlot>> {
        let Some(sink) = &self.notification_sink else {
            return Ok(None);
        };
        if !self.store.notifications_enabled()? {
            debug!("notifications disabled, skipping reminder poll");
            return Ok(None);
        }
        let last_sent = self.store.last_reminder()?;
        let Some(slot) = self.reminder_schedule.due(now, last_sent) else {
            return Ok(None);
        };
        self.store
            .set_last_reminder(SentReminder {
                date: now.date(),
                slot,
            })
            .context("failed to record reminder slot")?;
        sink.schedule(NotificationRequest::for_slot(slot, now));
        info!(?slot, "reminder scheduled");
        Ok(Some(slot))
    }
}
