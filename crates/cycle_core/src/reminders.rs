use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "Woman's Cycle";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReminderSlot {
    Morning,
    Evening,
}

/// Last reminder delivered, used to send each slot at most once a day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SentReminder {
    pub date: NaiveDate,
    pub slot: ReminderSlot,
}

/// Daily check-in windows, in local wall-clock hours.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReminderSchedule {
    pub morning_hour: u32,
    pub evening_hour: u32,
    pub window_hours: u32,
}

impl Default for ReminderSchedule {
    fn default() -> Self {
        Self {
            morning_hour: 9,
            evening_hour: 20,
            window_hours: 2,
        }
    }
}

impl ReminderSchedule {
    pub fn slot_at(&self, time: NaiveTime) -> Option<ReminderSlot> {
        let hour = time.hour();
        let window = self.window_hours.max(1);
        let within = |start: u32| hour >= start && hour < start.saturating_add(window);
        if within(self.morning_hour) {
            Some(ReminderSlot::Morning)
        } else if within(self.evening_hour) {
            Some(ReminderSlot::Evening)
        } else {
            None
        }
    }

    /// Slot that should fire at `now`, unless it already fired today.
    pub fn due(&self, now: NaiveDateTime, last_sent: Option<SentReminder>) -> Option<ReminderSlot> {
        let slot = self.slot_at(now.time())?;
        match last_sent {
            Some(sent) if sent.date == now.date() && sent.slot == slot => None,
            _ => Some(slot),
        }
    }
}

const MORNING_MESSAGES: &[&str] = &[
    "Good morning! 🌸 How are you today? Log your symptoms.",
    "☀️ Time to take care of yourself! Open Woman's Cycle.",
    "🌷 Good morning! Don't forget to track your cycle today.",
];

const EVENING_MESSAGES: &[&str] = &[
    "🌙 Good evening! Have you logged how you felt today?",
    "💕 Take care of yourself! Log your symptoms before bed.",
    "✨ End of day! How was your day? Update your cycle.",
];

/// Message for `slot`, rotating daily.
pub fn reminder_message(slot: ReminderSlot, date: NaiveDate) -> &'static str {
    let messages = match slot {
        ReminderSlot::Morning => MORNING_MESSAGES,
        ReminderSlot::Evening => EVENING_MESSAGES,
    };
    messages[date.ordinal() as usize % messages.len()]
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    pub tag: String,
    pub scheduled_for: NaiveDateTime,
}

impl NotificationRequest {
    pub fn for_slot(slot: ReminderSlot, now: NaiveDateTime) -> Self {
        let tag = match slot {
            ReminderSlot::Morning => "ciclo-morning",
            ReminderSlot::Evening => "ciclo-evening",
        };
        Self {
            title: APP_NAME.to_string(),
            body: reminder_message(slot, now.date()).to_string(),
            tag: tag.to_string(),
            scheduled_for: now,
        }
    }
}

/// Platform-specific notification adapters will implement this trait.
pub trait NotificationSink: Send + Sync {
    fn schedule(&self, notification: NotificationRequest);
    fn clear_all(&self);
}
