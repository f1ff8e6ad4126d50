use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::UnknownTagError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Sad,
    Anxious,
    Calm,
    Energetic,
    Tired,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Symptom {
    Cramps,
    Headache,
    Bloating,
    Acne,
    Backpain,
    Nausea,
    TenderBreasts,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Anxious,
        Mood::Calm,
        Mood::Energetic,
        Mood::Tired,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Anxious => "anxious",
            Mood::Calm => "calm",
            Mood::Energetic => "energetic",
            Mood::Tired => "tired",
        }
    }
}

impl Symptom {
    pub const ALL: [Symptom; 7] = [
        Symptom::Cramps,
        Symptom::Headache,
        Symptom::Bloating,
        Symptom::Acne,
        Symptom::Backpain,
        Symptom::Nausea,
        Symptom::TenderBreasts,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Symptom::Cramps => "cramps",
            Symptom::Headache => "headache",
            Symptom::Bloating => "bloating",
            Symptom::Acne => "acne",
            Symptom::Backpain => "backpain",
            Symptom::Nausea => "nausea",
            Symptom::TenderBreasts => "tender_breasts",
        }
    }
}

/// Case-insensitive; `-` and spaces are read as `_`.
fn normalize_tag(value: &str) -> String {
    value.trim().to_ascii_lowercase().replace(['-', ' '], "_")
}

impl FromStr for Mood {
    type Err = UnknownTagError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let tag = normalize_tag(value);
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str() == tag)
            .ok_or_else(|| UnknownTagError {
                kind: "mood",
                value: value.to_string(),
            })
    }
}

impl FromStr for Symptom {
    type Err = UnknownTagError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let tag = normalize_tag(value);
        Symptom::ALL
            .into_iter()
            .find(|symptom| symptom.as_str() == tag)
            .ok_or_else(|| UnknownTagError {
                kind: "symptom",
                value: value.to_string(),
            })
    }
}

/// One day's log entry. Entries are appended in the order they are recorded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymptomEntry {
    pub date: NaiveDate,
    pub symptoms: Vec<Symptom>,
    pub mood: Mood,
    #[serde(default)]
    pub notes: String,
}

impl SymptomEntry {
    pub fn new(date: NaiveDate, mood: Mood) -> Self {
        Self {
            date,
            symptoms: Vec::new(),
            mood,
            notes: String::new(),
        }
    }

    pub fn with_symptom(mut self, symptom: Symptom) -> Self {
        if !self.symptoms.contains(&symptom) {
            self.symptoms.push(symptom);
        }
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}
