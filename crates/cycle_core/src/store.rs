use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{cycle::CycleConfig, reminders::SentReminder, symptom::SymptomEntry};

/// Everything the app persists, as one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoreData {
    #[serde(default)]
    pub cycle_config: Option<CycleConfig>,
    #[serde(default)]
    pub symptoms: Vec<SymptomEntry>,
    #[serde(default)]
    pub onboarding_completed: bool,
    #[serde(default)]
    pub last_reminder: Option<SentReminder>,
    #[serde(default)]
    pub notifications_enabled: bool,
}

impl StoreData {
    fn remove_symptom(&mut self, index: usize) -> Result<SymptomEntry> {
        ensure!(
            index < self.symptoms.len(),
            "no symptom entry at index {index} ({} recorded)",
            self.symptoms.len()
        );
        Ok(self.symptoms.remove(index))
    }
}

/// Persistence port for cycle settings and the symptom log.
pub trait CycleStore: Send + Sync {
    fn cycle_config(&self) -> Result<Option<CycleConfig>>;
    fn save_cycle_config(&self, config: CycleConfig) -> Result<()>;
    fn symptoms(&self) -> Result<Vec<SymptomEntry>>;
    fn append_symptom(&self, entry: SymptomEntry) -> Result<()>;
    fn delete_symptom(&self, index: usize) -> Result<SymptomEntry>;
    fn onboarding_completed(&self) -> Result<bool>;
    fn set_onboarding_completed(&self) -> Result<()>;
    fn last_reminder(&self) -> Result<Option<SentReminder>>;
    fn set_last_reminder(&self, sent: SentReminder) -> Result<()>;
    fn notifications_enabled(&self) -> Result<bool>;
    fn set_notifications_enabled(&self, enabled: bool) -> Result<()>;
    /// Wipe all stored data.
    fn clear(&self) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<StoreData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: StoreData) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    pub fn snapshot(&self) -> StoreData {
        self.data.read().clone()
    }
}

impl CycleStore for MemoryStore {
    fn cycle_config(&self) -> Result<Option<CycleConfig>> {
        Ok(self.data.read().cycle_config)
    }

    fn save_cycle_config(&self, config: CycleConfig) -> Result<()> {
        self.data.write().cycle_config = Some(config);
        Ok(())
    }

    fn symptoms(&self) -> Result<Vec<SymptomEntry>> {
        Ok(self.data.read().symptoms.clone())
    }

    fn append_symptom(&self, entry: SymptomEntry) -> Result<()> {
        self.data.write().symptoms.push(entry);
        Ok(())
    }

    fn delete_symptom(&self, index: usize) -> Result<SymptomEntry> {
        self.data.write().remove_symptom(index)
    }

    fn onboarding_completed(&self) -> Result<bool> {
        Ok(self.data.read().onboarding_completed)
    }

    fn set_onboarding_completed(&self) -> Result<()> {
        self.data.write().onboarding_completed = true;
        Ok(())
    }

    fn last_reminder(&self) -> Result<Option<SentReminder>> {
        Ok(self.data.read().last_reminder)
    }

    fn set_last_reminder(&self, sent: SentReminder) -> Result<()> {
        self.data.write().last_reminder = Some(sent);
        Ok(())
    }

    fn notifications_enabled(&self) -> Result<bool> {
        Ok(self.data.read().notifications_enabled)
    }

    fn set_notifications_enabled(&self, enabled: bool) -> Result<()> {
        self.data.write().notifications_enabled = enabled;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.data.write() = StoreData::default();
        Ok(())
    }
}

/// Store backed by a single JSON file. A missing file reads as an empty store;
/// every mutation rewrites the whole file.
pub struct JsonFileStore {
    path: PathBuf,
    data: RwLock<StoreData>,
}

impl JsonFileStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("failed to read store from {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("failed to decode store at {}", path.display()))?
        } else {
            tracing::debug!(path = %path.display(), "store file missing, starting empty");
            StoreData::default()
        };
        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy, write it out, then publish it. A failed write leaves
    /// the in-memory state untouched.
    fn update<T>(&self, change: impl FnOnce(&mut StoreData) -> Result<T>) -> Result<T> {
        let mut guard = self.data.write();
        let mut next = guard.clone();
        let output = change(&mut next)?;
        self.persist(&next)?;
        *guard = next;
        Ok(output)
    }

    fn persist(&self, data: &StoreData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let payload = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, payload)
            .with_context(|| format!("failed to write store to {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), "store persisted");
        Ok(())
    }
}

impl CycleStore for JsonFileStore {
    fn cycle_config(&self) -> Result<Option<CycleConfig>> {
        Ok(self.data.read().cycle_config)
    }

    fn save_cycle_config(&self, config: CycleConfig) -> Result<()> {
        self.update(|data| {
            data.cycle_config = Some(config);
            Ok(())
        })
    }

    fn symptoms(&self) -> Result<Vec<SymptomEntry>> {
        Ok(self.data.read().symptoms.clone())
    }

    fn append_symptom(&self, entry: SymptomEntry) -> Result<()> {
        self.update(|data| {
            data.symptoms.push(entry);
            Ok(())
        })
    }

    fn delete_symptom(&self, index: usize) -> Result<SymptomEntry> {
        self.update(|data| data.remove_symptom(index))
    }

    fn onboarding_completed(&self) -> Result<bool> {
        Ok(self.data.read().onboarding_completed)
    }

    fn set_onboarding_completed(&self) -> Result<()> {
        self.update(|data| {
            data.onboarding_completed = true;
            Ok(())
        })
    }

    fn last_reminder(&self) -> Result<Option<SentReminder>> {
        Ok(self.data.read().last_reminder)
    }

    fn set_last_reminder(&self, sent: SentReminder) -> Result<()> {
        self.update(|data| {
            data.last_reminder = Some(sent);
            Ok(())
        })
    }

    fn notifications_enabled(&self) -> Result<bool> {
        Ok(self.data.read().notifications_enabled)
    }

    fn set_notifications_enabled(&self, enabled: bool) -> Result<()> {
        self.update(|data| {
            data.notifications_enabled = enabled;
            Ok(())
        })
    }

    fn clear(&self) -> Result<()> {
        self.update(|data| {
            *data = StoreData::default();
            Ok(())
        })
    }
}
