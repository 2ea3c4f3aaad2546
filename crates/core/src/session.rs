//! Per-session conversion history.
//!
//! An explicit context object owned by whoever drives the UI (see
//! `ConversionFlow`); nothing here is process-global. Entries are kept
//! newest-first and vanish with the session.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::formats::source_format_of;
use crate::validation::FileMeta;

/// Status of a tracked conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Idle,
    Uploading,
    Processing,
    Completed,
    Failed,
}

impl EntryStatus {
    /// Completed and failed entries are finished and can be cleared.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionEntry {
    pub id: String,
    pub file: FileMeta,
    pub source_format: String,
    pub target_format: String,
    pub status: EntryStatus,
    /// 0-100.
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ConversionSession {
    entries: Vec<ConversionEntry>,
    current: Option<String>,
}

impl ConversionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks a new file, makes it current and returns its id.
    pub fn add_file(&mut self, file: FileMeta, target_format: impl Into<String>) -> String {
        let id = Uuid::new_v4().to_string();
        let entry = ConversionEntry {
            id: id.clone(),
            source_format: source_format_of(&file.name),
            file,
            target_format: target_format.into(),
            status: EntryStatus::Idle,
            progress: 0,
            error: None,
            result_url: None,
            created_at: Utc::now(),
        };
        self.entries.insert(0, entry);
        self.current = Some(id.clone());
        id
    }

    /// Updates status and progress. Completed always reports 100.
    ///
    /// Returns false if the id is unknown.
    pub fn update_status(&mut self, id: &str, status: EntryStatus, progress: u8) -> bool {
        self.with_entry(id, |entry| {
            entry.status = status;
            entry.progress = if status == EntryStatus::Completed {
                100
            } else {
                progress.min(100)
            };
        })
    }

    pub fn set_error(&mut self, id: &str, error: impl Into<String>) -> bool {
        let error = error.into();
        self.with_entry(id, |entry| {
            entry.status = EntryStatus::Failed;
            entry.error = Some(error);
        })
    }

    pub fn set_result(&mut self, id: &str, result_url: impl Into<String>) -> bool {
        let result_url = result_url.into();
        self.with_entry(id, |entry| {
            entry.status = EntryStatus::Completed;
            entry.progress = 100;
            entry.result_url = Some(result_url);
        })
    }

    /// Removes an entry. If it was current, the newest remaining one takes over.
    pub fn remove(&mut self, id: &str) -> Option<ConversionEntry> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        let removed = self.entries.remove(idx);
        if self.current.as_deref() == Some(id) {
            self.current = self.entries.first().map(|e| e.id.clone());
        }
        Some(removed)
    }

    /// Drops completed and failed entries.
    pub fn clear_completed(&mut self) {
        let current_finished = self.current().is_some_and(|e| e.status.is_terminal());
        self.entries.retain(|e| !e.status.is_terminal());
        if current_finished {
            self.current = self.entries.first().map(|e| e.id.clone());
        }
    }

    /// Points `current` at an entry; an unknown id or `None` clears it.
    pub fn set_current(&mut self, id: Option<&str>) {
        self.current = id
            .and_then(|id| self.get(id))
            .map(|entry| entry.id.clone());
    }

    pub fn current(&self) -> Option<&ConversionEntry> {
        self.current.as_deref().and_then(|id| self.get(id))
    }

    pub fn get(&self, id: &str) -> Option<&ConversionEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// All entries, newest first.
    pub fn entries(&self) -> &[ConversionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn with_entry(&mut self, id: &str, update: impl FnOnce(&mut ConversionEntry)) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                update(entry);
                true
            }
            None => false,
        }
    }
}
