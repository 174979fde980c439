//! Append-only audit trail for personal-event deletions.
//!
//! Entries are kept newest-first and are never mutated; the only destructive
//! operation is an explicit full clear. Persistence is best-effort: a failed
//! write is logged and the in-memory log stays authoritative.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event::PersonalEvent;
use crate::storage::{AUDIT_LOGS_KEY, Storage};

/// Placeholder actor id until there is real authentication.
const PLACEHOLDER_USER_ID: &str = "current-user";

/// What happened to the target event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditAction {
    #[serde(rename = "DELETE_EVENT")]
    Delete,
    #[serde(rename = "RESTORE_EVENT")]
    Restore,
    #[serde(rename = "PERMANENT_DELETE")]
    PermanentDelete,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AuditAction::Delete => "deleted",
            AuditAction::Restore => "restored",
            AuditAction::PermanentDelete => "permanently deleted",
        };
        f.write_str(label)
    }
}

/// One immutable record of a delete/restore/permanent-delete action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub action: AuditAction,
    pub event_id: String,
    pub event_title: String,
    pub event_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// The audit log: a newest-first sequence of entries backed by storage.
///
/// Constructed once at startup and handed to the personal events store;
/// there is deliberately no global instance.
pub struct AuditLog {
    entries: Vec<AuditLogEntry>,
    storage: Storage,
}

impl AuditLog {
    /// Load previously persisted entries (newest-first on disk).
    pub fn load(storage: Storage) -> Self {
        let entries = storage.load(AUDIT_LOGS_KEY);
        AuditLog { entries, storage }
    }

    pub fn record_deletion(&mut self, event: &PersonalEvent, details: Option<&str>) {
        self.append(AuditAction::Delete, event, details);
    }

    pub fn record_restore(&mut self, event: &PersonalEvent) {
        self.append(
            AuditAction::Restore,
            event,
            Some("Event restored via undo action"),
        );
    }

    pub fn record_permanent_deletion(&mut self, event: &PersonalEvent) {
        self.append(
            AuditAction::PermanentDelete,
            event,
            Some("Event permanently deleted after undo timeout"),
        );
    }

    /// The newest `limit` entries, or all of them if no limit is given.
    pub fn entries(&self, limit: Option<usize>) -> &[AuditLogEntry] {
        match limit {
            Some(n) => &self.entries[..n.min(self.entries.len())],
            None => &self.entries,
        }
    }

    /// Entries for one event id, newest-first.
    pub fn entries_for_event(&self, event_id: &str) -> Vec<&AuditLogEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.event_id == event_id)
            .collect()
    }

    /// Empty the log. The only destructive operation; administrative use only.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    fn append(&mut self, action: AuditAction, event: &PersonalEvent, details: Option<&str>) {
        let entry = AuditLogEntry {
            id: format!("audit-{}", Uuid::new_v4()),
            timestamp: Utc::now(),
            action,
            event_id: event.id.clone(),
            event_title: event.title.clone(),
            event_date: event.date,
            user_id: Some(PLACEHOLDER_USER_ID.to_string()),
            details: details.map(|d| d.to_string()),
        };

        // Newest entries go first
        self.entries.insert(0, entry);
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(AUDIT_LOGS_KEY, &self.entries) {
            warn!("could not persist audit log: {e}");
        }
    }
}
