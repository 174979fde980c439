//! Personal events store: the only stateful, invariant-bearing component.
//!
//! Each event moves through `ACTIVE -> PENDING_DELETION -> DELETED`, with
//! restore (`PENDING_DELETION -> ACTIVE`) as the only back-edge. A delete
//! removes the event from the active set immediately and starts a grace
//! timer; letting the timer fire finalizes the deletion, restoring cancels
//! it. State lives behind one mutex, so a restore and a firing timer are
//! mutually exclusive for a given event id.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;

use crate::audit::{AuditLog, AuditLogEntry};
use crate::error::{FaithcalError, FaithcalResult};
use crate::event::PersonalEvent;
use crate::storage::{PERSONAL_EVENTS_KEY, Storage};

/// How long a soft-deleted event can be restored before deletion finalizes.
pub const DEFAULT_GRACE_WINDOW: Duration = Duration::from_secs(5);

/// Asynchronous notifications for the presentation layer (toast-equivalent).
///
/// Direct call results are returned as outcomes; only the time-triggered
/// transition arrives through this channel.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreNotice {
    PermanentlyDeleted { event_id: String, title: String },
}

/// Result of a delete request.
#[derive(Debug, PartialEq)]
pub enum DeleteOutcome {
    /// Unknown id; nothing changed.
    NotFound,
    /// The event is pending deletion for the given grace window.
    Pending { grace: Duration },
}

/// Result of a restore request.
#[derive(Debug, PartialEq)]
pub enum RestoreOutcome {
    /// No pending deletion for that id (never deleted, or already expired).
    Expired,
    /// The event is active again, fields intact.
    Restored(PersonalEvent),
}

/// A soft-deleted event waiting out its grace window.
struct PendingDeletion {
    event: PersonalEvent,
    timer: JoinHandle<()>,
}

struct Inner {
    events: Vec<PersonalEvent>,
    pending: HashMap<String, PendingDeletion>,
    audit: AuditLog,
    storage: Storage,
}

impl Inner {
    /// Best-effort whole-collection persist. In-memory state stays
    /// authoritative for the session when the write fails.
    fn persist_events(&self) {
        if let Err(e) = self.storage.save(PERSONAL_EVENTS_KEY, &self.events) {
            warn!("could not persist personal events: {e}");
        }
    }
}

/// Owner of the active personal events and the pending-deletion map.
pub struct PersonalEventStore {
    inner: Arc<Mutex<Inner>>,
    notices: mpsc::UnboundedSender<StoreNotice>,
    grace: Duration,
}

impl PersonalEventStore {
    /// Load persisted events and return the store plus its notice channel.
    pub fn open(
        storage: Storage,
        audit: AuditLog,
        grace: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<StoreNotice>) {
        let events = storage.load(PERSONAL_EVENTS_KEY);
        let (notices, receiver) = mpsc::unbounded_channel();

        let store = PersonalEventStore {
            inner: Arc::new(Mutex::new(Inner {
                events,
                pending: HashMap::new(),
                audit,
                storage,
            })),
            notices,
            grace,
        };

        (store, receiver)
    }

    pub fn grace_window(&self) -> Duration {
        self.grace
    }

    /// The active (visible) events, in stored order.
    pub async fn active_events(&self) -> Vec<PersonalEvent> {
        self.inner.lock().await.events.clone()
    }

    /// Snapshots of events currently awaiting grace-window expiry.
    pub async fn pending_events(&self) -> Vec<PersonalEvent> {
        let inner = self.inner.lock().await;
        inner.pending.values().map(|p| p.event.clone()).collect()
    }

    /// Add a new event to the active set and persist the collection.
    ///
    /// Ids must be unique within the active set; callers are expected to
    /// generate them.
    pub async fn add_event(&self, event: PersonalEvent) -> FaithcalResult<()> {
        let mut inner = self.inner.lock().await;

        if inner.events.iter().any(|e| e.id == event.id) {
            return Err(FaithcalError::DuplicateEvent(event.id));
        }

        inner.events.push(event);
        inner.persist_events();
        Ok(())
    }

    /// Soft-delete an event: it disappears from the active set immediately
    /// and can be restored until the grace window elapses.
    pub async fn delete_event(&self, event_id: &str) -> DeleteOutcome {
        let mut inner = self.inner.lock().await;

        let Some(pos) = inner.events.iter().position(|e| e.id == event_id) else {
            return DeleteOutcome::NotFound;
        };

        let event = inner.events.remove(pos);
        inner.persist_events();
        inner.audit.record_deletion(&event, Some("User initiated deletion"));

        let timer = tokio::spawn(expire_after(
            Arc::clone(&self.inner),
            self.notices.clone(),
            event_id.to_string(),
            self.grace,
        ));

        debug!("event '{event_id}' pending deletion for {:?}", self.grace);
        inner
            .pending
            .insert(event_id.to_string(), PendingDeletion { event, timer });

        DeleteOutcome::Pending { grace: self.grace }
    }

    /// Undo a pending deletion. Valid only while the grace window is open.
    pub async fn restore_event(&self, event_id: &str) -> RestoreOutcome {
        let mut inner = self.inner.lock().await;

        let Some(pending) = inner.pending.remove(event_id) else {
            return RestoreOutcome::Expired;
        };

        pending.timer.abort();

        inner.events.push(pending.event.clone());
        inner.events.sort_by_key(|e| e.date);
        inner.persist_events();
        inner.audit.record_restore(&pending.event);

        debug!("event '{event_id}' restored");
        RestoreOutcome::Restored(pending.event)
    }

    /// Newest-first audit entries (see [`AuditLog::entries`]).
    pub async fn audit_entries(&self, limit: Option<usize>) -> Vec<AuditLogEntry> {
        self.inner.lock().await.audit.entries(limit).to_vec()
    }

    /// Newest-first audit entries for one event id.
    pub async fn audit_entries_for_event(&self, event_id: &str) -> Vec<AuditLogEntry> {
        let inner = self.inner.lock().await;
        inner
            .audit
            .entries_for_event(event_id)
            .into_iter()
            .cloned()
            .collect()
    }
}

/// Grace-window expiry: the only time-triggered transition in the store.
async fn expire_after(
    inner: Arc<Mutex<Inner>>,
    notices: mpsc::UnboundedSender<StoreNotice>,
    event_id: String,
    grace: Duration,
) {
    tokio::time::sleep(grace).await;

    let mut inner = inner.lock().await;

    // A restore that won the lock first has already removed the entry
    let Some(pending) = inner.pending.remove(&event_id) else {
        return;
    };

    inner.audit.record_permanent_deletion(&pending.event);
    debug!("event '{event_id}' permanently deleted");

    // Receiver may be gone; the deletion is final either way
    let _ = notices.send(StoreNotice::PermanentlyDeleted {
        event_id,
        title: pending.event.title,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditAction;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn checkup() -> PersonalEvent {
        PersonalEvent::new(
            "p1".to_string(),
            "Checkup".to_string(),
            d(2025, 6, 10),
            Some("Annual physical".to_string()),
        )
    }

    fn open_store(
        dir: &tempfile::TempDir,
    ) -> (PersonalEventStore, mpsc::UnboundedReceiver<StoreNotice>) {
        let storage = Storage::open(dir.path());
        let audit = AuditLog::load(storage.clone());
        PersonalEventStore::open(storage, audit, DEFAULT_GRACE_WINDOW)
    }

    #[tokio::test(start_paused = true)]
    async fn delete_then_expiry_finalizes_the_deletion() {
        let dir = tempfile::tempdir().unwrap();
        let (store, mut notices) = open_store(&dir);

        store.add_event(checkup()).await.unwrap();
        let outcome = store.delete_event("p1").await;
        assert_eq!(
            outcome,
            DeleteOutcome::Pending {
                grace: DEFAULT_GRACE_WINDOW
            }
        );

        // Invisible right away, but still pending
        assert!(store.active_events().await.is_empty());
        assert_eq!(store.pending_events().await.len(), 1);

        tokio::time::sleep(Duration::from_secs(6)).await;

        assert!(store.active_events().await.is_empty());
        assert!(store.pending_events().await.is_empty());

        // Newest-first: permanent delete precedes the delete
        let trail = store.audit_entries_for_event("p1").await;
        assert_eq!(trail.len(), 2);
        assert_eq!(trail[0].action, AuditAction::PermanentDelete);
        assert_eq!(trail[1].action, AuditAction::Delete);

        assert_eq!(
            notices.recv().await,
            Some(StoreNotice::PermanentlyDeleted {
                event_id: "p1".to_string(),
                title: "Checkup".to_string(),
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn restore_within_grace_brings_the_event_back_intact() {
        let dir = tempfile::tempdir().unwrap();
        let (store, mut notices) = open_store(&dir);

        let original = checkup();
        store.add_event(original.clone()).await.unwrap();
        store.delete_event("p1").await;

        tokio::time::sleep(Duration::from_secs(2)).await;

        let outcome = store.restore_event("p1").await;
        assert_eq!(outcome, RestoreOutcome::Restored(original.clone()));
        assert_eq!(store.active_events().await, vec![original]);

        // The cancelled timer must never fire
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(notices.try_recv().is_err());

        let trail = store.audit_entries_for_event("p1").await;
        assert_eq!(trail.len(), 2);
        assert_eq!(trail[0].action, AuditAction::Restore);
        assert_eq!(trail[1].action, AuditAction::Delete);
        assert!(
            !trail
                .iter()
                .any(|e| e.action == AuditAction::PermanentDelete)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn restore_after_expiry_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let (store, _notices) = open_store(&dir);

        store.add_event(checkup()).await.unwrap();
        store.delete_event("p1").await;
        tokio::time::sleep(Duration::from_secs(6)).await;

        let entries_before = store.audit_entries(None).await;
        assert_eq!(store.restore_event("p1").await, RestoreOutcome::Expired);
        assert!(store.active_events().await.is_empty());
        assert_eq!(store.audit_entries(None).await, entries_before);
    }

    #[tokio::test]
    async fn restore_without_prior_delete_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let (store, _notices) = open_store(&dir);

        store.add_event(checkup()).await.unwrap();
        assert_eq!(store.restore_event("ghost").await, RestoreOutcome::Expired);
        assert_eq!(store.active_events().await.len(), 1);
        assert!(store.audit_entries(None).await.is_empty());
    }

    #[tokio::test]
    async fn delete_of_unknown_id_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (store, _notices) = open_store(&dir);

        store.add_event(checkup()).await.unwrap();
        assert_eq!(store.delete_event("ghost").await, DeleteOutcome::NotFound);
        assert_eq!(store.active_events().await.len(), 1);
        assert!(store.audit_entries(None).await.is_empty());
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (store, _notices) = open_store(&dir);

        store.add_event(checkup()).await.unwrap();
        let err = store.add_event(checkup()).await.unwrap_err();
        assert!(matches!(err, FaithcalError::DuplicateEvent(id) if id == "p1"));
        assert_eq!(store.active_events().await.len(), 1);
    }

    #[tokio::test]
    async fn delete_persists_the_shrunk_collection_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let (store, _notices) = open_store(&dir);

        store.add_event(checkup()).await.unwrap();
        store.delete_event("p1").await;

        // The persisted collection must not contain the event while the
        // grace window is still open
        let on_disk: Vec<PersonalEvent> = Storage::open(dir.path()).load(PERSONAL_EVENTS_KEY);
        assert!(on_disk.is_empty());
    }

    #[tokio::test]
    async fn restore_resorts_the_active_collection_by_date() {
        let dir = tempfile::tempdir().unwrap();
        let (store, _notices) = open_store(&dir);

        let early = PersonalEvent::new("early".into(), "Early".into(), d(2025, 1, 5), None);
        let late = PersonalEvent::new("late".into(), "Late".into(), d(2025, 9, 1), None);

        store.add_event(early.clone()).await.unwrap();
        store.add_event(late.clone()).await.unwrap();

        store.delete_event("early").await;
        store.restore_event("early").await;

        let ids: Vec<_> = store
            .active_events()
            .await
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["early", "late"]);
    }

    #[tokio::test]
    async fn mutations_survive_persistence_failures() {
        let dir = tempfile::tempdir().unwrap();

        // Point the data dir at a regular file so every save fails
        let blocked = dir.path().join("blocked");
        std::fs::write(&blocked, "").unwrap();
        let storage = Storage::open(&blocked);
        let audit = AuditLog::load(storage.clone());
        let (store, _notices) = PersonalEventStore::open(storage, audit, DEFAULT_GRACE_WINDOW);

        store.add_event(checkup()).await.unwrap();
        assert_eq!(store.active_events().await, vec![checkup()]);

        assert_eq!(
            store.delete_event("p1").await,
            DeleteOutcome::Pending {
                grace: DEFAULT_GRACE_WINDOW
            }
        );
        assert!(store.active_events().await.is_empty());

        assert_eq!(
            store.restore_event("p1").await,
            RestoreOutcome::Restored(checkup())
        );
        assert_eq!(store.active_events().await, vec![checkup()]);
    }

    #[tokio::test]
    async fn events_survive_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        {
            let (store, _notices) = open_store(&dir);
            store.add_event(checkup()).await.unwrap();
        }

        let (reopened, _notices) = open_store(&dir);
        assert_eq!(reopened.active_events().await, vec![checkup()]);
    }
}
