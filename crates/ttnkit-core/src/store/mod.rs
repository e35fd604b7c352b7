// ── Application store ──
//
// The boundary between the sync client and whatever caches its results.
// The sync client only ever replaces state with what it just fetched;
// it never patches entries locally.

mod collection;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::debug;

use crate::model::Application;

use collection::EntityCollection;

/// Sink for freshly fetched application state.
///
/// Implementations must tolerate concurrent calls: two operations may
/// resynchronize at the same time, and whichever lands last wins.
pub trait ApplicationStore: Send + Sync {
    /// Replace the cached collection with `applications`.
    fn replace_collection(&self, applications: Vec<Application>);

    /// Replace (or insert) the cached copy of one application.
    fn replace_item(&self, application: Application);
}

/// Default reactive store.
///
/// Keyed by application id. Readers get cheap `Arc` snapshots or a
/// `watch` subscription that fires on every replacement.
pub struct DataStore {
    applications: EntityCollection<Application>,
    last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl DataStore {
    pub fn new() -> Self {
        let (last_refresh, _) = watch::channel(None);
        Self {
            applications: EntityCollection::new(),
            last_refresh,
        }
    }

    // ── Readers ──────────────────────────────────────────────────────

    pub fn applications_snapshot(&self) -> Arc<Vec<Arc<Application>>> {
        self.applications.snapshot()
    }

    pub fn application(&self, id: &str) -> Option<Arc<Application>> {
        self.applications.get(id)
    }

    pub fn subscribe_applications(&self) -> watch::Receiver<Arc<Vec<Arc<Application>>>> {
        self.applications.subscribe()
    }

    pub fn application_count(&self) -> usize {
        self.applications.len()
    }

    /// Number of replacements applied so far.
    pub fn version(&self) -> u64 {
        self.applications.version()
    }

    /// When the store last received fetched state.
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }

    fn touch(&self) {
        self.last_refresh.send_replace(Some(Utc::now()));
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationStore for DataStore {
    fn replace_collection(&self, applications: Vec<Application>) {
        debug!(count = applications.len(), "store: replace application collection");
        self.applications.replace_all(
            applications
                .into_iter()
                .map(|app| (app.id.clone(), app))
                .collect(),
        );
        self.touch();
    }

    fn replace_item(&self, application: Application) {
        debug!(app_id = %application.id, "store: replace application");
        self.applications.upsert(application.id.clone(), application);
        self.touch();
    }
}
