// ── Generic reactive entity collection ──
//
// Lock-free concurrent storage with O(1) lookups and push-based
// change notification via `watch` channels.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::watch;

/// A lock-free, reactive collection for a single entity type.
///
/// Uses `DashMap` for O(1) concurrent lookups and `watch` channels
/// for push-based change notification. Every mutation bumps a version
/// counter and rebuilds the snapshot that subscribers receive.
pub(crate) struct EntityCollection<T: Send + Sync + 'static> {
    /// Primary storage: entity id -> entity.
    by_key: DashMap<String, Arc<T>>,

    /// Version counter, bumped on every mutation.
    version: watch::Sender<u64>,

    /// Full snapshot sorted by key, rebuilt on mutation.
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,
}

impl<T: Send + Sync + 'static> EntityCollection<T> {
    pub(crate) fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            by_key: DashMap::new(),
            version,
            snapshot,
        }
    }

    /// Insert or replace an entity. Returns `true` if the key was new.
    pub(crate) fn upsert(&self, key: String, entity: T) -> bool {
        let is_new = self.by_key.insert(key, Arc::new(entity)).is_none();
        self.rebuild_snapshot();
        self.bump_version();
        is_new
    }

    /// Replace the whole collection: upsert every incoming entity, then
    /// prune keys not in the incoming set. Subscribers see one change
    /// and never observe an intermediate empty state.
    pub(crate) fn replace_all(&self, items: Vec<(String, T)>) {
        let mut incoming = HashSet::with_capacity(items.len());
        for (key, entity) in items {
            incoming.insert(key.clone());
            self.by_key.insert(key, Arc::new(entity));
        }
        self.by_key.retain(|k, _| incoming.contains(k));
        self.rebuild_snapshot();
        self.bump_version();
    }

    pub(crate) fn get(&self, key: &str) -> Option<Arc<T>> {
        self.by_key.get(key).map(|r| Arc::clone(r.value()))
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn version(&self) -> u64 {
        *self.version.borrow()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_key.len()
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Collect all values (ordered by key) and broadcast to subscribers.
    fn rebuild_snapshot(&self) {
        let mut entries: Vec<(String, Arc<T>)> = self
            .by_key
            .iter()
            .map(|r| (r.key().clone(), Arc::clone(r.value())))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        let values = entries.into_iter().map(|(_, v)| v).collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }

    fn bump_version(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn upsert_returns_true_for_new_key() {
        let col: EntityCollection<String> = EntityCollection::new();
        assert!(col.upsert("key1".into(), "hello".into()));
        assert!(!col.upsert("key1".into(), "world".into()));
        assert_eq!(*col.get("key1").unwrap(), "world");
    }

    #[test]
    fn replace_all_prunes_missing_keys() {
        let col: EntityCollection<String> = EntityCollection::new();
        col.upsert("a".into(), "x".into());
        col.upsert("b".into(), "y".into());

        col.replace_all(vec![("b".into(), "y2".into()), ("c".into(), "z".into())]);

        assert!(col.get("a").is_none());
        assert_eq!(*col.get("b").unwrap(), "y2");
        assert_eq!(col.len(), 2);
    }

    #[test]
    fn snapshot_is_ordered_by_key() {
        let col: EntityCollection<String> = EntityCollection::new();
        col.upsert("zeta".into(), "z".into());
        col.upsert("alpha".into(), "a".into());

        let snap = col.snapshot();
        let values: Vec<&str> = snap.iter().map(|s| s.as_str()).collect();
        assert_eq!(values, vec!["a", "z"]);
    }

    #[test]
    fn version_bumps_once_per_replacement() {
        let col: EntityCollection<String> = EntityCollection::new();
        assert_eq!(col.version(), 0);
        col.upsert("a".into(), "x".into());
        col.replace_all(vec![("b".into(), "y".into())]);
        assert_eq!(col.version(), 2);
    }

    #[test]
    fn subscribers_see_latest_snapshot() {
        let col: EntityCollection<String> = EntityCollection::new();
        let mut rx = col.subscribe();
        col.upsert("a".into(), "x".into());
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);
    }
}
