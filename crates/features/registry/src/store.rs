use crate::feed::RosterFeed;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use rally_domain::{Registrant, RosterSnapshot, WindowOverride};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

/// Outcome of [`RegistrantStore::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    /// The id was new; the registrant is appended.
    Created,
    /// The id existed; the entry is replaced in place and keeps its registration order.
    Replaced,
}

#[derive(Debug, Default)]
struct Roster {
    registrants: Vec<Registrant>,
    index: FxHashMap<String, usize>,
    window_override: Option<WindowOverride>,
}

impl Roster {
    fn upsert(&mut self, registrant: Registrant) -> Upserted {
        if let Some(&position) = self.index.get(&registrant.id) {
            self.registrants[position] = registrant;
            return Upserted::Replaced;
        }

        self.index.insert(registrant.id.clone(), self.registrants.len());
        self.registrants.push(registrant);
        Upserted::Created
    }

    fn remove(&mut self, id: &str) -> bool {
        let Some(position) = self.index.remove(id) else {
            return false;
        };

        self.registrants.remove(position);
        for (offset, registrant) in self.registrants[position..].iter().enumerate() {
            self.index.insert(registrant.id.clone(), position + offset);
        }
        true
    }

    fn clear(&mut self) -> usize {
        self.index.clear();
        std::mem::take(&mut self.registrants).len()
    }

    fn snapshot(&self) -> RosterSnapshot {
        RosterSnapshot {
            registrants: self.registrants.clone(),
            window_override: self.window_override,
        }
    }
}

/// In-process registrant store keyed by id.
///
/// Handles are cheap to clone and share one roster. Every mutation publishes a fresh
/// [`RosterSnapshot`] to all [`RosterFeed`]s obtained from [`RegistrantStore::subscribe`].
///
/// # Examples
/// ```rust
/// use rally_domain::Registrant;
/// use rally_registry::{RegistrantStore, Upserted};
///
/// let store = RegistrantStore::new();
/// assert_eq!(store.upsert(Registrant::new("alice", "国内周一晚6:30")), Upserted::Created);
/// assert_eq!(store.upsert(Registrant::new("alice", "国内周一晚6:30")), Upserted::Replaced);
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RegistrantStore {
    roster: Arc<RwLock<Roster>>,
    publisher: Arc<watch::Sender<Arc<RosterSnapshot>>>,
}

impl Default for RegistrantStore {
    fn default() -> Self {
        Self::from_snapshot(RosterSnapshot::default())
    }
}

impl RegistrantStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a store from a previously saved snapshot.
    ///
    /// Entries sharing an id collapse into the first one's position, holding the last one's data.
    #[must_use]
    pub fn from_snapshot(snapshot: RosterSnapshot) -> Self {
        let mut roster = Roster { window_override: snapshot.window_override, ..Roster::default() };
        for registrant in snapshot.registrants {
            roster.upsert(registrant);
        }

        let (publisher, _) = watch::channel(Arc::new(roster.snapshot()));
        Self { roster: Arc::new(RwLock::new(roster)), publisher: Arc::new(publisher) }
    }

    /// Creates or replaces the registrant with the same id.
    pub fn upsert(&self, registrant: Registrant) -> Upserted {
        let id = registrant.id.clone();
        let outcome = self.mutate(|roster| (roster.upsert(registrant), true));
        info!(id = %id, ?outcome, "Registrant saved");
        outcome
    }

    /// Deletes the registrant with `id`. Returns whether it existed.
    pub fn remove(&self, id: &str) -> bool {
        let removed = self.mutate(|roster| {
            let removed = roster.remove(id);
            (removed, removed)
        });
        if removed {
            info!(id, "Registrant removed");
        } else {
            debug!(id, "Remove ignored, unknown registrant");
        }
        removed
    }

    /// Deletes every registrant, keeping the window override. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let removed = self.mutate(|roster| {
            let removed = roster.clear();
            (removed, removed > 0)
        });
        info!(removed, "Roster cleared");
        removed
    }

    /// Forces the registration window open or closed, or returns it to the automatic schedule.
    pub fn set_window_override(&self, window_override: Option<WindowOverride>) {
        let changed = self.mutate(|roster| {
            let changed = roster.window_override != window_override;
            roster.window_override = window_override;
            (changed, changed)
        });
        info!(?window_override, changed, "Registration window override set");
    }

    #[must_use]
    pub fn window_override(&self) -> Option<WindowOverride> {
        self.roster.read().window_override
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Registrant> {
        let roster = self.roster.read();
        roster.index.get(id).map(|&position| roster.registrants[position].clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.roster.read().registrants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roster.read().registrants.is_empty()
    }

    /// Registrants in registration order plus the window override.
    #[must_use]
    pub fn snapshot(&self) -> RosterSnapshot {
        self.roster.read().snapshot()
    }

    /// Returns a feed that observes every subsequent change to this store.
    #[must_use]
    pub fn subscribe(&self) -> RosterFeed {
        RosterFeed::new(self.publisher.subscribe())
    }

    /// Applies `change` under the write lock; publishes a snapshot if it reports a change.
    ///
    /// Publishing happens before the lock is released, so feeds observe changes in order.
    fn mutate<T>(&self, change: impl FnOnce(&mut Roster) -> (T, bool)) -> T {
        let mut roster = self.roster.write();
        let (outcome, changed) = change(&mut roster);
        if changed {
            self.publisher.send_replace(Arc::new(roster.snapshot()));
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(store: &RegistrantStore) -> Vec<String> {
        store.snapshot().registrants.into_iter().map(|r| r.id).collect()
    }

    #[test]
    fn replaced_registrant_keeps_its_position() {
        let store = RegistrantStore::new();
        store.upsert(Registrant::new("a", "x"));
        store.upsert(Registrant::new("b", "x"));
        store.upsert(Registrant::new("c", "x"));

        let outcome = store.upsert(Registrant::new("a", "y"));

        assert_eq!(outcome, Upserted::Replaced);
        assert_eq!(ids(&store), ["a", "b", "c"]);
        assert_eq!(store.get("a").map(|r| r.time_slot.to_string()).as_deref(), Some("y"));
    }

    #[test]
    fn remove_reindexes_later_entries() {
        let store = RegistrantStore::new();
        for id in ["a", "b", "c", "d"] {
            store.upsert(Registrant::new(id, "x"));
        }

        assert!(store.remove("b"));
        assert!(!store.remove("b"));
        store.upsert(Registrant::new("d", "z"));

        assert_eq!(ids(&store), ["a", "c", "d"]);
        assert_eq!(store.get("d").map(|r| r.time_slot.to_string()).as_deref(), Some("z"));
        assert_eq!(store.get("c").map(|r| r.id), Some("c".to_owned()));
    }

    #[test]
    fn clear_keeps_the_override() {
        let store = RegistrantStore::new();
        store.upsert(Registrant::new("a", "x"));
        store.set_window_override(Some(WindowOverride::Closed));

        assert_eq!(store.clear(), 1);
        assert_eq!(store.clear(), 0);
        assert!(store.is_empty());
        assert_eq!(store.window_override(), Some(WindowOverride::Closed));
    }

    #[test]
    fn snapshot_duplicates_collapse_on_load() {
        let snapshot = RosterSnapshot {
            registrants: vec![
                Registrant::new("a", "x"),
                Registrant::new("b", "x"),
                Registrant::new("a", "y"),
            ],
            window_override: Some(WindowOverride::Open),
        };

        let store = RegistrantStore::from_snapshot(snapshot);

        assert_eq!(ids(&store), ["a", "b"]);
        assert_eq!(store.get("a").map(|r| r.time_slot.to_string()).as_deref(), Some("y"));
        assert_eq!(store.window_override(), Some(WindowOverride::Open));
    }

    #[test]
    fn clones_share_the_roster() {
        let store = RegistrantStore::new();
        let other = store.clone();

        other.upsert(Registrant::new("a", "x"));

        assert_eq!(store.len(), 1);
    }
}
