use rally_domain::RosterSnapshot;
use std::sync::Arc;
use tokio::sync::watch;

/// Latest-value view of a [`RegistrantStore`](crate::RegistrantStore).
///
/// Intermediate snapshots may be skipped when several mutations land between two polls; the
/// feed always yields the most recent one.
#[derive(Debug, Clone)]
pub struct RosterFeed {
    receiver: watch::Receiver<Arc<RosterSnapshot>>,
}

impl RosterFeed {
    pub(crate) const fn new(receiver: watch::Receiver<Arc<RosterSnapshot>>) -> Self {
        Self { receiver }
    }

    /// The snapshot published most recently, without marking it as seen.
    #[must_use]
    pub fn latest(&self) -> Arc<RosterSnapshot> {
        Arc::clone(&self.receiver.borrow())
    }

    /// Whether a snapshot newer than the last one returned by [`RosterFeed::changed`] exists.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Waits for the next change and returns the new snapshot.
    ///
    /// Returns `None` once every handle of the store has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<RosterSnapshot>> {
        self.receiver.changed().await.ok()?;
        Some(Arc::clone(&self.receiver.borrow_and_update()))
    }
}
