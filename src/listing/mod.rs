use std::sync::Arc;
use tokio::sync::broadcast;

use crate::database::{Event, EventRepository, RepositoryError};

/// Views whose cached/pre-rendered output goes stale after a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingView {
    Admin,
    Public,
}

/// Staleness signal the workflow emits after every successful write.
///
/// Renderers subscribe and refresh on receipt; this is a notification, not
/// a data mutation. Sends are fire-and-forget: with no subscribers the
/// signal is simply dropped.
#[derive(Clone)]
pub struct ListingInvalidations {
    tx: broadcast::Sender<ListingView>,
}

impl ListingInvalidations {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ListingView> {
        self.tx.subscribe()
    }

    /// Mark both the admin list and the public home view stale.
    pub fn notify_all(&self) {
        for view in [ListingView::Admin, ListingView::Public] {
            let _ = self.tx.send(view);
        }
    }
}

impl Default for ListingInvalidations {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only projection backing the public site: published events in
/// chronological order, straight from the repository so it always reflects
/// the latest committed write.
#[derive(Clone)]
pub struct PublicListing {
    repository: Arc<dyn EventRepository>,
}

impl PublicListing {
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        Self { repository }
    }

    pub async fn events(&self) -> Result<Vec<Event>, RepositoryError> {
        self.repository.list_published().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn notify_all_reaches_subscribers_with_both_views() {
        let invalidations = ListingInvalidations::new();
        let mut rx = invalidations.subscribe();

        invalidations.notify_all();

        assert_eq!(rx.recv().await.unwrap(), ListingView::Admin);
        assert_eq!(rx.recv().await.unwrap(), ListingView::Public);
    }

    #[test]
    fn notify_without_subscribers_is_a_no_op() {
        let invalidations = ListingInvalidations::new();
        invalidations.notify_all();
    }
}
