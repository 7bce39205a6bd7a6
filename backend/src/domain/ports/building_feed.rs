//! Live view of the building collection.
//!
//! A single [`BuildingPublisher`] owned by a repository adapter replaces the
//! whole snapshot after each mutation; any number of [`BuildingFeed`]
//! subscribers read complete snapshots and may wait for the next one.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::Building;

/// Immutable snapshot of the full collection.
pub type BuildingSnapshot = Arc<[Building]>;

/// Producer side of the building feed.
#[derive(Debug)]
pub struct BuildingPublisher {
    sender: watch::Sender<BuildingSnapshot>,
}

impl BuildingPublisher {
    /// Start a feed seeded with `initial`.
    pub fn new(initial: Vec<Building>) -> Self {
        let (sender, _) = watch::channel(BuildingSnapshot::from(initial));
        Self { sender }
    }

    /// Replace the current snapshot and wake every subscriber.
    pub fn publish(&self, buildings: Vec<Building>) {
        self.sender.send_replace(BuildingSnapshot::from(buildings));
    }

    /// Open a new subscription positioned at the current snapshot.
    pub fn subscribe(&self) -> BuildingFeed {
        BuildingFeed {
            receiver: self.sender.subscribe(),
        }
    }

    /// Latest published snapshot.
    pub fn current(&self) -> BuildingSnapshot {
        self.sender.borrow().clone()
    }
}

impl Default for BuildingPublisher {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Subscriber side of the building feed.
#[derive(Debug, Clone)]
pub struct BuildingFeed {
    receiver: watch::Receiver<BuildingSnapshot>,
}

impl BuildingFeed {
    /// Latest snapshot, marking it as seen.
    pub fn current(&mut self) -> BuildingSnapshot {
        self.receiver.borrow_and_update().clone()
    }

    /// Wait for a snapshot newer than the last one seen.
    ///
    /// Returns `None` once the publisher has been dropped.
    pub async fn changed(&mut self) -> Option<BuildingSnapshot> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Feed that never changes; used where no repository is attached.
    pub fn fixed(buildings: Vec<Building>) -> Self {
        let (_, receiver) = watch::channel(BuildingSnapshot::from(buildings));
        Self { receiver }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, BuildingId};
    use rstest::rstest;

    fn building(address: &str) -> Building {
        Building::without_parking(
            BuildingId::random(),
            Address::new(address).expect("valid address"),
        )
    }

    #[rstest]
    fn subscribers_start_at_current_snapshot() {
        let publisher = BuildingPublisher::new(vec![building("a")]);
        let mut feed = publisher.subscribe();
        assert_eq!(feed.current().len(), 1);
    }

    #[tokio::test]
    async fn every_subscriber_sees_the_full_replacement() {
        let publisher = BuildingPublisher::default();
        let mut first = publisher.subscribe();
        let mut second = publisher.subscribe();

        publisher.publish(vec![building("a"), building("b")]);

        let seen_first = first.changed().await.expect("publisher alive");
        let seen_second = second.changed().await.expect("publisher alive");
        assert_eq!(seen_first.len(), 2);
        assert_eq!(seen_first, seen_second);
    }

    #[tokio::test]
    async fn changed_ends_when_publisher_drops() {
        let publisher = BuildingPublisher::default();
        let mut feed = publisher.subscribe();
        drop(publisher);

        assert!(feed.changed().await.is_none());
    }

    #[tokio::test]
    async fn fixed_feed_reports_its_snapshot_and_closes() {
        let mut feed = BuildingFeed::fixed(vec![building("a")]);
        assert_eq!(feed.current().len(), 1);
        assert!(feed.changed().await.is_none());
    }
}
