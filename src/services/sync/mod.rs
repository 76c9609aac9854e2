//! Live-sync collaborator: in-process hub with subscribe/notify semantics.
//!
//! Out-of-band entity changes (another client editing the same trip) arrive
//! through this channel. Subscribers register per trip and receive insert,
//! update and delete notifications in publish order; dropping the returned
//! subscription detaches the observer.
//!
//! Handlers run while the hub lock is held and must not call back into the
//! hub. Keep them short: push into a queue the owner drains on its own turn
//! of the event loop.

use std::sync::{Arc, Mutex};

use crate::models::entity::ScheduledEntity;

pub type EntityHandler = Box<dyn Fn(&ScheduledEntity) + Send>;
pub type DeleteHandler = Box<dyn Fn(i64) + Send>;

struct Subscriber {
    id: u64,
    trip_id: i64,
    on_insert: EntityHandler,
    on_update: EntityHandler,
    on_delete: DeleteHandler,
}

#[derive(Default)]
struct HubState {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

/// Cloneable handle to the shared hub.
#[derive(Clone, Default)]
pub struct SyncHub {
    inner: Arc<Mutex<HubState>>,
}

impl SyncHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer for one trip. The observer stays attached until
    /// the returned subscription is dropped or explicitly unsubscribed.
    pub fn subscribe(
        &self,
        trip_id: i64,
        on_insert: EntityHandler,
        on_update: EntityHandler,
        on_delete: DeleteHandler,
    ) -> Subscription {
        let mut state = self.inner.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        state.subscribers.push(Subscriber {
            id,
            trip_id,
            on_insert,
            on_update,
            on_delete,
        });
        Subscription {
            inner: Arc::clone(&self.inner),
            id,
        }
    }

    pub fn publish_insert(&self, entity: &ScheduledEntity) {
        let state = self.inner.lock().unwrap();
        for sub in state.subscribers.iter().filter(|s| s.trip_id == entity.trip_id) {
            (sub.on_insert)(entity);
        }
    }

    pub fn publish_update(&self, entity: &ScheduledEntity) {
        let state = self.inner.lock().unwrap();
        for sub in state.subscribers.iter().filter(|s| s.trip_id == entity.trip_id) {
            (sub.on_update)(entity);
        }
    }

    pub fn publish_delete(&self, trip_id: i64, entity_id: i64) {
        let state = self.inner.lock().unwrap();
        for sub in state.subscribers.iter().filter(|s| s.trip_id == trip_id) {
            (sub.on_delete)(entity_id);
        }
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.inner.lock().unwrap().subscribers.len()
    }
}

/// Detaches its observer when dropped.
pub struct Subscription {
    inner: Arc<Mutex<HubState>>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Ok(mut state) = self.inner.lock() {
            state.subscribers.retain(|s| s.id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entity::EntityKind;
    use chrono::NaiveDate;
    use std::sync::mpsc;

    fn sample_entity(trip_id: i64) -> ScheduledEntity {
        let day = NaiveDate::from_ymd_opt(2025, 2, 20).unwrap();
        let mut entity = ScheduledEntity::new(
            trip_id,
            EntityKind::Activity,
            "Louvre",
            day.and_hms_opt(9, 0, 0).unwrap(),
            day.and_hms_opt(11, 0, 0).unwrap(),
        )
        .unwrap();
        entity.id = Some(5);
        entity
    }

    fn channel_subscription(hub: &SyncHub, trip_id: i64) -> (Subscription, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel();
        let tx_insert = tx.clone();
        let tx_update = tx.clone();
        let sub = hub.subscribe(
            trip_id,
            Box::new(move |e| tx_insert.send(format!("insert {}", e.title)).unwrap()),
            Box::new(move |e| tx_update.send(format!("update {}", e.title)).unwrap()),
            Box::new(move |id| tx.send(format!("delete {}", id)).unwrap()),
        );
        (sub, rx)
    }

    #[test]
    fn test_events_delivered_in_publish_order() {
        let hub = SyncHub::new();
        let (_sub, rx) = channel_subscription(&hub, 1);

        let entity = sample_entity(1);
        hub.publish_insert(&entity);
        hub.publish_update(&entity);
        hub.publish_delete(1, 5);

        let events: Vec<String> = rx.try_iter().collect();
        assert_eq!(events, ["insert Louvre", "update Louvre", "delete 5"]);
    }

    #[test]
    fn test_other_trips_not_notified() {
        let hub = SyncHub::new();
        let (_sub, rx) = channel_subscription(&hub, 2);

        hub.publish_insert(&sample_entity(1));
        assert!(rx.try_iter().next().is_none());
    }

    #[test]
    fn test_drop_unsubscribes() {
        let hub = SyncHub::new();
        let (sub, rx) = channel_subscription(&hub, 1);
        assert_eq!(hub.subscriber_count(), 1);

        drop(sub);
        assert_eq!(hub.subscriber_count(), 0);

        hub.publish_insert(&sample_entity(1));
        assert!(rx.try_iter().next().is_none());
    }

    #[test]
    fn test_multiple_subscribers() {
        let hub = SyncHub::new();
        let (_a, rx_a) = channel_subscription(&hub, 1);
        let (_b, rx_b) = channel_subscription(&hub, 1);

        hub.publish_insert(&sample_entity(1));
        assert_eq!(rx_a.try_iter().count(), 1);
        assert_eq!(rx_b.try_iter().count(), 1);
    }
}
