//! Optimistic mutation coordinator.
//!
//! Holds the locally known entities for one trip. Every mutation applies to
//! local state immediately so the grid re-renders without waiting on
//! persistence; when the store signals failure the pre-mutation snapshot is
//! restored, never leaving the calendar inconsistent with what the user
//! thinks was saved.
//!
//! Remote changes delivered over the live-sync channel are authoritative
//! and replace local state in arrival order. Two clients editing the same
//! entity within one round trip resolve last-write-wins; acceptable for a
//! small-group planning tool, and a known limitation rather than a bug.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::entity::{EntityKind, ScheduledEntity};
use crate::models::wishlist::WishlistItem;
use crate::services::store::EntityStore;
use crate::utils::date::{end_of_day, start_of_day};

pub struct Planner<S: EntityStore> {
    store: S,
    entities: HashMap<i64, ScheduledEntity>,
}

impl<S: EntityStore> Planner<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            entities: HashMap::new(),
        }
    }

    /// Seed the planner with previously persisted entities. Rows without an
    /// id cannot be tracked and are dropped with a warning.
    pub fn with_entities(store: S, entities: Vec<ScheduledEntity>) -> Self {
        let mut planner = Self::new(store);
        for entity in entities {
            match entity.id {
                Some(id) => {
                    planner.entities.insert(id, entity);
                }
                None => log::warn!("Ignoring entity without id: {}", entity.title),
            }
        }
        planner
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get(&self, id: i64) -> Option<&ScheduledEntity> {
        self.entities.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities visible on `date` (half-open interval intersection),
    /// ordered by start time for deterministic rendering.
    pub fn entities_on_day(&self, date: NaiveDate) -> Vec<&ScheduledEntity> {
        let day_start = start_of_day(date);
        let day_end = end_of_day(date);
        let mut visible: Vec<&ScheduledEntity> = self
            .entities
            .values()
            .filter(|e| e.start < day_end && e.end > day_start)
            .collect();
        visible.sort_by(|a, b| a.start.cmp(&b.start).then(a.id.cmp(&b.id)));
        visible
    }

    /// Give a wishlist item its first start/end pair. Creation is not
    /// optimistic: the id only exists once the store has accepted the row.
    pub fn schedule_item(
        &mut self,
        item: &WishlistItem,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Option<i64> {
        let mut entity = match ScheduledEntity::new(
            item.trip_id,
            EntityKind::Activity,
            item.title.clone(),
            start,
            end,
        ) {
            Ok(entity) => entity,
            Err(err) => {
                log::warn!("Cannot schedule '{}': {}", item.title, err);
                return None;
            }
        };
        entity.notes = item.notes.clone();
        entity.category_id = item.category_id;

        let created = self.store.create_entity(entity)?;
        let id = created.id?;
        self.entities.insert(id, created);
        Some(id)
    }

    /// Move or resize an entity. Applies locally first, rolls back if the
    /// store rejects the update. Returns whether the new times stuck.
    pub fn reschedule(&mut self, id: i64, new_start: NaiveDateTime, new_end: NaiveDateTime) -> bool {
        if new_end <= new_start {
            log::warn!("Rejecting reschedule of {} with non-positive interval", id);
            return false;
        }
        let Some(current) = self.entities.get(&id) else {
            log::warn!("Reschedule of unknown entity {}", id);
            return false;
        };

        let snapshot = current.clone();
        let mut updated = snapshot.clone();
        updated.start = new_start;
        updated.end = new_end;
        self.entities.insert(id, updated.clone());

        match self.store.update_entity(&updated) {
            Some(saved) => {
                self.entities.insert(id, saved);
                true
            }
            None => {
                log::warn!("Store rejected reschedule of {}, reverting", id);
                self.entities.insert(id, snapshot);
                false
            }
        }
    }

    /// Delete an entity, restoring it locally if the store refuses.
    pub fn remove(&mut self, id: i64) -> bool {
        let Some(snapshot) = self.entities.remove(&id) else {
            return false;
        };
        if self.store.delete_entity(id) {
            true
        } else {
            log::warn!("Store rejected delete of {}, restoring", id);
            self.entities.insert(id, snapshot);
            false
        }
    }

    /// A remote insert is authoritative; an id collision overwrites local
    /// state (last write wins).
    pub fn apply_remote_insert(&mut self, entity: ScheduledEntity) {
        self.apply_remote_update(entity);
    }

    pub fn apply_remote_update(&mut self, entity: ScheduledEntity) {
        match entity.id {
            Some(id) => {
                self.entities.insert(id, entity);
            }
            None => log::warn!("Ignoring remote entity without id: {}", entity.title),
        }
    }

    pub fn apply_remote_delete(&mut self, id: i64) {
        self.entities.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::MockEntityStore;
    use chrono::NaiveDate;

    fn dt(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 2, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, day).unwrap()
    }

    fn entity(id: i64, start: NaiveDateTime, end: NaiveDateTime) -> ScheduledEntity {
        let mut entity =
            ScheduledEntity::new(1, EntityKind::Activity, format!("Entity {}", id), start, end)
                .unwrap();
        entity.id = Some(id);
        entity
    }

    fn planner_with(
        store: MockEntityStore,
        entities: Vec<ScheduledEntity>,
    ) -> Planner<MockEntityStore> {
        Planner::with_entities(store, entities)
    }

    #[test]
    fn test_reschedule_success_applies_new_times() {
        let mut store = MockEntityStore::new();
        store
            .expect_update_entity()
            .returning(|entity| Some(entity.clone()));

        let mut planner = planner_with(store, vec![entity(1, dt(20, 9, 0), dt(20, 10, 0))]);
        assert!(planner.reschedule(1, dt(20, 11, 0), dt(20, 12, 0)));
        assert_eq!(planner.get(1).unwrap().start, dt(20, 11, 0));
    }

    #[test]
    fn test_reschedule_failure_rolls_back() {
        let mut store = MockEntityStore::new();
        store.expect_update_entity().returning(|_| None);

        let mut planner = planner_with(store, vec![entity(1, dt(20, 9, 0), dt(20, 10, 0))]);
        assert!(!planner.reschedule(1, dt(20, 11, 0), dt(20, 12, 0)));
        // pre-mutation snapshot restored exactly
        assert_eq!(planner.get(1).unwrap().start, dt(20, 9, 0));
        assert_eq!(planner.get(1).unwrap().end, dt(20, 10, 0));
    }

    #[test]
    fn test_reschedule_invalid_interval_never_reaches_store() {
        let mut store = MockEntityStore::new();
        store.expect_update_entity().never();

        let mut planner = planner_with(store, vec![entity(1, dt(20, 9, 0), dt(20, 10, 0))]);
        assert!(!planner.reschedule(1, dt(20, 11, 0), dt(20, 11, 0)));
    }

    #[test]
    fn test_remove_failure_restores_entity() {
        let mut store = MockEntityStore::new();
        store.expect_delete_entity().returning(|_| false);

        let mut planner = planner_with(store, vec![entity(1, dt(20, 9, 0), dt(20, 10, 0))]);
        assert!(!planner.remove(1));
        assert!(planner.get(1).is_some());
    }

    #[test]
    fn test_schedule_item_inserts_created_entity() {
        let mut store = MockEntityStore::new();
        store.expect_create_entity().returning(|mut entity| {
            entity.id = Some(77);
            Some(entity)
        });

        let mut planner = planner_with(store, vec![]);
        let item = WishlistItem::new(1, "Catacombs").with_duration(90);
        let id = planner.schedule_item(&item, dt(21, 14, 0), dt(21, 15, 30));
        assert_eq!(id, Some(77));
        assert_eq!(planner.get(77).unwrap().title, "Catacombs");
    }

    #[test]
    fn test_schedule_item_store_failure_leaves_no_entity() {
        let mut store = MockEntityStore::new();
        store.expect_create_entity().returning(|_| None);

        let mut planner = planner_with(store, vec![]);
        let item = WishlistItem::new(1, "Catacombs");
        assert!(planner
            .schedule_item(&item, dt(21, 14, 0), dt(21, 15, 0))
            .is_none());
        assert!(planner.is_empty());
    }

    #[test]
    fn test_remote_update_is_authoritative() {
        let store = MockEntityStore::new();
        let mut planner = planner_with(store, vec![entity(1, dt(20, 9, 0), dt(20, 10, 0))]);

        planner.apply_remote_update(entity(1, dt(20, 15, 0), dt(20, 16, 0)));
        assert_eq!(planner.get(1).unwrap().start, dt(20, 15, 0));

        planner.apply_remote_delete(1);
        assert!(planner.get(1).is_none());
    }

    #[test]
    fn test_entities_on_day_uses_half_open_intervals() {
        let store = MockEntityStore::new();
        let planner = planner_with(
            store,
            vec![
                entity(1, dt(20, 9, 0), dt(20, 10, 0)),
                // ends exactly at midnight: not visible on the 21st
                entity(2, dt(20, 22, 0), dt(21, 0, 0)),
                // spans into the 21st
                entity(3, dt(20, 23, 0), dt(21, 2, 0)),
            ],
        );

        let day20: Vec<i64> = planner
            .entities_on_day(date(20))
            .iter()
            .map(|e| e.id.unwrap())
            .collect();
        assert_eq!(day20, [1, 2, 3]);

        let day21: Vec<i64> = planner
            .entities_on_day(date(21))
            .iter()
            .map(|e| e.id.unwrap())
            .collect();
        assert_eq!(day21, [3]);
    }
}
