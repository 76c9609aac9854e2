//! Persistence collaborator boundary.
//!
//! The planner performs optimistic local updates and needs a failure signal
//! it can always act on: no error type crosses this boundary. `None` (or
//! `false` for deletes) means the call failed and the caller must roll back
//! to its last known good state.

use crate::models::entity::ScheduledEntity;
use crate::services::database::Database;
use crate::services::entity::EntityService;

/// Boundary contract for entity persistence.
#[cfg_attr(test, mockall::automock)]
pub trait EntityStore {
    fn create_entity(&self, entity: ScheduledEntity) -> Option<ScheduledEntity>;
    fn update_entity(&self, entity: &ScheduledEntity) -> Option<ScheduledEntity>;
    fn delete_entity(&self, id: i64) -> bool;
}

/// SQLite-backed store adapting the CRUD service to the boundary contract.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl EntityStore for SqliteStore {
    fn create_entity(&self, entity: ScheduledEntity) -> Option<ScheduledEntity> {
        match EntityService::new(self.db.connection()).create(entity) {
            Ok(created) => Some(created),
            Err(err) => {
                log::error!("Entity create failed: {:#}", err);
                None
            }
        }
    }

    fn update_entity(&self, entity: &ScheduledEntity) -> Option<ScheduledEntity> {
        let service = EntityService::new(self.db.connection());
        if let Err(err) = service.update(entity) {
            log::error!("Entity update failed: {:#}", err);
            return None;
        }
        Some(entity.clone())
    }

    fn delete_entity(&self, id: i64) -> bool {
        match EntityService::new(self.db.connection()).delete(id) {
            Ok(()) => true,
            Err(err) => {
                log::error!("Entity delete failed: {:#}", err);
                false
            }
        }
    }
}
