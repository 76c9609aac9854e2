//! Scheduled entity service entry point.
//! Database-backed CRUD and range queries organized across focused
//! submodules.

use rusqlite::Connection;

pub mod crud;
pub mod queries;
mod shared;

/// Service for managing scheduled entities stored in SQLite.
pub struct EntityService<'a> {
    pub(crate) conn: &'a Connection,
}

impl<'a> EntityService<'a> {
    /// Create a new EntityService with a database connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}
