// Database service module
// SQLite database connection and schema management

use anyhow::{Context, Result};
use rusqlite::Connection;

pub mod migrations;
mod schema;

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create a new database connection
    ///
    /// # Arguments
    /// * `path` - Path to the SQLite database file (or ":memory:" for in-memory)
    pub fn new(path: &str) -> Result<Self> {
        let conn =
            Connection::open(path).context(format!("Failed to open database at {}", path))?;

        // Enable foreign keys
        conn.execute("PRAGMA foreign_keys = ON", [])
            .context("Failed to enable foreign keys")?;

        Ok(Self { conn })
    }

    /// Initialize the database schema
    /// Creates all required tables if they don't exist and runs migrations
    pub fn initialize_schema(&self) -> Result<()> {
        schema::initialize_schema(&self.conn)
    }

    /// Get a reference to the database connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
