use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_categories_table(conn)?;
    create_entities_table(conn)?;
    create_wishlist_table(conn)?;
    run_entity_migrations(conn)?;
    Ok(())
}

fn create_categories_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            trip_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            color TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE(trip_id, name)
        )",
        [],
    )
    .context("Failed to create categories table")?;

    Ok(())
}

fn create_entities_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS entities (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            trip_id INTEGER NOT NULL,
            kind TEXT NOT NULL DEFAULT 'activity',
            title TEXT NOT NULL,
            location TEXT,
            notes TEXT,
            start_datetime TEXT NOT NULL,
            end_datetime TEXT NOT NULL,
            category_id INTEGER REFERENCES categories(id) ON DELETE SET NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create entities table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_entities_trip_start
         ON entities (trip_id, start_datetime)",
        [],
    )
    .context("Failed to create entities index")?;

    Ok(())
}

fn create_wishlist_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS wishlist_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            trip_id INTEGER NOT NULL,
            title TEXT NOT NULL,
            duration_minutes INTEGER NOT NULL DEFAULT 60,
            notes TEXT,
            category_id INTEGER REFERENCES categories(id) ON DELETE SET NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create wishlist_items table")?;

    Ok(())
}

fn run_entity_migrations(conn: &Connection) -> Result<()> {
    migrations::ensure_column(
        conn,
        "entities",
        "category_id",
        "ALTER TABLE entities ADD COLUMN category_id INTEGER REFERENCES categories(id) ON DELETE SET NULL",
    )?;

    migrations::migrate_category_names(conn, "entities")?;
    migrations::migrate_category_names(conn, "wishlist_items")?;

    Ok(())
}
