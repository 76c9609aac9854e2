use anyhow::{Context, Result};
use rusqlite::Connection;

/// Color given to category rows created from legacy name references.
const MIGRATED_CATEGORY_COLOR: &str = "#9CA3AF";

/// Checks whether a column exists on a table.
pub fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let query = format!(
        "SELECT COUNT(*) FROM pragma_table_info('{}') WHERE name='{}'",
        table, column
    );

    let exists: i32 = conn
        .query_row(&query, [], |row| row.get(0))
        .context("Failed to inspect table info")?;

    Ok(exists > 0)
}

/// Adds a column if it does not already exist.
pub fn ensure_column(conn: &Connection, table: &str, column: &str, ddl: &str) -> Result<()> {
    if column_exists(conn, table, column)? {
        return Ok(());
    }

    conn.execute(ddl, [])
        .with_context(|| format!("Failed to add {}.{}", table, column))?;
    Ok(())
}

/// One-time migration away from legacy name-based category references.
///
/// Older databases carried a `category` TEXT column holding the category
/// name. Renaming or recreating a category silently orphaned those rows, so
/// references are now by stable id: every distinct legacy name gets a
/// category row (if one does not already exist), referencing rows are
/// rewritten to the id, and the legacy column is dropped. Dropping the
/// column makes the migration run at most once per database.
pub fn migrate_category_names(conn: &Connection, table: &str) -> Result<()> {
    if !column_exists(conn, table, "category")? {
        return Ok(());
    }

    log::info!("Migrating {} category name references to ids", table);

    conn.execute(
        &format!(
            "INSERT OR IGNORE INTO categories (trip_id, name, color)
             SELECT DISTINCT trip_id, category, '{color}' FROM {table}
             WHERE category IS NOT NULL AND category != ''",
            color = MIGRATED_CATEGORY_COLOR,
            table = table
        ),
        [],
    )
    .with_context(|| format!("Failed to backfill categories from {}", table))?;

    conn.execute(
        &format!(
            "UPDATE {table} SET category_id = (
                SELECT c.id FROM categories c
                WHERE c.trip_id = {table}.trip_id AND c.name = {table}.category
             )
             WHERE category IS NOT NULL AND category != ''",
            table = table
        ),
        [],
    )
    .with_context(|| format!("Failed to rewrite {} category references", table))?;

    conn.execute(&format!("ALTER TABLE {} DROP COLUMN category", table), [])
        .with_context(|| format!("Failed to drop legacy category column on {}", table))?;

    Ok(())
}
