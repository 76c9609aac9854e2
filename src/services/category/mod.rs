//! Category service for CRUD operations on trip categories.
//!
//! Entities hold a stable `category_id`; renames here never orphan them,
//! and deletion clears references via the foreign key.

use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection};

use crate::models::category::{default_categories, Category};

/// Service for managing trip categories.
pub struct CategoryService<'a> {
    conn: &'a Connection,
}

impl<'a> CategoryService<'a> {
    /// Create a new CategoryService with the given database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Populate a trip with the default categories if it has none.
    pub fn initialize_defaults(&self, trip_id: i64) -> Result<()> {
        let count: i32 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM categories WHERE trip_id = ?1",
                params![trip_id],
                |row| row.get(0),
            )
            .unwrap_or(0);

        if count == 0 {
            log::info!("Initializing default categories for trip {}", trip_id);
            for category in default_categories(trip_id) {
                if let Err(e) = self.create(category) {
                    log::warn!("Failed to create default category: {}", e);
                }
            }
        }

        Ok(())
    }

    /// Create a new category.
    pub fn create(&self, category: Category) -> Result<Category> {
        category.validate().map_err(|e| anyhow!("{}", e))?;

        self.conn
            .execute(
                "INSERT INTO categories (trip_id, name, color) VALUES (?1, ?2, ?3)",
                params![category.trip_id, category.name.trim(), category.color],
            )
            .context("Failed to insert category")?;

        self.get_by_id(self.conn.last_insert_rowid())
    }

    /// Get a category by ID.
    pub fn get_by_id(&self, id: i64) -> Result<Category> {
        let category = self
            .conn
            .query_row(
                "SELECT id, trip_id, name, color FROM categories WHERE id = ?1",
                params![id],
                map_category_row,
            )
            .context("Category not found")?;

        Ok(category)
    }

    /// Get a category by name within one trip.
    pub fn get_by_name(&self, trip_id: i64, name: &str) -> Result<Option<Category>> {
        let result = self.conn.query_row(
            "SELECT id, trip_id, name, color FROM categories
             WHERE trip_id = ?1 AND name = ?2",
            params![trip_id, name],
            map_category_row,
        );

        match result {
            Ok(cat) => Ok(Some(cat)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// All categories of a trip ordered by name.
    pub fn list_for_trip(&self, trip_id: i64) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, trip_id, name, color FROM categories
             WHERE trip_id = ?1
             ORDER BY name ASC",
        )?;

        let categories = stmt
            .query_map(params![trip_id], map_category_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(categories)
    }

    /// Rename a category. References stay intact because they are by id.
    pub fn rename(&self, id: i64, new_name: &str) -> Result<Category> {
        let mut category = self.get_by_id(id)?;
        category.name = new_name.to_string();
        category.validate().map_err(|e| anyhow!("{}", e))?;

        self.conn
            .execute(
                "UPDATE categories SET name = ?1 WHERE id = ?2",
                params![new_name.trim(), id],
            )
            .context("Failed to rename category")?;

        Ok(category)
    }

    /// Change a category's display color.
    pub fn set_color(&self, id: i64, color: &str) -> Result<Category> {
        let mut category = self.get_by_id(id)?;
        category.color = color.to_string();
        category.validate().map_err(|e| anyhow!("{}", e))?;

        self.conn
            .execute(
                "UPDATE categories SET color = ?1 WHERE id = ?2",
                params![color, id],
            )
            .context("Failed to update category color")?;

        Ok(category)
    }

    /// Delete a category; referencing entities fall back to uncategorized.
    pub fn delete(&self, id: i64) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM categories WHERE id = ?1", params![id])
            .context("Failed to delete category")?;

        if rows_affected == 0 {
            return Err(anyhow!("Category with id {} not found", id));
        }

        Ok(())
    }
}

fn map_category_row(row: &rusqlite::Row<'_>) -> Result<Category, rusqlite::Error> {
    Ok(Category {
        id: Some(row.get(0)?),
        trip_id: row.get(1)?,
        name: row.get(2)?,
        color: row.get(3)?,
    })
}
