//! Wishlist service: CRUD for untimed trip ideas.

use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection};

use crate::models::wishlist::WishlistItem;

pub struct WishlistService<'a> {
    conn: &'a Connection,
}

impl<'a> WishlistService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, mut item: WishlistItem) -> Result<WishlistItem> {
        item.validate().map_err(|e| anyhow!(e))?;

        self.conn
            .execute(
                "INSERT INTO wishlist_items (trip_id, title, duration_minutes, notes, category_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    item.trip_id,
                    item.title,
                    item.duration_minutes,
                    item.notes,
                    item.category_id,
                ],
            )
            .context("Failed to insert wishlist item")?;

        item.id = Some(self.conn.last_insert_rowid());
        Ok(item)
    }

    pub fn get(&self, id: i64) -> Result<Option<WishlistItem>> {
        let result = self.conn.query_row(
            "SELECT id, trip_id, title, duration_minutes, notes, category_id
             FROM wishlist_items WHERE id = ?1",
            params![id],
            map_item_row,
        );

        match result {
            Ok(item) => Ok(Some(item)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn list_for_trip(&self, trip_id: i64) -> Result<Vec<WishlistItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, trip_id, title, duration_minutes, notes, category_id
             FROM wishlist_items
             WHERE trip_id = ?1
             ORDER BY title ASC",
        )?;

        let items = stmt
            .query_map(params![trip_id], map_item_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(items)
    }

    /// Remove an item, typically after it has been scheduled onto the grid.
    pub fn delete(&self, id: i64) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM wishlist_items WHERE id = ?1", params![id])
            .context("Failed to delete wishlist item")?;

        if rows_affected == 0 {
            return Err(anyhow!("Wishlist item with id {} not found", id));
        }

        Ok(())
    }
}

fn map_item_row(row: &rusqlite::Row<'_>) -> Result<WishlistItem, rusqlite::Error> {
    Ok(WishlistItem {
        id: Some(row.get(0)?),
        trip_id: row.get(1)?,
        title: row.get(2)?,
        duration_minutes: row.get(3)?,
        notes: row.get(4)?,
        category_id: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::database::Database;

    fn setup_test_db() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db
    }

    #[test]
    fn test_create_and_list() {
        let db = setup_test_db();
        let service = WishlistService::new(db.connection());

        service
            .create(WishlistItem::new(1, "Catacombs").with_duration(90))
            .unwrap();
        service.create(WishlistItem::new(1, "Bakery crawl")).unwrap();
        service.create(WishlistItem::new(2, "Elsewhere")).unwrap();

        let items = service.list_for_trip(1).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Bakery crawl");
        assert_eq!(items[1].duration_minutes, 90);
    }

    #[test]
    fn test_delete_after_scheduling() {
        let db = setup_test_db();
        let service = WishlistService::new(db.connection());

        let item = service.create(WishlistItem::new(1, "Catacombs")).unwrap();
        let id = item.id.unwrap();
        service.delete(id).unwrap();
        assert!(service.get(id).unwrap().is_none());
        assert!(service.delete(id).is_err());
    }

    #[test]
    fn test_create_rejects_invalid() {
        let db = setup_test_db();
        let service = WishlistService::new(db.connection());
        assert!(service.create(WishlistItem::new(1, "  ")).is_err());
    }
}
