use anyhow::{anyhow, Context, Result};
use chrono::Local;
use rusqlite::{self, params};

use super::EntityService;
use crate::models::entity::ScheduledEntity;
use crate::utils::date::format_wire_datetime;

use super::shared::{to_entity_kind, to_naive_datetime};

impl<'a> EntityService<'a> {
    /// Create a new entity in the database.
    pub fn create(&self, mut entity: ScheduledEntity) -> Result<ScheduledEntity> {
        entity.validate().map_err(|e| anyhow!(e))?;

        let now = Local::now().naive_local();
        let now_str = format_wire_datetime(now);

        self.conn
            .execute(
                "INSERT INTO entities (
                    trip_id, kind, title, location, notes,
                    start_datetime, end_datetime, category_id,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    entity.trip_id,
                    entity.kind.as_str(),
                    entity.title,
                    entity.location,
                    entity.notes,
                    format_wire_datetime(entity.start),
                    format_wire_datetime(entity.end),
                    entity.category_id,
                    &now_str,
                    &now_str,
                ],
            )
            .context("Failed to insert entity")?;

        entity.id = Some(self.conn.last_insert_rowid());
        entity.created_at = Some(now);
        entity.updated_at = Some(now);

        Ok(entity)
    }

    /// Retrieve an entity by ID.
    pub fn get(&self, id: i64) -> Result<Option<ScheduledEntity>> {
        let result = self.conn.query_row(
            "SELECT id, trip_id, kind, title, location, notes,
                    start_datetime, end_datetime, category_id,
                    created_at, updated_at
             FROM entities WHERE id = ?",
            [id],
            |row| {
                Ok(ScheduledEntity {
                    id: Some(row.get(0)?),
                    trip_id: row.get(1)?,
                    kind: to_entity_kind(row.get::<_, String>(2)?)?,
                    title: row.get(3)?,
                    location: row.get(4)?,
                    notes: row.get(5)?,
                    start: to_naive_datetime(row.get::<_, String>(6)?)?,
                    end: to_naive_datetime(row.get::<_, String>(7)?)?,
                    category_id: row.get(8)?,
                    created_at: Some(to_naive_datetime(row.get::<_, String>(9)?)?),
                    updated_at: Some(to_naive_datetime(row.get::<_, String>(10)?)?),
                })
            },
        );

        match result {
            Ok(entity) => Ok(Some(entity)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Update an existing entity.
    pub fn update(&self, entity: &ScheduledEntity) -> Result<()> {
        let id = entity
            .id
            .ok_or_else(|| anyhow!("Entity ID is required for update"))?;
        entity.validate().map_err(|e| anyhow!(e))?;

        let rows_affected = self
            .conn
            .execute(
                "UPDATE entities SET
                    trip_id = ?, kind = ?, title = ?, location = ?, notes = ?,
                    start_datetime = ?, end_datetime = ?, category_id = ?,
                    updated_at = ?
                 WHERE id = ?",
                params![
                    entity.trip_id,
                    entity.kind.as_str(),
                    entity.title,
                    entity.location,
                    entity.notes,
                    format_wire_datetime(entity.start),
                    format_wire_datetime(entity.end),
                    entity.category_id,
                    format_wire_datetime(Local::now().naive_local()),
                    id,
                ],
            )
            .context("Failed to update entity")?;

        if rows_affected == 0 {
            return Err(anyhow!("Entity with id {} not found", id));
        }

        Ok(())
    }

    /// Delete an entity by ID.
    pub fn delete(&self, id: i64) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM entities WHERE id = ?", [id])
            .context("Failed to delete entity")?;

        if rows_affected == 0 {
            return Err(anyhow!("Entity with id {} not found", id));
        }

        Ok(())
    }
}
