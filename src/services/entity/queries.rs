use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{self, params, Row};

use super::shared::{to_entity_kind, to_naive_datetime};
use super::EntityService;
use crate::models::entity::ScheduledEntity;
use crate::utils::date::{end_of_day, format_wire_datetime, start_of_day};

const SELECT_COLUMNS: &str = "id, trip_id, kind, title, location, notes,
                    start_datetime, end_datetime, category_id,
                    created_at, updated_at";

impl<'a> EntityService<'a> {
    /// Every entity of a trip ordered by start time.
    pub fn list_for_trip(&self, trip_id: i64) -> Result<Vec<ScheduledEntity>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM entities
             WHERE trip_id = ?
             ORDER BY start_datetime ASC",
            SELECT_COLUMNS
        ))?;

        let entities = stmt
            .query_map([trip_id], map_entity_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(entities)
    }

    /// Entities whose `[start, end)` intersects the given window.
    ///
    /// Wire-format timestamps sort lexicographically, so the comparison
    /// runs directly on the stored strings.
    pub fn find_in_window(
        &self,
        trip_id: i64,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
    ) -> Result<Vec<ScheduledEntity>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM entities
             WHERE trip_id = ?1 AND start_datetime < ?2 AND end_datetime > ?3
             ORDER BY start_datetime ASC",
            SELECT_COLUMNS
        ))?;

        let entities = stmt
            .query_map(
                params![
                    trip_id,
                    format_wire_datetime(window_end),
                    format_wire_datetime(window_start),
                ],
                map_entity_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(entities)
    }

    /// Entities visible on one calendar day.
    pub fn find_on_day(&self, trip_id: i64, date: NaiveDate) -> Result<Vec<ScheduledEntity>> {
        self.find_in_window(trip_id, start_of_day(date), end_of_day(date))
    }
}

fn map_entity_row(row: &Row<'_>) -> Result<ScheduledEntity, rusqlite::Error> {
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entity::EntityKind;
    use crate::services::database::Database;

    fn dt(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 2, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, day).unwrap()
    }

    fn seeded_db() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        let service = EntityService::new(db.connection());
        for (kind, title, start, end) in [
            (EntityKind::Activity, "Louvre", dt(20, 9, 0), dt(20, 11, 0)),
            (EntityKind::Flight, "Red-eye", dt(20, 23, 0), dt(21, 2, 0)),
            (EntityKind::Activity, "Lyon walk", dt(22, 14, 0), dt(22, 16, 0)),
        ] {
            service
                .create(ScheduledEntity::new(1, kind, title, start, end).unwrap())
                .unwrap();
        }
        // another trip's entity must never leak in
        service
            .create(
                ScheduledEntity::new(2, EntityKind::Activity, "Other trip", dt(20, 9, 0), dt(20, 10, 0))
                    .unwrap(),
            )
            .unwrap();
        db
    }

    #[test]
    fn test_list_for_trip_ordered() {
        let db = seeded_db();
        let entities = EntityService::new(db.connection()).list_for_trip(1).unwrap();
        assert_eq!(entities.len(), 3);
        assert!(entities.windows(2).all(|w| w[0].start <= w[1].start));
    }

    #[test]
    fn test_find_on_day_includes_spanning_entity() {
        let db = seeded_db();
        let service = EntityService::new(db.connection());

        let day20: Vec<String> = service
            .find_on_day(1, date(20))
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(day20, ["Louvre", "Red-eye"]);

        // the red-eye lands at 02:00 on the 21st
        let day21: Vec<String> = service
            .find_on_day(1, date(21))
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(day21, ["Red-eye"]);
    }

    #[test]
    fn test_find_on_day_empty() {
        let db = seeded_db();
        let service = EntityService::new(db.connection());
        assert!(service.find_on_day(1, date(25)).unwrap().is_empty());
    }

    #[test]
    fn test_trips_are_isolated() {
        let db = seeded_db();
        let service = EntityService::new(db.connection());
        let titles: Vec<String> = service
            .find_on_day(2, date(20))
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, ["Other trip"]);
    }
}
