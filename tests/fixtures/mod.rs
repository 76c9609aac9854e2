// Test fixtures - reusable test data
// Provides consistent test data across all test files

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};

use trip_scheduler::models::entity::{EntityKind, ScheduledEntity};
use trip_scheduler::services::database::Database;

pub const TRIP_ID: i64 = 1;

/// A timestamp on day `day` of February 2025.
pub fn dt(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 2, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 2, day).unwrap()
}

/// Fresh in-memory database with the schema applied.
pub fn setup_db() -> Database {
    let db = Database::new(":memory:").expect("Failed to create database");
    db.initialize_schema().expect("Failed to initialize schema");
    db
}

pub fn activity(title: &str, start: NaiveDateTime, end: NaiveDateTime) -> ScheduledEntity {
    ScheduledEntity::new(TRIP_ID, EntityKind::Activity, title, start, end).unwrap()
}

pub fn flight(title: &str, start: NaiveDateTime, end: NaiveDateTime) -> ScheduledEntity {
    ScheduledEntity::new(TRIP_ID, EntityKind::Flight, title, start, end).unwrap()
}
