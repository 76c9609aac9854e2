// Scheduled entity module
// Time-boxed calendar items: activities and fixed reservations

use chrono::{Duration, NaiveDateTime};
use thiserror::Error;

/// Discriminates free user entries from itinerary seed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Activity,
    Flight,
    Hotel,
}

impl EntityKind {
    /// Fixed items come from itinerary seed data rather than free entry.
    pub fn is_fixed(&self) -> bool {
        matches!(self, EntityKind::Flight | EntityKind::Hotel)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Activity => "activity",
            EntityKind::Flight => "flight",
            EntityKind::Hotel => "hotel",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "activity" => Some(EntityKind::Activity),
            "flight" => Some(EntityKind::Flight),
            "hotel" => Some(EntityKind::Hotel),
            _ => None,
        }
    }
}

/// Validation errors for scheduled entities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityValidationError {
    #[error("entity title cannot be empty")]
    EmptyTitle,
    #[error("entity end time must be after start time")]
    InvalidInterval,
}

/// A time-boxed item placed on the trip grid.
///
/// Activities and fixed reservations (flights, hotels) share this shape;
/// `kind` tells them apart. Timestamps are naive local time in the trip's
/// single fixed timezone.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledEntity {
    pub id: Option<i64>,
    pub trip_id: i64,
    pub kind: EntityKind,
    pub title: String,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Stable category reference; display name and color resolve via lookup.
    pub category_id: Option<i64>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl ScheduledEntity {
    /// Create a new entity with required fields, validating the interval.
    pub fn new(
        trip_id: i64,
        kind: EntityKind,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, EntityValidationError> {
        let entity = Self {
            id: None,
            trip_id,
            kind,
            title: title.into(),
            location: None,
            notes: None,
            start,
            end,
            category_id: None,
            created_at: None,
            updated_at: None,
        };
        entity.validate()?;
        Ok(entity)
    }

    /// Create a builder for constructing entities with optional fields.
    pub fn builder() -> EntityBuilder {
        EntityBuilder::new()
    }

    pub fn validate(&self) -> Result<(), EntityValidationError> {
        if self.title.trim().is_empty() {
            return Err(EntityValidationError::EmptyTitle);
        }
        if self.end <= self.start {
            return Err(EntityValidationError::InvalidInterval);
        }
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// An entity is visible on a day if `[start, end)` intersects that day.
    pub fn touches_date(&self, date: chrono::NaiveDate) -> bool {
        self.start.date() <= date && self.end.date() >= date
    }
}

/// Builder for creating entities with optional fields.
pub struct EntityBuilder {
    trip_id: i64,
    kind: EntityKind,
    title: Option<String>,
    location: Option<String>,
    notes: Option<String>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    category_id: Option<i64>,
}

impl EntityBuilder {
    pub fn new() -> Self {
        Self {
            trip_id: 0,
            kind: EntityKind::Activity,
            title: None,
            location: None,
            notes: None,
            start: None,
            end: None,
            category_id: None,
        }
    }

    pub fn trip_id(mut self, trip_id: i64) -> Self {
        self.trip_id = trip_id;
        self
    }

    pub fn kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn category_id(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn build(self) -> Result<ScheduledEntity, EntityValidationError> {
        let entity = ScheduledEntity {
            id: None,
            trip_id: self.trip_id,
            kind: self.kind,
            title: self.title.ok_or(EntityValidationError::EmptyTitle)?,
            location: self.location,
            notes: self.notes,
            start: self.start.ok_or(EntityValidationError::InvalidInterval)?,
            end: self.end.ok_or(EntityValidationError::InvalidInterval)?,
            category_id: self.category_id,
            created_at: None,
            updated_at: None,
        };
        entity.validate()?;
        Ok(entity)
    }
}

impl Default for EntityBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 2, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_new_entity_success() {
        let entity =
            ScheduledEntity::new(1, EntityKind::Activity, "Louvre", dt(20, 9, 0), dt(20, 11, 0))
                .unwrap();
        assert_eq!(entity.title, "Louvre");
        assert_eq!(entity.duration_minutes(), 120);
        assert!(!entity.kind.is_fixed());
    }

    #[test]
    fn test_new_entity_empty_title() {
        let result =
            ScheduledEntity::new(1, EntityKind::Activity, "  ", dt(20, 9, 0), dt(20, 10, 0));
        assert_eq!(result.unwrap_err(), EntityValidationError::EmptyTitle);
    }

    #[test]
    fn test_new_entity_invalid_interval() {
        let result =
            ScheduledEntity::new(1, EntityKind::Activity, "Dinner", dt(20, 10, 0), dt(20, 10, 0));
        assert_eq!(result.unwrap_err(), EntityValidationError::InvalidInterval);
    }

    #[test]
    fn test_builder_with_optional_fields() {
        let entity = ScheduledEntity::builder()
            .trip_id(7)
            .kind(EntityKind::Flight)
            .title("AF 1680")
            .location("CDG")
            .notes("Terminal 2E")
            .start(dt(20, 23, 0))
            .end(dt(21, 2, 0))
            .category_id(3)
            .build()
            .unwrap();

        assert_eq!(entity.trip_id, 7);
        assert!(entity.kind.is_fixed());
        assert_eq!(entity.location.as_deref(), Some("CDG"));
        assert_eq!(entity.category_id, Some(3));
    }

    #[test]
    fn test_builder_missing_times() {
        let result = ScheduledEntity::builder().title("No times").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_touches_date_multi_day() {
        let flight =
            ScheduledEntity::new(1, EntityKind::Flight, "Red-eye", dt(20, 23, 0), dt(21, 2, 0))
                .unwrap();
        assert!(flight.touches_date(NaiveDate::from_ymd_opt(2025, 2, 20).unwrap()));
        assert!(flight.touches_date(NaiveDate::from_ymd_opt(2025, 2, 21).unwrap()));
        assert!(!flight.touches_date(NaiveDate::from_ymd_opt(2025, 2, 22).unwrap()));
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in [EntityKind::Activity, EntityKind::Flight, EntityKind::Hotel] {
            assert_eq!(EntityKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(EntityKind::parse("dinner"), None);
    }
}
