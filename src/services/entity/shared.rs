//! Row conversion helpers shared by the entity submodules.

use chrono::NaiveDateTime;
use rusqlite::types::Type;

use crate::models::entity::EntityKind;
use crate::utils::date::parse_wire_datetime;

/// Parse a stored wire-format timestamp, surfacing a conversion error the
/// rusqlite row mapper can carry.
pub(crate) fn to_naive_datetime(value: String) -> Result<NaiveDateTime, rusqlite::Error> {
    parse_wire_datetime(&value).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            Type::Text,
            format!("invalid stored timestamp: {}", value).into(),
        )
    })
}

pub(crate) fn to_entity_kind(value: String) -> Result<EntityKind, rusqlite::Error> {
    EntityKind::parse(&value).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            Type::Text,
            format!("unknown entity kind: {}", value).into(),
        )
    })
}
