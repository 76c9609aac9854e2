//! Drag-and-drop payload types.
//!
//! Payloads cross the drop-target boundary as tagged JSON. The `kind` tag
//! distinguishes a wishlist item (untimed, duration only) from a scheduled
//! entity (has both start and end); the drop handler branches on it to
//! decide between allocating a new start/end pair and shifting an existing
//! one.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::utils::date::wire;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DropPayload {
    /// Untimed idea being pulled from the wishlist onto the grid.
    Wishlist {
        id: i64,
        title: String,
        duration_minutes: i64,
    },
    /// Already-scheduled entity being moved to a new slot.
    Scheduled {
        id: i64,
        #[serde(with = "wire")]
        start: NaiveDateTime,
        #[serde(with = "wire")]
        end: NaiveDateTime,
    },
}

impl DropPayload {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            log::error!("Failed to serialize drop payload: {}", err);
            String::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date::parse_wire_datetime;

    #[test]
    fn test_scheduled_payload_uses_wire_format() {
        let payload = DropPayload::Scheduled {
            id: 4,
            start: parse_wire_datetime("2025-02-20T09:00").unwrap(),
            end: parse_wire_datetime("2025-02-20T10:30").unwrap(),
        };
        let json = payload.to_json();
        assert!(json.contains("\"2025-02-20T09:00\""), "got: {}", json);
        assert!(json.contains("\"scheduled\""));

        let parsed: DropPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, payload);
    }

    #[test]
    fn test_wishlist_payload_round_trip() {
        let payload = DropPayload::Wishlist {
            id: 11,
            title: "Catacombs".to_string(),
            duration_minutes: 90,
        };
        let parsed: DropPayload = serde_json::from_str(&payload.to_json()).unwrap();
        assert_eq!(parsed, payload);
    }
}
