// Drop-target protocol
//
// Payloads arrive as tagged JSON from the drag source. A payload that does
// not parse, or that fails basic shape checks, makes the whole drop a
// no-op; nothing here throws past the drop handler.

use crate::interaction::drag::DragGesture;
use crate::models::payload::DropPayload;

/// Parse a serialized drop payload. Malformed input yields `None`.
pub fn parse_drop_payload(json: &str) -> Option<DropPayload> {
    match serde_json::from_str(json) {
        Ok(payload) => Some(payload),
        Err(err) => {
            log::debug!("Ignoring malformed drop payload: {}", err);
            None
        }
    }
}

/// Parse a payload and build the matching drag gesture in one step.
pub fn gesture_from_json(json: &str, grab_offset_y: f32) -> Option<DragGesture> {
    DragGesture::from_payload(parse_drop_payload(json)?, grab_offset_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::drag::DragSource;
    use chrono::Duration;

    #[test]
    fn test_parse_scheduled_payload() {
        let json = r#"{"kind":"scheduled","id":5,"start":"2025-02-20T09:00","end":"2025-02-20T10:30"}"#;
        let payload = parse_drop_payload(json).unwrap();
        assert!(matches!(payload, DropPayload::Scheduled { id: 5, .. }));
    }

    #[test]
    fn test_parse_wishlist_payload() {
        let json = r#"{"kind":"wishlist","id":9,"title":"Catacombs","duration_minutes":90}"#;
        let gesture = gesture_from_json(json, 0.0).unwrap();
        assert_eq!(
            gesture.source(),
            &DragSource::Wishlist {
                item_id: 9,
                duration: Duration::minutes(90)
            }
        );
    }

    #[test]
    fn test_malformed_json_is_none() {
        assert!(parse_drop_payload("{not json").is_none());
        assert!(parse_drop_payload("").is_none());
    }

    #[test]
    fn test_missing_fields_is_none() {
        assert!(parse_drop_payload(r#"{"kind":"wishlist","id":9}"#).is_none());
        assert!(parse_drop_payload(r#"{"id":9,"title":"x","duration_minutes":60}"#).is_none());
    }

    #[test]
    fn test_unknown_kind_is_none() {
        assert!(parse_drop_payload(r#"{"kind":"hotel_block","id":9}"#).is_none());
    }

    #[test]
    fn test_bad_timestamp_is_none() {
        let json = r#"{"kind":"scheduled","id":5,"start":"late morning","end":"2025-02-20T10:30"}"#;
        assert!(parse_drop_payload(json).is_none());
    }
}
