// Date utility functions
// Naive local-time wire format and day-boundary helpers

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Wire format for all entity timestamps: naive local time in the trip's
/// fixed timezone, no offset.
pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Key format used to address calendar days ("YYYY-MM-DD").
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

pub fn parse_wire_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), WIRE_FORMAT).ok()
}

pub fn format_wire_datetime(value: NaiveDateTime) -> String {
    value.format(WIRE_FORMAT).to_string()
}

pub fn parse_date_key(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_KEY_FORMAT).ok()
}

pub fn format_date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(0, 0, 0).unwrap()
}

pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::days(1)
}

/// Serde adapter serializing `NaiveDateTime` fields in the wire format.
pub mod wire {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::WIRE_FORMAT;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(WIRE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, WIRE_FORMAT).map_err(serde::de::Error::custom)
    }
}
