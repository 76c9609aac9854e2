//! Trip model: date bounds and the city stay schedule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One stay in the trip's ordered city schedule. Boundaries are inclusive
/// on both ends; windows are assumed non-overlapping by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
}

/// A trip: the inclusive calendar date range being planned, plus the
/// ordered stay schedule used to tag each day with a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub stays: Vec<StayWindow>,
}

impl Trip {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Trip name cannot be empty".to_string());
        }
        if self.end_date < self.start_date {
            return Err("Trip end date must not precede start date".to_string());
        }
        Ok(())
    }

    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, d).unwrap()
    }

    #[test]
    fn test_day_count_inclusive() {
        let trip = Trip {
            id: 1,
            name: "Paris".to_string(),
            start_date: date(18),
            end_date: date(24),
            stays: vec![],
        };
        assert_eq!(trip.day_count(), 7);
        assert!(trip.validate().is_ok());
    }

    #[test]
    fn test_validate_reversed_dates() {
        let trip = Trip {
            id: 1,
            name: "Paris".to_string(),
            start_date: date(24),
            end_date: date(18),
            stays: vec![],
        };
        assert!(trip.validate().is_err());
    }
}
