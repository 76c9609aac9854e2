//! Calendar day enumeration and city tagging.
//!
//! Derives the ordered day sequence for a trip and, for week views, the
//! visible 7-day (or truncated) window. Each day is tagged with the city it
//! falls in according to the trip's stay schedule. Pure view over immutable
//! data supplied at construction; recomputed on demand, never persisted.

use chrono::{Duration, NaiveDate};

use crate::models::trip::{StayWindow, Trip};
use crate::utils::date::format_date_key;

/// One calendar day of the trip, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayInfo {
    pub date: NaiveDate,
    pub date_str: String,
    pub day_of_week: String,
    pub city: String,
}

#[derive(Debug, Clone)]
pub struct DayWindow {
    trip_start: NaiveDate,
    trip_end: NaiveDate,
    stays: Vec<StayWindow>,
}

impl DayWindow {
    pub fn new(trip_start: NaiveDate, trip_end: NaiveDate, stays: Vec<StayWindow>) -> Self {
        Self {
            trip_start,
            trip_end,
            stays,
        }
    }

    pub fn from_trip(trip: &Trip) -> Self {
        Self::new(trip.start_date, trip.end_date, trip.stays.clone())
    }

    pub fn trip_start(&self) -> NaiveDate {
        self.trip_start
    }

    pub fn trip_end(&self) -> NaiveDate {
        self.trip_end
    }

    /// Every day of the trip, inclusive of both ends.
    pub fn days_in_range(&self) -> Vec<DayInfo> {
        self.days_between(self.trip_start, self.trip_end)
    }

    /// The days of `[week_start, week_start + 6]` that fall inside the trip.
    /// Truncated at either end; can be empty for a week fully outside.
    pub fn visible_week(&self, week_start: NaiveDate) -> Vec<DayInfo> {
        let week_end = week_start + Duration::days(6);
        let start = week_start.max(self.trip_start);
        let end = week_end.min(self.trip_end);
        if start > end {
            return Vec::new();
        }
        self.days_between(start, end)
    }

    /// One day of the trip, or `None` outside the trip bounds.
    pub fn day(&self, date: NaiveDate) -> Option<DayInfo> {
        if date < self.trip_start || date > self.trip_end {
            return None;
        }
        self.days_between(date, date).into_iter().next()
    }

    /// The stay label covering `date`: first match wins, boundaries are
    /// inclusive on both ends, no match yields an empty string.
    pub fn city_for_date(&self, date: NaiveDate) -> String {
        self.stays
            .iter()
            .find(|stay| stay.start <= date && date <= stay.end)
            .map(|stay| stay.label.clone())
            .unwrap_or_default()
    }

    fn days_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<DayInfo> {
        let mut days = Vec::new();
        let mut date = start;
        while date <= end {
            days.push(DayInfo {
                date,
                date_str: format_date_key(date),
                day_of_week: date.format("%A").to_string(),
                city: self.city_for_date(date),
            });
            date += Duration::days(1);
        }
        days
    }
}
