//! Week view navigation: a seven-day (or truncated) slice of the trip.

use chrono::{Duration, NaiveDate};

use super::get_week_start;
use crate::layout::day_window::{DayInfo, DayWindow};

pub struct WeekView {
    pub week_start: NaiveDate,
}

impl WeekView {
    /// The week containing `date`.
    pub fn containing(date: NaiveDate, first_day_of_week: u8) -> Self {
        Self {
            week_start: get_week_start(date, first_day_of_week),
        }
    }

    /// Days of this week inside the trip; can be empty.
    pub fn days(&self, window: &DayWindow) -> Vec<DayInfo> {
        window.visible_week(self.week_start)
    }

    /// Step one week back unless that leaves the trip entirely.
    pub fn previous(&mut self, window: &DayWindow) {
        let candidate = self.week_start - Duration::days(7);
        if !window.visible_week(candidate).is_empty() {
            self.week_start = candidate;
        }
    }

    /// Step one week forward unless that leaves the trip entirely.
    pub fn next(&mut self, window: &DayWindow) {
        let candidate = self.week_start + Duration::days(7);
        if !window.visible_week(candidate).is_empty() {
            self.week_start = candidate;
        }
    }

    /// Label for the toolbar, e.g. "Feb 17 - Feb 23".
    pub fn title(&self) -> String {
        let week_end = self.week_start + Duration::days(6);
        format!(
            "{} - {}",
            self.week_start.format("%b %d"),
            week_end.format("%b %d")
        )
    }
}
