//! Day view navigation: one trip day at a time.

use chrono::{Duration, NaiveDate};

use crate::layout::day_window::{DayInfo, DayWindow};

pub struct DayView {
    pub date: NaiveDate,
}

impl DayView {
    /// Focus `date`, clamped into the trip bounds.
    pub fn clamped(date: NaiveDate, window: &DayWindow) -> Self {
        Self {
            date: date.clamp(window.trip_start(), window.trip_end()),
        }
    }

    pub fn days(&self, window: &DayWindow) -> Vec<DayInfo> {
        window.day(self.date).into_iter().collect()
    }

    pub fn previous(&mut self, window: &DayWindow) {
        let candidate = self.date - Duration::days(1);
        if candidate >= window.trip_start() {
            self.date = candidate;
        }
    }

    pub fn next(&mut self, window: &DayWindow) {
        let candidate = self.date + Duration::days(1);
        if candidate <= window.trip_end() {
            self.date = candidate;
        }
    }

    pub fn title(&self) -> String {
        self.date.format("%A, %b %d").to_string()
    }
}
