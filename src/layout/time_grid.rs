//! Discrete time-slot model for the daily grid.
//!
//! A day exposes a fixed ordered sequence of bookable slots (8:00 through
//! 23:30 in 30-minute steps by default). The slot index is the primary
//! addressing unit for everything downstream.

use chrono::{NaiveDateTime, NaiveTime, Timelike};

/// First bookable hour of a day.
pub const DEFAULT_START_HOUR: u32 = 8;
/// Last hour that still opens slots (the 23:00 and 23:30 slots exist).
pub const DEFAULT_END_HOUR: u32 = 23;
/// Fixed slot width in minutes.
pub const SLOT_STEP_MINUTES: u32 = 30;

/// One bookable slot within a day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    pub hour: u32,
    pub minute: u32,
    pub label: String,
}

impl TimeSlot {
    pub fn start_minutes(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    pub fn time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap()
    }
}

/// The fixed slot sequence for one day of the trip.
///
/// Invariant: slots are contiguous, fixed-width and strictly increasing;
/// `build` is the only constructor and guarantees all three.
#[derive(Debug, Clone)]
pub struct TimeGrid {
    slots: Vec<TimeSlot>,
    step_minutes: u32,
}

impl TimeGrid {
    /// Generate the slot sequence for `start_hour:00` through the last step
    /// of `end_hour`. `step_minutes` must divide 60.
    pub fn build(start_hour: u32, end_hour: u32, step_minutes: u32) -> Self {
        debug_assert!(start_hour <= end_hour && end_hour < 24);
        debug_assert!(step_minutes > 0 && 60 % step_minutes == 0);

        let mut slots = Vec::new();
        for hour in start_hour..=end_hour {
            let mut minute = 0;
            while minute < 60 {
                slots.push(TimeSlot {
                    hour,
                    minute,
                    label: format!("{:02}:{:02}", hour, minute),
                });
                minute += step_minutes;
            }
        }
        Self {
            slots,
            step_minutes,
        }
    }

    pub fn default_trip_grid() -> Self {
        Self::build(DEFAULT_START_HOUR, DEFAULT_END_HOUR, SLOT_STEP_MINUTES)
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn last_index(&self) -> usize {
        self.slots.len() - 1
    }

    pub fn step_minutes(&self) -> u32 {
        self.step_minutes
    }

    /// Minutes after midnight at which the first slot opens.
    pub fn start_minutes(&self) -> u32 {
        self.slots[0].start_minutes()
    }

    /// Index of the slot whose `[start, start + step)` window contains the
    /// timestamp's time-of-day.
    ///
    /// Never fails: a timestamp before the first slot clamps to index 0, one
    /// at or past the end of the last slot clamps to the last index. Window
    /// containment is the sole matching rule; in particular a timestamp
    /// exactly on a slot boundary belongs to the slot it opens.
    pub fn slot_index_of(&self, timestamp: NaiveDateTime) -> usize {
        self.slot_index_of_time(timestamp.time())
    }

    pub fn slot_index_of_time(&self, time: NaiveTime) -> usize {
        let minutes = time.hour() * 60 + time.minute();
        let first = self.start_minutes();
        if minutes < first {
            return 0;
        }
        let index = ((minutes - first) / self.step_minutes) as usize;
        index.min(self.last_index())
    }

    /// The time-of-day at which slot `index` opens (clamped to the grid).
    pub fn slot_time(&self, index: usize) -> NaiveTime {
        self.slots[index.min(self.last_index())].time()
    }
}
