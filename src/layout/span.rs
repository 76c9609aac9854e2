//! Multi-day interval splitting.
//!
//! Determines, for one entity on one calendar day, where rendering begins
//! and how many slots it occupies. Days after the entity's actual start day
//! render a continuation from the top of the grid.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::time_grid::TimeGrid;

/// The slot range an interval occupies on one specific day.
///
/// Derived fresh on every render; entities mutate, so nothing here is
/// cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySpan {
    pub start_slot: usize,
    pub slot_count: usize,
    /// True when the interval started on a prior day and this day only
    /// shows the tail.
    pub is_continuation: bool,
}

/// Compute the span for `[start, end)` on `date`, or `None` when the
/// interval does not touch that day.
///
/// Assumes a positive duration; non-positive intervals are rejected
/// upstream and yield `None` here rather than a bogus span.
pub fn span_for_day(
    grid: &TimeGrid,
    start: NaiveDateTime,
    end: NaiveDateTime,
    date: NaiveDate,
) -> Option<DaySpan> {
    if end <= start {
        return None;
    }
    if date < start.date() || date > end.date() {
        return None;
    }
    // [start, end) is half-open: an interval ending exactly at midnight
    // does not reach into the day it "ends" on.
    if date == end.date() && date != start.date() && end.time() == NaiveTime::MIN {
        return None;
    }

    let step = grid.step_minutes() as i64;

    if date == start.date() {
        let duration_minutes = (end - start).num_minutes();
        let total_span = ((duration_minutes + step - 1) / step).max(1) as usize;
        let start_slot = grid.slot_index_of(start);
        let remaining = grid.slot_count() - start_slot;
        Some(DaySpan {
            start_slot,
            slot_count: total_span.min(remaining),
            is_continuation: false,
        })
    } else {
        let slot_count = if end.date() > date {
            // continues past this day: fill the whole grid
            grid.slot_count()
        } else {
            grid.slot_index_of(end).max(1)
        };
        Some(DaySpan {
            start_slot: 0,
            slot_count,
            is_continuation: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 2, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, day).unwrap()
    }

    /// Full-day grid so continuation slot counts line up with wall time.
    fn full_grid() -> TimeGrid {
        TimeGrid::build(0, 23, 30)
    }

    #[test]
    fn test_single_day_span() {
        let grid = TimeGrid::default_trip_grid();
        let span = span_for_day(&grid, dt(20, 9, 0), dt(20, 10, 0), date(20)).unwrap();
        assert_eq!(
            span,
            DaySpan {
                start_slot: 2,
                slot_count: 2,
                is_continuation: false
            }
        );
    }

    #[test]
    fn test_partial_slot_rounds_up() {
        let grid = TimeGrid::default_trip_grid();
        // 45 minutes spans two 30-minute slots
        let span = span_for_day(&grid, dt(20, 9, 0), dt(20, 9, 45), date(20)).unwrap();
        assert_eq!(span.slot_count, 2);
    }

    #[test]
    fn test_short_interval_occupies_one_slot() {
        let grid = TimeGrid::default_trip_grid();
        let span = span_for_day(&grid, dt(20, 9, 0), dt(20, 9, 10), date(20)).unwrap();
        assert_eq!(span.slot_count, 1);
    }

    #[test]
    fn test_span_truncated_at_end_of_day() {
        let grid = full_grid();
        let span = span_for_day(&grid, dt(20, 23, 0), dt(21, 2, 0), date(20)).unwrap();
        assert!(!span.is_continuation);
        assert_eq!(span.start_slot, 46);
        // only two slots remain between 23:00 and midnight
        assert_eq!(span.slot_count, 2);
    }

    #[test]
    fn test_continuation_day() {
        let grid = full_grid();
        let span = span_for_day(&grid, dt(20, 23, 0), dt(21, 2, 0), date(21)).unwrap();
        assert_eq!(
            span,
            DaySpan {
                start_slot: 0,
                slot_count: 4,
                is_continuation: true
            }
        );
    }

    #[test]
    fn test_middle_day_fills_grid() {
        let grid = full_grid();
        let span = span_for_day(&grid, dt(20, 15, 0), dt(23, 11, 0), date(21)).unwrap();
        assert!(span.is_continuation);
        assert_eq!(span.start_slot, 0);
        assert_eq!(span.slot_count, grid.slot_count());
    }

    #[test]
    fn test_untouched_day_is_none() {
        let grid = full_grid();
        assert!(span_for_day(&grid, dt(20, 9, 0), dt(20, 10, 0), date(21)).is_none());
        assert!(span_for_day(&grid, dt(20, 9, 0), dt(20, 10, 0), date(19)).is_none());
    }

    #[test]
    fn test_midnight_end_excluded_from_next_day() {
        let grid = full_grid();
        // ends exactly at midnight: the 21st shows nothing
        assert!(span_for_day(&grid, dt(20, 22, 0), dt(21, 0, 0), date(21)).is_none());
        let span = span_for_day(&grid, dt(20, 22, 0), dt(21, 0, 0), date(20)).unwrap();
        assert_eq!(span.slot_count, 4);
    }

    #[test]
    fn test_non_positive_duration_is_none() {
        let grid = full_grid();
        assert!(span_for_day(&grid, dt(20, 9, 0), dt(20, 9, 0), date(20)).is_none());
        assert!(span_for_day(&grid, dt(20, 10, 0), dt(20, 9, 0), date(20)).is_none());
    }

    #[test]
    fn test_continuation_tail_before_grid_start_shows_stub() {
        // trip grid opens at 8:00; a flight landing at 2:00 still gets a
        // one-slot stub at the top of the arrival day
        let grid = TimeGrid::default_trip_grid();
        let span = span_for_day(&grid, dt(20, 23, 0), dt(21, 2, 0), date(21)).unwrap();
        assert_eq!(span.slot_count, 1);
        assert!(span.is_continuation);
    }
}
