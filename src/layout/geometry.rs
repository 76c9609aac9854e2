//! Pixel-to-time conversion and snapping for interactive gestures.
//!
//! The rest of the layout core works in slot units; this is the one place
//! pixels enter the picture. Views and the gesture engine share these
//! conversions so a drag preview and the committed value can never
//! disagree.

use chrono::{DateTime, Duration, NaiveDateTime};

use super::time_grid::SLOT_STEP_MINUTES;

/// Rendered height of one slot row.
pub const SLOT_PIXEL_HEIGHT: f32 = 40.0;
/// Drag boundaries snap to this granularity.
pub const SNAP_MINUTES: i64 = 15;
/// Shortest interval a resize may produce.
pub const MIN_DURATION_MINUTES: i64 = 15;

/// Vertical geometry of the grid as rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotMetrics {
    pub slot_pixel_height: f32,
    pub step_minutes: u32,
}

impl Default for SlotMetrics {
    fn default() -> Self {
        Self {
            slot_pixel_height: SLOT_PIXEL_HEIGHT,
            step_minutes: SLOT_STEP_MINUTES,
        }
    }
}

impl SlotMetrics {
    /// Convert a vertical pointer delta into a (fractional) minute delta.
    pub fn pixels_to_minutes(&self, delta_pixels: f32) -> f64 {
        (delta_pixels / self.slot_pixel_height) as f64 * self.step_minutes as f64
    }

    /// Slot row under a y offset from the top of the grid, clamped to the
    /// row range.
    pub fn row_at(&self, y_offset: f32, row_count: usize) -> usize {
        if row_count == 0 {
            return 0;
        }
        let row = (y_offset / self.slot_pixel_height).floor();
        if row <= 0.0 {
            0
        } else {
            (row as usize).min(row_count - 1)
        }
    }

    /// Shift a timestamp by a fractional minute delta.
    pub fn offset_by_minutes(&self, value: NaiveDateTime, minutes: f64) -> NaiveDateTime {
        value + Duration::seconds((minutes * 60.0).round() as i64)
    }
}

/// Snap to the nearest quarter-hour boundary, rounding half up. An
/// already-aligned timestamp comes back unchanged.
pub fn snap_to_quarter_hour(value: NaiveDateTime) -> NaiveDateTime {
    let snap = SNAP_MINUTES * 60;
    let secs = value.and_utc().timestamp();
    let snapped = (2 * secs + snap).div_euclid(2 * snap) * snap;
    DateTime::from_timestamp(snapped, 0)
        .map(|dt| dt.naive_utc())
        .unwrap_or(value)
}
