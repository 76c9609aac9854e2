// Whole-interval drag gesture
//
// Covers both moving an already-scheduled entity (start and end shift by
// the same delta) and placing a wishlist item, which only gains a start/end
// pair at drop time.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::layout::geometry::SlotMetrics;
use crate::layout::time_grid::TimeGrid;
use crate::models::payload::DropPayload;

/// What is riding under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum DragSource {
    Scheduled {
        entity_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    Wishlist {
        item_id: i64,
        duration: Duration,
    },
}

/// Result of releasing a drag gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// An existing entity translated to a new start; duration preserved.
    Moved {
        entity_id: i64,
        new_start: NaiveDateTime,
        new_end: NaiveDateTime,
    },
    /// A wishlist item received its first start/end pair.
    Placed {
        item_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    /// Dropped outside any viable target, or abandoned.
    Cancelled,
}

/// One in-flight body drag.
#[derive(Debug, Clone)]
pub struct DragGesture {
    source: DragSource,
    /// Vertical distance from the block's rendered top to the grab point.
    /// The block top, not the raw pointer, decides the landing slot;
    /// without the correction a block grabbed by its lower half jumps up a
    /// slot on drop.
    grab_offset_y: f32,
    hovered: Option<(NaiveDate, usize)>,
}

impl DragGesture {
    pub fn new(source: DragSource, grab_offset_y: f32) -> Self {
        Self {
            source,
            grab_offset_y,
            hovered: None,
        }
    }

    /// Build the gesture from a drop payload, branching on its
    /// discriminant. Scheduled payloads with a non-positive interval are
    /// rejected.
    pub fn from_payload(payload: DropPayload, grab_offset_y: f32) -> Option<Self> {
        let source = match payload {
            DropPayload::Scheduled { id, start, end } => {
                if end <= start {
                    log::debug!("Rejecting scheduled drop payload with invalid interval");
                    return None;
                }
                DragSource::Scheduled {
                    entity_id: id,
                    start,
                    end,
                }
            }
            DropPayload::Wishlist {
                id,
                duration_minutes,
                ..
            } => {
                if duration_minutes <= 0 {
                    log::debug!("Rejecting wishlist drop payload with non-positive duration");
                    return None;
                }
                DragSource::Wishlist {
                    item_id: id,
                    duration: Duration::minutes(duration_minutes),
                }
            }
        };
        Some(Self::new(source, grab_offset_y))
    }

    pub fn source(&self) -> &DragSource {
        &self.source
    }

    pub fn hovered(&self) -> Option<(NaiveDate, usize)> {
        self.hovered
    }

    /// Track the slot the dragged block's top edge is over. `pointer_y` is
    /// measured from the top of `date`'s day column.
    pub fn update_hover(
        &mut self,
        date: NaiveDate,
        pointer_y: f32,
        metrics: &SlotMetrics,
        grid: &TimeGrid,
    ) {
        let top_y = pointer_y - self.grab_offset_y;
        let row = metrics.row_at(top_y, grid.slot_count());
        self.hovered = Some((date, row));
    }

    /// The pointer left the viable drop surface.
    pub fn clear_hover(&mut self) {
        self.hovered = None;
    }

    /// Release over the last hovered slot. With no hover target the drop is
    /// cancelled and nothing is emitted.
    pub fn finish(self, grid: &TimeGrid) -> DragOutcome {
        let Some((date, row)) = self.hovered else {
            return DragOutcome::Cancelled;
        };
        let new_start = date.and_time(grid.slot_time(row));
        match self.source {
            DragSource::Scheduled {
                entity_id,
                start,
                end,
            } => DragOutcome::Moved {
                entity_id,
                new_start,
                new_end: new_start + (end - start),
            },
            DragSource::Wishlist { item_id, duration } => DragOutcome::Placed {
                item_id,
                start: new_start,
                end: new_start + duration,
            },
        }
    }

    /// Abandon the gesture (escape key, rejected drop target); persisted
    /// timestamps stay untouched.
    pub fn cancel(self) -> DragOutcome {
        DragOutcome::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::geometry::SLOT_PIXEL_HEIGHT;

    fn dt(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 2, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, day).unwrap()
    }

    fn scheduled_gesture(grab_offset_y: f32) -> DragGesture {
        DragGesture::new(
            DragSource::Scheduled {
                entity_id: 7,
                start: dt(20, 9, 0),
                end: dt(20, 10, 30),
            },
            grab_offset_y,
        )
    }

    #[test]
    fn test_move_preserves_duration_across_days() {
        let grid = TimeGrid::default_trip_grid();
        let mut gesture = scheduled_gesture(0.0);
        // hover over the 4th row of the 22nd: 10:00
        gesture.update_hover(date(22), 4.0 * SLOT_PIXEL_HEIGHT, &SlotMetrics::default(), &grid);
        assert_eq!(
            gesture.finish(&grid),
            DragOutcome::Moved {
                entity_id: 7,
                new_start: dt(22, 10, 0),
                new_end: dt(22, 11, 30),
            }
        );
    }

    #[test]
    fn test_grab_offset_correction() {
        let grid = TimeGrid::default_trip_grid();
        // grabbed 1.5 slots below the block top; pointer over row 4 but the
        // block top sits over row 2
        let mut gesture = scheduled_gesture(1.5 * SLOT_PIXEL_HEIGHT);
        gesture.update_hover(date(20), 4.0 * SLOT_PIXEL_HEIGHT, &SlotMetrics::default(), &grid);
        assert_eq!(gesture.hovered(), Some((date(20), 2)));
    }

    #[test]
    fn test_wishlist_placement_allocates_interval() {
        let grid = TimeGrid::default_trip_grid();
        let payload = DropPayload::Wishlist {
            id: 3,
            title: "Catacombs".to_string(),
            duration_minutes: 90,
        };
        let mut gesture = DragGesture::from_payload(payload, 0.0).unwrap();
        gesture.update_hover(date(21), 0.0, &SlotMetrics::default(), &grid);
        assert_eq!(
            gesture.finish(&grid),
            DragOutcome::Placed {
                item_id: 3,
                start: dt(21, 8, 0),
                end: dt(21, 9, 30),
            }
        );
    }

    #[test]
    fn test_finish_without_hover_cancels() {
        let grid = TimeGrid::default_trip_grid();
        assert_eq!(scheduled_gesture(0.0).finish(&grid), DragOutcome::Cancelled);
    }

    #[test]
    fn test_clear_hover_then_finish_cancels() {
        let grid = TimeGrid::default_trip_grid();
        let mut gesture = scheduled_gesture(0.0);
        gesture.update_hover(date(20), 0.0, &SlotMetrics::default(), &grid);
        gesture.clear_hover();
        assert_eq!(gesture.finish(&grid), DragOutcome::Cancelled);
    }

    #[test]
    fn test_payload_with_invalid_interval_rejected() {
        let payload = DropPayload::Scheduled {
            id: 7,
            start: dt(20, 10, 0),
            end: dt(20, 10, 0),
        };
        assert!(DragGesture::from_payload(payload, 0.0).is_none());
    }

    #[test]
    fn test_payload_with_non_positive_duration_rejected() {
        let payload = DropPayload::Wishlist {
            id: 3,
            title: "Nope".to_string(),
            duration_minutes: 0,
        };
        assert!(DragGesture::from_payload(payload, 0.0).is_none());
    }
}
