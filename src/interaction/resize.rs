// Entity Resize Gesture
//
// Resizing an entity by dragging a handle on its border:
// - Top handle moves the start time
// - Bottom handle moves the end time
// Boundaries snap to quarter-hour granularity; a result below the minimum
// duration reverts the whole gesture instead of clamping.

use chrono::NaiveDateTime;

use crate::layout::geometry::{snap_to_quarter_hour, SlotMetrics, MIN_DURATION_MINUTES};
use crate::models::entity::ScheduledEntity;

/// Which edge of the entity block is being dragged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeHandle {
    /// Top edge - adjusts start time
    Top,
    /// Bottom edge - adjusts end time
    Bottom,
}

/// Result of releasing a resize gesture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// Apply the new boundaries; the caller forwards them to persistence.
    Committed {
        entity_id: i64,
        new_start: NaiveDateTime,
        new_end: NaiveDateTime,
    },
    /// The gesture produced an invalid interval; persisted timestamps stay
    /// exactly as they were.
    Reverted,
}

/// One in-flight handle drag.
///
/// The preview is re-derived from the live pointer on every `update`; the
/// committed value is always recomputed from the final pointer position, so
/// a throttled preview can never leak into the commit.
#[derive(Clone, Debug)]
pub struct ResizeGesture {
    entity_id: i64,
    handle: ResizeHandle,
    original_start: NaiveDateTime,
    original_end: NaiveDateTime,
    origin_y: f32,
    metrics: SlotMetrics,
    preview_start: NaiveDateTime,
    preview_end: NaiveDateTime,
}

impl ResizeGesture {
    /// Start a gesture on a persisted entity. Entities without an id have
    /// nothing to commit against.
    pub fn begin(
        entity: &ScheduledEntity,
        handle: ResizeHandle,
        origin_y: f32,
        metrics: SlotMetrics,
    ) -> Option<Self> {
        let entity_id = entity.id?;
        Some(Self {
            entity_id,
            handle,
            original_start: entity.start,
            original_end: entity.end,
            origin_y,
            metrics,
            preview_start: entity.start,
            preview_end: entity.end,
        })
    }

    pub fn entity_id(&self) -> i64 {
        self.entity_id
    }

    pub fn handle(&self) -> ResizeHandle {
        self.handle
    }

    /// Recompute and store the preview boundaries for the current pointer.
    pub fn update(&mut self, pointer_y: f32) -> (NaiveDateTime, NaiveDateTime) {
        let (start, end) = self.candidate(pointer_y);
        self.preview_start = start;
        self.preview_end = end;
        (start, end)
    }

    /// The boundaries last shown to the user.
    pub fn preview(&self) -> (NaiveDateTime, NaiveDateTime) {
        (self.preview_start, self.preview_end)
    }

    /// Whether the preview currently satisfies the minimum duration.
    pub fn preview_is_valid(&self) -> bool {
        (self.preview_end - self.preview_start).num_minutes() >= MIN_DURATION_MINUTES
    }

    /// Release the handle. Invalid results revert the gesture entirely;
    /// clamping to the minimum would surprise the user with a final time
    /// they never saw.
    pub fn finish(self, pointer_y: f32) -> ResizeOutcome {
        let (new_start, new_end) = self.candidate(pointer_y);
        if (new_end - new_start).num_minutes() < MIN_DURATION_MINUTES {
            log::debug!(
                "Resize of entity {} below minimum duration, reverting",
                self.entity_id
            );
            return ResizeOutcome::Reverted;
        }
        ResizeOutcome::Committed {
            entity_id: self.entity_id,
            new_start,
            new_end,
        }
    }

    /// Abandon the gesture; no mutation call is ever issued.
    pub fn cancel(self) {}

    fn candidate(&self, pointer_y: f32) -> (NaiveDateTime, NaiveDateTime) {
        let delta_minutes = self.metrics.pixels_to_minutes(pointer_y - self.origin_y);
        match self.handle {
            ResizeHandle::Top => (
                snap_to_quarter_hour(
                    self.metrics
                        .offset_by_minutes(self.original_start, delta_minutes),
                ),
                self.original_end,
            ),
            ResizeHandle::Bottom => (
                self.original_start,
                snap_to_quarter_hour(
                    self.metrics
                        .offset_by_minutes(self.original_end, delta_minutes),
                ),
            ),
        }
    }
}
