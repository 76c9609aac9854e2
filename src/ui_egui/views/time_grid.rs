//! Time grid rendering for day-based calendar views.
//!
//! One renderer serves both the day and week views: it paints the slot
//! rows, lays entity blocks out from the span calculator and overlap
//! packer, and drives the drag/resize gestures. Mutations are reported to
//! the caller; nothing here touches persistence.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use egui::{Align2, Color32, CursorIcon, FontId, Pos2, Rect, Rounding, Sense, Stroke, Vec2};

use super::{entity_color, format_time_range, GridPalette};
use crate::interaction::drag::{DragGesture, DragOutcome, DragSource};
use crate::interaction::resize::{ResizeGesture, ResizeHandle, ResizeOutcome};
use crate::layout::day_window::DayInfo;
use crate::layout::geometry::SlotMetrics;
use crate::layout::overlap::{pack_day, ColumnAssignment, PackItem};
use crate::layout::span::span_for_day;
use crate::layout::time_grid::TimeGrid;
use crate::models::category::Category;
use crate::models::entity::ScheduledEntity;
use crate::utils::date::end_of_day;

/// Constants for time grid rendering
pub const TIME_LABEL_WIDTH: f32 = 50.0;
pub const COLUMN_SPACING: f32 = 1.0;
/// Pointer zone at a block's top/bottom edge that starts a resize.
const HANDLE_ZONE: f32 = 8.0;

/// The gesture currently owned by the grid, if any. Exactly one pointer
/// interaction is in flight at a time; it dies with pointer-up or escape.
pub enum ActiveGesture {
    Drag(DragGesture),
    Resize(ResizeGesture),
}

/// Mutations requested by this frame's interactions.
#[derive(Default)]
pub struct GridInteraction {
    /// (entity id, new start, new end) from moves and resizes
    pub reschedules: Vec<(i64, NaiveDateTime, NaiveDateTime)>,
    /// (wishlist item id, start, end) from wishlist drops
    pub placements: Vec<(i64, NaiveDateTime, NaiveDateTime)>,
}

struct EntityBlock {
    rect: Rect,
    entity: ScheduledEntity,
    show_top_handle: bool,
    show_bottom_handle: bool,
}

/// Render the full time grid for a set of days.
#[allow(clippy::too_many_arguments)]
pub fn render_time_grid(
    ui: &mut egui::Ui,
    days: &[(DayInfo, Vec<ScheduledEntity>)],
    grid: &TimeGrid,
    metrics: &SlotMetrics,
    palette: &GridPalette,
    categories: &HashMap<i64, Category>,
    today: NaiveDate,
    gesture: &mut Option<ActiveGesture>,
) -> GridInteraction {
    let mut interaction = GridInteraction::default();
    if days.is_empty() {
        return interaction;
    }

    let slot_height = metrics.slot_pixel_height;
    let total_height = grid.slot_count() as f32 * slot_height;
    let avail_width = ui.available_width();
    let day_count = days.len();
    let col_width = ((avail_width - TIME_LABEL_WIDTH - COLUMN_SPACING * day_count as f32)
        / day_count as f32)
        .max(40.0);

    let (rect, response) = ui.allocate_exact_size(
        Vec2::new(avail_width, total_height),
        Sense::click_and_drag(),
    );
    let painter = ui.painter_at(rect);

    let col_x =
        |di: usize| rect.left() + TIME_LABEL_WIDTH + COLUMN_SPACING + di as f32 * (col_width + COLUMN_SPACING);

    // Day column backgrounds
    for (di, (day, _)) in days.iter().enumerate() {
        let bg = if day.date == today {
            palette.today_bg
        } else {
            palette.regular_bg
        };
        painter.rect_filled(
            Rect::from_min_size(
                Pos2::new(col_x(di), rect.top()),
                Vec2::new(col_width, total_height),
            ),
            0.0,
            bg,
        );
    }

    // Slot rows: hour labels on the left, a line per slot boundary
    for (row, slot) in grid.slots().iter().enumerate() {
        let y = rect.top() + row as f32 * slot_height;
        let is_hour_start = slot.minute == 0;
        if is_hour_start {
            painter.text(
                Pos2::new(rect.left() + TIME_LABEL_WIDTH - 5.0, y),
                Align2::RIGHT_TOP,
                &slot.label,
                FontId::proportional(12.0),
                palette.time_label,
            );
        }
        let line_color = if is_hour_start {
            palette.hour_line
        } else {
            palette.slot_line
        };
        painter.line_segment(
            [
                Pos2::new(rect.left() + TIME_LABEL_WIDTH, y),
                Pos2::new(rect.right(), y),
            ],
            Stroke::new(1.0, line_color),
        );
    }

    // Vertical dividers between day columns
    for di in 0..day_count {
        let x = col_x(di) + col_width;
        painter.line_segment(
            [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
            Stroke::new(1.0, palette.divider),
        );
    }

    // Entity blocks, laid out by the span calculator and overlap packer
    let mut blocks: Vec<EntityBlock> = Vec::new();
    for (di, (day, entities)) in days.iter().enumerate() {
        let items: Vec<PackItem> = entities.iter().filter_map(PackItem::from_entity).collect();
        let packed = pack_day(&items);

        for entity in entities {
            let Some(id) = entity.id else { continue };
            let Some(span) = span_for_day(grid, entity.start, entity.end, day.date) else {
                continue;
            };
            let assign = packed.get(&id).copied().unwrap_or(ColumnAssignment {
                column: 0,
                total_columns: 1,
            });

            let lane_width = col_width / assign.total_columns as f32;
            let x = col_x(di) + assign.column as f32 * lane_width;
            let y = rect.top() + span.start_slot as f32 * slot_height;
            let block_rect = Rect::from_min_size(
                Pos2::new(x + 1.0, y + 1.0),
                Vec2::new(
                    lane_width - 2.0,
                    span.slot_count as f32 * slot_height - 2.0,
                ),
            );

            let base_color = entity_color(entity, categories);
            let fill = if span.is_continuation {
                base_color.linear_multiply(0.5)
            } else {
                base_color
            };
            let rounding = if span.is_continuation {
                Rounding {
                    nw: 0.0,
                    ne: 0.0,
                    sw: 2.0,
                    se: 2.0,
                }
            } else {
                Rounding::same(2.0)
            };
            painter.rect_filled(block_rect, rounding, fill);

            if span.is_continuation {
                painter.text(
                    Pos2::new(block_rect.left() + 4.0, block_rect.top() + 2.0),
                    Align2::LEFT_TOP,
                    format!("… {}", entity.title),
                    FontId::proportional(10.0),
                    palette.block_text,
                );
            } else {
                painter.text(
                    Pos2::new(block_rect.left() + 4.0, block_rect.top() + 2.0),
                    Align2::LEFT_TOP,
                    format_time_range(entity.start, entity.end),
                    FontId::proportional(9.0),
                    palette.block_text,
                );
                painter.text(
                    Pos2::new(block_rect.left() + 4.0, block_rect.top() + 13.0),
                    Align2::LEFT_TOP,
                    &entity.title,
                    FontId::proportional(11.0),
                    palette.block_text,
                );
            }

            blocks.push(EntityBlock {
                rect: block_rect,
                entity: entity.clone(),
                // the top edge only exists where the entity actually starts
                show_top_handle: !span.is_continuation,
                // the bottom edge only on the day the entity ends
                show_bottom_handle: entity.end <= end_of_day(day.date),
            });
        }
    }

    let day_index_at = |x: f32| -> Option<usize> {
        let origin = rect.left() + TIME_LABEL_WIDTH + COLUMN_SPACING;
        if x < origin {
            return None;
        }
        let stride = col_width + COLUMN_SPACING;
        let di = ((x - origin) / stride).floor() as usize;
        if di >= day_count || (x - origin) - di as f32 * stride > col_width {
            return None;
        }
        Some(di)
    };

    let pointer_pos = response
        .interact_pointer_pos()
        .or_else(|| ui.input(|i| i.pointer.hover_pos()));

    // Idle hover: show what a press would grab
    if gesture.is_none() {
        if let Some(pos) = pointer_pos {
            if let Some(block) = blocks.iter().rev().find(|b| b.rect.contains(pos)) {
                let on_handle = (block.show_top_handle && pos.y <= block.rect.top() + HANDLE_ZONE)
                    || (block.show_bottom_handle && pos.y >= block.rect.bottom() - HANDLE_ZONE);
                ui.output_mut(|out| {
                    out.cursor_icon = if on_handle {
                        CursorIcon::ResizeVertical
                    } else {
                        CursorIcon::PointingHand
                    }
                });
            }
        }
    }

    // Gesture begin
    if response.drag_started() && gesture.is_none() {
        if let Some(pos) = response.interact_pointer_pos() {
            if let Some(block) = blocks.iter().rev().find(|b| b.rect.contains(pos)) {
                if block.show_top_handle && pos.y <= block.rect.top() + HANDLE_ZONE {
                    *gesture = ResizeGesture::begin(&block.entity, ResizeHandle::Top, pos.y, *metrics)
                        .map(ActiveGesture::Resize);
                } else if block.show_bottom_handle && pos.y >= block.rect.bottom() - HANDLE_ZONE {
                    *gesture =
                        ResizeGesture::begin(&block.entity, ResizeHandle::Bottom, pos.y, *metrics)
                            .map(ActiveGesture::Resize);
                } else if let Some(id) = block.entity.id {
                    *gesture = Some(ActiveGesture::Drag(DragGesture::new(
                        DragSource::Scheduled {
                            entity_id: id,
                            start: block.entity.start,
                            end: block.entity.end,
                        },
                        pos.y - block.rect.top(),
                    )));
                }
            }
        }
    }

    // Gesture tracking and previews
    if let Some(active) = gesture.as_mut() {
        ui.ctx().request_repaint();
        if let Some(pos) = pointer_pos {
            match active {
                ActiveGesture::Drag(drag) => {
                    match day_index_at(pos.x) {
                        Some(di) => {
                            drag.update_hover(days[di].0.date, pos.y - rect.top(), metrics, grid)
                        }
                        None => drag.clear_hover(),
                    }
                    if let Some((date, row)) = drag.hovered() {
                        if let Some(di) = days.iter().position(|(d, _)| d.date == date) {
                            let duration_minutes = match drag.source() {
                                DragSource::Scheduled { start, end, .. } => {
                                    (*end - *start).num_minutes()
                                }
                                DragSource::Wishlist { duration, .. } => duration.num_minutes(),
                            };
                            let step = grid.step_minutes() as i64;
                            let slots = (((duration_minutes + step - 1) / step).max(1) as usize)
                                .min(grid.slot_count() - row);
                            let highlight = Rect::from_min_size(
                                Pos2::new(col_x(di), rect.top() + row as f32 * slot_height),
                                Vec2::new(col_width, slots as f32 * slot_height),
                            );
                            painter.rect_filled(highlight, 2.0, palette.drop_highlight);
                            painter.rect_stroke(highlight, 2.0, Stroke::new(1.5, palette.preview_ok));
                        }
                    }
                    ui.output_mut(|out| out.cursor_icon = CursorIcon::Grabbing);
                }
                ActiveGesture::Resize(resize) => {
                    resize.update(pos.y);
                    let (preview_start, preview_end) = resize.preview();
                    let stroke_color = if resize.preview_is_valid() {
                        palette.preview_ok
                    } else {
                        palette.preview_invalid
                    };
                    for (di, (day, _)) in days.iter().enumerate() {
                        let Some(span) = span_for_day(grid, preview_start, preview_end, day.date)
                        else {
                            continue;
                        };
                        let preview_rect = Rect::from_min_size(
                            Pos2::new(col_x(di), rect.top() + span.start_slot as f32 * slot_height),
                            Vec2::new(col_width, span.slot_count as f32 * slot_height),
                        );
                        painter.rect_stroke(preview_rect, 2.0, Stroke::new(1.5, stroke_color));
                    }
                    painter.text(
                        Pos2::new(rect.left() + TIME_LABEL_WIDTH + 4.0, rect.top() + 4.0),
                        Align2::LEFT_TOP,
                        format_time_range(preview_start, preview_end),
                        FontId::proportional(11.0),
                        stroke_color,
                    );
                    ui.output_mut(|out| out.cursor_icon = CursorIcon::ResizeVertical);
                }
            }
        }
    }

    // Escape abandons the gesture without committing
    if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
        match gesture.take() {
            Some(ActiveGesture::Drag(drag)) => {
                let _ = drag.cancel();
            }
            Some(ActiveGesture::Resize(resize)) => resize.cancel(),
            None => {}
        }
    }

    // Gesture finish: the committed value comes from the final pointer
    // position, never a throttled preview
    if ui.input(|i| i.pointer.primary_released()) {
        match gesture.take() {
            Some(ActiveGesture::Drag(drag)) => match drag.finish(grid) {
                DragOutcome::Moved {
                    entity_id,
                    new_start,
                    new_end,
                } => interaction.reschedules.push((entity_id, new_start, new_end)),
                DragOutcome::Placed { item_id, start, end } => {
                    interaction.placements.push((item_id, start, end))
                }
                DragOutcome::Cancelled => {}
            },
            Some(ActiveGesture::Resize(resize)) => {
                if let Some(pos) = pointer_pos {
                    match resize.finish(pos.y) {
                        ResizeOutcome::Committed {
                            entity_id,
                            new_start,
                            new_end,
                        } => interaction.reschedules.push((entity_id, new_start, new_end)),
                        ResizeOutcome::Reverted => {}
                    }
                } else {
                    resize.cancel();
                }
            }
            None => {}
        }
    }

    // Current time marker on today's column
    if let Some(di) = days.iter().position(|(d, _)| d.date == today) {
        draw_current_time_marker(&painter, rect, grid, metrics, col_x(di), col_width);
    }

    interaction
}

/// Draw the current time indicator line across today's column.
fn draw_current_time_marker(
    painter: &egui::Painter,
    rect: Rect,
    grid: &TimeGrid,
    metrics: &SlotMetrics,
    x_start: f32,
    col_width: f32,
) {
    use chrono::{Local, Timelike};

    let now = Local::now().time();
    let minutes = (now.hour() * 60 + now.minute()) as f32;
    let grid_start = grid.start_minutes() as f32;
    let grid_end = grid_start + (grid.slot_count() as u32 * grid.step_minutes()) as f32;
    if minutes < grid_start || minutes > grid_end {
        return;
    }

    let y = rect.top() + (minutes - grid_start) / grid.step_minutes() as f32 * metrics.slot_pixel_height;
    let line_color = Color32::from_rgb(255, 100, 100);
    painter.circle_filled(Pos2::new(x_start - 4.0, y), 3.0, line_color);
    painter.line_segment(
        [Pos2::new(x_start, y), Pos2::new(x_start + col_width, y)],
        Stroke::new(2.0, line_color),
    );
}
