//! Top-level egui application shell.
//!
//! Owns the planner, the sync subscription, and the single active grid
//! gesture. Remote changes drain into the planner at the top of every
//! frame, in arrival order, before anything renders.

use std::collections::HashMap;
use std::sync::mpsc;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use egui::{Align2, FontId, Pos2, Sense, Vec2};

use crate::interaction::drop::gesture_from_json;
use crate::layout::day_window::{DayInfo, DayWindow};
use crate::layout::geometry::SlotMetrics;
use crate::layout::time_grid::TimeGrid;
use crate::models::category::Category;
use crate::models::entity::ScheduledEntity;
use crate::models::payload::DropPayload;
use crate::models::wishlist::WishlistItem;
use crate::services::category::CategoryService;
use crate::services::config::TripConfig;
use crate::services::database::Database;
use crate::services::entity::EntityService;
use crate::services::planner::Planner;
use crate::services::store::SqliteStore;
use crate::services::sync::{Subscription, SyncHub};
use crate::services::wishlist::WishlistService;
use crate::ui_egui::views::day_view::DayView;
use crate::ui_egui::views::time_grid::{
    render_time_grid, ActiveGesture, GridInteraction, COLUMN_SPACING, TIME_LABEL_WIDTH,
};
use crate::ui_egui::views::week_view::WeekView;
use crate::ui_egui::views::{GridPalette, ViewType};

/// The single trip this client plans.
const TRIP_ID: i64 = 1;

const DAY_HEADER_HEIGHT: f32 = 40.0;

enum RemoteEvent {
    Upsert(ScheduledEntity),
    Delete(i64),
}

pub struct PlannerApp {
    config: TripConfig,
    grid: TimeGrid,
    metrics: SlotMetrics,
    day_window: DayWindow,
    planner: Planner<SqliteStore>,
    categories: HashMap<i64, Category>,
    wishlist: Vec<WishlistItem>,
    hub: SyncHub,
    _subscription: Subscription,
    remote_events: mpsc::Receiver<RemoteEvent>,
    view: ViewType,
    week: WeekView,
    day: DayView,
    /// The one in-flight pointer gesture, owned here rather than in any
    /// shared module state.
    gesture: Option<ActiveGesture>,
}

impl PlannerApp {
    pub fn new(config: TripConfig, db: Database, hub: SyncHub) -> Result<Self> {
        db.initialize_schema()?;
        CategoryService::new(db.connection()).initialize_defaults(TRIP_ID)?;

        let entities = EntityService::new(db.connection()).list_for_trip(TRIP_ID)?;
        let categories: HashMap<i64, Category> = CategoryService::new(db.connection())
            .list_for_trip(TRIP_ID)?
            .into_iter()
            .filter_map(|c| c.id.map(|id| (id, c)))
            .collect();
        let wishlist = WishlistService::new(db.connection()).list_for_trip(TRIP_ID)?;

        let (tx, remote_events) = mpsc::channel();
        let tx_insert = tx.clone();
        let tx_update = tx.clone();
        let subscription = hub.subscribe(
            TRIP_ID,
            Box::new(move |e| {
                let _ = tx_insert.send(RemoteEvent::Upsert(e.clone()));
            }),
            Box::new(move |e| {
                let _ = tx_update.send(RemoteEvent::Upsert(e.clone()));
            }),
            Box::new(move |id| {
                let _ = tx.send(RemoteEvent::Delete(id));
            }),
        );

        let trip = config.trip();
        let day_window = DayWindow::from_trip(&trip);
        let grid = config.grid();
        let metrics = SlotMetrics {
            step_minutes: grid.step_minutes(),
            ..SlotMetrics::default()
        };

        let today = Local::now().date_naive();
        let anchor = today.clamp(trip.start_date, trip.end_date);
        let week = WeekView::containing(anchor, 1);
        let day = DayView::clamped(today, &day_window);

        log::info!(
            "Loaded trip '{}' with {} scheduled entities",
            trip.name,
            entities.len()
        );

        Ok(Self {
            config,
            grid,
            metrics,
            day_window,
            planner: Planner::with_entities(SqliteStore::new(db), entities),
            categories,
            wishlist,
            hub,
            _subscription: subscription,
            remote_events,
            view: ViewType::Week,
            week,
            day,
            gesture: None,
        })
    }

    /// Apply queued live-sync events in arrival order. Remote state is
    /// authoritative for the entities it names.
    fn drain_remote_events(&mut self) {
        while let Ok(event) = self.remote_events.try_recv() {
            match event {
                RemoteEvent::Upsert(entity) => self.planner.apply_remote_update(entity),
                RemoteEvent::Delete(id) => self.planner.apply_remote_delete(id),
            }
        }
    }

    fn apply_interaction(&mut self, interaction: GridInteraction) {
        for (id, start, end) in interaction.reschedules {
            if self.planner.reschedule(id, start, end) {
                if let Some(entity) = self.planner.get(id) {
                    self.hub.publish_update(entity);
                }
            }
        }

        for (item_id, start, end) in interaction.placements {
            let Some(pos) = self.wishlist.iter().position(|w| w.id == Some(item_id)) else {
                log::warn!("Drop referenced unknown wishlist item {}", item_id);
                continue;
            };
            let item = self.wishlist[pos].clone();
            if let Some(new_id) = self.planner.schedule_item(&item, start, end) {
                // the idea is on the grid now; retire it from the wishlist
                let conn = self.planner.store().database().connection();
                if let Err(err) = WishlistService::new(conn).delete(item_id) {
                    log::warn!("Failed to remove scheduled wishlist item: {:#}", err);
                }
                self.wishlist.remove(pos);
                if let Some(entity) = self.planner.get(new_id) {
                    self.hub.publish_insert(entity);
                }
            }
        }
    }

    fn top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(&self.config.name);
                ui.separator();
                ui.selectable_value(&mut self.view, ViewType::Week, "Week");
                ui.selectable_value(&mut self.view, ViewType::Day, "Day");
                ui.separator();
                match self.view {
                    ViewType::Week => {
                        if ui.button("<").clicked() {
                            self.week.previous(&self.day_window);
                        }
                        ui.label(self.week.title());
                        if ui.button(">").clicked() {
                            self.week.next(&self.day_window);
                        }
                    }
                    ViewType::Day => {
                        if ui.button("<").clicked() {
                            self.day.previous(&self.day_window);
                        }
                        ui.label(self.day.title());
                        if ui.button(">").clicked() {
                            self.day.next(&self.day_window);
                        }
                    }
                }
            });
        });
    }

    fn wishlist_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("wishlist")
            .default_width(190.0)
            .show(ctx, |ui| {
                ui.heading("Wishlist");
                ui.label(
                    egui::RichText::new("Drag an idea onto the grid to schedule it")
                        .size(10.0)
                        .weak(),
                );
                ui.separator();

                for item in &self.wishlist {
                    let Some(id) = item.id else { continue };
                    let label = format!("{}  ({} min)", item.title, item.duration_minutes);
                    let response =
                        ui.add(egui::Button::new(label).sense(Sense::click_and_drag()));

                    if response.drag_started() && self.gesture.is_none() {
                        // round-trip through the drop-target wire protocol
                        let payload = DropPayload::Wishlist {
                            id,
                            title: item.title.clone(),
                            duration_minutes: item.duration_minutes,
                        };
                        self.gesture = gesture_from_json(&payload.to_json(), 0.0)
                            .map(ActiveGesture::Drag);
                    }
                }

                if self.wishlist.is_empty() {
                    ui.label(egui::RichText::new("Everything is scheduled").weak());
                }
            });
    }

    fn central_panel(&mut self, ctx: &egui::Context) {
        let palette = if ctx.style().visuals.dark_mode {
            GridPalette::dark()
        } else {
            GridPalette::light()
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            let infos: Vec<DayInfo> = match self.view {
                ViewType::Week => self.week.days(&self.day_window),
                ViewType::Day => self.day.days(&self.day_window),
            };
            if infos.is_empty() {
                ui.label("No trip days in this range");
                return;
            }

            let today = Local::now().date_naive();
            render_day_headers(ui, &infos, &palette, today);

            let days: Vec<(DayInfo, Vec<ScheduledEntity>)> = infos
                .into_iter()
                .map(|info| {
                    let entities = self
                        .planner
                        .entities_on_day(info.date)
                        .into_iter()
                        .cloned()
                        .collect();
                    (info, entities)
                })
                .collect();

            let interaction = egui::ScrollArea::vertical()
                .show(ui, |ui| {
                    render_time_grid(
                        ui,
                        &days,
                        &self.grid,
                        &self.metrics,
                        &palette,
                        &self.categories,
                        today,
                        &mut self.gesture,
                    )
                })
                .inner;

            self.apply_interaction(interaction);
        });
    }
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_remote_events();
        self.top_panel(ctx);
        self.wishlist_panel(ctx);
        self.central_panel(ctx);
    }
}

/// Column headers: weekday, date, and the city the day falls in.
fn render_day_headers(
    ui: &mut egui::Ui,
    days: &[DayInfo],
    palette: &GridPalette,
    today: NaiveDate,
) {
    let avail_width = ui.available_width();
    let day_count = days.len();
    let col_width = ((avail_width - TIME_LABEL_WIDTH - COLUMN_SPACING * day_count as f32)
        / day_count as f32)
        .max(40.0);

    let (rect, _) = ui.allocate_exact_size(Vec2::new(avail_width, DAY_HEADER_HEIGHT), Sense::hover());
    let painter = ui.painter_at(rect);

    for (di, day) in days.iter().enumerate() {
        let x = rect.left() + TIME_LABEL_WIDTH + COLUMN_SPACING
            + di as f32 * (col_width + COLUMN_SPACING);
        let weekday = &day.day_of_week[..3.min(day.day_of_week.len())];
        let title = format!("{} {}", weekday, day.date.format("%d %b"));
        let text = if day.date == today {
            format!("{} *", title)
        } else {
            title
        };
        painter.text(
            Pos2::new(x + 4.0, rect.top() + 4.0),
            Align2::LEFT_TOP,
            text,
            FontId::proportional(13.0),
            palette.header_text,
        );
        if !day.city.is_empty() {
            painter.text(
                Pos2::new(x + 4.0, rect.top() + 22.0),
                Align2::LEFT_TOP,
                &day.city,
                FontId::proportional(10.0),
                palette.city_text,
            );
        }
    }
}
