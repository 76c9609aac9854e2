// Trip Scheduler Application
// Main entry point

use trip_scheduler::services::config::TripConfig;
use trip_scheduler::services::database::Database;
use trip_scheduler::services::sync::SyncHub;
use trip_scheduler::ui_egui::PlannerApp;

fn main() -> Result<(), eframe::Error> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Trip Scheduler");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Trip Scheduler",
        options,
        Box::new(
            |_cc| -> Result<Box<dyn eframe::App>, Box<dyn std::error::Error + Send + Sync>> {
                let config = TripConfig::load();
                let db = Database::new(&database_path())?;
                let app = PlannerApp::new(config, db, SyncHub::new())?;
                Ok(Box::new(app))
            },
        ),
    )
}

/// Resolve the on-disk database path, falling back to an in-memory
/// database when no data directory is available.
fn database_path() -> String {
    directories::ProjectDirs::from("", "", "trip-scheduler")
        .and_then(|dirs| {
            let dir = dirs.data_dir();
            if let Err(err) = std::fs::create_dir_all(dir) {
                log::warn!("Failed to create data dir {:?}: {}", dir, err);
                return None;
            }
            Some(dir.join("trip.db").to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| {
            log::warn!("Using in-memory database; changes will not persist");
            ":memory:".to_string()
        })
}
