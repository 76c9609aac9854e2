//! Trip configuration.
//!
//! The trip being planned (name, date bounds, visible hours, stay schedule)
//! is read from a TOML file in the platform config directory. A missing or
//! unreadable file falls back to a sample trip so the app always starts.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::layout::time_grid::{
    TimeGrid, DEFAULT_END_HOUR, DEFAULT_START_HOUR, SLOT_STEP_MINUTES,
};
use crate::models::trip::{StayWindow, Trip};

const CONFIG_FILE: &str = "trip.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripConfig {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// First hour of the day shown on the grid.
    pub day_start_hour: u32,
    /// Last hour that opens slots.
    pub day_end_hour: u32,
    pub slot_minutes: u32,
    pub stays: Vec<StayWindow>,
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            name: "Sample Trip".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 2, 18).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 2, 26).unwrap(),
            day_start_hour: DEFAULT_START_HOUR,
            day_end_hour: DEFAULT_END_HOUR,
            slot_minutes: SLOT_STEP_MINUTES,
            stays: Vec::new(),
        }
    }
}

impl TripConfig {
    /// Load from the platform config directory, falling back to defaults.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            log::warn!("No config directory available, using default trip");
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Using default trip config: {:#}", err);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {:?}", path))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {:?}", path))?;
        Ok(config.sanitized())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let raw = toml::to_string_pretty(self).context("Failed to serialize trip config")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir {:?}", parent))?;
        }
        std::fs::write(path, raw).with_context(|| format!("Failed to write config at {:?}", path))
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "trip-scheduler")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Clamp nonsensical values back to something the grid can render.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.end_date < self.start_date {
            log::warn!("Config has reversed trip dates, using defaults");
            self.start_date = defaults.start_date;
            self.end_date = defaults.end_date;
        }
        if self.day_start_hour > self.day_end_hour || self.day_end_hour > 23 {
            log::warn!("Config has invalid visible hours, using defaults");
            self.day_start_hour = defaults.day_start_hour;
            self.day_end_hour = defaults.day_end_hour;
        }
        if self.slot_minutes == 0 || 60 % self.slot_minutes != 0 {
            log::warn!("Config slot width must divide 60, using default");
            self.slot_minutes = defaults.slot_minutes;
        }
        self
    }

    pub fn grid(&self) -> TimeGrid {
        TimeGrid::build(self.day_start_hour, self.day_end_hour, self.slot_minutes)
    }

    pub fn trip(&self) -> Trip {
        Trip {
            id: 1,
            name: self.name.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            stays: self.stays.clone(),
        }
    }
}
