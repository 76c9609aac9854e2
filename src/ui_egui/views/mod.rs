use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use egui::Color32;

use crate::models::category::Category;
use crate::models::entity::{EntityKind, ScheduledEntity};

pub mod day_view;
mod palette;
pub mod time_grid;
pub mod week_view;

pub use palette::GridPalette;

/// Which calendar view is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewType {
    Day,
    Week,
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

/// Parse a hex color string to Color32.
pub fn parse_color(hex: &str) -> Option<Color32> {
    if hex.is_empty() {
        return None;
    }

    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color32::from_rgb(r, g, b))
}

/// Display color for an entity: its category's color when tagged, a kind
/// fallback otherwise.
pub fn entity_color(entity: &ScheduledEntity, categories: &HashMap<i64, Category>) -> Color32 {
    entity
        .category_id
        .and_then(|id| categories.get(&id))
        .and_then(|cat| parse_color(&cat.color))
        .unwrap_or(match entity.kind {
            EntityKind::Activity => Color32::from_rgb(100, 150, 200),
            EntityKind::Flight => Color32::from_rgb(90, 110, 170),
            EntityKind::Hotel => Color32::from_rgb(130, 110, 160),
        })
}

pub fn format_time_range(start: NaiveDateTime, end: NaiveDateTime) -> String {
    format!("{} - {}", start.format("%H:%M"), end.format("%H:%M"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_week_start_sunday() {
        // Wednesday, Dec 4, 2024
        let date = NaiveDate::from_ymd_opt(2024, 12, 4).unwrap();
        let start = get_week_start(date, 0);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
    }

    #[test]
    fn test_get_week_start_monday() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 4).unwrap();
        let start = get_week_start(date, 1);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 2).unwrap());
    }

    #[test]
    fn test_parse_color_with_hash() {
        let color = parse_color("#FF5500").unwrap();
        assert_eq!(color, Color32::from_rgb(255, 85, 0));
    }

    #[test]
    fn test_parse_color_invalid() {
        assert!(parse_color("").is_none());
        assert!(parse_color("FF5").is_none());
        assert!(parse_color("GGGGGG").is_none());
    }

    #[test]
    fn test_entity_color_resolves_via_category() {
        let day = NaiveDate::from_ymd_opt(2025, 2, 20).unwrap();
        let mut entity = ScheduledEntity::new(
            1,
            EntityKind::Activity,
            "Lunch",
            day.and_hms_opt(12, 0, 0).unwrap(),
            day.and_hms_opt(13, 0, 0).unwrap(),
        )
        .unwrap();
        entity.category_id = Some(4);

        let mut categories = HashMap::new();
        let mut food = Category::new(1, "Food", "#F59E0B");
        food.id = Some(4);
        categories.insert(4, food);

        assert_eq!(
            entity_color(&entity, &categories),
            Color32::from_rgb(0xF5, 0x9E, 0x0B)
        );

        // stale reference falls back to the kind color
        entity.category_id = Some(99);
        assert_eq!(
            entity_color(&entity, &categories),
            Color32::from_rgb(100, 150, 200)
        );
    }

    #[test]
    fn test_format_time_range() {
        let day = NaiveDate::from_ymd_opt(2025, 2, 20).unwrap();
        let range = format_time_range(
            day.and_hms_opt(9, 0, 0).unwrap(),
            day.and_hms_opt(10, 30, 0).unwrap(),
        );
        assert_eq!(range, "09:00 - 10:30");
    }
}
