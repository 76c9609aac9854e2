//! Wishlist item model.
//!
//! A wishlist item is an idea without a time: it carries a duration so that
//! dropping it onto the grid can allocate a start/end pair, but no start of
//! its own until it is scheduled.

use chrono::Duration;

/// Default duration assumed for items added without an explicit one.
pub const DEFAULT_DURATION_MINUTES: i64 = 60;

#[derive(Debug, Clone, PartialEq)]
pub struct WishlistItem {
    pub id: Option<i64>,
    pub trip_id: i64,
    pub title: String,
    pub duration_minutes: i64,
    pub notes: Option<String>,
    pub category_id: Option<i64>,
}

impl WishlistItem {
    pub fn new(trip_id: i64, title: impl Into<String>) -> Self {
        Self {
            id: None,
            trip_id,
            title: title.into(),
            duration_minutes: DEFAULT_DURATION_MINUTES,
            notes: None,
            category_id: None,
        }
    }

    pub fn with_duration(mut self, minutes: i64) -> Self {
        self.duration_minutes = minutes;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Wishlist item title cannot be empty".to_string());
        }
        if self.duration_minutes <= 0 {
            return Err("Wishlist item duration must be positive".to_string());
        }
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(self.duration_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let item = WishlistItem::new(1, "Sainte-Chapelle");
        assert_eq!(item.duration_minutes, DEFAULT_DURATION_MINUTES);
        assert!(item.validate().is_ok());
    }

    #[test]
    fn test_with_duration() {
        let item = WishlistItem::new(1, "Day trip").with_duration(480);
        assert_eq!(item.duration(), Duration::hours(8));
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        assert!(WishlistItem::new(1, " ").validate().is_err());
        assert!(WishlistItem::new(1, "x").with_duration(0).validate().is_err());
    }
}
