//! Category model for tagging trip entities.
//!
//! Categories group activities by type (Food, Museums, etc.) with a display
//! color. Entities reference categories by stable id; the name is display
//! data and can be renamed freely without orphaning references.

use serde::{Deserialize, Serialize};

/// A user-defined tag with a display color, owned by one trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier (database primary key)
    pub id: Option<i64>,
    pub trip_id: i64,
    /// Display name, unique within a trip
    pub name: String,
    /// Hex color code (e.g., "#3B82F6")
    pub color: String,
}

impl Category {
    pub fn new(trip_id: i64, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: None,
            trip_id,
            name: name.into(),
            color: color.into(),
        }
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        if name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong);
        }
        if !is_valid_hex_color(&self.color) {
            return Err(CategoryValidationError::InvalidColor);
        }
        Ok(())
    }
}

/// Validation errors for Category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong,
    InvalidColor,
}

impl std::fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong => write!(f, "Category name must be 50 characters or less"),
            Self::InvalidColor => write!(f, "Invalid color format (use hex like #FF0000)"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

/// Check if a string is a valid hex color code.
fn is_valid_hex_color(color: &str) -> bool {
    let color = color.trim();
    if !color.starts_with('#') {
        return false;
    }
    let hex = &color[1..];
    matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Default categories seeded into a fresh trip.
pub fn default_categories(trip_id: i64) -> Vec<Category> {
    vec![
        Category::new(trip_id, "Food", "#F59E0B"),
        Category::new(trip_id, "Museums", "#8B5CF6"),
        Category::new(trip_id, "Outdoors", "#10B981"),
        Category::new(trip_id, "Travel", "#3B82F6"),
        Category::new(trip_id, "Nightlife", "#EF4444"),
    ]
}
