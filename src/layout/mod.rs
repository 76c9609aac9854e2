//! Calendar layout engine.
//!
//! Pure functions mapping trip entities onto the daily time grid: slot
//! indexing, day enumeration, multi-day span splitting, and overlap-column
//! packing. All state is supplied by the caller; nothing here touches the
//! database or the UI, so every view renders from the same single
//! implementation.

pub mod day_window;
pub mod geometry;
pub mod overlap;
pub mod span;
pub mod time_grid;
