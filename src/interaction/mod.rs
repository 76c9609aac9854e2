//! Interactive mutation gestures.
//!
//! Drag and resize are modeled as explicit gesture values owned by the grid
//! component for the lifetime of one pointer interaction. No shared mutable
//! state lives at module level; a gesture previews continuously, commits on
//! release, and leaves nothing behind when cancelled.

pub mod drag;
pub mod drop;
pub mod resize;
