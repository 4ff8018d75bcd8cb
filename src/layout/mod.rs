//! Page layout on the fixed cell grid
//!
//! This module contains:
//! - Rectangles and cell masks
//! - The placement engine that keeps boxes on-grid and non-overlapping
//! - Style and content resolution for rendering boxes
//! - The cell occupancy map

/// Box text and roll results
pub mod content;
/// Placement, movement and resizing of boxes
pub mod engine;
/// Rectangles and cell masks
pub mod geometry;
/// Cell ownership map
pub mod occupancy;
/// Effective box style
pub mod style;

pub use content::{Arrangement, DisplayContent, RollResults, resolve_display_content};
pub use engine::{
    find_free_slot, move_box, place_box, remove_box, resize_box, update_box_content,
};
pub use geometry::Rect;
pub use style::{BorderStyle, EffectiveStyle, resolve_effective_style};
