//! Records authored by users
//!
//! This module contains:
//! - Roll tables and their text import format
//! - Pages, boxes and page style defaults
//! - Palette extraction for page colors

/// Pages and their boxes
pub mod page;
/// Palette parsing
pub mod palette;
/// Roll tables
pub mod table;

pub use page::{BoxContentUpdate, FieldUpdate, Page, PageBox, PageId, PageStyle};
pub use table::{RollTable, TableId, TableItem};
