//! Weighted roll tables and grid page layouts for tabletop random generators
//!
//! Users author tables of weighted items and compose pages: a fixed grid of
//! non-overlapping boxes, each optionally bound to a table and rolled when the
//! page is viewed.

#![forbid(unsafe_code)]

/// Input/output operations, configuration and error handling
pub mod io;
/// Box placement, style and content resolution on the page grid
pub mod layout;
/// Probability functions for distribution checks
pub mod math;
/// Tables, pages and palettes
pub mod model;
/// Random sources and weighted rolling
pub mod sampling;
/// Storage backends and access control
pub mod store;

pub use io::error::{Result, RollpageError};
