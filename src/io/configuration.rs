//! Layout constants and runtime configuration defaults

// Page grid dimensions in cells
/// Number of grid columns on every page
pub const GRID_W: u32 = 10;
/// Number of grid rows on every page
pub const GRID_H: u32 = 8;

// Page style defaults
/// Default corner radius of boxes in pixels
pub const DEFAULT_BORDER_RADIUS: u32 = 8;
/// Default spacing between boxes in pixels
pub const DEFAULT_GAP: u32 = 8;
/// Default box border width in pixels
pub const DEFAULT_BORDER_WIDTH: u32 = 1;
/// Default body text size in pixels
pub const DEFAULT_TEXT_SIZE: u32 = 24;
/// Default page background color
pub const DEFAULT_PAGE_BACKGROUND: &str = "#f3f4f6";
/// Default box background color
pub const DEFAULT_BOX_BACKGROUND: &str = "#ffffff";
/// Default box text color
pub const DEFAULT_BOX_TEXT_COLOR: &str = "#000000";
/// Default box border color
pub const DEFAULT_BOX_BORDER_COLOR: &str = "#e5e7eb";
/// Default font for box bodies and titles
pub const DEFAULT_FONT_FAMILY: &str = "Arial, sans-serif";
/// Default theme name
pub const DEFAULT_THEME: &str = "default";

// Accepted style ranges (inclusive)
/// Largest allowed corner radius
pub const MAX_BORDER_RADIUS: u32 = 24;
/// Largest allowed gap
pub const MAX_GAP: u32 = 30;
/// Largest allowed border width
pub const MAX_BORDER_WIDTH: u32 = 10;
/// Smallest allowed text size
pub const MIN_TEXT_SIZE: u32 = 8;
/// Largest allowed text size
pub const MAX_TEXT_SIZE: u32 = 200;

/// Title size relative to body text when title and body are stacked
pub const STACKED_TITLE_SCALE: f64 = 0.8;
/// Share of box height given to the title band when stacked
pub const TITLE_BAND_FRACTION: f64 = 0.4;
/// Share of box height given to the body band when stacked
pub const BODY_BAND_FRACTION: f64 = 0.6;

// Table text import limits
/// Longest accepted item text in characters
pub const MAX_ITEM_TEXT_LEN: usize = 200;
/// Largest accepted item weight in a text import
pub const MAX_IMPORT_WEIGHT: f64 = 100.0;

// Command-line defaults
/// Fixed seed for reproducible rolls
pub const DEFAULT_SEED: u64 = 42;
/// Default number of rolls printed by the roll command
pub const DEFAULT_ROLL_COUNT: usize = 1;
/// Default number of draws for the distribution check
pub const DEFAULT_CHECK_DRAWS: usize = 100_000;
/// Significance level below which the distribution check fails
pub const CHECK_SIGNIFICANCE: f64 = 0.001;
/// Draws between progress bar refreshes
pub const PROGRESS_REFRESH_DRAWS: usize = 1_000;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "rollpage=info";
/// Storage directory used when `--store` is not given
pub const DEFAULT_STORE_DIR: &str = "rollpage-data";
/// Owner assigned to tables loaded straight from a file
pub const LOCAL_OWNER: &str = "local";
