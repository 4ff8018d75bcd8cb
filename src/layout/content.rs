//! What a box shows: its title, its latest roll result and how they are arranged

use std::collections::HashMap;

use tracing::warn;

use crate::io::configuration::{BODY_BAND_FRACTION, STACKED_TITLE_SCALE, TITLE_BAND_FRACTION};
use crate::io::error::{Result, RollpageError, not_found};
use crate::model::page::{Page, PageBox};
use crate::model::table::{RollTable, TableId};
use crate::sampling::random::RandomSource;
use crate::store::RecordKind;

/// A roll result remembered for one box
#[derive(Debug, Clone, PartialEq, Eq)]
struct RollEntry {
    table_ref: TableId,
    text: String,
}

/// Most recent roll result per box of a page being viewed
///
/// Results are tied to the table a box was bound to when rolled, so
/// rebinding a box hides its stale result.
#[derive(Debug, Clone, Default)]
pub struct RollResults {
    entries: HashMap<String, RollEntry>,
}

impl RollResults {
    /// Create an empty result set
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `text` as the latest roll of `table_ref` for `box_id`
    pub fn record(&mut self, box_id: &str, table_ref: TableId, text: impl Into<String>) {
        self.entries.insert(
            box_id.to_string(),
            RollEntry {
                table_ref,
                text: text.into(),
            },
        );
    }

    /// Latest result for the box's currently bound table
    pub fn latest(&self, page_box: &PageBox) -> Option<&str> {
        let table_ref = page_box.table_ref()?;
        self.entries
            .get(page_box.id())
            .filter(|entry| entry.table_ref == table_ref)
            .map(|entry| entry.text.as_str())
    }

    /// Forget the result of one box
    pub fn forget(&mut self, box_id: &str) {
        self.entries.remove(box_id);
    }

    /// Number of remembered results
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been rolled yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Vertical arrangement of a box's title and body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrangement {
    /// Neither title nor body
    Empty,
    /// Exactly one of them, centred as a single block
    Single,
    /// Title in the top band, body in the bottom band
    Stacked,
}

impl Arrangement {
    /// Fractions of box height for the title and body bands
    pub const fn bands(self) -> (f64, f64) {
        match self {
            Self::Empty | Self::Single => (1.0, 1.0),
            Self::Stacked => (TITLE_BAND_FRACTION, BODY_BAND_FRACTION),
        }
    }
}

/// Text a box displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayContent {
    /// Author title; never derived from the bound table's name
    pub title: Option<String>,
    /// Latest roll result
    pub body: Option<String>,
}

impl DisplayContent {
    /// How title and body share the box
    pub const fn arrangement(&self) -> Arrangement {
        match (&self.title, &self.body) {
            (None, None) => Arrangement::Empty,
            (Some(_), Some(_)) => Arrangement::Stacked,
            _ => Arrangement::Single,
        }
    }

    /// Title text size for a page body size: shrunk when stacked
    pub fn title_text_size(&self, text_size: u32) -> u32 {
        match self.arrangement() {
            Arrangement::Stacked => (f64::from(text_size) * STACKED_TITLE_SCALE).floor() as u32,
            Arrangement::Empty | Arrangement::Single => text_size,
        }
    }
}

/// Title and body a box displays given the roll results so far
pub fn resolve_display_content(page_box: &PageBox, results: &RollResults) -> DisplayContent {
    DisplayContent {
        title: page_box.custom_title().map(str::to_string),
        body: results.latest(page_box).map(str::to_string),
    }
}

/// Roll the table bound to one box and remember the result
///
/// # Errors
///
/// Returns `BoxNotFound` for an unknown box, `InvalidParameter` when the box
/// has no table, `NotFound` when its table is not in `tables` and any roll
/// failure of the table itself
pub fn roll_box<'a, R: RandomSource + ?Sized>(
    page: &Page,
    box_id: &str,
    tables: &[RollTable],
    results: &'a mut RollResults,
    rng: &mut R,
) -> Result<&'a str> {
    let page_box = page
        .find_box(box_id)
        .ok_or_else(|| RollpageError::BoxNotFound {
            id: box_id.to_string(),
        })?;
    let table_ref = page_box.table_ref().ok_or_else(|| RollpageError::InvalidParameter {
        parameter: "box",
        value: box_id.to_string(),
        reason: "no table bound".to_string(),
    })?;
    let table = tables
        .iter()
        .find(|table| table.id == table_ref)
        .ok_or_else(|| not_found(RecordKind::Table, &table_ref))?;

    let item = table.roll(rng)?;
    results.record(box_id, table_ref, item.text.clone());
    results
        .latest(page_box)
        .ok_or_else(|| not_found(RecordKind::Table, &table_ref))
}

/// Roll every bound box of a page, as done when a page is opened
///
/// Boxes whose table is missing are skipped. Boxes whose table cannot be
/// rolled are skipped and lose any earlier result. Returns the number of
/// boxes rolled.
pub fn roll_all<R: RandomSource + ?Sized>(
    page: &Page,
    tables: &[RollTable],
    results: &mut RollResults,
    rng: &mut R,
) -> usize {
    let mut rolled = 0;

    for page_box in page.boxes() {
        let Some(table_ref) = page_box.table_ref() else {
            continue;
        };
        let Some(table) = tables.iter().find(|table| table.id == table_ref) else {
            continue;
        };
        match table.roll(rng) {
            Ok(item) => {
                results.record(page_box.id(), table_ref, item.text.clone());
                rolled += 1;
            }
            Err(error) => {
                results.forget(page_box.id());
                warn!(box_id = page_box.id(), %table_ref, %error, "skipped box");
            }
        }
    }

    rolled
}
