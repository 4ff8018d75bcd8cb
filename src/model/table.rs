//! Roll tables: ordered weighted item lists and their text import format

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::io::configuration::{MAX_IMPORT_WEIGHT, MAX_ITEM_TEXT_LEN};
use crate::io::error::{Result, RollpageError, invalid_parameter};
use crate::sampling::random::RandomSource;
use crate::sampling::sampler;

/// Identifier of a stored roll table
pub type TableId = Uuid;

/// One weighted entry of a roll table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableItem {
    /// Text shown when this item is rolled
    #[serde(alias = "item")]
    pub text: String,
    /// Relative weight, never negative
    pub weight: f64,
}

impl TableItem {
    /// Create an item
    pub fn new(text: impl Into<String>, weight: f64) -> Self {
        Self {
            text: text.into(),
            weight,
        }
    }
}

/// A named, owned list of weighted items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollTable {
    /// Record id
    pub id: TableId,
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Id of the owning user
    pub owner: String,
    /// Labels used for filtering
    #[serde(default)]
    pub tags: Vec<String>,
    /// Items in display order
    pub items: Vec<TableItem>,
}

impl RollTable {
    /// Create an empty table with a fresh id
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            owner: owner.into(),
            tags: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Builder-style item list replacement
    #[must_use]
    pub fn with_items(mut self, items: Vec<TableItem>) -> Self {
        self.items = items;
        self
    }

    /// Sum of all item weights
    pub fn total_weight(&self) -> f64 {
        self.items.iter().map(|item| item.weight).sum()
    }

    /// Whether the table can be rolled on
    pub fn is_rollable(&self) -> bool {
        !self.items.is_empty() && self.total_weight() > 0.0
    }

    /// Draw one item with probability proportional to its weight
    ///
    /// # Errors
    ///
    /// Returns `EmptyTable` or `ZeroWeight` if the table cannot be rolled
    pub fn roll<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<&TableItem> {
        sampler::roll(&self.items, rng)
    }

    /// Whether the table carries every one of the given tags
    pub fn has_all_tags(&self, tags: &[String]) -> bool {
        tags.iter().all(|tag| self.tags.contains(tag))
    }

    /// Check metadata and item weights
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for an empty name or an invalid weight
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(invalid_parameter("name", &self.name, &"must not be empty"));
        }
        sampler::validate_weights(&self.items)
    }

    /// Render items in the `item:weight` text format
    pub fn to_text(&self) -> String {
        self.items
            .iter()
            .map(|item| format!("{}:{}", item.text, item.weight))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Parse items from text, one `item:weight` entry per line
///
/// Blank lines are skipped. The weight is taken after the last `:` so item
/// text may itself contain colons.
///
/// # Errors
///
/// Returns `InvalidTableLine` for the first malformed line
pub fn parse_items(text: &str) -> Result<Vec<TableItem>> {
    let mut items = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_number = index + 1;
        let invalid = |reason: &str| RollpageError::InvalidTableLine {
            line: line_number,
            reason: reason.to_string(),
        };

        let (raw_text, raw_weight) = line
            .rsplit_once(':')
            .ok_or_else(|| invalid("expected 'item:weight'"))?;

        let item_text = raw_text.trim();
        if item_text.is_empty() {
            return Err(invalid("item text is empty"));
        }
        if item_text.chars().count() > MAX_ITEM_TEXT_LEN {
            return Err(invalid(&format!(
                "item text longer than {MAX_ITEM_TEXT_LEN} characters"
            )));
        }

        let weight: f64 = raw_weight.trim().parse().map_err(|err| {
            invalid(&format!("weight '{}' is not a number: {err}", raw_weight.trim()))
        })?;
        if !(0.0..=MAX_IMPORT_WEIGHT).contains(&weight) {
            return Err(invalid(&format!(
                "weight {weight} outside 0..={MAX_IMPORT_WEIGHT}"
            )));
        }

        items.push(TableItem::new(item_text, weight));
    }

    Ok(items)
}
