//! Weighted random selection over roll table items

use tracing::warn;

use crate::io::error::{Result, RollpageError, invalid_parameter};
use crate::model::table::TableItem;
use crate::sampling::random::RandomSource;

/// Reject weights that would make the distribution meaningless
///
/// # Errors
///
/// Returns `InvalidParameter` for a negative or non-finite weight
pub fn validate_weights(items: &[TableItem]) -> Result<()> {
    for item in items {
        if !item.weight.is_finite() || item.weight < 0.0 {
            return Err(invalid_parameter(
                "weight",
                &item.weight,
                &format!("weight of '{}' must be a finite number >= 0", item.text),
            ));
        }
    }
    Ok(())
}

/// Draw the index of one item with probability proportional to its weight
///
/// A uniform value in `[0, total)` is walked down the items in order and the
/// first item that brings the remainder to zero or below wins, so a value
/// landing exactly on a boundary belongs to the earlier item.
///
/// # Errors
///
/// Returns `EmptyTable` for no items, `InvalidParameter` for a negative or
/// non-finite weight and `ZeroWeight` when the weights sum to zero
pub fn roll_index<R: RandomSource + ?Sized>(items: &[TableItem], rng: &mut R) -> Result<usize> {
    if items.is_empty() {
        return Err(RollpageError::EmptyTable);
    }
    validate_weights(items)?;

    let total: f64 = items.iter().map(|item| item.weight).sum();
    if total <= 0.0 {
        return Err(RollpageError::ZeroWeight { total });
    }

    let mut remainder = rng.next_f64() * total;
    for (index, item) in items.iter().enumerate() {
        remainder -= item.weight;
        if remainder <= 0.0 {
            return Ok(index);
        }
    }

    // Only reachable through floating point accumulation error
    warn!(total, remainder, "weighted roll ran past the last item");
    Ok(items.len() - 1)
}

/// Draw one item with probability proportional to its weight
///
/// # Errors
///
/// See [`roll_index`]
pub fn roll<'a, R: RandomSource + ?Sized>(
    items: &'a [TableItem],
    rng: &mut R,
) -> Result<&'a TableItem> {
    let index = roll_index(items, rng)?;
    items.get(index).ok_or(RollpageError::EmptyTable)
}

/// Random source bundled with the roll operation for repeated draws
#[derive(Debug, Clone)]
pub struct WeightedSampler<R> {
    source: R,
}

impl<R: RandomSource> WeightedSampler<R> {
    /// Wrap a random source
    pub const fn new(source: R) -> Self {
        Self { source }
    }

    /// Draw one item from `items`
    ///
    /// # Errors
    ///
    /// See [`roll_index`]
    pub fn roll<'a>(&mut self, items: &'a [TableItem]) -> Result<&'a TableItem> {
        roll(items, &mut self.source)
    }

    /// Draw `count` items independently
    ///
    /// # Errors
    ///
    /// See [`roll_index`]
    pub fn roll_many<'a>(&mut self, items: &'a [TableItem], count: usize) -> Result<Vec<&'a TableItem>> {
        (0..count).map(|_| self.roll(items)).collect()
    }

    /// Borrow the underlying random source
    pub const fn source_mut(&mut self) -> &mut R {
        &mut self.source
    }
}
