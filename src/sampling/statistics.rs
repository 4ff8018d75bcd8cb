//! Empirical roll frequencies and chi-squared goodness-of-fit against table weights

use crate::io::configuration::PROGRESS_REFRESH_DRAWS;
use crate::io::error::{Result, RollpageError, invalid_parameter};
use crate::math::probability::chi_square_survival;
use crate::model::table::TableItem;
use crate::sampling::random::RandomSource;
use crate::sampling::sampler::{roll_index, validate_weights};

/// Chi-squared comparison of observed roll counts with expected weights
#[derive(Debug, Clone, PartialEq)]
pub struct GoodnessOfFit {
    /// Pearson chi-squared statistic
    pub statistic: f64,
    /// Number of positive-weight items minus one
    pub degrees_of_freedom: usize,
    /// Probability of a statistic at least this large under the weights
    pub p_value: f64,
}

impl GoodnessOfFit {
    /// Whether the observed counts are consistent with the weights at `significance`
    pub fn passes(&self, significance: f64) -> bool {
        self.p_value >= significance
    }
}

/// Roll `draws` times and count how often each item came up
///
/// `on_progress` receives the number of completed draws every
/// `PROGRESS_REFRESH_DRAWS` draws and once at the end.
///
/// # Errors
///
/// Propagates any roll failure; the table is checked before the first draw
pub fn tally_rolls<R, F>(
    items: &[TableItem],
    draws: usize,
    rng: &mut R,
    mut on_progress: F,
) -> Result<Vec<usize>>
where
    R: RandomSource + ?Sized,
    F: FnMut(usize),
{
    let mut counts = vec![0; items.len()];

    for draw in 1..=draws {
        let index = roll_index(items, rng)?;
        if let Some(count) = counts.get_mut(index) {
            *count += 1;
        }
        if draw % PROGRESS_REFRESH_DRAWS == 0 {
            on_progress(draw);
        }
    }
    on_progress(draws);

    Ok(counts)
}

/// Pearson chi-squared test of `observed` counts against item weights
///
/// Zero-weight items carry no expected mass; any observation of one makes
/// the statistic infinite.
///
/// # Errors
///
/// Returns `InvalidParameter` when the count and item lengths differ,
/// `EmptyTable`/`ZeroWeight` for unrollable items
pub fn chi_square(observed: &[usize], items: &[TableItem]) -> Result<GoodnessOfFit> {
    if observed.len() != items.len() {
        return Err(invalid_parameter(
            "observed",
            &observed.len(),
            &format!("expected one count per item ({})", items.len()),
        ));
    }
    if items.is_empty() {
        return Err(RollpageError::EmptyTable);
    }
    validate_weights(items)?;

    let total_weight: f64 = items.iter().map(|item| item.weight).sum();
    if total_weight <= 0.0 {
        return Err(RollpageError::ZeroWeight {
            total: total_weight,
        });
    }

    let draws = observed.iter().sum::<usize>() as f64;
    let mut statistic = 0.0;
    let mut categories = 0_usize;

    for (&count, item) in observed.iter().zip(items) {
        let count = count as f64;
        if item.weight > 0.0 {
            categories += 1;
            let expected = draws * item.weight / total_weight;
            if expected > 0.0 {
                statistic += (count - expected).powi(2) / expected;
            }
        } else if count > 0.0 {
            statistic = f64::INFINITY;
        }
    }

    let degrees_of_freedom = categories.saturating_sub(1);
    Ok(GoodnessOfFit {
        statistic,
        degrees_of_freedom,
        p_value: chi_square_survival(statistic, degrees_of_freedom),
    })
}
