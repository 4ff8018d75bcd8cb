//! Weighted rolling on tables
//!
//! This module contains:
//! - The injectable random source abstraction
//! - The weighted roll itself
//! - Frequency tallies and goodness-of-fit checks over many rolls

/// Random sources for reproducible rolls
pub mod random;
/// Weighted item selection
pub mod sampler;
/// Roll frequency statistics
pub mod statistics;

pub use random::{RandomSource, ScriptedSource, SeededSource};
pub use sampler::{WeightedSampler, roll, roll_index};
