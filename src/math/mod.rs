//! Probability functions used by the roll distribution check

/// Normal and chi-squared distribution approximations
pub mod probability;
