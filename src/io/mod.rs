/// Command-line interface
pub mod cli;
/// Layout constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Logging setup
pub mod logging;
/// Progress display
pub mod progress;
