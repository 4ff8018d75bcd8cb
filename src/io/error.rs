//! Error types shared by sampling, layout, storage and the command-line front end

use std::fmt;
use std::path::PathBuf;

use crate::layout::geometry::Rect;
use crate::store::RecordKind;

/// Main error type for all rollpage operations
#[derive(Debug)]
pub enum RollpageError {
    /// Attempted to roll on a table with no items
    EmptyTable,

    /// Attempted to roll on a table whose weights sum to zero or less
    ZeroWeight {
        /// Sum of all item weights
        total: f64,
    },

    /// Requested rectangle overlaps one or more existing boxes
    Collision {
        /// Ids of every box the rectangle would overlap, in page order
        conflicting: Vec<String>,
    },

    /// Requested rectangle does not fit inside the page grid
    OutOfBounds {
        /// The rejected rectangle
        rect: Rect,
    },

    /// No box with the given id exists on the page
    BoxNotFound {
        /// Id that was looked up
        id: String,
    },

    /// Stored record does not exist (or is not visible to the caller)
    NotFound {
        /// Kind of record requested
        kind: RecordKind,
        /// Record id requested
        id: String,
    },

    /// Caller is authenticated but does not own the record
    PermissionDenied {
        /// Kind of record being modified
        kind: RecordKind,
        /// Record id being modified
        id: String,
    },

    /// Operation needs an authenticated caller
    Unauthenticated,

    /// Input value validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A line of a text table import could not be parsed
    InvalidTableLine {
        /// 1-based line number in the imported text
        line: usize,
        /// Description of the problem
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Record could not be encoded or decoded
    Serialization {
        /// File the record was read from or written to
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },
}

/// Broad error classes a presentation layer reacts to differently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User-fixable data problem (empty table, bad weights, malformed input)
    Configuration,
    /// Placement rejected; choosing another spot or size fixes it
    Placement,
    /// Referenced record or box no longer exists; a reload is likely needed
    StaleReference,
    /// Caller may not perform the operation
    Access,
    /// Storage backend failure
    Io,
}

impl RollpageError {
    /// Classify the error for display decisions
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyTable
            | Self::ZeroWeight { .. }
            | Self::InvalidParameter { .. }
            | Self::InvalidTableLine { .. } => ErrorCategory::Configuration,
            Self::Collision { .. } | Self::OutOfBounds { .. } => ErrorCategory::Placement,
            Self::BoxNotFound { .. } | Self::NotFound { .. } => ErrorCategory::StaleReference,
            Self::PermissionDenied { .. } | Self::Unauthenticated => ErrorCategory::Access,
            Self::FileSystem { .. } | Self::Serialization { .. } => ErrorCategory::Io,
        }
    }

    /// Process exit status for the command-line front end
    pub const fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Io => 1,
            ErrorCategory::Configuration => 2,
            ErrorCategory::Placement => 3,
            ErrorCategory::StaleReference => 4,
            ErrorCategory::Access => 5,
        }
    }
}

impl fmt::Display for RollpageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTable => write!(f, "Cannot roll on an empty table"),
            Self::ZeroWeight { total } => {
                write!(f, "Cannot roll on a table with total weight {total}")
            }
            Self::Collision { conflicting } => {
                write!(f, "Box would overlap: {}", conflicting.join(", "))
            }
            Self::OutOfBounds { rect } => {
                write!(
                    f,
                    "Box {}x{} at ({}, {}) does not fit the grid",
                    rect.width, rect.height, rect.x, rect.y
                )
            }
            Self::BoxNotFound { id } => write!(f, "Box '{id}' not found"),
            Self::NotFound { kind, id } => write!(f, "{kind} '{id}' not found"),
            Self::PermissionDenied { kind, id } => {
                write!(f, "Not allowed to modify {kind} '{id}'")
            }
            Self::Unauthenticated => write!(f, "Login required"),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidTableLine { line, reason } => {
                write!(f, "Invalid table line {line}: {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Serialization { path, source } => {
                write!(f, "Malformed record '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for RollpageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            Self::Serialization { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for rollpage results
pub type Result<T> = std::result::Result<T, RollpageError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> RollpageError {
    RollpageError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error for the given path and operation
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> RollpageError {
    RollpageError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}

/// Create a not-found error for a stored record
pub fn not_found(kind: RecordKind, id: &impl ToString) -> RollpageError {
    RollpageError::NotFound {
        kind,
        id: id.to_string(),
    }
}
