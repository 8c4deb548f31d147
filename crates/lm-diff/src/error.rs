//! Error types for the diff crate.

/// Errors that can occur while building or computing diff operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// An operation was constructed with `end < start`.
    #[error("invalid operation range: end {end} is before start {start}")]
    InvalidRange { start: usize, end: usize },

    /// The LCS table for the two inputs exceeds the configured bound.
    #[error("input too large: LCS table needs {cells} cells, limit is {limit}")]
    InputTooLarge { cells: usize, limit: usize },
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
