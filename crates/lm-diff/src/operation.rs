//! Diff operations and hunk coalescing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DiffError, DiffResult};

/// A single edit against the base line sequence.
///
/// `start..end` is a half-open range of base line indices. `replacement` is
/// the ordered list of lines that takes the place of `base[start..end]`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffOperation {
    /// First replaced base line (inclusive).
    pub start: usize,
    /// End of the replaced base range (exclusive).
    pub end: usize,
    /// Lines that replace the base range.
    pub replacement: Vec<String>,
}

/// The shape of a [`DiffOperation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Zero-width base range; lines are inserted before `start`.
    Insertion,
    /// Empty replacement; the base range is removed.
    Deletion,
    /// A base range is swapped for new lines.
    Replacement,
}

impl DiffOperation {
    /// Create an operation. `end` must not be before `start`.
    pub fn new(start: usize, end: usize, replacement: Vec<String>) -> Self {
        debug_assert!(end >= start, "operation end {end} before start {start}");
        Self {
            start,
            end,
            replacement,
        }
    }

    /// Create an operation, rejecting inverted ranges.
    pub fn try_new(start: usize, end: usize, replacement: Vec<String>) -> DiffResult<Self> {
        if end < start {
            return Err(DiffError::InvalidRange { start, end });
        }
        Ok(Self {
            start,
            end,
            replacement,
        })
    }

    /// Insert `lines` before base line `at`.
    pub fn insertion(at: usize, lines: Vec<String>) -> Self {
        Self::new(at, at, lines)
    }

    /// Remove base lines `start..end`.
    pub fn deletion(start: usize, end: usize) -> Self {
        Self::new(start, end, Vec::new())
    }

    /// Returns `true` when the base range is zero-width.
    pub fn is_insertion(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` when the replacement is empty.
    pub fn is_deletion(&self) -> bool {
        self.replacement.is_empty()
    }

    /// Returns `true` when a non-empty base range gets non-empty content.
    pub fn is_replacement(&self) -> bool {
        !self.is_insertion() && !self.is_deletion()
    }

    /// A zero-width operation that inserts nothing. Such operations are
    /// dropped by [`coalesce`].
    pub fn is_degenerate(&self) -> bool {
        self.is_insertion() && self.is_deletion()
    }

    /// Returns `false` for inverted ranges built outside this crate.
    pub fn is_valid(&self) -> bool {
        self.end >= self.start
    }

    /// Number of base lines consumed.
    pub fn base_len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Classify the operation. Degenerate operations report `Insertion`.
    pub fn kind(&self) -> OperationKind {
        if self.is_insertion() {
            OperationKind::Insertion
        } else if self.is_deletion() {
            OperationKind::Deletion
        } else {
            OperationKind::Replacement
        }
    }
}

impl fmt::Display for DiffOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.replacement.len();
        let noun = if n == 1 { "line" } else { "lines" };
        write!(f, "{}..{} -> {n} {noun}", self.start, self.end)
    }
}

/// Collapse raw traceback spans into a minimal ordered list.
///
/// Degenerate operations are dropped, and an operation that begins exactly
/// where the previous one ends is folded into it. The input must already be
/// ordered by `start`.
pub fn coalesce(operations: Vec<DiffOperation>) -> Vec<DiffOperation> {
    let mut out: Vec<DiffOperation> = Vec::with_capacity(operations.len());

    for op in operations {
        if op.is_degenerate() {
            continue;
        }
        match out.last_mut() {
            Some(prev) if prev.end == op.start => {
                prev.end = op.end;
                prev.replacement.extend(op.replacement);
            }
            _ => out.push(op),
        }
    }

    out
}
