//! Conflict detection between two operation lists over the same base.
//!
//! Every `(left, right)` pair is tested, so detection is
//! `O(|left| * |right|)`. Hunk counts are small next to document sizes.

use serde::{Deserialize, Serialize};
use tracing::debug;

use lm_diff::DiffOperation;

use crate::format::format_line_range;

/// One operation from each side whose base regions interact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeConflict {
    /// The operation from the left derivative.
    pub left: DiffOperation,
    /// The operation from the right derivative.
    pub right: DiffOperation,
}

impl MergeConflict {
    /// Human-readable summary of the two colliding base ranges.
    pub fn describe(&self) -> String {
        format!(
            "{} vs {}",
            format_line_range(self.left.start, self.left.end),
            format_line_range(self.right.start, self.right.end)
        )
    }
}

/// Returns `true` when two operations touch the same base region.
///
/// - Two range edits conflict when their ranges overlap.
/// - Two insertions conflict when they insert at the same offset.
/// - An insertion conflicts with a range edit when the insertion point lies
///   inside the range or on either of its boundaries.
pub fn operations_conflict(left: &DiffOperation, right: &DiffOperation) -> bool {
    match (left.is_insertion(), right.is_insertion()) {
        (false, false) => left.start.max(right.start) < left.end.min(right.end),
        (true, true) => left.start == right.start,
        (true, false) => left.start >= right.start && left.start <= right.end,
        (false, true) => right.start >= left.start && right.start <= left.end,
    }
}

/// Index pairs `(left, right)` of conflicting operations, left-major.
pub(crate) fn conflicting_pairs<'a>(
    left_ops: &'a [DiffOperation],
    right_ops: &'a [DiffOperation],
) -> impl Iterator<Item = (usize, usize)> + 'a {
    left_ops.iter().enumerate().flat_map(move |(li, l)| {
        right_ops
            .iter()
            .enumerate()
            .filter(move |(_, r)| operations_conflict(l, r))
            .map(move |(ri, _)| (li, ri))
    })
}

/// Pair up every conflicting left/right operation.
///
/// Order is left-major, right-minor over the two input lists.
pub fn detect_conflicts(
    left_ops: &[DiffOperation],
    right_ops: &[DiffOperation],
) -> Vec<MergeConflict> {
    let pairs: Vec<_> = conflicting_pairs(left_ops, right_ops).collect();
    conflicts_from_pairs(left_ops, right_ops, &pairs)
}

/// Materialize index pairs from [`conflicting_pairs`] into conflicts.
pub(crate) fn conflicts_from_pairs(
    left_ops: &[DiffOperation],
    right_ops: &[DiffOperation],
    pairs: &[(usize, usize)],
) -> Vec<MergeConflict> {
    pairs
        .iter()
        .map(|&(li, ri)| {
            let conflict = MergeConflict {
                left: left_ops[li].clone(),
                right: right_ops[ri].clone(),
            };
            debug!(
                left = %conflict.left,
                right = %conflict.right,
                range = %conflict.describe(),
                "conflict detected"
            );
            conflict
        })
        .collect()
}
