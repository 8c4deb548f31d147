//! Three-way merge with a right-wins policy.
//!
//! Both derivatives are diffed against the base. All right operations are
//! applied. A left operation is applied only when it is not already present
//! on the right and does not collide with any right operation.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use lm_diff::{
    compute_diff_operations, join_lines, split_lines, try_compute_diff_operations, DiffConfig,
    DiffOperation,
};

use crate::apply::apply_operations;
use crate::conflict::{conflicting_pairs, conflicts_from_pairs, MergeConflict};
use crate::error::MergeOutcome;

/// The outcome of merging two derivatives of a common base.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeResult {
    /// The merged document, lines joined with `\n`.
    pub merged_text: String,
    /// Operations turning the base into the left document.
    pub left_operations: Vec<DiffOperation>,
    /// Operations turning the base into the right document.
    pub right_operations: Vec<DiffOperation>,
    /// Colliding pairs; the left side of each was discarded.
    pub conflicts: Vec<MergeConflict>,
}

impl MergeResult {
    /// Returns `true` if any left edit was discarded in favor of the right.
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// The merged document as a line sequence.
    pub fn merged_lines(&self) -> Vec<String> {
        split_lines(&self.merged_text)
    }
}

/// Identity of an operation in the union: `(start, end, replacement)`.
type OperationKey<'a> = (usize, usize, &'a [String]);

fn key(op: &DiffOperation) -> OperationKey<'_> {
    (op.start, op.end, op.replacement.as_slice())
}

/// Merge `left_text` and `right_text`, both derived from `base_text`.
///
/// Non-conflicting edits from both sides are applied. On conflict the right
/// edit is kept and the left edit is dropped.
pub fn merge_changes(base_text: &str, left_text: &str, right_text: &str) -> MergeResult {
    let left_ops = compute_diff_operations(base_text, left_text);
    let right_ops = compute_diff_operations(base_text, right_text);
    resolve(&split_lines(base_text), left_ops, right_ops)
}

/// Like [`merge_changes`], but each diff is bounded by `config`.
pub fn try_merge_changes(
    base_text: &str,
    left_text: &str,
    right_text: &str,
    config: &DiffConfig,
) -> MergeOutcome<MergeResult> {
    let left_ops = try_compute_diff_operations(base_text, left_text, config)?;
    let right_ops = try_compute_diff_operations(base_text, right_text, config)?;
    Ok(resolve(&split_lines(base_text), left_ops, right_ops))
}

fn resolve(
    base_lines: &[String],
    left_ops: Vec<DiffOperation>,
    right_ops: Vec<DiffOperation>,
) -> MergeResult {
    let pairs: Vec<(usize, usize)> = conflicting_pairs(&left_ops, &right_ops).collect();
    let dropped: BTreeSet<usize> = pairs.iter().map(|&(li, _)| li).collect();

    let mut union: BTreeMap<OperationKey<'_>, &DiffOperation> = BTreeMap::new();
    for op in &right_ops {
        union.insert(key(op), op);
    }
    for (li, op) in left_ops.iter().enumerate() {
        if !dropped.contains(&li) {
            union.entry(key(op)).or_insert(op);
        }
    }

    let selected: Vec<DiffOperation> = union.into_values().cloned().collect();
    let merged_lines = apply_operations(base_lines, &selected);
    let conflicts = conflicts_from_pairs(&left_ops, &right_ops, &pairs);

    debug!(
        left = left_ops.len(),
        right = right_ops.len(),
        conflicts = conflicts.len(),
        applied = selected.len(),
        "merge resolved"
    );

    MergeResult {
        merged_text: join_lines(&merged_lines),
        left_operations: left_ops,
        right_operations: right_ops,
        conflicts,
    }
}
