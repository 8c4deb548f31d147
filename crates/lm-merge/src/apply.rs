//! Safe application of operations to a base line sequence.
//!
//! Operations are applied from the highest `start` down, so splicing one
//! never moves the bounds of an operation that has not been applied yet.

use tracing::warn;

use lm_diff::DiffOperation;

/// Apply `operations` to `base_lines` and return the edited sequence.
///
/// Operations with `end < start` are skipped with a warning. A range that
/// reaches past the sequence at the moment it is applied is clamped to the
/// current length, so an insertion beyond the end appends. Nothing here
/// panics on malformed input.
pub fn apply_operations(base_lines: &[String], operations: &[DiffOperation]) -> Vec<String> {
    let mut ordered: Vec<&DiffOperation> = operations
        .iter()
        .filter(|op| {
            if op.is_valid() {
                true
            } else {
                warn!(start = op.start, end = op.end, "skipping inverted operation");
                false
            }
        })
        .collect();
    ordered.sort_by(|a, b| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));

    let mut lines = base_lines.to_vec();
    for op in ordered {
        let end = op.end.min(lines.len());
        let start = op.start.min(end);
        if end != op.end {
            warn!(
                start = op.start,
                end = op.end,
                len = lines.len(),
                "clamping out-of-bounds operation"
            );
        }
        lines.splice(start..end, op.replacement.iter().cloned());
    }
    lines
}
