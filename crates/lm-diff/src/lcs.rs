//! LCS diff engine.
//!
//! Builds a suffix LCS table over the two line sequences and walks it from
//! the top-left corner, accumulating one open edit span at a time. Spans are
//! flushed at every matching line, then passed through [`coalesce`].
//!
//! When the insertion path and the deletion path keep the same remaining LCS
//! length, the walk takes the insertion. This tie-break decides which of the
//! equally minimal edit scripts is produced and must stay stable.

use tracing::debug;

use crate::config::DiffConfig;
use crate::error::{DiffError, DiffResult};
use crate::lines::split_lines;
use crate::operation::{coalesce, DiffOperation};

/// Suffix LCS lengths stored in one flat row-major buffer.
///
/// `get(i, j)` is the length of the LCS of `base[i..]` and `other[j..]`.
#[derive(Clone, Debug)]
pub struct LcsTable {
    cells: Vec<u32>,
    cols: usize,
}

impl LcsTable {
    /// Number of cells needed to compare `n` with `m` lines.
    pub fn cell_count(n: usize, m: usize) -> usize {
        (n + 1).saturating_mul(m + 1)
    }

    /// Fill the table bottom-up.
    pub fn build<S: AsRef<str>>(base: &[S], other: &[S]) -> Self {
        let (n, m) = (base.len(), other.len());
        let cols = m + 1;
        let mut cells = vec![0u32; Self::cell_count(n, m)];

        for i in (0..n).rev() {
            for j in (0..m).rev() {
                cells[i * cols + j] = if base[i].as_ref() == other[j].as_ref() {
                    cells[(i + 1) * cols + j + 1] + 1
                } else {
                    cells[(i + 1) * cols + j].max(cells[i * cols + j + 1])
                };
            }
        }

        Self { cells, cols }
    }

    /// LCS length of `base[i..]` and `other[j..]`, for `i <= n` and `j <= m`.
    pub(crate) fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.cols + j]
    }

    /// LCS length of the full sequences.
    pub fn lcs_len(&self) -> u32 {
        self.cells.first().copied().unwrap_or(0)
    }
}

/// The traceback's single edit span: closed (`None`) or open.
#[derive(Default)]
struct Span(Option<DiffOperation>);

impl Span {
    /// Push the open span, if any, and close it.
    fn flush(&mut self, out: &mut Vec<DiffOperation>) {
        if let Some(op) = self.0.take() {
            if !op.is_degenerate() {
                out.push(op);
            }
        }
    }

    /// Open a zero-width span at `at` unless one is already open.
    fn open_at(&mut self, at: usize) -> &mut DiffOperation {
        self.0
            .get_or_insert_with(|| DiffOperation::insertion(at, Vec::new()))
    }
}

/// Diff two line sequences into coalesced operations against `base`.
pub fn diff_lines<S: AsRef<str>>(base: &[S], other: &[S]) -> Vec<DiffOperation> {
    let (n, m) = (base.len(), other.len());
    let table = LcsTable::build(base, other);

    let mut raw = Vec::new();
    let mut span = Span::default();
    let (mut i, mut j) = (0usize, 0usize);

    loop {
        if i < n && j < m && base[i].as_ref() == other[j].as_ref() {
            span.flush(&mut raw);
            i += 1;
            j += 1;
            continue;
        }

        let down = (i < n).then(|| table.get(i + 1, j));
        let right = (j < m).then(|| table.get(i, j + 1));

        match (down, right) {
            (d, Some(r)) if d.map_or(true, |d| r >= d) => {
                span.open_at(i).replacement.push(other[j].as_ref().to_owned());
                j += 1;
            }
            (Some(_), _) => {
                span.open_at(i).end = i + 1;
                i += 1;
            }
            _ => break,
        }
    }
    span.flush(&mut raw);

    let ops = coalesce(raw);
    debug!(
        base_lines = n,
        other_lines = m,
        lcs = table.lcs_len(),
        operations = ops.len(),
        "computed diff"
    );
    ops
}

/// Compute the operations that turn `base_text` into `other_text`.
///
/// The result is ordered by `start`, non-overlapping and coalesced. Identical
/// texts yield an empty list.
pub fn compute_diff_operations(base_text: &str, other_text: &str) -> Vec<DiffOperation> {
    let base = split_lines(base_text);
    let other = split_lines(other_text);
    diff_lines(&base, &other)
}

/// Like [`compute_diff_operations`], but refuses inputs whose LCS table would
/// exceed `config.max_table_cells`.
pub fn try_compute_diff_operations(
    base_text: &str,
    other_text: &str,
    config: &DiffConfig,
) -> DiffResult<Vec<DiffOperation>> {
    let base = split_lines(base_text);
    let other = split_lines(other_text);

    if let Some(limit) = config.max_table_cells {
        let cells = LcsTable::cell_count(base.len(), other.len());
        if cells > limit {
            return Err(DiffError::InputTooLarge { cells, limit });
        }
    }

    Ok(diff_lines(&base, &other))
}
