//! Three-way merge for Linemerge.
//!
//! Diffs two derivatives against their common base, finds edits that collide
//! on the same base region, and merges the rest. Collisions are resolved in
//! favor of the right derivative; the discarded left edits are reported as
//! [`MergeConflict`]s so a caller can preview them.
//!
//! # Quick Start
//!
//! ```rust
//! use lm_merge::{format_line_range, merge_changes};
//!
//! let result = merge_changes("a\nb\nc", "a\nB\nc", "a\nbeta\nc");
//! assert_eq!(result.merged_text, "a\nbeta\nc");
//! let conflict = &result.conflicts[0];
//! assert_eq!(format_line_range(conflict.left.start, conflict.left.end), "line 2");
//! ```

pub mod apply;
pub mod conflict;
pub mod error;
pub mod format;
pub mod resolver;

pub use apply::apply_operations;
pub use conflict::{detect_conflicts, operations_conflict, MergeConflict};
pub use error::{MergeError, MergeOutcome};
pub use format::format_line_range;
pub use resolver::{merge_changes, try_merge_changes, MergeResult};
