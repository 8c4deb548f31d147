//! Line diff engine for Linemerge.
//!
//! Turns two documents into a canonical list of replace operations expressed
//! against the first (base) document. The operations are the input of the
//! three-way merge in `lm-merge`.
//!
//! # Key Types
//!
//! - [`DiffOperation`] -- `{ start, end, replacement }` over base line indices
//! - [`DiffConfig`] -- bound on the LCS table size for the checked entry point
//! - [`DiffError`] -- invalid operation ranges and oversized inputs
//!
//! # Example
//!
//! ```rust
//! use lm_diff::{compute_diff_operations, DiffOperation};
//!
//! let ops = compute_diff_operations("alpha\nbeta\ngamma", "alpha\nBETA\ngamma");
//! assert_eq!(ops, vec![DiffOperation::new(1, 2, vec!["BETA".into()])]);
//! ```

pub mod config;
pub mod error;
pub mod lcs;
pub mod lines;
pub mod operation;

pub use config::{DiffConfig, DEFAULT_MAX_TABLE_CELLS};
pub use error::{DiffError, DiffResult};
pub use lcs::{compute_diff_operations, diff_lines, try_compute_diff_operations, LcsTable};
pub use lines::{join_lines, split_lines};
pub use operation::{coalesce, DiffOperation, OperationKind};
