use serde::{Deserialize, Serialize};

/// Default upper bound on `(n + 1) * (m + 1)` for checked diffs.
///
/// Roughly a 5000 x 5000 line comparison; the table stores one `u32` per cell.
pub const DEFAULT_MAX_TABLE_CELLS: usize = 25_000_000;

/// Configuration for the checked diff entry points.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Maximum number of LCS table cells a single diff may allocate.
    /// `None` disables the bound.
    pub max_table_cells: Option<usize>,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            max_table_cells: Some(DEFAULT_MAX_TABLE_CELLS),
        }
    }
}

impl DiffConfig {
    /// A configuration with no size bound, matching the unchecked functions.
    pub fn unbounded() -> Self {
        Self {
            max_table_cells: None,
        }
    }

    /// A configuration with an explicit cell bound.
    pub fn with_max_table_cells(limit: usize) -> Self {
        Self {
            max_table_cells: Some(limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_bounded() {
        let c = DiffConfig::default();
        assert_eq!(c.max_table_cells, Some(DEFAULT_MAX_TABLE_CELLS));
    }

    #[test]
    fn unbounded_has_no_limit() {
        assert!(DiffConfig::unbounded().max_table_cells.is_none());
    }

    #[test]
    fn missing_field_deserializes_to_default() {
        let c: DiffConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(c, DiffConfig::default());
    }

    #[test]
    fn explicit_null_disables_bound() {
        let c: DiffConfig = serde_json::from_str(r#"{"max_table_cells":null}"#).unwrap();
        assert_eq!(c, DiffConfig::unbounded());
    }
}
