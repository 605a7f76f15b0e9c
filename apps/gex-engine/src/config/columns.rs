//! Column label mapping for header lookup and projection.

use serde::{Deserialize, Serialize};

/// Header labels the extractor looks for.
///
/// Matching is case-insensitive after trimming. The open-interest column
/// defaults to `"At Close"`, which is what broker exports have historically
/// been read with; point it at a real open-interest column when the export
/// carries one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Label of the month column in the summary table.
    #[serde(default = "default_month")]
    pub month: String,
    /// Label of the strike column.
    #[serde(default = "default_strike")]
    pub strike: String,
    /// Label of the column used as the open-interest value.
    #[serde(default = "default_open_interest")]
    pub open_interest: String,
    /// Use the first two columns when neither label is present.
    #[serde(default = "default_positional_fallback")]
    pub positional_fallback: bool,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            month: default_month(),
            strike: default_strike(),
            open_interest: default_open_interest(),
            positional_fallback: default_positional_fallback(),
        }
    }
}

impl ColumnMapping {
    /// True when `header` names the same column as `label`.
    #[must_use]
    pub fn matches(label: &str, header: &str) -> bool {
        header.trim().to_lowercase() == label.trim().to_lowercase()
    }
}

fn default_month() -> String {
    "Month".to_string()
}

fn default_strike() -> String {
    "Strike".to_string()
}

fn default_open_interest() -> String {
    "At Close".to_string()
}

const fn default_positional_fallback() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_is_case_insensitive_and_trimmed() {
        assert!(ColumnMapping::matches("At Close", "  at close "));
        assert!(ColumnMapping::matches("Strike", "STRIKE"));
        assert!(!ColumnMapping::matches("Strike", "Strike Price"));
        assert!(!ColumnMapping::matches("Month", "Months"));
    }
}
