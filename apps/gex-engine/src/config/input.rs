//! Input workbook selection.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Which workbook to read and, optionally, which month to extract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Path to the broker export.
    #[serde(default = "default_path")]
    pub path: PathBuf,
    /// Month to extract, as a 1-based index or an exact label.
    /// When absent the month is chosen interactively.
    #[serde(default)]
    pub month: Option<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            month: None,
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("NQH6 - 2026-01-05.xls")
}
