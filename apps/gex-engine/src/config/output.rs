//! Artifact locations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where extraction and compute stages write their artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory all artifacts are written to.
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    /// Intermediate artifact (OptionType, Strike, OI).
    #[serde(default = "default_data_file")]
    pub data_file: String,
    /// Final artifact (OptionType, Strike, OI, GEX).
    #[serde(default = "default_gex_file")]
    pub gex_file: String,
    /// Per-strike profile as JSON.
    #[serde(default = "default_profile_file")]
    pub profile_file: String,
    /// Chart of the two profile series.
    #[serde(default = "default_chart_file")]
    pub chart_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            data_file: default_data_file(),
            gex_file: default_gex_file(),
            profile_file: default_profile_file(),
            chart_file: default_chart_file(),
        }
    }
}

impl OutputConfig {
    /// Path of the intermediate artifact.
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.directory.join(&self.data_file)
    }

    /// Path of the final artifact.
    #[must_use]
    pub fn gex_path(&self) -> PathBuf {
        self.directory.join(&self.gex_file)
    }

    /// Path of the profile JSON.
    #[must_use]
    pub fn profile_path(&self) -> PathBuf {
        self.directory.join(&self.profile_file)
    }

    /// Path of the chart.
    #[must_use]
    pub fn chart_path(&self) -> PathBuf {
        self.directory.join(&self.chart_file)
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_data_file() -> String {
    "data.csv".to_string()
}

fn default_gex_file() -> String {
    "gex_data.csv".to_string()
}

fn default_profile_file() -> String {
    "gex_profile.json".to_string()
}

fn default_chart_file() -> String {
    "gex_analysis.svg".to_string()
}
