//! Stage orchestration.
//!
//! ```text
//! workbook ──extract_step──▶ data.csv ──compute_step──▶ gex_data.csv
//!                                                     ├─▶ gex_profile.json
//!                                                     └─▶ gex_analysis.svg
//! ```
//!
//! Each stage finishes all of its computation before writing, so a failing
//! stage leaves no partial artifacts of its own.

use std::path::PathBuf;

use crate::artifact::{read_option_records, write_gex_rows, write_option_records, write_profile};
use crate::chart::write_chart;
use crate::config::Config;
use crate::error::Result;
use crate::extract::{discover_months, extract_option_rows};
use crate::gex::{GexCalculator, GexProfile, GexRecord, MarketParams, compute_records};
use crate::selection::{ChoiceReader, MonthChoice, prompt_for_month};
use crate::workbook::{Grid, load_grid};

/// Result of the extract stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOutcome {
    /// Month that was extracted.
    pub month: String,
    /// Rows written to the intermediate artifact.
    pub rows: usize,
    /// Intermediate artifact path.
    pub path: PathBuf,
}

/// Result of the compute stage.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputeOutcome {
    /// Per-row exposure, in input order.
    pub records: Vec<GexRecord>,
    /// Aggregated profile.
    pub profile: GexProfile,
}

/// Both stage results of a full run.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowOutcome {
    /// Extract stage result.
    pub extract: ExtractOutcome,
    /// Compute stage result.
    pub compute: ComputeOutcome,
}

fn load_input(config: &Config) -> Result<Grid> {
    tracing::info!(path = %config.input.path.display(), "Reading workbook");
    load_grid(&config.input.path)
}

/// Months listed in the workbook's first table.
pub fn list_months(config: &Config) -> Result<Vec<String>> {
    let grid = load_input(config)?;
    discover_months(&grid, &config.columns)
}

/// Extract one month's Calls/Puts rows to the intermediate artifact.
///
/// `choice` selects the month non-interactively; otherwise the user is
/// prompted through `reader`.
pub fn extract_step(
    config: &Config,
    choice: Option<&MonthChoice>,
    reader: &mut impl ChoiceReader,
) -> Result<ExtractOutcome> {
    let grid = load_input(config)?;
    let months = discover_months(&grid, &config.columns)?;

    let month = match choice {
        Some(choice) => choice.resolve(&months)?,
        None => prompt_for_month(&months, reader)?,
    };
    tracing::info!(month = %month, "Selected month");

    let records = extract_option_rows(&grid, &month, &config.columns)?;
    let path = config.output.data_path();
    write_option_records(&path, &records)?;

    Ok(ExtractOutcome {
        month,
        rows: records.len(),
        path,
    })
}

/// Compute exposure from the intermediate artifact and write the outputs.
///
/// `month` is recorded in the profile artifact when known.
pub fn compute_step(config: &Config, month: Option<&str>) -> Result<ComputeOutcome> {
    let market = &config.market;
    if market.time_to_expiry_years <= 0.0 {
        tracing::warn!(
            time_to_expiry_years = market.time_to_expiry_years,
            "Non-positive time to expiry; every gamma is zero"
        );
    }

    let rows = read_option_records(&config.output.data_path())?;
    let calculator = GexCalculator::new(MarketParams::from(market));
    let records = compute_records(&rows, &calculator, config.parsing.malformed_cells)?;
    let profile = GexProfile::from_records(&records);

    write_gex_rows(&config.output.gex_path(), &records)?;
    write_profile(&config.output.profile_path(), month, market, &profile)?;
    write_chart(&config.output.chart_path(), &profile, market.spot)?;

    tracing::info!(
        strikes = profile.strikes.len(),
        total_gex = profile.total_gex,
        "Compute stage complete"
    );
    Ok(ComputeOutcome { records, profile })
}

/// Extract then compute.
pub fn run_workflow(
    config: &Config,
    choice: Option<&MonthChoice>,
    reader: &mut impl ChoiceReader,
) -> Result<WorkflowOutcome> {
    tracing::info!("Step 1: extracting options data");
    let extract = extract_step(config, choice, reader)?;

    tracing::info!("Step 2: calculating gamma exposure");
    let compute = compute_step(config, Some(&extract.month))?;

    Ok(WorkflowOutcome { extract, compute })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GexError;
    use crate::selection::LineChoiceReader;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    const CHAIN: &str = "\
Month,Volume
MAR 26,100
JUN 26,20
TOTALS,120
MAR 26 Calls,
Strike,At Close
\"25,600\",12
TOTALS,12
MAR 26 Puts,
Strike,At Close
No month data for this option type,
JUN 26 Calls,
Strike,At Close
26000,3
";

    fn config_in(dir: &TempDir) -> Config {
        let input = dir.path().join("chain.csv");
        fs::write(&input, CHAIN).unwrap();
        let mut config = Config::default();
        config.input.path = input;
        config.output.directory = dir.path().join("out");
        config
    }

    fn no_input() -> LineChoiceReader<Cursor<&'static [u8]>, Vec<u8>> {
        LineChoiceReader::new(Cursor::new(&b""[..]), Vec::new())
    }

    #[test]
    fn test_list_months() {
        let dir = TempDir::new().unwrap();
        let months = list_months(&config_in(&dir)).unwrap();
        assert_eq!(months, vec!["MAR 26".to_string(), "JUN 26".to_string()]);
    }

    #[test]
    fn test_extract_step_with_choice() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let outcome =
            extract_step(&config, Some(&MonthChoice::Index(1)), &mut no_input()).unwrap();
        assert_eq!(outcome.month, "MAR 26");
        assert_eq!(outcome.rows, 1);
        assert!(outcome.path.exists());
    }

    #[test]
    fn test_extract_step_prompts_without_choice() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let mut reader = LineChoiceReader::new(Cursor::new(&b"2\n"[..]), Vec::new());
        let outcome = extract_step(&config, None, &mut reader).unwrap();
        assert_eq!(outcome.month, "JUN 26");
    }

    #[test]
    fn test_missing_workbook_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.input.path = dir.path().join("missing.xls");

        let err = extract_step(&config, Some(&MonthChoice::Index(1)), &mut no_input()).unwrap_err();
        assert!(matches!(err, GexError::SourceNotFound { .. }));
        assert!(!config.output.data_path().exists());
    }

    #[test]
    fn test_compute_without_extract_is_source_not_found() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let err = compute_step(&config, None).unwrap_err();
        assert!(matches!(err, GexError::SourceNotFound { hint: Some(_), .. }));
        assert!(!config.output.gex_path().exists());
    }

    #[test]
    fn test_run_workflow_writes_all_artifacts() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let choice = MonthChoice::Label("MAR 26".to_string());
        let outcome = run_workflow(&config, Some(&choice), &mut no_input()).unwrap();

        assert_eq!(outcome.extract.month, "MAR 26");
        assert_eq!(outcome.compute.records.len(), 1);
        assert!(outcome.compute.profile.total_gex > 0.0);
        for path in [
            config.output.data_path(),
            config.output.gex_path(),
            config.output.profile_path(),
            config.output.chart_path(),
        ] {
            assert!(path.exists(), "{} missing", path.display());
        }
    }
}
