//! Persisted hand-off artifacts.
//!
//! | File               | Columns                       |
//! |--------------------|-------------------------------|
//! | `data.csv`         | `OptionType,Strike,OI`        |
//! | `gex_data.csv`     | `OptionType,Strike,OI,GEX`    |
//! | `gex_profile.json` | market context + profile      |
//!
//! The intermediate artifact carries cell text exactly as extracted so it
//! can be inspected and edited by hand before the compute stage.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::MarketConfig;
use crate::error::{GexError, Result};
use crate::gex::{GexProfile, GexRecord, OptionType};

/// Hint attached to a missing intermediate artifact.
pub const MISSING_DATA_HINT: &str = "run the extract step first";

/// One row of the intermediate artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRecord {
    /// Call or put.
    #[serde(rename = "OptionType")]
    pub option_type: OptionType,
    /// Strike text as extracted.
    #[serde(rename = "Strike")]
    pub strike: String,
    /// Open-interest text as extracted.
    #[serde(rename = "OI")]
    pub open_interest: String,
}

/// One row of the final artifact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GexRow {
    /// Call or put.
    #[serde(rename = "OptionType")]
    pub option_type: OptionType,
    /// Strike price.
    #[serde(rename = "Strike")]
    pub strike: f64,
    /// Open-interest value.
    #[serde(rename = "OI")]
    pub open_interest: f64,
    /// Signed gamma exposure.
    #[serde(rename = "GEX")]
    pub gex: f64,
}

impl From<&GexRecord> for GexRow {
    fn from(record: &GexRecord) -> Self {
        Self {
            option_type: record.option_type,
            strike: record.strike,
            open_interest: record.open_interest,
            gex: record.gex,
        }
    }
}

#[derive(Serialize)]
struct ProfileDocument<'a> {
    month: Option<&'a str>,
    market: &'a MarketConfig,
    #[serde(flatten)]
    profile: &'a GexProfile,
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(fs::create_dir_all(parent)?),
        _ => Ok(()),
    }
}

/// Write `header` then one serialized row per item.
///
/// Headers are written explicitly so an empty table still yields a readable
/// file.
fn write_table<T: Serialize>(
    path: &Path,
    header: &[&str],
    rows: impl IntoIterator<Item = T>,
) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the intermediate artifact.
pub fn write_option_records(path: &Path, records: &[OptionRecord]) -> Result<()> {
    write_table(path, &["OptionType", "Strike", "OI"], records)?;
    tracing::info!(path = %path.display(), rows = records.len(), "Wrote intermediate artifact");
    Ok(())
}

/// Read the intermediate artifact.
///
/// A missing file is [`GexError::SourceNotFound`] with a hint to extract
/// first.
pub fn read_option_records(path: &Path) -> Result<Vec<OptionRecord>> {
    if !path.exists() {
        return Err(GexError::SourceNotFound {
            path: path.to_path_buf(),
            hint: Some(MISSING_DATA_HINT.to_string()),
        });
    }

    let mut reader = csv::Reader::from_path(path)?;
    let records = reader
        .deserialize()
        .collect::<std::result::Result<Vec<OptionRecord>, _>>()?;
    tracing::debug!(path = %path.display(), rows = records.len(), "Read intermediate artifact");
    Ok(records)
}

/// Write the final artifact in input order.
pub fn write_gex_rows(path: &Path, records: &[GexRecord]) -> Result<()> {
    write_table(
        path,
        &["OptionType", "Strike", "OI", "GEX"],
        records.iter().map(GexRow::from),
    )?;
    tracing::info!(path = %path.display(), rows = records.len(), "Wrote GEX artifact");
    Ok(())
}

/// Write the profile with its market context as pretty JSON.
pub fn write_profile(
    path: &Path,
    month: Option<&str>,
    market: &MarketConfig,
    profile: &GexProfile,
) -> Result<()> {
    ensure_parent(path)?;
    let document = ProfileDocument {
        month,
        market,
        profile,
    };
    let json = serde_json::to_string_pretty(&document)?;
    fs::write(path, json)?;
    tracing::info!(path = %path.display(), strikes = profile.strikes.len(), "Wrote profile");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn option_record(option_type: OptionType, strike: &str, oi: &str) -> OptionRecord {
        OptionRecord {
            option_type,
            strike: strike.to_string(),
            open_interest: oi.to_string(),
        }
    }

    #[test]
    fn test_intermediate_artifact_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        let records = vec![
            option_record(OptionType::Call, "25,600", "1,204"),
            option_record(OptionType::Put, "25500", "7"),
        ];
        write_option_records(&path, &records).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("OptionType,Strike,OI"));
        assert_eq!(lines.next(), Some("Call,\"25,600\",\"1,204\""));
        assert_eq!(lines.next(), Some("Put,25500,7"));

        assert_eq!(read_option_records(&path).unwrap(), records);
    }

    #[test]
    fn test_hand_edited_artifact_is_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "OptionType,Strike,OI\nPut,100,5\nCall,110,\n").unwrap();

        let records = read_option_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].open_interest, "");
    }

    #[test]
    fn test_unknown_option_type_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "OptionType,Strike,OI\nStraddle,100,5\n").unwrap();
        assert!(matches!(read_option_records(&path), Err(GexError::Csv(_))));
    }

    #[test]
    fn test_missing_intermediate_artifact_has_hint() {
        let dir = TempDir::new().unwrap();
        let err = read_option_records(&dir.path().join("data.csv")).unwrap_err();
        assert!(matches!(err, GexError::SourceNotFound { hint: Some(_), .. }));
        assert!(err.to_string().contains(MISSING_DATA_HINT));
    }

    #[test]
    fn test_writer_emits_header_without_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("data.csv");
        write_option_records(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "OptionType,Strike,OI\n");
        assert!(read_option_records(&path).unwrap().is_empty());
    }

    #[test]
    fn test_gex_rows_and_profile() {
        let dir = TempDir::new().unwrap();
        let records = [
            GexRecord {
                option_type: OptionType::Call,
                strike: 100.0,
                open_interest: 10.0,
                gex: 2.5,
            },
            GexRecord {
                option_type: OptionType::Put,
                strike: 100.0,
                open_interest: 5.0,
                gex: -1.0,
            },
        ];

        let gex_path = dir.path().join("gex_data.csv");
        write_gex_rows(&gex_path, &records).unwrap();
        let text = fs::read_to_string(&gex_path).unwrap();
        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            vec!["OptionType,Strike,OI,GEX", "Call,100.0,10.0,2.5", "Put,100.0,5.0,-1.0"]
        );

        let profile = GexProfile::from_records(&records);
        let profile_path = dir.path().join("gex_profile.json");
        write_profile(&profile_path, Some("JUN 26"), &MarketConfig::default(), &profile).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&profile_path).unwrap()).unwrap();
        assert_eq!(json["month"], "JUN 26");
        assert_eq!(json["market"]["valuation_date"], "2026-01-05");
        assert_eq!(json["strikes"][0]["net_gex"], 1.5);
        assert_eq!(json["call_gex"], 2.5);
        assert_eq!(json["put_gex"], -1.0);
    }
}
