// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_collect,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! GEX Engine - Options Chain Gamma Exposure
//!
//! Reads a broker-exported options-chain workbook whose first sheet stacks
//! many tables, extracts one month's Calls and Puts tables, and turns them
//! into a signed gamma exposure profile across strikes.
//!
//! # Stages
//!
//! - **Extract**: `workbook` loads the sheet as an untyped grid, `extract`
//!   segments it, discovers months, locates the month's tables and projects
//!   Strike/OI. The result is persisted by `artifact` as `data.csv`.
//! - **Compute**: `gex` prices every row with Black-Scholes gamma and
//!   aggregates by strike; `report` and `chart` present the result.
//!
//! `pipeline` wires the stages together; `selection` handles the month
//! choice; `config` and `telemetry` are the ambient layers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod artifact;
pub mod chart;
pub mod config;
pub mod error;
pub mod extract;
pub mod gex;
pub mod numeric;
pub mod pipeline;
pub mod report;
pub mod selection;
pub mod telemetry;
pub mod workbook;

// =============================================================================
// Re-exports
// =============================================================================

pub use artifact::{GexRow, OptionRecord};
pub use config::{Config, ConfigError, load_config, load_config_or_default};
pub use error::{GexError, Result};
pub use extract::{Side, discover_months, extract_option_rows, segment_table};
pub use gex::{GexCalculator, GexProfile, GexRecord, MarketParams, OptionType, StrikeAggregate};
pub use numeric::{MalformedCellPolicy, parse_lenient};
pub use pipeline::{compute_step, extract_step, list_months, run_workflow};
pub use selection::{ChoiceReader, LineChoiceReader, MonthChoice};
pub use workbook::{Cell, Grid, load_grid};
