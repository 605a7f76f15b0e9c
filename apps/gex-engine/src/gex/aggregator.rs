//! Per-strike aggregation of signed exposure.

use serde::{Deserialize, Serialize};

use super::OptionType;

/// One option row with its computed exposure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GexRecord {
    /// Call or put.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: f64,
    /// Open-interest value.
    pub open_interest: f64,
    /// Signed gamma exposure.
    pub gex: f64,
}

/// Net and running exposure at one strike.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrikeAggregate {
    /// Strike price.
    pub strike: f64,
    /// Sum of signed exposure at this strike.
    pub net_gex: f64,
    /// Prefix sum of `net_gex` over ascending strikes.
    pub cumulative_gex: f64,
}

/// Exposure profile across strikes plus run totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GexProfile {
    /// Aggregates in ascending strike order.
    pub strikes: Vec<StrikeAggregate>,
    /// Sum of every record's signed exposure.
    pub total_gex: f64,
    /// Sum over call records.
    pub call_gex: f64,
    /// Sum over put records.
    pub put_gex: f64,
}

impl GexProfile {
    /// Group records by exact strike, sort ascending, and accumulate.
    #[must_use]
    pub fn from_records(records: &[GexRecord]) -> Self {
        let mut sorted: Vec<(f64, f64)> = records.iter().map(|r| (r.strike, r.gex)).collect();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut strikes: Vec<StrikeAggregate> = Vec::new();
        for (strike, gex) in sorted {
            match strikes.last_mut() {
                Some(last) if last.strike == strike => last.net_gex += gex,
                _ => strikes.push(StrikeAggregate {
                    strike,
                    net_gex: gex,
                    cumulative_gex: 0.0,
                }),
            }
        }

        let mut running = 0.0;
        for aggregate in &mut strikes {
            running += aggregate.net_gex;
            aggregate.cumulative_gex = running;
        }

        let side_total = |side: OptionType| -> f64 {
            records
                .iter()
                .filter(|r| r.option_type == side)
                .map(|r| r.gex)
                .sum()
        };

        Self {
            strikes,
            total_gex: records.iter().map(|r| r.gex).sum(),
            call_gex: side_total(OptionType::Call),
            put_gex: side_total(OptionType::Put),
        }
    }

    /// `(strike, net_gex)` pairs for the bar series.
    #[must_use]
    pub fn net_series(&self) -> Vec<(f64, f64)> {
        self.strikes.iter().map(|a| (a.strike, a.net_gex)).collect()
    }

    /// `(strike, cumulative_gex)` pairs for the running series.
    #[must_use]
    pub fn cumulative_series(&self) -> Vec<(f64, f64)> {
        self.strikes
            .iter()
            .map(|a| (a.strike, a.cumulative_gex))
            .collect()
    }

    /// True when no records were aggregated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strikes.is_empty()
    }
}
