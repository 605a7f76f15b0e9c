//! Market context for the gamma calculation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Market parameters supplied by the caller.
///
/// The two dates are informational only: time to expiry is configured
/// directly and never derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Valuation date (reported, not used in the calculation).
    #[serde(default = "default_valuation_date")]
    pub valuation_date: NaiveDate,
    /// Expiration date (reported, not used in the calculation).
    #[serde(default = "default_expiration_date")]
    pub expiration_date: NaiveDate,
    /// Spot price of the underlying.
    #[serde(default = "default_spot")]
    pub spot: f64,
    /// Implied volatility (annualized, decimal).
    #[serde(default = "default_implied_volatility")]
    pub implied_volatility: f64,
    /// Contract multiplier.
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    /// Time to expiration in years.
    #[serde(default = "default_time_to_expiry")]
    pub time_to_expiry_years: f64,
    /// Risk-free rate (annualized).
    #[serde(default)]
    pub risk_free_rate: f64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            valuation_date: default_valuation_date(),
            expiration_date: default_expiration_date(),
            spot: default_spot(),
            implied_volatility: default_implied_volatility(),
            multiplier: default_multiplier(),
            time_to_expiry_years: default_time_to_expiry(),
            risk_free_rate: 0.0,
        }
    }
}

fn default_valuation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 5).unwrap_or_default()
}

fn default_expiration_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 20).unwrap_or_default()
}

const fn default_spot() -> f64 {
    25600.0
}

const fn default_implied_volatility() -> f64 {
    0.1767
}

const fn default_multiplier() -> f64 {
    20.0
}

const fn default_time_to_expiry() -> f64 {
    0.202_739_726
}
