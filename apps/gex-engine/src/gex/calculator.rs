//! Black-Scholes gamma and signed gamma exposure.
//!
//! GEX is normalized to a 1% move in spot:
//!
//! ```text
//! gex = gamma × OI × S × 0.01 × multiplier      (negated for puts)
//! ```
//!
//! Inputs are not guarded: a non-positive spot, strike or volatility
//! propagates as a non-finite result, which is the caller's responsibility.

// Black-Scholes uses standard mathematical notation (s, k, t, r, sigma)
// Financial formulas use standard notation where mul_add() obscures meaning
#![allow(clippy::many_single_char_names)]
#![allow(clippy::suboptimal_flops)]

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::config::MarketConfig;

use super::OptionType;

/// Fraction of spot used to normalize exposure (a 1% move).
pub const SPOT_MOVE_FRACTION: f64 = 0.01;

// ============================================================================
// Market Context
// ============================================================================

/// Immutable market context for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketParams {
    /// Spot price of the underlying.
    pub spot: f64,
    /// Implied volatility (annualized, decimal).
    pub implied_volatility: f64,
    /// Contract multiplier.
    pub multiplier: f64,
    /// Time to expiration in years.
    pub time_to_expiry: f64,
    /// Risk-free rate (annualized).
    pub risk_free_rate: f64,
}

impl From<&MarketConfig> for MarketParams {
    fn from(config: &MarketConfig) -> Self {
        Self {
            spot: config.spot,
            implied_volatility: config.implied_volatility,
            multiplier: config.multiplier,
            time_to_expiry: config.time_to_expiry_years,
            risk_free_rate: config.risk_free_rate,
        }
    }
}

// ============================================================================
// Black-Scholes Helpers
// ============================================================================

/// Standard normal PDF (probability density function).
#[must_use]
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Black-Scholes d1 parameter.
#[must_use]
pub fn d1(s: f64, k: f64, t: f64, r: f64, sigma: f64) -> f64 {
    ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / (sigma * t.sqrt())
}

/// Black-Scholes gamma (same for calls and puts). Zero once expired.
#[must_use]
pub fn gamma(s: f64, k: f64, t: f64, r: f64, sigma: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    norm_pdf(d1(s, k, t, r, sigma)) / (s * sigma * t.sqrt())
}

// ============================================================================
// Calculator
// ============================================================================

/// Signed GEX per option row under a fixed market context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GexCalculator {
    params: MarketParams,
}

impl GexCalculator {
    /// Create a calculator over `params`.
    #[must_use]
    pub const fn new(params: MarketParams) -> Self {
        Self { params }
    }

    /// Market context in use.
    #[must_use]
    pub const fn params(&self) -> &MarketParams {
        &self.params
    }

    /// Gamma at `strike`.
    #[must_use]
    pub fn gamma(&self, strike: f64) -> f64 {
        let p = &self.params;
        gamma(
            p.spot,
            strike,
            p.time_to_expiry,
            p.risk_free_rate,
            p.implied_volatility,
        )
    }

    /// Signed exposure of `open_interest` contracts at `strike`.
    ///
    /// Zero open interest returns 0 without evaluating gamma.
    #[must_use]
    pub fn exposure(&self, strike: f64, open_interest: f64, option_type: OptionType) -> f64 {
        if open_interest == 0.0 {
            return 0.0;
        }

        let p = &self.params;
        let gex = self.gamma(strike) * open_interest * p.spot * SPOT_MOVE_FRACTION * p.multiplier;

        match option_type {
            OptionType::Call => gex,
            OptionType::Put => -gex,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    fn unit_params() -> MarketParams {
        MarketParams {
            spot: 100.0,
            implied_volatility: 0.2,
            multiplier: 1.0,
            time_to_expiry: 1.0,
            risk_free_rate: 0.0,
        }
    }

    #[test]
    fn test_norm_pdf() {
        assert!(approx_eq(norm_pdf(0.0), 0.398_942_3, 1e-6));
        assert!(approx_eq(norm_pdf(1.0), norm_pdf(-1.0), 1e-15));
    }

    #[test]
    fn test_d1_atm() {
        // S=K, r=0, sigma=0.2, T=1: d1 = 0.5 * 0.04 / 0.2 = 0.1
        assert!(approx_eq(d1(100.0, 100.0, 1.0, 0.0, 0.2), 0.1, 1e-12));
    }

    #[test]
    fn test_gamma_reference_value() {
        // phi(0.1) / (100 * 0.2 * 1) = 0.396953 / 20
        let g = gamma(100.0, 100.0, 1.0, 0.0, 0.2);
        assert!(approx_eq(g, 0.019_847, 1e-6), "gamma = {g}");
    }

    #[test]
    fn test_gamma_zero_when_expired() {
        assert!(gamma(100.0, 100.0, 0.0, 0.0, 0.2).abs() < f64::EPSILON);
        assert!(gamma(100.0, 100.0, -0.5, 0.0, 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_gamma_peaks_near_the_money() {
        let atm = gamma(100.0, 100.0, 1.0, 0.0, 0.2);
        let otm = gamma(100.0, 150.0, 1.0, 0.0, 0.2);
        let itm = gamma(100.0, 60.0, 1.0, 0.0, 0.2);
        assert!(atm > otm);
        assert!(atm > itm);
    }

    #[test]
    fn test_call_exposure() {
        let calc = GexCalculator::new(unit_params());
        let gex = calc.exposure(100.0, 10.0, OptionType::Call);
        assert!(approx_eq(gex, 0.198_47, 1e-5), "gex = {gex}");
    }

    #[test]
    fn test_put_is_negated_call() {
        let calc = GexCalculator::new(unit_params());
        for strike in [80.0, 100.0, 125.5] {
            let call = calc.exposure(strike, 7.0, OptionType::Call);
            let put = calc.exposure(strike, 7.0, OptionType::Put);
            assert!(call > 0.0);
            assert!(approx_eq(put, -call, 1e-15));
        }
    }

    #[test]
    fn test_zero_open_interest_short_circuits() {
        let calc = GexCalculator::new(MarketParams {
            time_to_expiry: 0.0,
            implied_volatility: 0.0,
            ..unit_params()
        });
        assert!(calc.exposure(100.0, 0.0, OptionType::Call).abs() < f64::EPSILON);
        assert!(calc.exposure(0.0, 0.0, OptionType::Put).abs() < f64::EPSILON);
    }

    #[test]
    fn test_exposure_scales_with_multiplier() {
        let base = GexCalculator::new(unit_params()).exposure(100.0, 3.0, OptionType::Call);
        let scaled = GexCalculator::new(MarketParams {
            multiplier: 20.0,
            ..unit_params()
        })
        .exposure(100.0, 3.0, OptionType::Call);
        assert!(approx_eq(scaled, base * 20.0, 1e-12));
    }

    #[test]
    fn test_params_from_market_config() {
        let config = MarketConfig::default();
        let params = MarketParams::from(&config);
        assert!((params.spot - 25600.0).abs() < f64::EPSILON);
        assert!((params.time_to_expiry - 0.202_739_726).abs() < f64::EPSILON);
    }
}
