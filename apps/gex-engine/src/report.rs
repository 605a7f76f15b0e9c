//! Console summary of a compute run.

use std::fmt::Write as _;

use crate::config::MarketConfig;
use crate::gex::GexProfile;

const RULE_WIDTH: usize = 80;

/// Format `value` with `,` thousands separators and `decimals` places.
#[must_use]
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3 + 1);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value.is_sign_negative() && fixed.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };

    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

/// Render the run summary: market context, then signed totals.
#[must_use]
pub fn render_summary(market: &MarketConfig, profile: &GexProfile) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "GEX Analysis");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Valuation Date: {}", market.valuation_date);
    let _ = writeln!(out, "Expiration Date: {}", market.expiration_date);
    let _ = writeln!(out, "Spot: {}", market.spot);
    let _ = writeln!(out, "IV: {}", market.implied_volatility);
    let _ = writeln!(out, "Multiplier: {}", market.multiplier);
    let _ = writeln!(out, "Time to Expiration (Years): {}", market.time_to_expiry_years);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(
        out,
        "\nTotal Signed GEX (sum of all options): {}",
        format_thousands(profile.total_gex, 2)
    );
    let _ = writeln!(out, "Call GEX: {}", format_thousands(profile.call_gex, 2));
    let _ = writeln!(out, "Put GEX: {}", format_thousands(profile.put_gex, 2));
    let _ = writeln!(out, "\n{rule}");
    out
}
