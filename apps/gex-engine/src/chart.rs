//! SVG rendering of the two profile series.
//!
//! The top panel draws net exposure per strike as bars (green at or above
//! zero, red below); the bottom panel draws the cumulative series as a line
//! over a filled area. Both panels carry a zero line and a dashed marker at
//! spot.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::gex::GexProfile;

const WIDTH: f64 = 1200.0;
const PANEL_HEIGHT: f64 = 420.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 50.0;

const POSITIVE_COLOR: &str = "green";
const NEGATIVE_COLOR: &str = "red";
const LINE_COLOR: &str = "darkblue";
const SPOT_COLOR: &str = "blue";

/// Linear data-to-pixel mapping for one panel.
#[derive(Debug, Clone, Copy)]
struct Scale {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    top: f64,
}

impl Scale {
    fn new(xs: impl Iterator<Item = f64> + Clone, ys: impl Iterator<Item = f64>, top: f64) -> Self {
        let x_lo = xs.clone().fold(f64::INFINITY, f64::min);
        let x_hi = xs.fold(f64::NEG_INFINITY, f64::max);
        let (x_min, x_max) = padded_bounds(x_lo, x_hi);
        let (y_lo, y_hi) = ys.fold((0.0_f64, 0.0_f64), |(lo, hi), y| (lo.min(y), hi.max(y)));
        let (y_min, y_max) = padded_bounds(y_lo, y_hi);
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
            top,
        }
    }

    fn plot_width() -> f64 {
        WIDTH - MARGIN_LEFT - MARGIN_RIGHT
    }

    fn plot_height() -> f64 {
        PANEL_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
    }

    fn x(&self, value: f64) -> f64 {
        MARGIN_LEFT + (value - self.x_min) / (self.x_max - self.x_min) * Self::plot_width()
    }

    fn y(&self, value: f64) -> f64 {
        self.top + MARGIN_TOP + (self.y_max - value) / (self.y_max - self.y_min) * Self::plot_height()
    }
}

/// Widen a range by 5% each side; a degenerate range gets a unit span.
fn padded_bounds(lo: f64, hi: f64) -> (f64, f64) {
    let span = hi - lo;
    if span.is_finite() && span > 0.0 {
        (lo - span * 0.05, hi + span * 0.05)
    } else {
        let center = if lo.is_finite() { lo } else { 0.0 };
        let half = center.abs().max(1.0) * 0.05;
        (center - half, center + half)
    }
}

/// Pixel width of one bar: 80% of the tightest strike spacing.
fn bar_width(scale: &Scale, strikes: &[f64]) -> f64 {
    let min_gap = strikes
        .windows(2)
        .map(|pair| scale.x(pair[1]) - scale.x(pair[0]))
        .fold(f64::INFINITY, f64::min);
    if min_gap.is_finite() {
        (min_gap * 0.8).max(1.0)
    } else {
        Scale::plot_width() * 0.05
    }
}

fn write_axes(out: &mut String, scale: &Scale, title: &str, y_label: &str) {
    let top = scale.top + MARGIN_TOP;
    let bottom = scale.top + PANEL_HEIGHT - MARGIN_BOTTOM;
    let right = WIDTH - MARGIN_RIGHT;
    let zero = scale.y(0.0);

    let _ = writeln!(
        out,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="16" font-weight="bold">{title}</text>"#,
        WIDTH / 2.0,
        scale.top + MARGIN_TOP / 2.0 + 6.0
    );
    let _ = writeln!(
        out,
        r##"<rect x="{MARGIN_LEFT:.1}" y="{top:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="#cccccc"/>"##,
        Scale::plot_width(),
        Scale::plot_height()
    );
    let _ = writeln!(
        out,
        r#"<line class="zero" x1="{MARGIN_LEFT:.1}" y1="{zero:.2}" x2="{right:.1}" y2="{zero:.2}" stroke="black" stroke-width="0.5"/>"#
    );
    let _ = writeln!(
        out,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="12">Strike Price</text>"#,
        MARGIN_LEFT + Scale::plot_width() / 2.0,
        bottom + 35.0
    );
    let _ = writeln!(
        out,
        r#"<text x="20" y="{mid:.1}" text-anchor="middle" font-size="12" transform="rotate(-90 20 {mid:.1})">{y_label}</text>"#,
        mid = (top + bottom) / 2.0
    );
    for (value, anchor) in [(scale.x_min, "start"), (scale.x_max, "end")] {
        let _ = writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="{anchor}" font-size="10">{value:.0}</text>"#,
            scale.x(value),
            bottom + 15.0
        );
    }
    for value in [scale.y_min, 0.0, scale.y_max] {
        let _ = writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="10">{value:.2}</text>"#,
            MARGIN_LEFT - 6.0,
            scale.y(value) + 3.0
        );
    }
}

fn write_spot_marker(out: &mut String, scale: &Scale, spot: f64) {
    let x = scale.x(spot);
    let top = scale.top + MARGIN_TOP;
    let bottom = scale.top + PANEL_HEIGHT - MARGIN_BOTTOM;
    let _ = writeln!(
        out,
        r#"<line class="spot" x1="{x:.2}" y1="{top:.1}" x2="{x:.2}" y2="{bottom:.1}" stroke="{SPOT_COLOR}" stroke-width="2" stroke-dasharray="8,4"/>"#
    );
    let _ = writeln!(
        out,
        r#"<text x="{:.2}" y="{:.1}" font-size="11" fill="{SPOT_COLOR}">Spot: {spot}</text>"#,
        x + 4.0,
        top + 14.0
    );
}

/// Render both panels as a standalone SVG document.
#[must_use]
pub fn render_svg(profile: &GexProfile, spot: f64) -> String {
    let mut out = String::new();
    let height = PANEL_HEIGHT * 2.0;
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{height}" viewBox="0 0 {WIDTH} {height}" font-family="sans-serif">"#
    );
    let _ = writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#);

    let strikes: Vec<f64> = profile.strikes.iter().map(|a| a.strike).collect();
    let xs = strikes.iter().copied().chain(std::iter::once(spot));

    // Net exposure bars
    let net = profile.net_series();
    let bars = Scale::new(xs.clone(), net.iter().map(|(_, v)| *v), 0.0);
    write_axes(&mut out, &bars, "Signed Gamma Exposure (GEX) by Strike", "Signed GEX");
    let width = bar_width(&bars, &strikes);
    let zero = bars.y(0.0);
    for (strike, value) in &net {
        let y = bars.y(*value);
        let color = if *value >= 0.0 { POSITIVE_COLOR } else { NEGATIVE_COLOR };
        let _ = writeln!(
            out,
            r#"<rect class="bar" x="{:.2}" y="{:.2}" width="{width:.2}" height="{:.2}" fill="{color}" fill-opacity="0.7" stroke="black" stroke-width="0.5"/>"#,
            bars.x(*strike) - width / 2.0,
            y.min(zero),
            (y - zero).abs()
        );
    }
    write_spot_marker(&mut out, &bars, spot);

    // Cumulative exposure
    let cumulative = profile.cumulative_series();
    let running = Scale::new(xs, cumulative.iter().map(|(_, v)| *v), PANEL_HEIGHT);
    write_axes(&mut out, &running, "Cumulative Gamma Exposure by Strike", "Cumulative GEX");
    if let (Some(first), Some(last)) = (cumulative.first(), cumulative.last()) {
        let points: Vec<String> = cumulative
            .iter()
            .map(|(strike, value)| format!("{:.2},{:.2}", running.x(*strike), running.y(*value)))
            .collect();
        let zero = running.y(0.0);
        let _ = writeln!(
            out,
            r#"<polygon class="area" points="{:.2},{zero:.2} {} {:.2},{zero:.2}" fill="{LINE_COLOR}" fill-opacity="0.3"/>"#,
            running.x(first.0),
            points.join(" "),
            running.x(last.0)
        );
        let _ = writeln!(
            out,
            r#"<polyline class="cumulative" points="{}" fill="none" stroke="{LINE_COLOR}" stroke-width="2"/>"#,
            points.join(" ")
        );
        for (strike, value) in &cumulative {
            let _ = writeln!(
                out,
                r#"<circle cx="{:.2}" cy="{:.2}" r="3" fill="{LINE_COLOR}"/>"#,
                running.x(*strike),
                running.y(*value)
            );
        }
    }
    write_spot_marker(&mut out, &running, spot);

    out.push_str("</svg>\n");
    out
}

/// Render and write the chart.
pub fn write_chart(path: &Path, profile: &GexProfile, spot: f64) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_svg(profile, spot))?;
    tracing::info!(path = %path.display(), "Wrote chart");
    Ok(())
}
