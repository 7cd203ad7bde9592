use std::fmt::Write as _;

use super::{DashboardView, PriceTrace};

const TS_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// `$1234.50`
pub fn format_price(v: f64) -> String {
    format!("${v:.2}")
}

/// Thousands-separated whole shares, e.g. `1,234,567`.
pub fn format_volume(shares: u64) -> String {
    let digits = shares.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Plain-text rendering: metrics block, chart description, preview table.
pub fn render_text(view: &DashboardView) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_view(&mut out, view);
    out
}

fn write_view(out: &mut String, view: &DashboardView) -> std::fmt::Result {
    writeln!(out, "{} intraday ({})", view.symbol, view.interval)?;
    writeln!(out)?;

    match &view.summary {
        Some(s) => {
            writeln!(out, "Latest bar {}", s.ts.format(TS_FMT))?;
            writeln!(
                out,
                "  Open {}  High {}  Low {}  Close {}  Volume {}",
                format_price(s.open),
                format_price(s.high),
                format_price(s.low),
                format_price(s.close),
                format_volume(s.volume)
            )?;
        }
        None => {
            writeln!(out, "No data.")?;
            return Ok(());
        }
    }
    writeln!(out)?;

    let kind = match view.chart.price {
        PriceTrace::Candles(_) => "candlestick",
        PriceTrace::Line(_) => "close-price line",
    };
    write!(out, "Chart: {kind}, {} points", view.chart.price.len())?;
    if let Some(vol) = &view.chart.volume {
        let peak = vol.iter().map(|b| b.shares).max().unwrap_or(0);
        write!(out, ", volume overlay (peak {})", format_volume(peak))?;
    }
    writeln!(out)?;
    writeln!(out)?;

    writeln!(out, "Last {} rows", view.preview.len())?;
    writeln!(
        out,
        "{:<19}  {:>10}  {:>10}  {:>10}  {:>10}  {:>12}",
        "time", "open", "high", "low", "close", "volume"
    )?;
    for r in &view.preview {
        writeln!(
            out,
            "{:<19}  {:>10.4}  {:>10.4}  {:>10.4}  {:>10.4}  {:>12}",
            r.ts.format(TS_FMT).to_string(),
            r.open,
            r.high,
            r.low,
            r.close,
            format_volume(r.volume_shares())
        )?;
    }
    Ok(())
}
