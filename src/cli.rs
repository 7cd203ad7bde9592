//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::core::{Config, FetchError, Interval, QuoteClient};
use crate::dashboard::{ChartMode, DashboardView, render_text};

#[derive(Parser, Debug)]
#[command(name = "intraday-dash", about = "Intraday stock quote dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch and display intraday data for a symbol
    Show {
        /// Ticker symbol (case-insensitive)
        #[arg(default_value = "AAPL")]
        symbol: String,
        /// Sampling interval: 1min, 5min, 15min, 30min, 60min
        #[arg(short, long)]
        interval: Option<Interval>,
        /// Chart mode: candlestick or line
        #[arg(short, long, default_value_t = ChartMode::Candlestick)]
        chart: ChartMode,
        /// Hide the volume overlay
        #[arg(long)]
        no_volume: bool,
        /// Print the dashboard view as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the configured default symbols
    Symbols,
}

pub async fn run(cli: Cli) -> ExitCode {
    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    match cli.command {
        Command::Show {
            symbol,
            interval,
            chart,
            no_volume,
            json,
        } => {
            let interval = interval.unwrap_or(cfg.default_interval);
            run_show(&cfg, &symbol, interval, chart, !no_volume, json).await
        }
        Command::Symbols => {
            for s in &cfg.default_symbols {
                println!("{s}");
            }
            ExitCode::SUCCESS
        }
    }
}

async fn run_show(
    cfg: &Config,
    symbol: &str,
    interval: Interval,
    chart: ChartMode,
    show_volume: bool,
    json: bool,
) -> ExitCode {
    let client = match QuoteClient::from_config(cfg) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let series = match client.intraday(symbol, interval).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", user_message(symbol, &e));
            return ExitCode::FAILURE;
        }
    };

    if series.is_empty() {
        eprintln!(
            "No data could be retrieved for '{}'. Check the symbol or try again later.",
            series.symbol()
        );
        return ExitCode::FAILURE;
    }

    let view = DashboardView::build(&series, chart, show_volume);
    if json {
        match serde_json::to_string_pretty(&view) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("error: failed to encode view: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", render_text(&view));
    }
    ExitCode::SUCCESS
}

/// Human-readable explanation of a failed fetch.
pub fn user_message(symbol: &str, err: &FetchError) -> String {
    match err {
        FetchError::Provider(msg) => format!("Provider error for '{symbol}': {msg}"),
        FetchError::RateLimited(msg) => format!(
            "Provider note: {msg} You might be hitting rate limits. Please wait a minute and try again."
        ),
        FetchError::UnexpectedResponse(raw) => {
            format!("Could not fetch data for '{symbol}'. Raw response: {raw}")
        }
        FetchError::Network(e) => format!("Network or API request error: {e}"),
        other => format!("Could not fetch data for '{symbol}': {other}"),
    }
}
