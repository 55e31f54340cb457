//! CLI definition and the analysis pipeline.

use chrono::{Duration, Utc};
use clap::Parser;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvQuoteAdapter;
use crate::adapters::file_config_adapter::{DefaultConfig, FileConfigAdapter};
use crate::adapters::svg_chart::SvgChartAdapter;
use crate::adapters::yahoo_adapter::YahooQuoteAdapter;
use crate::domain::error::StocklensError;
use crate::domain::extremes::{close_extremes, CloseExtremes};
use crate::domain::settings::{build_settings, AnalysisSettings};
use crate::domain::sma::calculate_sma;
use crate::domain::trend::{forecast, TrendModel};
use crate::domain::volatility::find_volatile_days;
use crate::ports::chart_port::{ChartPort, ChartView};
use crate::ports::quote_port::QuotePort;

pub const EXE_START: &str = "\n~~~~~~~~~~ Execution Start ~~~~~~~~~~";
pub const EXE_END: &str = "\n~~~~~~~~~~~ Execution End ~~~~~~~~~~~";

/// Trailing fetch window in calendar days.
pub const LOOKBACK_DAYS: i64 = 180;

const DATE_FORMAT: &str = "%d-%b-%Y";

#[derive(Parser, Debug)]
#[command(name = "stocklens", about = "Daily stock quote analysis and charting")]
pub struct Cli {
    /// Ticker symbol; prompted for interactively when omitted
    pub ticker: Option<String>,

    /// INI file overriding the analysis defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Read quotes from CSV files in this directory instead of the network
    #[arg(long)]
    pub csv_dir: Option<PathBuf>,

    /// Chart output path (default: stock_chart.svg in the working directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// What one run produced, for the caller and for tests.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// The source had no bars for the ticker; nothing further ran.
    NoData,
    Completed(AnalysisReport),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub bars: usize,
    pub extremes: CloseExtremes,
    pub sma_defined: usize,
    pub volatile_days: usize,
    pub forecast_points: usize,
}

pub fn run(cli: Cli) -> ExitCode {
    println!("{EXE_START}");
    let code = run_inner(cli);
    println!("{EXE_END}");
    code
}

fn run_inner(cli: Cli) -> ExitCode {
    let settings = match resolve_settings(cli.config.as_ref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let ticker = match resolve_ticker(cli.ticker.as_deref()) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let quote_port: Box<dyn QuotePort> = match cli.csv_dir {
        Some(dir) => Box::new(CsvQuoteAdapter::new(dir)),
        None => match YahooQuoteAdapter::new() {
            Ok(adapter) => Box::new(adapter),
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        },
    };

    let chart_port = SvgChartAdapter::default();
    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(&settings.chart_file));

    match run_analysis(quote_port.as_ref(), &chart_port, &settings, &ticker, &output) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn resolve_settings(config_path: Option<&PathBuf>) -> Result<AnalysisSettings, StocklensError> {
    match config_path {
        Some(path) => {
            let adapter =
                FileConfigAdapter::from_file(path).map_err(|e| StocklensError::ConfigParse {
                    file: path.display().to_string(),
                    reason: e.to_string(),
                })?;
            build_settings(&adapter)
        }
        None => build_settings(&DefaultConfig),
    }
}

/// Ticker from the command line, or prompted for on stdin; trimmed and
/// upper-cased either way.
pub fn resolve_ticker(arg: Option<&str>) -> Result<String, StocklensError> {
    let raw = match arg {
        Some(t) => t.to_string(),
        None => {
            print!("Enter stock ticker symbol: ");
            io::stdout().flush()?;
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            line
        }
    };

    let ticker = raw.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(StocklensError::Ticker {
            reason: "ticker symbol must not be empty".into(),
        });
    }
    Ok(ticker)
}

/// The whole pipeline: fetch → summarise → model → render → persist.
///
/// An empty fetch result short-circuits after printing the no-quotes
/// message; nothing is computed or written in that case.
pub fn run_analysis(
    quotes: &dyn QuotePort,
    chart: &dyn ChartPort,
    settings: &AnalysisSettings,
    ticker: &str,
    output: &Path,
) -> Result<AnalysisOutcome, StocklensError> {
    let end = Utc::now().date_naive();
    let start = end - Duration::days(LOOKBACK_DAYS);

    eprintln!("\nFetching quotes for stock ticker: {ticker} ...");
    let bars = quotes.fetch_daily(ticker, start, end)?;

    if bars.is_empty() {
        println!("No stock quotes available for ticker: {ticker}");
        return Ok(AnalysisOutcome::NoData);
    }

    let extremes = match close_extremes(&bars) {
        Some(e) => e,
        None => {
            return Err(StocklensError::Data {
                reason: "no closing prices in series".into(),
            });
        }
    };
    println!(
        "Min price: {:.2} on {}",
        extremes.min.close,
        extremes.min.date.format(DATE_FORMAT)
    );
    println!(
        "Max price: {:.2} on {}",
        extremes.max.close,
        extremes.max.date.format(DATE_FORMAT)
    );

    let sma = calculate_sma(&bars, settings.sma_window);
    let volatile_days = find_volatile_days(&bars, settings.volatility_threshold_pct);

    eprintln!("\nFitting trend model for prediction...");
    let last_date = bars[bars.len() - 1].date;
    let forecast_points = match TrendModel::fit(&bars) {
        Some(model) => forecast(&model, last_date, bars.len(), settings.forecast_horizon),
        None => Vec::new(),
    };

    eprintln!("\nPlotting chart for stock ticker: {ticker} ...");
    let view = ChartView {
        ticker,
        bars: &bars,
        sma: &sma,
        sma_window: settings.sma_window,
        volatile_days: &volatile_days,
        forecast: &forecast_points,
    };
    let document = chart.render(&view)?;
    fs::write(output, &document)?;
    eprintln!("Chart written to: {}", output.display());

    Ok(AnalysisOutcome::Completed(AnalysisReport {
        bars: bars.len(),
        extremes,
        sma_defined: sma.iter().filter(|p| p.value.is_some()).count(),
        volatile_days: volatile_days.len(),
        forecast_points: forecast_points.len(),
    }))
}
