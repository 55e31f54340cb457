//! Yahoo Finance chart API adapter.
//!
//! Queries the v8 chart endpoint for daily bars. The payload carries one
//! timestamp array plus per-field arrays of nullable values; any row with a
//! missing field is dropped. A transport failure, non-success status,
//! API-level error object or empty result all surface as an empty series so
//! the caller treats them as "no quotes available".

use crate::domain::error::StocklensError;
use crate::domain::quote::QuoteBar;
use crate::ports::quote_port::QuotePort;
use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const USER_AGENT: &str = concat!("stocklens/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct YahooQuoteAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooQuoteAdapter {
    pub fn new() -> Result<Self, StocklensError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Base URL override, used by tests to point at a local fixture server.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, StocklensError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StocklensError::Fetch {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn chart_url(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> String {
        let period1 = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let period2 = end.and_time(NaiveTime::MIN).and_utc().timestamp();
        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d",
            self.base_url, ticker, period1, period2
        )
    }
}

impl QuotePort for YahooQuoteAdapter {
    fn fetch_daily(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<QuoteBar>, StocklensError> {
        let url = self.chart_url(ticker, start, end);

        let response = match self.client.get(&url).send() {
            Ok(r) => r,
            Err(e) => {
                eprintln!("warning: quote request failed: {e}");
                return Ok(Vec::new());
            }
        };

        if !response.status().is_success() {
            eprintln!("warning: quote source returned status {}", response.status());
            return Ok(Vec::new());
        }

        let body = match response.text() {
            Ok(b) => b,
            Err(e) => {
                eprintln!("warning: failed to read quote response: {e}");
                return Ok(Vec::new());
            }
        };

        parse_chart_body(&body)
    }
}

/// Decode a v8 chart payload into bars, dropping rows with missing fields.
pub fn parse_chart_body(body: &str) -> Result<Vec<QuoteBar>, StocklensError> {
    let payload: ChartResponse =
        serde_json::from_str(body).map_err(|e| StocklensError::Data {
            reason: format!("unexpected quote payload: {e}"),
        })?;

    if payload.chart.error.is_some() {
        return Ok(Vec::new());
    }

    let Some(result) = payload
        .chart
        .result
        .and_then(|mut results| (!results.is_empty()).then(|| results.remove(0)))
    else {
        return Ok(Vec::new());
    };

    let Some(timestamps) = result.timestamp else {
        return Ok(Vec::new());
    };
    let Some(quote) = result.indicators.quote.first() else {
        return Ok(Vec::new());
    };

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let Some(date) = DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()) else {
            continue;
        };

        // dropna: every field must be present for the row to survive
        let fields = (
            quote.open.get(i).copied().flatten(),
            quote.high.get(i).copied().flatten(),
            quote.low.get(i).copied().flatten(),
            quote.close.get(i).copied().flatten(),
            quote.volume.get(i).copied().flatten(),
        );
        let (Some(open), Some(high), Some(low), Some(close), Some(volume)) = fields else {
            continue;
        };

        bars.push(QuoteBar {
            date,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    // one bar per trading date, strictly increasing
    bars.sort_by_key(|b| b.date);
    bars.dedup_by_key(|b| b.date);

    Ok(bars)
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteArrays>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QuoteArrays {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<i64>>,
}
