#![allow(dead_code)]

use chrono::{Duration, NaiveDate, Utc};
use std::cell::Cell;
use stocklens::domain::error::StocklensError;
pub use stocklens::domain::quote::QuoteBar;
use stocklens::ports::chart_port::{ChartPort, ChartView};
use stocklens::ports::quote_port::QuotePort;

pub struct MockQuotePort {
    pub bars: Vec<QuoteBar>,
    pub error: Option<String>,
}

impl MockQuotePort {
    pub fn empty() -> Self {
        Self {
            bars: Vec::new(),
            error: None,
        }
    }

    pub fn with_bars(bars: Vec<QuoteBar>) -> Self {
        Self { bars, error: None }
    }

    pub fn with_error(reason: &str) -> Self {
        Self {
            bars: Vec::new(),
            error: Some(reason.to_string()),
        }
    }
}

impl QuotePort for MockQuotePort {
    fn fetch_daily(
        &self,
        _ticker: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<QuoteBar>, StocklensError> {
        if let Some(reason) = &self.error {
            return Err(StocklensError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.bars.clone())
    }
}

/// Chart port that counts renders instead of drawing anything.
pub struct RecordingChartPort {
    pub renders: Cell<usize>,
}

impl RecordingChartPort {
    pub fn new() -> Self {
        Self {
            renders: Cell::new(0),
        }
    }
}

impl ChartPort for RecordingChartPort {
    fn render(&self, _view: &ChartView<'_>) -> Result<String, StocklensError> {
        self.renders.set(self.renders.get() + 1);
        Ok("<svg>mock</svg>".to_string())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_bar(day: NaiveDate, close: f64) -> QuoteBar {
    QuoteBar {
        date: day,
        open: close - 1.0,
        high: close + 1.0,
        low: close - 2.0,
        close,
        volume: 1000,
    }
}

/// `count` daily bars ending today, closes climbing from `start_price`.
pub fn generate_recent_bars(count: usize, start_price: f64) -> Vec<QuoteBar> {
    let today = Utc::now().date_naive();
    (0..count)
        .map(|i| {
            let day = today - Duration::days((count - 1 - i) as i64);
            make_bar(day, start_price + i as f64)
        })
        .collect()
}
