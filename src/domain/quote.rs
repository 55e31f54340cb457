//! Daily OHLCV bar for a single ticker.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl QuoteBar {
    /// high - low
    pub fn price_range(&self) -> f64 {
        self.high - self.low
    }

    /// (high - low) / close * 100
    pub fn range_pct(&self) -> f64 {
        self.price_range() / self.close * 100.0
    }
}
