//! Chart rendering port trait.

use crate::domain::error::StocklensError;
use crate::domain::quote::QuoteBar;
use crate::domain::sma::SmaPoint;
use crate::domain::trend::ForecastPoint;
use crate::domain::volatility::VolatileDay;

/// Everything one rendered chart needs.
pub struct ChartView<'a> {
    pub ticker: &'a str,
    pub bars: &'a [QuoteBar],
    pub sma: &'a [SmaPoint],
    pub sma_window: usize,
    pub volatile_days: &'a [VolatileDay],
    pub forecast: &'a [ForecastPoint],
}

pub trait ChartPort {
    /// Render the chart to an in-memory document. Persisting the result is
    /// the caller's concern; rendering must not require a display.
    fn render(&self, view: &ChartView<'_>) -> Result<String, StocklensError>;
}
