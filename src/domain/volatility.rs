//! Volatile trading day detection.
//!
//! A day is volatile when its intraday range, (high - low) / close * 100,
//! strictly exceeds the threshold percentage.

use crate::domain::quote::QuoteBar;

#[derive(Debug, Clone, PartialEq)]
pub struct VolatileDay {
    pub bar: QuoteBar,
    pub price_diff: f64,
    pub range_pct: f64,
}

pub fn find_volatile_days(bars: &[QuoteBar], threshold_pct: f64) -> Vec<VolatileDay> {
    bars.iter()
        .filter(|bar| bar.range_pct() > threshold_pct)
        .map(|bar| VolatileDay {
            bar: bar.clone(),
            price_diff: bar.price_range(),
            range_pct: bar.range_pct(),
        })
        .collect()
}
