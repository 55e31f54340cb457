//! Minimum and maximum closing price with their dates.

use crate::domain::quote::QuoteBar;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosePoint {
    pub date: NaiveDate,
    pub close: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloseExtremes {
    pub min: ClosePoint,
    pub max: ClosePoint,
}

/// First occurrence wins on ties.
pub fn close_extremes(bars: &[QuoteBar]) -> Option<CloseExtremes> {
    let first = bars.first()?;
    let mut min = ClosePoint {
        date: first.date,
        close: first.close,
    };
    let mut max = min;

    for bar in &bars[1..] {
        if bar.close < min.close {
            min = ClosePoint {
                date: bar.date,
                close: bar.close,
            };
        }
        if bar.close > max.close {
            max = ClosePoint {
                date: bar.date,
                close: bar.close,
            };
        }
    }

    Some(CloseExtremes { min, max })
}
