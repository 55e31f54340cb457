//! Simple Moving Average indicator.
//!
//! O(n) sliding window implementation.
//! SMA(w)[i] = (C[i-w+1] + ... + C[i]) / w, a trailing (non-centered) window.
//! Warmup: first (w-1) bars have no value.

use crate::domain::quote::QuoteBar;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct SmaPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

pub fn calculate_sma(bars: &[QuoteBar], window: usize) -> Vec<SmaPoint> {
    if window == 0 || bars.is_empty() {
        return Vec::new();
    }

    let mut points = Vec::with_capacity(bars.len());
    let mut window_sum: f64 = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        window_sum += bar.close;
        if i >= window {
            window_sum -= bars[i - window].close;
        }

        let value = if i + 1 >= window {
            Some(window_sum / window as f64)
        } else {
            None
        };

        points.push(SmaPoint {
            date: bar.date,
            value,
        });
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn make_bars(prices: &[f64]) -> Vec<QuoteBar> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| QuoteBar {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000,
            })
            .collect()
    }

    #[test]
    fn sma_warmup() {
        let bars = make_bars(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let points = calculate_sma(&bars, 3);

        assert_eq!(points.len(), bars.len());
        assert!(points[0].value.is_none());
        assert!(points[1].value.is_none());
        assert!(points[2].value.is_some());
        assert!(points[3].value.is_some());
        assert!(points[4].value.is_some());
    }

    #[test]
    fn sma_known_values() {
        let bars = make_bars(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let points = calculate_sma(&bars, 3);

        assert_eq!(points[2].value, Some(20.0));
        assert_eq!(points[3].value, Some(30.0));
        assert_eq!(points[4].value, Some(40.0));
    }

    #[test]
    fn sma_window_1_is_close() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        let points = calculate_sma(&bars, 1);

        assert_eq!(points[0].value, Some(10.0));
        assert_eq!(points[1].value, Some(20.0));
        assert_eq!(points[2].value, Some(30.0));
    }

    #[test]
    fn sma_equal_prices() {
        let bars = make_bars(&[100.0, 100.0, 100.0, 100.0]);
        let points = calculate_sma(&bars, 3);

        assert!((points[3].value.unwrap() - 100.0).abs() < 1e-12);
    }

    #[test]
    fn sma_window_larger_than_series() {
        let bars = make_bars(&[10.0, 20.0]);
        let points = calculate_sma(&bars, 5);

        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p.value.is_none()));
    }

    #[test]
    fn sma_dates_align_with_bars() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        let points = calculate_sma(&bars, 2);

        for (bar, point) in bars.iter().zip(&points) {
            assert_eq!(bar.date, point.date);
        }
    }

    #[test]
    fn sma_empty_bars() {
        let bars: Vec<QuoteBar> = vec![];
        assert!(calculate_sma(&bars, 3).is_empty());
    }

    #[test]
    fn sma_window_0() {
        let bars = make_bars(&[10.0, 20.0]);
        assert!(calculate_sma(&bars, 0).is_empty());
    }

    proptest! {
        #[test]
        fn sma_stays_within_window_bounds(
            prices in proptest::collection::vec(1.0f64..1000.0, 1..60),
            window in 1usize..10,
        ) {
            let bars = make_bars(&prices);
            let points = calculate_sma(&bars, window);
            prop_assert_eq!(points.len(), bars.len());

            for (i, point) in points.iter().enumerate() {
                if let Some(value) = point.value {
                    let lo = i + 1 - window;
                    let min = prices[lo..=i].iter().cloned().fold(f64::INFINITY, f64::min);
                    let max = prices[lo..=i]
                        .iter()
                        .cloned()
                        .fold(f64::NEG_INFINITY, f64::max);
                    prop_assert!(value >= min - 1e-9 && value <= max + 1e-9);
                } else {
                    prop_assert!(i + 1 < window);
                }
            }
        }
    }
}
