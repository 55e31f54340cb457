//! Ordinary least squares trend line over closing prices.
//!
//! close ≈ slope * day_index + intercept, with day_index = 0..n-1 in
//! chronological order. Closed-form normal equations; no regularization,
//! no train/test split.

use crate::domain::quote::QuoteBar;
use chrono::{Duration, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendModel {
    pub slope: f64,
    pub intercept: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl TrendModel {
    /// Returns `None` for an empty series. A single bar fits a flat line.
    pub fn fit(bars: &[QuoteBar]) -> Option<TrendModel> {
        let first = bars.first()?;
        if bars.len() == 1 {
            return Some(TrendModel {
                slope: 0.0,
                intercept: first.close,
            });
        }

        let n = bars.len() as f64;
        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        let mut sum_xy = 0.0;
        let mut sum_xx = 0.0;

        for (i, bar) in bars.iter().enumerate() {
            let x = i as f64;
            sum_x += x;
            sum_y += bar.close;
            sum_xy += x * bar.close;
            sum_xx += x * x;
        }

        let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_xx - sum_x * sum_x);
        let intercept = (sum_y - slope * sum_x) / n;

        Some(TrendModel { slope, intercept })
    }

    pub fn predict(&self, day_index: f64) -> f64 {
        self.slope * day_index + self.intercept
    }
}

/// Predictions for day indices observed..observed+horizon-1, dated on the
/// `horizon` calendar days following `last_date`. Future dates advance by
/// calendar days even though the fitted index counts trading days.
pub fn forecast(
    model: &TrendModel,
    last_date: NaiveDate,
    observed: usize,
    horizon: usize,
) -> Vec<ForecastPoint> {
    (0..horizon)
        .map(|k| ForecastPoint {
            date: last_date + Duration::days(k as i64 + 1),
            close: model.predict((observed + k) as f64),
        })
        .collect()
}
