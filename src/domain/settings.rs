//! Analysis settings with named defaults, overridable via config file.

use crate::domain::error::StocklensError;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_SMA_WINDOW: usize = 20;
pub const DEFAULT_VOLATILITY_THRESHOLD_PCT: f64 = 2.0;
pub const DEFAULT_FORECAST_HORIZON: usize = 30;
pub const DEFAULT_CHART_FILE: &str = "stock_chart.svg";

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    pub sma_window: usize,
    pub volatility_threshold_pct: f64,
    pub forecast_horizon: usize,
    pub chart_file: String,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            sma_window: DEFAULT_SMA_WINDOW,
            volatility_threshold_pct: DEFAULT_VOLATILITY_THRESHOLD_PCT,
            forecast_horizon: DEFAULT_FORECAST_HORIZON,
            chart_file: DEFAULT_CHART_FILE.to_string(),
        }
    }
}

pub fn build_settings(config: &dyn ConfigPort) -> Result<AnalysisSettings, StocklensError> {
    let settings = AnalysisSettings {
        sma_window: config.get_usize("analysis", "sma_window", DEFAULT_SMA_WINDOW),
        volatility_threshold_pct: config.get_double(
            "analysis",
            "volatility_threshold",
            DEFAULT_VOLATILITY_THRESHOLD_PCT,
        ),
        forecast_horizon: config.get_usize("analysis", "forecast_horizon", DEFAULT_FORECAST_HORIZON),
        chart_file: config
            .get_string("chart", "output")
            .unwrap_or_else(|| DEFAULT_CHART_FILE.to_string()),
    };

    validate_settings(&settings)?;
    Ok(settings)
}

fn validate_settings(settings: &AnalysisSettings) -> Result<(), StocklensError> {
    if settings.sma_window == 0 {
        return Err(StocklensError::ConfigInvalid {
            section: "analysis".into(),
            key: "sma_window".into(),
            reason: "must be at least 1".into(),
        });
    }
    if !settings.volatility_threshold_pct.is_finite() || settings.volatility_threshold_pct <= 0.0 {
        return Err(StocklensError::ConfigInvalid {
            section: "analysis".into(),
            key: "volatility_threshold".into(),
            reason: "must be a positive number".into(),
        });
    }
    if settings.forecast_horizon == 0 {
        return Err(StocklensError::ConfigInvalid {
            section: "analysis".into(),
            key: "forecast_horizon".into(),
            reason: "must be at least 1".into(),
        });
    }
    if settings.chart_file.trim().is_empty() {
        return Err(StocklensError::ConfigInvalid {
            section: "chart".into(),
            key: "output".into(),
            reason: "must not be empty".into(),
        });
    }
    Ok(())
}
