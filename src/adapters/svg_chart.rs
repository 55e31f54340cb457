//! SVG chart rendering.
//!
//! Builds the whole chart as an SVG document in memory: closing price and
//! moving average polylines, a dashed forecast polyline, volatile days as
//! scatter circles, axes and a legend. Writing the document anywhere is the
//! caller's concern; no display environment is involved.

use crate::domain::error::StocklensError;
use crate::ports::chart_port::{ChartPort, ChartView};

const CLOSE_COLOR: &str = "#1f6fb2";
const SMA_COLOR: &str = "#e8841a";
const FORECAST_COLOR: &str = "#cc2a2a";
const VOLATILE_COLOR: &str = "#7a3fa8";

// ~21 trading days to a month
const X_LABEL_STEP: usize = 21;

pub struct SvgChartAdapter {
    width: f64,
    height: f64,
}

impl Default for SvgChartAdapter {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl SvgChartAdapter {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f64,
            height: height as f64,
        }
    }
}

struct Frame {
    width: f64,
    height: f64,
    padding: f64,
    max_index: f64,
    y_min: f64,
    y_max: f64,
}

impl Frame {
    fn plot_width(&self) -> f64 {
        self.width - 2.0 * self.padding
    }

    fn plot_height(&self) -> f64 {
        self.height - 2.0 * self.padding
    }

    fn x(&self, index: f64) -> f64 {
        self.padding + index * self.plot_width() / self.max_index
    }

    fn y(&self, value: f64) -> f64 {
        self.height - self.padding - (value - self.y_min) * self.plot_height() / (self.y_max - self.y_min)
    }
}

impl ChartPort for SvgChartAdapter {
    fn render(&self, view: &ChartView<'_>) -> Result<String, StocklensError> {
        if view.bars.is_empty() {
            return Ok(empty_chart(self.width, self.height, view.ticker));
        }

        let frame = build_frame(self.width, self.height, view);
        let mut parts: Vec<String> = Vec::new();

        parts.push(format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">"#,
            frame.width, frame.height, frame.width, frame.height
        ));
        parts.push(format!(
            r#"  <rect width="{:.0}" height="{:.0}" fill="white"/>"#,
            frame.width, frame.height
        ));
        parts.push(format!(
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle" font-family="sans-serif" font-size="22">{} Stock Price Analysis</text>"#,
            frame.width / 2.0,
            frame.padding / 2.0,
            xml_escape(view.ticker)
        ));

        parts.push(axes(&frame));
        parts.extend(y_ticks(&frame));
        parts.extend(x_labels(&frame, view));

        // observed series at indices 0..n-1
        let close_points: Vec<(f64, f64)> = view
            .bars
            .iter()
            .enumerate()
            .map(|(i, bar)| (frame.x(i as f64), frame.y(bar.close)))
            .collect();
        parts.push(polyline(&close_points, CLOSE_COLOR, false));

        let sma_points: Vec<(f64, f64)> = view
            .sma
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.value.map(|v| (frame.x(i as f64), frame.y(v))))
            .collect();
        if !sma_points.is_empty() {
            parts.push(polyline(&sma_points, SMA_COLOR, false));
        }

        // forecast continues the index axis the day after the last bar
        let observed = view.bars.len();
        let forecast_points: Vec<(f64, f64)> = view
            .forecast
            .iter()
            .enumerate()
            .map(|(k, p)| (frame.x((observed + k) as f64), frame.y(p.close)))
            .collect();
        if !forecast_points.is_empty() {
            parts.push(polyline(&forecast_points, FORECAST_COLOR, true));
        }

        for day in view.volatile_days {
            if let Ok(i) = view.bars.binary_search_by_key(&day.bar.date, |b| b.date) {
                parts.push(format!(
                    r#"  <circle cx="{:.1}" cy="{:.1}" r="4" fill="{}"/>"#,
                    frame.x(i as f64),
                    frame.y(day.bar.close),
                    VOLATILE_COLOR
                ));
            }
        }

        parts.extend(legend(&frame, view));
        parts.push("</svg>".to_string());

        Ok(parts.join("\n"))
    }
}

fn build_frame(width: f64, height: f64, view: &ChartView<'_>) -> Frame {
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for bar in view.bars {
        y_min = y_min.min(bar.close);
        y_max = y_max.max(bar.close);
    }
    for point in view.sma {
        if let Some(v) = point.value {
            y_min = y_min.min(v);
            y_max = y_max.max(v);
        }
    }
    for point in view.forecast {
        y_min = y_min.min(point.close);
        y_max = y_max.max(point.close);
    }

    // breathing room so lines stay off the frame edges
    let pad = ((y_max - y_min) * 0.05).max(1.0);
    y_min -= pad;
    y_max += pad;

    let total_points = view.bars.len() + view.forecast.len();
    let max_index = (total_points.saturating_sub(1)).max(1) as f64;

    Frame {
        width,
        height,
        padding: 60.0,
        max_index,
        y_min,
        y_max,
    }
}

fn axes(frame: &Frame) -> String {
    let left = frame.padding;
    let bottom = frame.height - frame.padding;
    format!(
        r#"  <line x1="{left:.1}" y1="{top:.1}" x2="{left:.1}" y2="{bottom:.1}" stroke="black"/>
  <line x1="{left:.1}" y1="{bottom:.1}" x2="{right:.1}" y2="{bottom:.1}" stroke="black"/>"#,
        top = frame.padding,
        right = frame.width - frame.padding,
    )
}

fn y_ticks(frame: &Frame) -> Vec<String> {
    let mut parts = Vec::new();
    for t in 0..=4 {
        let value = frame.y_min + (frame.y_max - frame.y_min) * t as f64 / 4.0;
        let y = frame.y(value);
        parts.push(format!(
            r##"  <line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#dddddd"/>"##,
            frame.padding,
            frame.width - frame.padding,
        ));
        parts.push(format!(
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="end" font-family="sans-serif" font-size="12">{value:.2}</text>"#,
            frame.padding - 8.0,
            y + 4.0,
        ));
    }
    parts
}

fn x_labels(frame: &Frame, view: &ChartView<'_>) -> Vec<String> {
    let mut parts = Vec::new();
    for (i, bar) in view.bars.iter().enumerate() {
        if i % X_LABEL_STEP != 0 {
            continue;
        }
        parts.push(format!(
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle" font-family="sans-serif" font-size="12">{}</text>"#,
            frame.x(i as f64),
            frame.height - frame.padding + 18.0,
            bar.date.format("%d-%b"),
        ));
    }
    parts
}

fn polyline(points: &[(f64, f64)], color: &str, dashed: bool) -> String {
    let coords: Vec<String> = points
        .iter()
        .map(|(x, y)| format!("{x:.1},{y:.1}"))
        .collect();
    let dash = if dashed {
        r#" stroke-dasharray="8,5""#
    } else {
        ""
    };
    format!(
        r#"  <polyline fill="none" stroke="{}" stroke-width="2"{} points="{}"/>"#,
        color,
        dash,
        coords.join(" ")
    )
}

fn legend(frame: &Frame, view: &ChartView<'_>) -> Vec<String> {
    let sma_label = format!("{}-Day SMA", view.sma_window);
    let entries: [(&str, &str, bool); 4] = [
        ("Close", CLOSE_COLOR, false),
        (&sma_label, SMA_COLOR, false),
        ("Forecast", FORECAST_COLOR, true),
        ("Volatile Days", VOLATILE_COLOR, false),
    ];

    let x = frame.width - frame.padding - 160.0;
    let mut parts = Vec::new();
    for (row, (label, color, dashed)) in entries.iter().enumerate() {
        let y = frame.padding + 16.0 + row as f64 * 18.0;
        let dash = if *dashed {
            r#" stroke-dasharray="8,5""#
        } else {
            ""
        };
        parts.push(format!(
            r#"  <line x1="{x:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{color}" stroke-width="2"{dash}/>"#,
            x + 24.0,
        ));
        parts.push(format!(
            r#"  <text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="12">{label}</text>"#,
            x + 30.0,
            y + 4.0,
        ));
    }
    parts
}

fn empty_chart(width: f64, height: f64, ticker: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}">
  <rect width="{width:.0}" height="{height:.0}" fill="white"/>
  <text x="{:.1}" y="{:.1}" text-anchor="middle" font-family="sans-serif" font-size="18">No quote data available for {}</text>
</svg>"#,
        width / 2.0,
        height / 2.0,
        xml_escape(ticker)
    )
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
