//! CSV directory quote adapter.
//!
//! Offline quote source: one `{TICKER}.csv` per ticker with
//! `date,open,high,low,close,volume` rows. Rows with blank or missing
//! fields are skipped, matching the cleaning the network source performs.

use crate::domain::error::StocklensError;
use crate::domain::quote::QuoteBar;
use crate::ports::quote_port::QuotePort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvQuoteAdapter {
    base_path: PathBuf,
}

impl CsvQuoteAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{ticker}.csv"))
    }
}

impl QuotePort for CsvQuoteAdapter {
    fn fetch_daily(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<QuoteBar>, StocklensError> {
        let path = self.csv_path(ticker);
        if !path.exists() {
            // unknown ticker: the "no quotes" case, not a failure
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| StocklensError::Data {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let Some(bar) = record_bar(&record)? else {
                continue;
            };

            if bar.date < start || bar.date > end {
                continue;
            }
            bars.push(bar);
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

/// `Ok(None)` for a row with any blank or missing field (dropped), `Err`
/// for one that is present but unparseable.
fn record_bar(record: &csv::StringRecord) -> Result<Option<QuoteBar>, StocklensError> {
    let mut fields = [""; 6];
    for (i, slot) in fields.iter_mut().enumerate() {
        match record.get(i).map(str::trim) {
            Some(v) if !v.is_empty() => *slot = v,
            _ => return Ok(None),
        }
    }

    let date = NaiveDate::parse_from_str(fields[0], "%Y-%m-%d").map_err(|e| {
        StocklensError::Data {
            reason: format!("invalid date '{}': {}", fields[0], e),
        }
    })?;

    let number = |name: &str, raw: &str| -> Result<f64, StocklensError> {
        raw.parse().map_err(|e| StocklensError::Data {
            reason: format!("invalid {name} value '{raw}': {e}"),
        })
    };

    let open = number("open", fields[1])?;
    let high = number("high", fields[2])?;
    let low = number("low", fields[3])?;
    let close = number("close", fields[4])?;
    let volume: i64 = fields[5].parse().map_err(|e| StocklensError::Data {
        reason: format!("invalid volume value '{}': {}", fields[5], e),
    })?;

    Ok(Some(QuoteBar {
        date,
        open,
        high,
        low,
        close,
        volume,
    }))
}
