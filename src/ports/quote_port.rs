//! Market data access port trait.

use crate::domain::error::StocklensError;
use crate::domain::quote::QuoteBar;
use chrono::NaiveDate;

pub trait QuotePort {
    /// Daily bars for `ticker` within `[start, end]`, sorted by date, with
    /// incomplete rows already removed.
    ///
    /// An unknown ticker or an unavailable source is reported as an empty
    /// series, not an error; only malformed data is an `Err`.
    fn fetch_daily(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<QuoteBar>, StocklensError>;
}
