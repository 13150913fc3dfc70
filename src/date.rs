//! Quarter boundary helper
use chrono::{Datelike, Local, NaiveDate};

/// First day of the quarter containing `date` as `yyyy-MM-dd`; today when `date` is `None`.
pub fn quarter_start(date: Option<NaiveDate>) -> String {
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let month = date.month0() - date.month0() % 3 + 1;
    format!("{}-{:02}-01", date.year(), month)
}
