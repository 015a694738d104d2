//! Order codes: `YYMMDD` followed by the zero-padded daily sequence

use chrono::NaiveDate;

/// Highest sequence a store site can issue in one day
pub const MAX_DAILY_SEQUENCE: i32 = 9999;

pub fn date_part(date: NaiveDate) -> String {
    date.format("%y%m%d").to_string()
}

/// Build the code for `sequence`, or `None` when it is outside `1..=9999`
pub fn order_code(date: NaiveDate, sequence: i32) -> Option<String> {
    if !(1..=MAX_DAILY_SEQUENCE).contains(&sequence) {
        return None;
    }
    Some(format!("{}{:04}", date_part(date), sequence))
}
