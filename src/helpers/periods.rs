use chrono::{Datelike, NaiveDate, Utc};

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Month and year from the query, falling back to the current month.
pub fn month_or_current(month: Option<u32>, year: Option<i32>) -> (u32, i32) {
    let today = today();
    (
        month.unwrap_or_else(|| today.month()),
        year.unwrap_or_else(|| today.year()),
    )
}
