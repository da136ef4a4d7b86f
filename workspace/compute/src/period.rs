use chrono::{Datelike, NaiveDate};

use crate::error::{CarbonError, Result};

/// A calendar month, day 1 through the last day inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthPeriod {
    year: i32,
    month: u32,
    first_day: NaiveDate,
    last_day: NaiveDate,
}

impl MonthPeriod {
    /// Fails with `InvalidInput` when the month is outside 1-12 or the year
    /// cannot be represented.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(CarbonError::invalid(
                "month",
                format!("{} is not between 1 and 12", month),
            ));
        }

        let first_day = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| CarbonError::invalid("year", format!("{} is out of range", year)))?;
        let last_day = get_last_day_of_month(year, month)
            .ok_or_else(|| CarbonError::invalid("year", format!("{} is out of range", year)))?;

        Ok(Self {
            year,
            month,
            first_day,
            last_day,
        })
    }

    /// The month the given day falls into.
    pub fn containing(date: NaiveDate) -> Result<Self> {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    /// e.g. "March 2026"
    pub fn label(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }

    pub fn previous(&self) -> Result<Self> {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    /// `count` consecutive months ending with this one, oldest first.
    pub fn window_ending_here(&self, count: u32) -> Result<Vec<Self>> {
        let mut periods = Vec::with_capacity(count as usize);
        let mut current = *self;
        for i in 0..count {
            periods.push(current);
            if i + 1 < count {
                current = current.previous()?;
            }
        }
        periods.reverse();
        Ok(periods)
    }
}

fn get_last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    // Get the first day of the next month, then subtract one day
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}
