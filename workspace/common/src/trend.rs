use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::MonthlyEmissions;

/// Direction of change against the previous month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub enum TrendDirection {
    #[serde(rename = "increased")]
    Increased,
    #[serde(rename = "decreased")]
    Decreased,
    #[serde(rename = "unchanged")]
    Unchanged,
    /// The previous month had no emissions, so no ratio exists.
    #[serde(rename = "no previous data")]
    NoPreviousData,
}

/// One month of a trend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TrendPoint {
    #[serde(flatten)]
    pub emissions: MonthlyEmissions,
    /// e.g. "March 2026"
    pub label: String,
    /// Percentage change, absent for the first month and after an empty month.
    pub change_from_previous_month: Option<Decimal>,
    /// Absent for the first month only.
    pub direction: Option<TrendDirection>,
}

/// Whole-window summary of a trend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TrendSummary {
    pub months: u32,
    /// Change from the first to the last month; absent when the first month is 0.
    pub overall_change_percent: Option<Decimal>,
    pub overall_direction: String,
    pub total_co2_in_period: Decimal,
}

/// Consecutive months, oldest first, plus a summary.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TrendReport {
    pub trend: Vec<TrendPoint>,
    pub summary: TrendSummary,
}
