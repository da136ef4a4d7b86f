//! Common transport-layer types shared between the compute engine and the
//! HTTP layer. Masses are kg CO2 with scale 4, percentages and scores have
//! scale 2; decimals serialize as strings so the scale survives JSON.

mod emissions;
mod score;
mod trend;

pub use emissions::{
    CalculationBreakdown, CategoryBreakdown, CategoryTotal, EmissionCalculation,
    MonthlyEmissions, RankedCategory, ScopeTotals,
};
pub use score::{BenchmarkComparison, IntensityScore, PerformanceLabel, ScoreRecord};
pub use trend::{TrendDirection, TrendPoint, TrendReport, TrendSummary};

/// Unit label attached to every mass in responses.
pub const MASS_UNIT: &str = "kg CO₂";
