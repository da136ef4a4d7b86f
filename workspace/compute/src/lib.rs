//! The carbon accounting engine: emission calculation, monthly aggregation,
//! trends and the industry intensity score.
//!
//! Every entry point takes a [`store::CarbonStore`] so the persistence
//! backend can be swapped in tests.

pub mod aggregate;
pub mod breakdown;
pub mod calculator;
pub mod error;
pub mod logs;
pub mod period;
pub mod rounding;
pub mod score;
pub mod store;
pub mod trend;

#[cfg(test)]
mod testing;

pub use aggregate::aggregate;
pub use breakdown::breakdown;
pub use calculator::{calculate, calculate_with_factor};
pub use error::{CarbonError, Result};
pub use logs::{find_owned_activity, record_activity, remove_activity, ActivityInput};
pub use period::MonthPeriod;
pub use score::{benchmark_comparison, score};
pub use store::{CarbonStore, LogRecord, NewLog, SeaOrmStore};
pub use trend::{trend, MAX_TREND_MONTHS};
