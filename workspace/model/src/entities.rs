//! SeaORM entities of the carbon ledger.
//!
//! Reference data (categories, factors, benchmarks) is seeded from the
//! catalog; businesses, logs and cached scores are written by the API.

pub mod activity_category;
pub mod activity_log;
pub mod business;
pub mod carbon_intensity_score;
pub mod emission_factor;
pub mod industry_benchmark;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::activity_category::Entity as ActivityCategory;
    pub use super::activity_log::Entity as ActivityLog;
    pub use super::business::Entity as Business;
    pub use super::carbon_intensity_score::Entity as CarbonIntensityScore;
    pub use super::emission_factor::Entity as EmissionFactor;
    pub use super::industry_benchmark::Entity as IndustryBenchmark;
    pub use super::user::Entity as User;
}
