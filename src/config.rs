use anyhow::Result;
use compute::SeaOrmStore;
use moka::future::Cache;
use sea_orm::Database;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::schemas::AppState;

/// Runtime settings layered from defaults, an optional `carbonledger.yaml`
/// and `CARBONLEDGER_*` environment variables.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    /// Months in a trend when the request does not say
    pub default_trend_months: u32,
    /// Requests for longer trends are clamped to this
    pub max_trend_months: u32,
    /// Entries in the reference data cache
    pub cache_capacity: u64,
    pub cache_ttl_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_trend_months: 6,
            max_trend_months: compute::MAX_TREND_MONTHS,
            cache_capacity: 1000,
            cache_ttl_secs: 300, // 5 minutes
            request_timeout_secs: 30,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let defaults = Settings::default();
        let settings = config::Config::builder()
            .set_default("default_trend_months", i64::from(defaults.default_trend_months))?
            .set_default("max_trend_months", i64::from(defaults.max_trend_months))?
            .set_default("cache_capacity", defaults.cache_capacity as i64)?
            .set_default("cache_ttl_secs", defaults.cache_ttl_secs as i64)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?
            .add_source(config::File::with_name("carbonledger").required(false))
            .add_source(
                config::Environment::with_prefix("CARBONLEDGER")
                    .prefix_separator("_")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        if settings.default_trend_months == 0 || settings.max_trend_months == 0 {
            anyhow::bail!("trend month settings must be at least 1");
        }

        debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }
}

/// Connects to the database and builds the shared application state
pub async fn initialize_app_state_with_url(database_url: &str) -> Result<AppState> {
    let settings = Settings::load()?;

    // Connect to database
    info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url).await?;

    // Initialize cache
    let cache = Cache::builder()
        .max_capacity(settings.cache_capacity)
        .time_to_live(Duration::from_secs(settings.cache_ttl_secs))
        .build();

    Ok(AppState {
        store: Arc::new(SeaOrmStore::new(db.clone())),
        db,
        cache,
        settings: Arc::new(settings),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load_without_sources() {
        let settings = Settings::load().unwrap();
        assert_eq!(settings.max_trend_months, 12);
        assert!(settings.default_trend_months <= settings.max_trend_months);
    }
}
