use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, Set, TransactionTrait,
};
use serde::Deserialize;
use std::fs::File;
use tracing::{debug, info, trace, warn};

use model::entities::activity_category::{self, Scope};
use model::entities::{activity_log, emission_factor, industry_benchmark};

/// Catalog shipped with the binary.
const DEFAULT_CATALOG: &str = include_str!("../../../catalog/default_catalog.yaml");

/// YAML catalog of emission categories and industry benchmarks
#[derive(Debug, Deserialize)]
pub struct Catalog {
    pub categories: Vec<CatalogCategory>,
    pub benchmarks: Vec<CatalogBenchmark>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogCategory {
    pub name: String,
    pub unit: String,
    pub description: Option<String>,
    pub scope: i32,
    pub factor: Decimal,
    pub factor_unit: String,
    pub source: String,
}

#[derive(Debug, Deserialize)]
pub struct CatalogBenchmark {
    pub industry: String,
    pub avg_monthly_emissions: Decimal,
    pub unit: String,
    pub source: String,
}

/// Number of rows written by a seeding run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub benchmarks: usize,
}

pub async fn seed_catalog(catalog_path: Option<&str>, database_url: &str) -> Result<()> {
    trace!("Entering seed_catalog function");
    info!("Seeding emission catalog");
    debug!("Catalog path: {:?}", catalog_path);
    debug!("Database URL: {}", database_url);

    let catalog = load_catalog(catalog_path)?;

    trace!("Connecting to database");
    let db = Database::connect(database_url)
        .await
        .context("Failed to connect to database")?;
    info!("Connected to database");

    let summary = upsert_catalog(&db, &catalog).await?;
    db.close().await?;

    info!(
        "Seeded {} categories with emission factors and {} industry benchmarks",
        summary.categories, summary.benchmarks
    );
    Ok(())
}

/// Reads a catalog file, or the built-in catalog when no path is given.
pub fn load_catalog(catalog_path: Option<&str>) -> Result<Catalog> {
    let catalog: Catalog = match catalog_path {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open file: {}", path))?;
            serde_yaml::from_reader(file)
                .with_context(|| format!("Failed to parse catalog: {}", path))?
        }
        None => serde_yaml::from_str(DEFAULT_CATALOG).context("Failed to parse built-in catalog")?,
    };

    for category in &catalog.categories {
        if Scope::from_number(category.scope).is_none() {
            bail!("Category '{}' has invalid scope {}", category.name, category.scope);
        }
        if category.factor < Decimal::ZERO {
            bail!("Category '{}' has negative factor {}", category.name, category.factor);
        }
    }
    for benchmark in &catalog.benchmarks {
        if benchmark.avg_monthly_emissions <= Decimal::ZERO {
            bail!(
                "Benchmark '{}' must have a positive average, got {}",
                benchmark.industry,
                benchmark.avg_monthly_emissions
            );
        }
    }

    debug!(
        "Loaded catalog with {} categories and {} benchmarks",
        catalog.categories.len(),
        catalog.benchmarks.len()
    );
    Ok(catalog)
}

/// Inserts or updates every catalog entry, matching categories and
/// benchmarks by name.
pub async fn upsert_catalog(db: &DatabaseConnection, catalog: &Catalog) -> Result<SeedSummary> {
    // A refused entry must not leave the catalog half updated
    let txn = db.begin().await?;

    for entry in &catalog.categories {
        let scope = Scope::from_number(entry.scope)
            .with_context(|| format!("Category '{}' has invalid scope {}", entry.name, entry.scope))?;

        let existing = activity_category::Entity::find()
            .filter(activity_category::Column::Name.eq(entry.name.as_str()))
            .one(&txn)
            .await?;

        let category = match existing {
            Some(current) => {
                if current.scope != scope {
                    let logs = activity_log::Entity::find()
                        .filter(activity_log::Column::CategoryId.eq(current.id))
                        .count(&txn)
                        .await?;
                    if logs > 0 {
                        bail!(
                            "Refusing to move category '{}' from scope {} to scope {}: {} activity logs reference it",
                            entry.name,
                            current.scope.number(),
                            entry.scope,
                            logs
                        );
                    }
                    warn!("Moving category '{}' to scope {}", entry.name, entry.scope);
                }

                let mut active: activity_category::ActiveModel = current.into();
                active.unit = Set(entry.unit.clone());
                active.scope = Set(scope);
                active.description = Set(entry.description.clone());
                active.update(&txn).await?
            }
            None => {
                activity_category::ActiveModel {
                    name: Set(entry.name.clone()),
                    unit: Set(entry.unit.clone()),
                    scope: Set(scope),
                    description: Set(entry.description.clone()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?
            }
        };

        let factor = emission_factor::Entity::find()
            .filter(emission_factor::Column::CategoryId.eq(category.id))
            .one(&txn)
            .await?;

        match factor {
            Some(current) => {
                let mut active: emission_factor::ActiveModel = current.into();
                active.factor = Set(entry.factor);
                active.unit = Set(entry.factor_unit.clone());
                active.source = Set(entry.source.clone());
                active.update(&txn).await?;
            }
            None => {
                emission_factor::ActiveModel {
                    category_id: Set(category.id),
                    factor: Set(entry.factor),
                    unit: Set(entry.factor_unit.clone()),
                    source: Set(entry.source.clone()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
            }
        }

        debug!(
            "[Scope {}] {}: {} {}",
            entry.scope, entry.name, entry.factor, entry.factor_unit
        );
    }

    for entry in &catalog.benchmarks {
        let existing = industry_benchmark::Entity::find()
            .filter(industry_benchmark::Column::Industry.eq(entry.industry.as_str()))
            .one(&txn)
            .await?;

        match existing {
            Some(current) => {
                let mut active: industry_benchmark::ActiveModel = current.into();
                active.avg_monthly_emissions = Set(entry.avg_monthly_emissions);
                active.unit = Set(entry.unit.clone());
                active.source = Set(entry.source.clone());
                active.update(&txn).await?;
            }
            None => {
                industry_benchmark::ActiveModel {
                    industry: Set(entry.industry.clone()),
                    avg_monthly_emissions: Set(entry.avg_monthly_emissions),
                    unit: Set(entry.unit.clone()),
                    source: Set(entry.source.clone()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
            }
        }
        debug!("Benchmark {}: {}", entry.industry, entry.avg_monthly_emissions);
    }

    txn.commit().await?;
    Ok(SeedSummary {
        categories: catalog.categories.len(),
        benchmarks: catalog.benchmarks.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_utils::setup_test_db;
    use chrono::{NaiveDate, Utc};
    use model::entities::{business, user};

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = load_catalog(None).unwrap();
        assert_eq!(catalog.categories.len(), 14);
        assert_eq!(catalog.benchmarks.len(), 10);

        let petrol = catalog
            .categories
            .iter()
            .find(|c| c.name == "Petrol (Gasoline)")
            .unwrap();
        assert_eq!(petrol.factor, Decimal::new(231, 2));
        assert_eq!(petrol.scope, 1);
    }

    #[tokio::test]
    async fn test_seeding_twice_is_idempotent() {
        let db = setup_test_db().await;
        let catalog = load_catalog(None).unwrap();

        upsert_catalog(&db, &catalog).await.unwrap();
        upsert_catalog(&db, &catalog).await.unwrap();

        assert_eq!(activity_category::Entity::find().count(&db).await.unwrap(), 14);
        assert_eq!(emission_factor::Entity::find().count(&db).await.unwrap(), 14);
        assert_eq!(industry_benchmark::Entity::find().count(&db).await.unwrap(), 10);
    }

    #[test]
    fn test_invalid_scope_is_rejected() {
        let yaml = r#"
categories:
  - name: Mystery
    unit: kg
    scope: 4
    factor: "1"
    factor_unit: kg CO2 per kg
    source: nowhere
benchmarks: []
"#;
        let path = std::env::temp_dir().join("carbonledger_invalid_scope.yaml");
        std::fs::write(&path, yaml).unwrap();

        let err = load_catalog(path.to_str()).unwrap_err();
        assert!(err.to_string().contains("invalid scope"));
    }

    #[test]
    fn test_zero_factor_is_allowed() {
        let yaml = r#"
categories:
  - name: Rooftop Solar
    unit: kWh
    scope: 2
    factor: "0"
    factor_unit: kg CO2 per kWh
    source: on-site generation
  - name: Refund
    unit: kg
    scope: 3
    factor: "-0.5"
    factor_unit: kg CO2 per kg
    source: nowhere
benchmarks: []
"#;
        let path = std::env::temp_dir().join("carbonledger_zero_factor.yaml");
        std::fs::write(&path, yaml).unwrap();

        let err = load_catalog(path.to_str()).unwrap_err();
        assert!(err.to_string().contains("'Refund' has negative factor"));

        let solar_only = yaml.split("  - name: Refund").next().unwrap().to_string() + "benchmarks: []\n";
        std::fs::write(&path, solar_only).unwrap();
        let catalog = load_catalog(path.to_str()).unwrap();
        assert_eq!(catalog.categories[0].factor, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_refused_scope_change_rolls_back() {
        let db = setup_test_db().await;
        let mut catalog = load_catalog(None).unwrap();
        upsert_catalog(&db, &catalog).await.unwrap();

        let diesel = activity_category::Entity::find()
            .filter(activity_category::Column::Name.eq("Diesel"))
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        let owner = user::ActiveModel {
            username: Set("fleet".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        let fleet = business::ActiveModel {
            user_id: Set(owner.id),
            name: Set("Fleet Co".to_string()),
            industry: Set("Logistics".to_string()),
            location: Set("Chennai".to_string()),
            employee_count: Set(40),
            annual_revenue: Set(None),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        activity_log::ActiveModel {
            business_id: Set(fleet.id),
            category_id: Set(diesel.id),
            quantity: Set(Decimal::from(10)),
            co2_amount: Set(Decimal::new(268, 1)),
            scope: Set(Scope::Direct),
            date: Set(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()),
            notes: Set(None),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        // Petrol comes first and would be updated before Diesel is refused
        catalog.categories[0].factor = Decimal::new(999, 2);
        catalog
            .categories
            .iter_mut()
            .find(|c| c.name == "Diesel")
            .unwrap()
            .scope = 3;

        let err = upsert_catalog(&db, &catalog).await.unwrap_err();
        assert!(err.to_string().contains("Refusing to move category 'Diesel'"));

        let petrol = activity_category::Entity::find()
            .filter(activity_category::Column::Name.eq("Petrol (Gasoline)"))
            .find_also_related(emission_factor::Entity)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(petrol.1.unwrap().factor, Decimal::new(231, 2));

        let diesel = activity_category::Entity::find_by_id(diesel.id).one(&db).await.unwrap().unwrap();
        assert_eq!(diesel.scope, Scope::Direct);
    }
}
