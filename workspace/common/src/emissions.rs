use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Human readable explanation of a single emission calculation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CalculationBreakdown {
    /// e.g. "100 litres × 2.31 kg CO₂/litres"
    pub formula: String,
    /// e.g. "231.0000 kg CO₂"
    pub result: String,
    /// Provenance of the factor.
    pub source: String,
}

/// Result of applying an emission factor to a quantity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct EmissionCalculation {
    pub co2_amount: Decimal,
    /// GHG scope (1, 2 or 3)
    pub scope: i32,
    pub category_name: String,
    pub factor: Decimal,
    pub unit: String,
    pub breakdown: CalculationBreakdown,
}

/// Emission totals per GHG scope. Empty scopes report zero.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
pub struct ScopeTotals {
    pub scope1: Decimal,
    pub scope2: Decimal,
    pub scope3: Decimal,
}

impl ScopeTotals {
    pub fn total(&self) -> Decimal {
        self.scope1 + self.scope2 + self.scope3
    }
}

/// Totals of one category within a period.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CategoryTotal {
    pub total: Decimal,
    pub count: u64,
    /// Share of the period total, 0 when the period total is 0.
    pub percentage: Decimal,
}

/// Aggregated emissions of a business for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MonthlyEmissions {
    pub month: u32,
    pub year: i32,
    pub total_co2: Decimal,
    pub by_scope: ScopeTotals,
    /// Keyed by category name.
    pub by_category: BTreeMap<String, CategoryTotal>,
    pub log_count: u64,
}

/// A category entry of a breakdown, ranked by emitted mass.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RankedCategory {
    pub name: String,
    pub total: Decimal,
    pub count: u64,
    pub percentage: Decimal,
}

/// Category ranking of a month with a short insight on the top emitter.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CategoryBreakdown {
    pub month: u32,
    pub year: i32,
    pub total_co2: Decimal,
    pub by_scope: ScopeTotals,
    /// Highest emitter first.
    pub categories: Vec<RankedCategory>,
    pub insight: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimals_keep_their_scale_in_json() {
        let mut amount = Decimal::new(231, 0);
        amount.rescale(4);

        let totals = ScopeTotals {
            scope1: amount,
            ..Default::default()
        };
        let json = serde_json::to_value(&totals).unwrap();

        assert_eq!(json["scope1"], "231.0000");
        assert_eq!(json["scope2"], "0");
        assert_eq!(totals.total(), Decimal::new(231, 0));
    }

    #[test]
    fn test_monthly_emissions_serializes_categories_as_object() {
        let mut by_category = BTreeMap::new();
        by_category.insert(
            "Diesel".to_string(),
            CategoryTotal {
                total: Decimal::new(50, 0),
                count: 2,
                percentage: Decimal::new(10000, 2),
            },
        );

        let monthly = MonthlyEmissions {
            month: 3,
            year: 2026,
            total_co2: Decimal::new(50, 0),
            by_scope: ScopeTotals::default(),
            by_category,
            log_count: 2,
        };

        let json = serde_json::to_value(&monthly).unwrap();
        assert_eq!(json["by_category"]["Diesel"]["count"], 2);
        assert_eq!(json["by_category"]["Diesel"]["percentage"], "100.00");
        assert_eq!(json["log_count"], 2);

        let back: MonthlyEmissions = serde_json::from_value(json).unwrap();
        assert_eq!(back, monthly);
    }
}
