//! Category -> factor -> emission arithmetic.

use rust_decimal::Decimal;
use tracing::{debug, error, instrument};

use common::{CalculationBreakdown, EmissionCalculation, MASS_UNIT};
use model::entities::{activity_category, emission_factor};

use crate::error::{CarbonError, Result};
use crate::rounding::round_mass;
use crate::store::CarbonStore;

/// Applies an already loaded factor to a quantity.
///
/// The CO2 amount is `quantity * factor` rounded once to four places.
pub fn calculate_with_factor(
    category: &activity_category::Model,
    factor: &emission_factor::Model,
    quantity: Decimal,
) -> Result<EmissionCalculation> {
    ensure_positive_quantity(quantity)?;

    let co2_amount = quantity
        .checked_mul(factor.factor)
        .map(round_mass)
        .filter(|amount| *amount < storable_limit())
        .ok_or_else(|| {
            CarbonError::invalid(
                "quantity",
                format!("{} {} of {} is too large to record", quantity, category.unit, category.name),
            )
        })?;
    let shown_factor = factor.factor.normalize();

    Ok(EmissionCalculation {
        co2_amount,
        scope: category.scope.number(),
        category_name: category.name.clone(),
        factor: factor.factor,
        unit: category.unit.clone(),
        breakdown: CalculationBreakdown {
            formula: format!(
                "{} {} × {} {}/{}",
                quantity.normalize(),
                category.unit,
                shown_factor,
                MASS_UNIT,
                category.unit
            ),
            result: format!("{} {}", co2_amount, MASS_UNIT),
            source: factor.source.clone(),
        },
    })
}

/// Looks the category up and calculates the emission of `quantity` units.
#[instrument(skip(store))]
pub async fn calculate(
    store: &dyn CarbonStore,
    category_id: i32,
    quantity: Decimal,
) -> Result<EmissionCalculation> {
    ensure_positive_quantity(quantity)?;

    let (category, factor) = store
        .find_category_with_factor(category_id)
        .await?
        .ok_or_else(|| CarbonError::not_found("Activity category", category_id))?;

    let factor = factor.ok_or_else(|| {
        error!("Category {} ({}) has no emission factor", category.id, category.name);
        CarbonError::Configuration(format!(
            "no emission factor configured for category '{}'",
            category.name
        ))
    })?;

    let calculation = calculate_with_factor(&category, &factor, quantity)?;
    debug!(
        "Calculated {} kg CO2 for {} {} of {}",
        calculation.co2_amount, quantity, category.unit, category.name
    );
    Ok(calculation)
}

/// Masses and quantities are stored as DECIMAL(16, 4).
fn storable_limit() -> Decimal {
    Decimal::new(1_000_000_000_000, 0)
}

pub(crate) fn ensure_positive_quantity(quantity: Decimal) -> Result<()> {
    if quantity <= Decimal::ZERO {
        return Err(CarbonError::invalid(
            "quantity",
            format!("must be greater than 0, got {}", quantity),
        ));
    }
    if quantity >= storable_limit() {
        return Err(CarbonError::invalid(
            "quantity",
            format!("must be less than {}, got {}", storable_limit(), quantity),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{new_category, new_category_without_factor, setup_store};
    use model::entities::activity_category::Scope;

    #[tokio::test]
    async fn test_petrol_example() {
        let store = setup_store().await.unwrap();
        let (petrol, _) = new_category(
            store.connection(),
            "Petrol (Gasoline)",
            "litres",
            Scope::Direct,
            Decimal::new(231, 2),
        )
        .await
        .unwrap();

        let result = calculate(&store, petrol.id, Decimal::from(100)).await.unwrap();

        assert_eq!(result.co2_amount.to_string(), "231.0000");
        assert_eq!(result.scope, 1);
        assert_eq!(result.category_name, "Petrol (Gasoline)");
        assert_eq!(result.breakdown.formula, "100 litres × 2.31 kg CO₂/litres");
        assert_eq!(result.breakdown.result, "231.0000 kg CO₂");
        assert_eq!(result.breakdown.source, "IPCC 2023");
    }

    #[tokio::test]
    async fn test_linear_in_quantity() {
        let store = setup_store().await.unwrap();
        let (freight, _) = new_category(
            store.connection(),
            "Road Freight Shipping",
            "tonne-km",
            Scope::ValueChain,
            Decimal::new(62, 3),
        )
        .await
        .unwrap();

        let single = calculate(&store, freight.id, Decimal::new(125, 1)).await.unwrap();
        let triple = calculate(&store, freight.id, Decimal::new(375, 1)).await.unwrap();

        assert_eq!(single.co2_amount, Decimal::new(7750, 4));
        assert_eq!(triple.co2_amount, single.co2_amount * Decimal::from(3));
    }

    #[tokio::test]
    async fn test_rounds_once_to_four_places() {
        let store = setup_store().await.unwrap();
        let (commute, _) = new_category(
            store.connection(),
            "Employee Commute (Car)",
            "km",
            Scope::ValueChain,
            Decimal::new(171, 3),
        )
        .await
        .unwrap();

        // 0.33335 * 0.171 = 0.05700285
        let result = calculate(&store, commute.id, Decimal::new(33335, 5)).await.unwrap();
        assert_eq!(result.co2_amount.to_string(), "0.0570");
    }

    #[tokio::test]
    async fn test_non_positive_quantity_is_rejected() {
        let store = setup_store().await.unwrap();
        let (diesel, _) = new_category(
            store.connection(),
            "Diesel",
            "litres",
            Scope::Direct,
            Decimal::new(268, 2),
        )
        .await
        .unwrap();

        for quantity in [Decimal::ZERO, Decimal::from(-5)] {
            let err = calculate(&store, diesel.id, quantity).await.unwrap_err();
            assert!(matches!(err, CarbonError::InvalidInput { field: "quantity", .. }));
        }
    }

    #[tokio::test]
    async fn test_oversized_quantity_is_rejected() {
        let store = setup_store().await.unwrap();
        let (petrol, _) = new_category(
            store.connection(),
            "Petrol (Gasoline)",
            "litres",
            Scope::Direct,
            Decimal::new(231, 2),
        )
        .await
        .unwrap();

        // would overflow the multiplication
        let err = calculate(&store, petrol.id, Decimal::MAX / Decimal::TWO).await.unwrap_err();
        assert!(matches!(err, CarbonError::InvalidInput { field: "quantity", .. }));

        // fits as a quantity, but the mass does not fit its column
        let err = calculate(&store, petrol.id, Decimal::new(500_000_000_000, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, CarbonError::InvalidInput { field: "quantity", .. }));
    }

    #[tokio::test]
    async fn test_zero_factor_yields_zero_mass() {
        let store = setup_store().await.unwrap();
        let (solar, _) = new_category(
            store.connection(),
            "Rooftop Solar",
            "kWh",
            Scope::IndirectEnergy,
            Decimal::ZERO,
        )
        .await
        .unwrap();

        let result = calculate(&store, solar.id, Decimal::from(400)).await.unwrap();
        assert_eq!(result.co2_amount.to_string(), "0.0000");
    }

    #[tokio::test]
    async fn test_unknown_category_is_not_found() {
        let store = setup_store().await.unwrap();
        let err = calculate(&store, 999, Decimal::ONE).await.unwrap_err();
        assert!(matches!(err, CarbonError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_missing_factor_is_configuration_error() {
        let store = setup_store().await.unwrap();
        let orphan = new_category_without_factor(store.connection(), "Unpriced waste")
            .await
            .unwrap();

        let err = calculate(&store, orphan.id, Decimal::ONE).await.unwrap_err();
        assert!(matches!(err, CarbonError::Configuration(_)));
    }
}
