use crate::helpers::errors::{database_error, engine_error, error_response, HandlerError};
use crate::schemas::{ApiResponse, AppState, CachedData, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use common::EmissionCalculation;
use compute::{calculate_with_factor, CarbonError};
use model::entities::activity_category::{self, Scope};
use model::entities::emission_factor;
use rust_decimal::Decimal;
use sea_orm::{EntityTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;

const CATEGORIES_CACHE_KEY: &str = "categories";

/// Quantity used for the example calculation of a category
const EXAMPLE_QUANTITY: i64 = 100;

/// Activity category together with its emission factor
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    /// Unit quantities are logged in
    pub unit: String,
    /// GHG scope (1, 2 or 3)
    pub scope: i32,
    pub scope_name: String,
    pub description: Option<String>,
    /// kg CO2 per unit, absent when no factor is configured
    pub factor: Option<Decimal>,
    pub factor_unit: Option<String>,
    pub source: Option<String>,
}

impl From<(activity_category::Model, Option<emission_factor::Model>)> for CategoryResponse {
    fn from((category, factor): (activity_category::Model, Option<emission_factor::Model>)) -> Self {
        Self {
            id: category.id,
            name: category.name,
            unit: category.unit,
            scope: category.scope.number(),
            scope_name: category.scope.display_name().to_string(),
            description: category.description,
            factor: factor.as_ref().map(|f| f.factor),
            factor_unit: factor.as_ref().map(|f| f.unit.clone()),
            source: factor.map(|f| f.source),
        }
    }
}

/// The catalog grouped by GHG scope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoriesByScope {
    pub scope1: Vec<CategoryResponse>,
    pub scope2: Vec<CategoryResponse>,
    pub scope3: Vec<CategoryResponse>,
    pub total: usize,
}

/// Categories of a single scope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScopeCategoriesResponse {
    pub scope: i32,
    pub scope_name: String,
    pub categories: Vec<CategoryResponse>,
}

/// One category with a worked example
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryDetailResponse {
    pub category: CategoryResponse,
    /// Emission of 100 units of this category
    pub example_calculation: EmissionCalculation,
}

/// Loads the whole catalog, served from the cache when possible.
async fn load_categories(state: &AppState) -> Result<Vec<CategoryResponse>, HandlerError> {
    if let Some(CachedData::Categories(categories)) = state.cache.get(CATEGORIES_CACHE_KEY).await {
        trace!("Serving {} categories from cache", categories.len());
        return Ok(categories);
    }

    let rows = activity_category::Entity::find()
        .find_also_related(emission_factor::Entity)
        .order_by_asc(activity_category::Column::Scope)
        .order_by_asc(activity_category::Column::Name)
        .all(&state.db)
        .await
        .map_err(|e| database_error("Failed to retrieve categories", e))?;

    let categories: Vec<CategoryResponse> = rows.into_iter().map(CategoryResponse::from).collect();
    debug!("Caching {} categories", categories.len());
    state
        .cache
        .insert(CATEGORIES_CACHE_KEY.to_string(), CachedData::Categories(categories.clone()))
        .await;
    Ok(categories)
}

/// Get all categories grouped by scope
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "categories",
    responses(
        (status = 200, description = "Categories retrieved successfully", body = ApiResponse<CategoriesByScope>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<CategoriesByScope>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_categories function");

    let categories = load_categories(&state).await?;
    let total = categories.len();
    let of_scope = |scope: Scope| -> Vec<CategoryResponse> {
        categories
            .iter()
            .filter(|c| c.scope == scope.number())
            .cloned()
            .collect()
    };

    let data = CategoriesByScope {
        scope1: of_scope(Scope::Direct),
        scope2: of_scope(Scope::IndirectEnergy),
        scope3: of_scope(Scope::ValueChain),
        total,
    };

    info!("Retrieved {} categories", total);
    Ok((
        StatusCode::OK,
        Json(ApiResponse {
            data,
            message: "Categories retrieved successfully".to_string(),
            success: true,
        }),
    ))
}

/// Get the categories of one scope
#[utoipa::path(
    get,
    path = "/api/v1/categories/scope/{scope}",
    tag = "categories",
    params(
        ("scope" = i32, Path, description = "GHG scope, 1 to 3"),
    ),
    responses(
        (status = 200, description = "Categories retrieved successfully", body = ApiResponse<ScopeCategoriesResponse>),
        (status = 400, description = "Invalid scope", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_categories_by_scope(
    Path(scope): Path<i32>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<ScopeCategoriesResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_categories_by_scope function for scope: {}", scope);

    let Some(scope) = Scope::from_number(scope) else {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "INVALID_SCOPE",
            format!("Scope must be 1, 2 or 3, got {}", scope),
        ));
    };

    let categories: Vec<CategoryResponse> = load_categories(&state)
        .await?
        .into_iter()
        .filter(|c| c.scope == scope.number())
        .collect();

    debug!("Scope {} has {} categories", scope.number(), categories.len());
    Ok((
        StatusCode::OK,
        Json(ApiResponse {
            data: ScopeCategoriesResponse {
                scope: scope.number(),
                scope_name: scope.display_name().to_string(),
                categories,
            },
            message: "Categories retrieved successfully".to_string(),
            success: true,
        }),
    ))
}

/// Get a category with an example calculation for 100 units
#[utoipa::path(
    get,
    path = "/api/v1/categories/{category_id}",
    tag = "categories",
    params(
        ("category_id" = i32, Path, description = "Category ID"),
    ),
    responses(
        (status = 200, description = "Category retrieved successfully", body = ApiResponse<CategoryDetailResponse>),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Category has no emission factor", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_category(
    Path(category_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryDetailResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_category function for category_id: {}", category_id);

    let (category, factor) = state
        .store
        .find_category_with_factor(category_id)
        .await
        .map_err(engine_error)?
        .ok_or_else(|| engine_error(CarbonError::not_found("Activity category", category_id)))?;

    let Some(factor) = factor else {
        return Err(engine_error(CarbonError::Configuration(format!(
            "no emission factor configured for category '{}'",
            category.name
        ))));
    };

    let example_calculation =
        calculate_with_factor(&category, &factor, Decimal::from(EXAMPLE_QUANTITY)).map_err(engine_error)?;

    info!("Retrieved category {}", category.name);
    Ok((
        StatusCode::OK,
        Json(ApiResponse {
            data: CategoryDetailResponse {
                category: CategoryResponse::from((category, Some(factor))),
                example_calculation,
            },
            message: "Category retrieved successfully".to_string(),
            success: true,
        }),
    ))
}
