use crate::helpers::errors::engine_error;
use crate::helpers::periods::{month_or_current, today};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use common::{BenchmarkComparison, CategoryBreakdown, IntensityScore, MonthlyEmissions, TrendReport};
use serde::Deserialize;
use tracing::{debug, info, instrument, trace};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Month selector; both fields default to the current month
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
pub struct MonthQuery {
    /// Month (1-12)
    #[validate(range(min = 1, max = 12))]
    pub month: Option<u32>,
    /// Year (e.g., 2026)
    #[validate(range(min = 1900, max = 9999))]
    pub year: Option<i32>,
}

/// Trend window
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
pub struct TrendQuery {
    /// Number of months ending with the current one; larger values are clamped to 12
    #[validate(range(min = 1))]
    pub months: Option<u32>,
}

/// Emissions of one month by scope and category
#[utoipa::path(
    get,
    path = "/api/v1/businesses/{business_id}/analytics/monthly",
    tag = "analytics",
    params(
        ("business_id" = i32, Path, description = "Business ID"),
        MonthQuery
    ),
    responses(
        (status = 200, description = "Monthly emissions computed", body = ApiResponse<MonthlyEmissions>),
        (status = 400, description = "Invalid month", body = ErrorResponse),
        (status = 404, description = "Business not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_monthly_emissions(
    Path(business_id): Path<i32>,
    Valid(Query(query)): Valid<Query<MonthQuery>>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<MonthlyEmissions>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_monthly_emissions function for business_id: {}", business_id);
    let (month, year) = month_or_current(query.month, query.year);

    let data = compute::aggregate(state.store.as_ref(), business_id, month, year)
        .await
        .map_err(engine_error)?;

    info!("Computed monthly emissions for business {}: {}", business_id, data.total_co2);
    Ok((
        StatusCode::OK,
        Json(ApiResponse {
            data,
            message: "Monthly emissions fetched successfully".to_string(),
            success: true,
        }),
    ))
}

/// Month-over-month emission trend
#[utoipa::path(
    get,
    path = "/api/v1/businesses/{business_id}/analytics/trends",
    tag = "analytics",
    params(
        ("business_id" = i32, Path, description = "Business ID"),
        TrendQuery
    ),
    responses(
        (status = 200, description = "Trend computed", body = ApiResponse<TrendReport>),
        (status = 400, description = "Invalid window", body = ErrorResponse),
        (status = 404, description = "Business not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_trends(
    Path(business_id): Path<i32>,
    Valid(Query(query)): Valid<Query<TrendQuery>>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<TrendReport>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_trends function for business_id: {}", business_id);

    let months = query
        .months
        .unwrap_or(state.settings.default_trend_months)
        .min(state.settings.max_trend_months);
    debug!("Building trend over {} months", months);

    let data = compute::trend(state.store.as_ref(), business_id, months, today())
        .await
        .map_err(engine_error)?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse {
            data,
            message: "Emission trends fetched successfully".to_string(),
            success: true,
        }),
    ))
}

/// Categories of a month ranked by emissions
#[utoipa::path(
    get,
    path = "/api/v1/businesses/{business_id}/analytics/breakdown",
    tag = "analytics",
    params(
        ("business_id" = i32, Path, description = "Business ID"),
        MonthQuery
    ),
    responses(
        (status = 200, description = "Breakdown computed", body = ApiResponse<CategoryBreakdown>),
        (status = 400, description = "Invalid month", body = ErrorResponse),
        (status = 404, description = "Business not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_breakdown(
    Path(business_id): Path<i32>,
    Valid(Query(query)): Valid<Query<MonthQuery>>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryBreakdown>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_breakdown function for business_id: {}", business_id);
    let (month, year) = month_or_current(query.month, query.year);

    let data = compute::breakdown(state.store.as_ref(), business_id, month, year)
        .await
        .map_err(engine_error)?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse {
            data,
            message: "Category breakdown fetched successfully".to_string(),
            success: true,
        }),
    ))
}

/// Score against the industry benchmark plus recent score history
#[utoipa::path(
    get,
    path = "/api/v1/businesses/{business_id}/analytics/benchmark",
    tag = "analytics",
    params(
        ("business_id" = i32, Path, description = "Business ID"),
        MonthQuery
    ),
    responses(
        (status = 200, description = "Benchmark comparison computed", body = ApiResponse<BenchmarkComparison>),
        (status = 400, description = "Invalid month", body = ErrorResponse),
        (status = 404, description = "Business not found", body = ErrorResponse),
        (status = 500, description = "Missing benchmark or internal error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_benchmark_comparison(
    Path(business_id): Path<i32>,
    Valid(Query(query)): Valid<Query<MonthQuery>>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<BenchmarkComparison>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_benchmark_comparison function for business_id: {}", business_id);
    let (month, year) = month_or_current(query.month, query.year);

    let data = compute::benchmark_comparison(state.store.as_ref(), business_id, month, year)
        .await
        .map_err(engine_error)?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse {
            data,
            message: "Benchmark comparison fetched successfully".to_string(),
            success: true,
        }),
    ))
}

/// Carbon intensity score of a month
#[utoipa::path(
    get,
    path = "/api/v1/businesses/{business_id}/analytics/score",
    tag = "analytics",
    params(
        ("business_id" = i32, Path, description = "Business ID"),
        MonthQuery
    ),
    responses(
        (status = 200, description = "Score computed and cached", body = ApiResponse<IntensityScore>),
        (status = 400, description = "Invalid month", body = ErrorResponse),
        (status = 404, description = "Business not found", body = ErrorResponse),
        (status = 500, description = "Missing benchmark or internal error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_score(
    Path(business_id): Path<i32>,
    Valid(Query(query)): Valid<Query<MonthQuery>>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<IntensityScore>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_score function for business_id: {}", business_id);
    let (month, year) = month_or_current(query.month, query.year);

    let data = compute::score(state.store.as_ref(), business_id, month, year)
        .await
        .map_err(engine_error)?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse {
            data,
            message: "Carbon intensity score fetched successfully".to_string(),
            success: true,
        }),
    ))
}
