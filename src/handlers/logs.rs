use crate::helpers::errors::{database_error, engine_error, HandlerError};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::{NaiveDate, NaiveDateTime};
use common::EmissionCalculation;
use compute::rounding::round_mass;
use compute::{find_owned_activity, record_activity, remove_activity, ActivityInput, CarbonError};
use model::entities::activity_category::{self, Scope};
use model::entities::activity_log;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Request body for logging an activity
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateLogRequest {
    pub category_id: i32,
    /// Amount of activity in the category's unit; must be positive
    pub quantity: Decimal,
    /// Day the activity happened (YYYY-MM-DD)
    pub date: NaiveDate,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// Activity log response model
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LogResponse {
    pub id: i32,
    pub business_id: i32,
    pub category_id: i32,
    pub category_name: String,
    pub quantity: Decimal,
    /// kg CO2, frozen at creation
    pub co2_amount: Decimal,
    pub scope: i32,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl LogResponse {
    fn new(log: activity_log::Model, category_name: String) -> Self {
        Self {
            id: log.id,
            business_id: log.business_id,
            category_id: log.category_id,
            category_name,
            quantity: log.quantity,
            co2_amount: log.co2_amount,
            scope: log.scope.number(),
            date: log.date,
            notes: log.notes,
            created_at: log.created_at,
        }
    }
}

/// A freshly created log with its calculation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LogCreatedResponse {
    pub log: LogResponse,
    pub calculation: EmissionCalculation,
}

/// Pagination info
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Pagination {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

/// One page of activity logs
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LogListResponse {
    pub logs: Vec<LogResponse>,
    /// Sum of `co2_amount` over this page
    pub total_co2_shown: Decimal,
    pub pagination: Pagination,
}

/// Query parameters for listing activity logs
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
pub struct LogQuery {
    /// Page number (default: 1)
    #[validate(range(min = 1, max = 10000))]
    pub page: Option<u64>,
    /// Page size (default: 20)
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u64>,
    /// Filter by GHG scope
    #[validate(range(min = 1, max = 3))]
    pub scope: Option<i32>,
    /// Filter by category ID
    pub category_id: Option<i32>,
    /// Earliest day, inclusive (YYYY-MM-DD)
    pub start_date: Option<NaiveDate>,
    /// Latest day, inclusive (YYYY-MM-DD)
    pub end_date: Option<NaiveDate>,
}

async fn category_name(state: &AppState, category_id: i32) -> Result<String, HandlerError> {
    let category = activity_category::Entity::find_by_id(category_id)
        .one(&state.db)
        .await
        .map_err(|e| database_error("Failed to look up category", e))?
        .ok_or_else(|| engine_error(CarbonError::not_found("Activity category", category_id)))?;
    Ok(category.name)
}

/// Log an activity; its emission is calculated and frozen
#[utoipa::path(
    post,
    path = "/api/v1/businesses/{business_id}/logs",
    tag = "logs",
    params(
        ("business_id" = i32, Path, description = "Business ID"),
    ),
    request_body = CreateLogRequest,
    responses(
        (status = 201, description = "Activity logged successfully", body = ApiResponse<LogCreatedResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Business or category not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_log(
    Path(business_id): Path<i32>,
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<CreateLogRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<LogCreatedResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_log function for business_id: {}", business_id);
    debug!(
        "Logging {} units of category {} on {}",
        request.quantity, request.category_id, request.date
    );

    let (log, calculation) = record_activity(
        state.store.as_ref(),
        business_id,
        ActivityInput {
            category_id: request.category_id,
            quantity: request.quantity,
            date: request.date,
            notes: request.notes,
        },
    )
    .await
    .map_err(engine_error)?;

    info!("Successfully created activity log with ID: {}", log.id);
    let category_name = calculation.category_name.clone();
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: LogCreatedResponse {
                log: LogResponse::new(log, category_name),
                calculation,
            },
            message: "Activity logged successfully".to_string(),
            success: true,
        }),
    ))
}

/// List activity logs of a business, newest first
#[utoipa::path(
    get,
    path = "/api/v1/businesses/{business_id}/logs",
    tag = "logs",
    params(
        ("business_id" = i32, Path, description = "Business ID"),
        LogQuery
    ),
    responses(
        (status = 200, description = "Activity logs retrieved successfully", body = ApiResponse<LogListResponse>),
        (status = 400, description = "Invalid query", body = ErrorResponse),
        (status = 404, description = "Business not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_logs(
    Path(business_id): Path<i32>,
    Valid(Query(query)): Valid<Query<LogQuery>>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<LogListResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_logs function for business_id: {}", business_id);

    state
        .store
        .find_business_by_id(business_id)
        .await
        .map_err(engine_error)?
        .ok_or_else(|| engine_error(CarbonError::not_found("Business", business_id)))?;

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(20);
    debug!("Fetching activity logs - page: {}, limit: {}", page, limit);

    let mut query_builder =
        activity_log::Entity::find().filter(activity_log::Column::BusinessId.eq(business_id));

    // Apply filters
    if let Some(scope) = query.scope.and_then(Scope::from_number) {
        query_builder = query_builder.filter(activity_log::Column::Scope.eq(scope));
    }
    if let Some(category_id) = query.category_id {
        query_builder = query_builder.filter(activity_log::Column::CategoryId.eq(category_id));
    }
    if let Some(start_date) = query.start_date {
        query_builder = query_builder.filter(activity_log::Column::Date.gte(start_date));
    }
    if let Some(end_date) = query.end_date {
        query_builder = query_builder.filter(activity_log::Column::Date.lte(end_date));
    }

    let paginator = query_builder
        .find_also_related(activity_category::Entity)
        .order_by_desc(activity_log::Column::Date)
        .order_by_desc(activity_log::Column::Id)
        .paginate(&state.db, limit);

    let total = paginator
        .num_items()
        .await
        .map_err(|e| database_error("Failed to count activity logs", e))?;
    let rows = paginator
        .fetch_page(page - 1)
        .await
        .map_err(|e| database_error("Failed to retrieve activity logs", e))?;

    let logs: Vec<LogResponse> = rows
        .into_iter()
        .map(|(log, category)| {
            let name = category.map(|c| c.name).unwrap_or_default();
            LogResponse::new(log, name)
        })
        .collect();
    let total_co2_shown = round_mass(logs.iter().map(|l| l.co2_amount).sum());

    info!("Successfully retrieved {} of {} activity logs", logs.len(), total);
    Ok((
        StatusCode::OK,
        Json(ApiResponse {
            data: LogListResponse {
                logs,
                total_co2_shown,
                pagination: Pagination {
                    total,
                    page,
                    limit,
                    total_pages: total.div_ceil(limit),
                },
            },
            message: "Activity logs retrieved successfully".to_string(),
            success: true,
        }),
    ))
}

/// Get one activity log
#[utoipa::path(
    get,
    path = "/api/v1/businesses/{business_id}/logs/{log_id}",
    tag = "logs",
    params(
        ("business_id" = i32, Path, description = "Business ID"),
        ("log_id" = i32, Path, description = "Activity log ID"),
    ),
    responses(
        (status = 200, description = "Activity log retrieved successfully", body = ApiResponse<LogResponse>),
        (status = 403, description = "Log belongs to another business", body = ErrorResponse),
        (status = 404, description = "Activity log not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_log(
    Path((business_id, log_id)): Path<(i32, i32)>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<LogResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_log function for log_id: {}", log_id);

    let log = find_owned_activity(state.store.as_ref(), business_id, log_id)
        .await
        .map_err(engine_error)?;
    let name = category_name(&state, log.category_id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse {
            data: LogResponse::new(log, name),
            message: "Activity log retrieved successfully".to_string(),
            success: true,
        }),
    ))
}

/// Delete an activity log
#[utoipa::path(
    delete,
    path = "/api/v1/businesses/{business_id}/logs/{log_id}",
    tag = "logs",
    params(
        ("business_id" = i32, Path, description = "Business ID"),
        ("log_id" = i32, Path, description = "Activity log ID"),
    ),
    responses(
        (status = 200, description = "Activity log deleted successfully", body = ApiResponse<String>),
        (status = 403, description = "Log belongs to another business", body = ErrorResponse),
        (status = 404, description = "Activity log not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_log(
    Path((business_id, log_id)): Path<(i32, i32)>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<String>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering delete_log function for log_id: {}", log_id);

    remove_activity(state.store.as_ref(), business_id, log_id)
        .await
        .map_err(engine_error)?;

    info!("Activity log {} deleted", log_id);
    Ok((
        StatusCode::OK,
        Json(ApiResponse {
            data: format!("Activity log {} deleted", log_id),
            message: "Activity log deleted successfully".to_string(),
            success: true,
        }),
    ))
}
