use crate::handlers::industries::IndustryResponse;
use crate::helpers::errors::{database_error, engine_error, error_response, HandlerError};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::{NaiveDateTime, Utc};
use compute::CarbonError;
use model::entities::{activity_log, business, industry_benchmark, user};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating a business profile
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateBusinessRequest {
    /// Owning user; a user has at most one business
    pub user_id: i32,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Must be one of the benchmarked industries
    #[validate(length(min = 1, max = 100))]
    pub industry: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    #[validate(range(min = 1, max = 1000000))]
    pub employee_count: i32,
    pub annual_revenue: Option<Decimal>,
}

/// Request body for updating a business profile; absent fields are kept
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateBusinessRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub industry: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub location: Option<String>,
    #[validate(range(min = 1, max = 1000000))]
    pub employee_count: Option<i32>,
    pub annual_revenue: Option<Decimal>,
}

/// Business response model
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BusinessResponse {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub industry: String,
    pub location: String,
    pub employee_count: i32,
    pub annual_revenue: Option<Decimal>,
    pub created_at: NaiveDateTime,
}

impl From<business::Model> for BusinessResponse {
    fn from(model: business::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            industry: model.industry,
            location: model.location,
            employee_count: model.employee_count,
            annual_revenue: model.annual_revenue,
            created_at: model.created_at,
        }
    }
}

/// Business profile with its industry benchmark
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BusinessProfileResponse {
    pub business: BusinessResponse,
    pub benchmark: Option<IndustryResponse>,
    /// Number of activity logs recorded so far
    pub total_logs: u64,
}

async fn ensure_industry_exists(state: &AppState, industry: &str) -> Result<(), HandlerError> {
    let found = industry_benchmark::Entity::find()
        .filter(industry_benchmark::Column::Industry.eq(industry))
        .one(&state.db)
        .await
        .map_err(|e| database_error("Failed to look up industry", e))?;

    if found.is_none() {
        warn!("Unknown industry: {}", industry);
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "INVALID_INDUSTRY",
            format!("Unknown industry '{}'. See /api/v1/industries", industry),
        ));
    }
    Ok(())
}

/// Create a business profile
#[utoipa::path(
    post,
    path = "/api/v1/businesses",
    tag = "businesses",
    request_body = CreateBusinessRequest,
    responses(
        (status = 201, description = "Business created successfully", body = ApiResponse<BusinessResponse>),
        (status = 400, description = "Invalid request or unknown industry", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "User already has a business", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_business(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<CreateBusinessRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<BusinessResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_business function");
    debug!("Creating business '{}' for user {}", request.name, request.user_id);

    let owner = user::Entity::find_by_id(request.user_id)
        .one(&state.db)
        .await
        .map_err(|e| database_error("Failed to look up user", e))?;
    if owner.is_none() {
        return Err(engine_error(CarbonError::not_found("User", request.user_id)));
    }

    let existing = business::Entity::find()
        .filter(business::Column::UserId.eq(request.user_id))
        .one(&state.db)
        .await
        .map_err(|e| database_error("Failed to look up business", e))?;
    if let Some(existing) = existing {
        warn!("User {} already owns business {}", request.user_id, existing.id);
        return Err(error_response(
            StatusCode::CONFLICT,
            "BUSINESS_EXISTS",
            "Business profile already exists for this user",
        ));
    }

    ensure_industry_exists(&state, &request.industry).await?;

    let new_business = business::ActiveModel {
        user_id: Set(request.user_id),
        name: Set(request.name),
        industry: Set(request.industry),
        location: Set(request.location),
        employee_count: Set(request.employee_count),
        annual_revenue: Set(request.annual_revenue),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    let created = new_business
        .insert(&state.db)
        .await
        .map_err(|e| database_error("Failed to create business", e))?;

    info!("Successfully created business with ID: {}", created.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: BusinessResponse::from(created),
            message: "Business profile created successfully".to_string(),
            success: true,
        }),
    ))
}

/// Get a business profile
#[utoipa::path(
    get,
    path = "/api/v1/businesses/{business_id}",
    tag = "businesses",
    params(
        ("business_id" = i32, Path, description = "Business ID"),
    ),
    responses(
        (status = 200, description = "Business retrieved successfully", body = ApiResponse<BusinessProfileResponse>),
        (status = 404, description = "Business not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_business(
    Path(business_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<BusinessProfileResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_business function for business_id: {}", business_id);

    let found = state
        .store
        .find_business_by_id(business_id)
        .await
        .map_err(engine_error)?
        .ok_or_else(|| engine_error(CarbonError::not_found("Business", business_id)))?;

    let benchmark = state
        .store
        .find_benchmark_by_industry(&found.industry)
        .await
        .map_err(engine_error)?
        .map(IndustryResponse::from);

    let total_logs = activity_log::Entity::find()
        .filter(activity_log::Column::BusinessId.eq(business_id))
        .count(&state.db)
        .await
        .map_err(|e| database_error("Failed to count activity logs", e))?;

    debug!("Business {} has {} logs", business_id, total_logs);
    Ok((
        StatusCode::OK,
        Json(ApiResponse {
            data: BusinessProfileResponse {
                business: BusinessResponse::from(found),
                benchmark,
                total_logs,
            },
            message: "Business retrieved successfully".to_string(),
            success: true,
        }),
    ))
}

/// Update a business profile
#[utoipa::path(
    put,
    path = "/api/v1/businesses/{business_id}",
    tag = "businesses",
    params(
        ("business_id" = i32, Path, description = "Business ID"),
    ),
    request_body = UpdateBusinessRequest,
    responses(
        (status = 200, description = "Business updated successfully", body = ApiResponse<BusinessResponse>),
        (status = 400, description = "Invalid request or unknown industry", body = ErrorResponse),
        (status = 404, description = "Business not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_business(
    Path(business_id): Path<i32>,
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<UpdateBusinessRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<BusinessResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering update_business function for business_id: {}", business_id);

    let existing = business::Entity::find_by_id(business_id)
        .one(&state.db)
        .await
        .map_err(|e| database_error("Failed to look up business", e))?
        .ok_or_else(|| engine_error(CarbonError::not_found("Business", business_id)))?;

    if let Some(industry) = &request.industry {
        ensure_industry_exists(&state, industry).await?;
    }

    let mut active: business::ActiveModel = existing.into();
    if let Some(name) = request.name {
        active.name = Set(name);
    }
    if let Some(industry) = request.industry {
        active.industry = Set(industry);
    }
    if let Some(location) = request.location {
        active.location = Set(location);
    }
    if let Some(employee_count) = request.employee_count {
        active.employee_count = Set(employee_count);
    }
    if let Some(annual_revenue) = request.annual_revenue {
        active.annual_revenue = Set(Some(annual_revenue));
    }

    let updated = active
        .update(&state.db)
        .await
        .map_err(|e| database_error("Failed to update business", e))?;

    info!("Successfully updated business {}", updated.id);
    Ok((
        StatusCode::OK,
        Json(ApiResponse {
            data: BusinessResponse::from(updated),
            message: "Business profile updated successfully".to_string(),
            success: true,
        }),
    ))
}
