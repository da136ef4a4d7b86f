use crate::helpers::errors::database_error;
use crate::schemas::{ApiResponse, AppState, CachedData, ErrorResponse};
use axum::{extract::State, http::StatusCode, response::Json};
use model::entities::industry_benchmark;
use rust_decimal::Decimal;
use sea_orm::{EntityTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;

const INDUSTRIES_CACHE_KEY: &str = "industries";

/// Industry benchmark
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct IndustryResponse {
    pub industry: String,
    /// Average monthly emissions of a business in this industry (kg CO2)
    pub avg_monthly_emissions: Decimal,
    pub unit: String,
    pub source: String,
}

impl From<industry_benchmark::Model> for IndustryResponse {
    fn from(model: industry_benchmark::Model) -> Self {
        Self {
            industry: model.industry,
            avg_monthly_emissions: model.avg_monthly_emissions,
            unit: model.unit,
            source: model.source,
        }
    }
}

/// List industries a business can pick
#[utoipa::path(
    get,
    path = "/api/v1/industries",
    tag = "industries",
    responses(
        (status = 200, description = "Industries retrieved successfully", body = ApiResponse<Vec<IndustryResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_industries(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<IndustryResponse>>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_industries function");

    let industries = match state.cache.get(INDUSTRIES_CACHE_KEY).await {
        Some(CachedData::Industries(industries)) => {
            trace!("Serving industries from cache");
            industries
        }
        _ => {
            let industries: Vec<IndustryResponse> = industry_benchmark::Entity::find()
                .order_by_asc(industry_benchmark::Column::Industry)
                .all(&state.db)
                .await
                .map_err(|e| database_error("Failed to retrieve industries", e))?
                .into_iter()
                .map(IndustryResponse::from)
                .collect();
            debug!("Caching {} industries", industries.len());
            state
                .cache
                .insert(
                    INDUSTRIES_CACHE_KEY.to_string(),
                    CachedData::Industries(industries.clone()),
                )
                .await;
            industries
        }
    };

    info!("Retrieved {} industries", industries.len());
    Ok((
        StatusCode::OK,
        Json(ApiResponse {
            data: industries,
            message: "Industries retrieved successfully".to_string(),
            success: true,
        }),
    ))
}
