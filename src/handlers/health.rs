use crate::schemas::{AppState, HealthResponse};
use axum::{extract::State, http::StatusCode, response::Json};
use model::entities::activity_category;
use sea_orm::{EntityTrait, PaginatorTrait};
use tracing::{instrument, warn};

/// Health check endpoint
///
/// Reports "degraded" when the database is unreachable or the emission
/// catalog has not been seeded, since no log can be recorded then.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service status", body = HealthResponse),
        (status = 500, description = "Service is unhealthy", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, StatusCode> {
    let (database, catalog_categories) = match state.db.ping().await {
        Ok(_) => {
            let categories = activity_category::Entity::find()
                .count(&state.db)
                .await
                .unwrap_or_else(|e| {
                    warn!("Failed to count catalog categories: {}", e);
                    0
                });
            ("connected", categories)
        }
        Err(e) => {
            warn!("Database ping failed: {}", e);
            ("disconnected", 0)
        }
    };

    let status = if database == "connected" && catalog_categories > 0 {
        "healthy"
    } else {
        "degraded"
    };

    Ok(Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        catalog_categories,
    }))
}
