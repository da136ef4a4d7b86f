use crate::handlers::{
    analytics::{
        get_benchmark_comparison, get_breakdown, get_monthly_emissions, get_score, get_trends,
    },
    businesses::{create_business, get_business, update_business},
    categories::{get_categories, get_categories_by_scope, get_category},
    health::health_check,
    industries::get_industries,
    logs::{create_log, delete_log, get_log, get_logs},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.settings.request_timeout_secs);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Reference data
        .route("/api/v1/categories", get(get_categories))
        .route("/api/v1/categories/scope/:scope", get(get_categories_by_scope))
        .route("/api/v1/categories/:category_id", get(get_category))
        .route("/api/v1/industries", get(get_industries))
        // Business profiles
        .route("/api/v1/businesses", post(create_business))
        .route(
            "/api/v1/businesses/:business_id",
            get(get_business).put(update_business),
        )
        // Activity logs
        .route(
            "/api/v1/businesses/:business_id/logs",
            post(create_log).get(get_logs),
        )
        .route(
            "/api/v1/businesses/:business_id/logs/:log_id",
            get(get_log).delete(delete_log),
        )
        // Analytics
        .route(
            "/api/v1/businesses/:business_id/analytics/monthly",
            get(get_monthly_emissions),
        )
        .route(
            "/api/v1/businesses/:business_id/analytics/trends",
            get(get_trends),
        )
        .route(
            "/api/v1/businesses/:business_id/analytics/breakdown",
            get(get_breakdown),
        )
        .route(
            "/api/v1/businesses/:business_id/analytics/benchmark",
            get(get_benchmark_comparison),
        )
        .route(
            "/api/v1/businesses/:business_id/analytics/score",
            get(get_score),
        )
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
