use crate::config::Settings;
use crate::handlers::businesses::{
    BusinessProfileResponse, BusinessResponse, CreateBusinessRequest, UpdateBusinessRequest,
};
use crate::handlers::categories::{
    CategoriesByScope, CategoryDetailResponse, CategoryResponse, ScopeCategoriesResponse,
};
use crate::handlers::industries::IndustryResponse;
use crate::handlers::logs::{
    CreateLogRequest, LogCreatedResponse, LogListResponse, LogResponse, Pagination,
};
use common::{
    BenchmarkComparison, CalculationBreakdown, CategoryBreakdown, CategoryTotal,
    EmissionCalculation, IntensityScore, MonthlyEmissions, PerformanceLabel, RankedCategory,
    ScopeTotals, ScoreRecord, TrendDirection, TrendPoint, TrendReport, TrendSummary,
};
use compute::CarbonStore;
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Persistence port used by the carbon engine
    pub store: Arc<dyn CarbonStore>,
    /// Cache for immutable reference data
    pub cache: Cache<String, CachedData>,
    pub settings: Arc<Settings>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Categories(Vec<CategoryResponse>),
    Industries(Vec<IndustryResponse>),
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
    /// Number of seeded emission categories
    pub catalog_categories: u64,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::categories::get_categories,
        crate::handlers::categories::get_categories_by_scope,
        crate::handlers::categories::get_category,
        crate::handlers::industries::get_industries,
        crate::handlers::businesses::create_business,
        crate::handlers::businesses::get_business,
        crate::handlers::businesses::update_business,
        crate::handlers::logs::create_log,
        crate::handlers::logs::get_logs,
        crate::handlers::logs::get_log,
        crate::handlers::logs::delete_log,
        crate::handlers::analytics::get_monthly_emissions,
        crate::handlers::analytics::get_trends,
        crate::handlers::analytics::get_breakdown,
        crate::handlers::analytics::get_benchmark_comparison,
        crate::handlers::analytics::get_score,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            CategoryResponse,
            CategoriesByScope,
            ScopeCategoriesResponse,
            CategoryDetailResponse,
            IndustryResponse,
            CreateBusinessRequest,
            UpdateBusinessRequest,
            BusinessResponse,
            BusinessProfileResponse,
            CreateLogRequest,
            LogResponse,
            LogCreatedResponse,
            LogListResponse,
            Pagination,
            EmissionCalculation,
            CalculationBreakdown,
            ScopeTotals,
            CategoryTotal,
            MonthlyEmissions,
            RankedCategory,
            CategoryBreakdown,
            TrendDirection,
            TrendPoint,
            TrendSummary,
            TrendReport,
            PerformanceLabel,
            IntensityScore,
            ScoreRecord,
            BenchmarkComparison,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "categories", description = "Emission category catalog"),
        (name = "industries", description = "Industry benchmarks"),
        (name = "businesses", description = "Business profiles"),
        (name = "logs", description = "Activity logging"),
        (name = "analytics", description = "Emission reports and intensity scores"),
    ),
    info(
        title = "Carbon Ledger API",
        description = "Carbon accounting for small businesses: activity logging, monthly emission reports and industry benchmarking",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
