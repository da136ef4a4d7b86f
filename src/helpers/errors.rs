use axum::{http::StatusCode, response::Json};
use compute::CarbonError;
use sea_orm::DbErr;
use tracing::{error, warn};

use crate::schemas::ErrorResponse;

pub type HandlerError = (StatusCode, Json<ErrorResponse>);

pub fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> HandlerError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            code: code.to_string(),
            success: false,
        }),
    )
}

/// Maps engine errors onto HTTP statuses and stable error codes.
pub fn engine_error(err: CarbonError) -> HandlerError {
    match &err {
        CarbonError::NotFound { .. } => {
            warn!("{}", err);
            error_response(StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
        }
        CarbonError::InvalidInput { .. } => {
            warn!("{}", err);
            error_response(StatusCode::BAD_REQUEST, "INVALID_INPUT", err.to_string())
        }
        CarbonError::AccessDenied { .. } => {
            warn!("{}", err);
            error_response(StatusCode::FORBIDDEN, "ACCESS_DENIED", err.to_string())
        }
        CarbonError::Configuration(_) => {
            error!("{}", err);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIGURATION_ERROR",
                err.to_string(),
            )
        }
        CarbonError::Store(db_error) => {
            error!("Store failure: {}", db_error);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "Database operation failed",
            )
        }
    }
}

pub fn database_error(context: &str, db_error: DbErr) -> HandlerError {
    error!("{}: {}", context, db_error);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR", context)
}
