use thiserror::Error;

/// Error types of the carbon engine
#[derive(Error, Debug)]
pub enum CarbonError {
    /// A referenced record does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Reference data is missing or unusable (no factor, no benchmark...)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller supplied an unusable value
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// A log was addressed through a business that does not own it
    #[error("Activity log {log_id} does not belong to business {business_id}")]
    AccessDenied { log_id: i32, business_id: i32 },

    /// Error from the database operations
    #[error("Database error: {0}")]
    Store(#[from] sea_orm::DbErr),
}

impl CarbonError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        CarbonError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CarbonError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Type alias for Result with CarbonError
pub type Result<T> = std::result::Result<T, CarbonError>;
