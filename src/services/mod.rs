pub mod customer_sync;
pub mod dashboard;
pub mod invoice;
pub mod numbering;
pub mod pricing;
pub mod quotation;

/// Error type for service operations
#[derive(Debug)]
pub enum ServiceError {
    Database(String),
    NotFound,
    Validation(String),
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ServiceError::Database(e.to_string())
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Database(msg) => write!(f, "database error: {}", msg),
            ServiceError::NotFound => write!(f, "not found"),
            ServiceError::Validation(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

/// Current local timestamp in the storage format used across all tables.
pub(crate) fn now_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Current local calendar date, used for document dates and the
/// dashboard day filter. Server-local, not timezone-aware.
pub(crate) fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
