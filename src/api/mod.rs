pub mod dashboard;
pub mod health;
pub mod invoice;
pub mod quotation;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::services::ServiceError;

pub fn api_router(db: DatabaseConnection) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Quotations
        .route("/quotations", post(quotation::submit_quotation))
        .route(
            "/quotation/leads/:leads_id",
            get(quotation::get_quotation_by_lead),
        )
        .route("/quotation/:follow_id", get(quotation::get_lead_with_quotation))
        // Invoices
        .route("/invoices", post(invoice::submit_invoice))
        .route("/invoice/leads/:leads_id", get(invoice::get_invoice_by_lead))
        .route("/invoicelist/:leads_id", get(invoice::list_invoices))
        .route("/invoiceHistory", get(invoice::invoice_history))
        .route("/invoiceHistory/:emp_id", get(invoice::invoice_history_for_emp))
        // Dashboards
        .route("/empDashBoard/:emp_id", get(dashboard::emp_dashboard))
        .route(
            "/customers-transactions",
            get(dashboard::customer_transactions),
        )
        .route("/financial-data", get(dashboard::financial_data))
        .with_state(db)
}

/// Shared ServiceError -> HTTP mapping: NotFound 404, Validation 400,
/// Database 500. Bodies carry a plain message field.
pub(crate) fn error_response(context: &str, err: ServiceError) -> Response {
    match err {
        ServiceError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": format!("{} not found", context)})),
        )
            .into_response(),
        ServiceError::Validation(msg) => {
            (StatusCode::BAD_REQUEST, Json(json!({"message": msg}))).into_response()
        }
        ServiceError::Database(msg) => {
            tracing::error!("{}: {}", context, msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"message": "Internal server error."})),
            )
                .into_response()
        }
    }
}
