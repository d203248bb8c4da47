use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;

use crate::api::error_response;
use crate::services::dashboard;

/// GET /empDashBoard/:emp_id - Today's lead and sales rollup for one
/// employee. Identity is an explicit path parameter, never ambient state.
pub async fn emp_dashboard(
    State(db): State<DatabaseConnection>,
    Path(emp_id): Path<i32>,
) -> impl IntoResponse {
    match dashboard::emp_dashboard(&db, emp_id).await {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(e) => error_response("Dashboard", e),
    }
}

/// GET /customers-transactions - Per-customer invoiced/paid/balance sums.
pub async fn customer_transactions(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match dashboard::customer_transactions(&db).await {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(e) => error_response("Customer transactions", e),
    }
}

/// GET /financial-data - Global sales, purchases and profit.
pub async fn financial_data(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match dashboard::financial_data(&db).await {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(e) => error_response("Financial data", e),
    }
}
