use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::error_response;
use crate::models::line_item::{self, Discount, DiscountType};
use crate::services::quotation::{self, QuotationInput};

/// Wire shape of a quotation submission. Numeric fields may arrive as
/// numbers or strings; everything is coerced before the calculator runs.
#[derive(Debug, Deserialize)]
pub struct QuotationSubmission {
    pub leads_id: i32,
    pub leads_name: String,
    pub leads_mobile: Option<String>,
    pub leads_email: Option<String>,
    #[serde(default)]
    pub product_details: Vec<Value>,
    #[serde(default)]
    pub discount: Value,
    #[serde(default, rename = "discountType")]
    pub discount_type: Option<String>,
    #[serde(default)]
    pub gst: Value,
    #[serde(default, rename = "paidAmount")]
    pub paid_amount: Value,
}

impl QuotationSubmission {
    pub(crate) fn into_input(self) -> QuotationInput {
        QuotationInput {
            leads_id: self.leads_id,
            leads_name: self.leads_name,
            leads_mobile: self.leads_mobile,
            leads_email: self.leads_email,
            items: line_item::parse_line_items(&self.product_details),
            discount: Discount {
                discount_type: self
                    .discount_type
                    .as_deref()
                    .map(DiscountType::parse)
                    .unwrap_or(DiscountType::Percentage),
                value: line_item::lenient_f64(Some(&self.discount)),
            },
            gst: line_item::lenient_f64(Some(&self.gst)),
            new_paid: line_item::lenient_f64(Some(&self.paid_amount)),
        }
    }
}

/// POST /quotations - Create the lead's quotation, or replace its line
/// items and totals when one already exists.
pub async fn submit_quotation(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<QuotationSubmission>,
) -> impl IntoResponse {
    match quotation::upsert_quotation(&db, payload.into_input()).await {
        Ok(receipt) if receipt.created => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Quotation created successfully.",
                "quotation_number": receipt.quotation_number,
                "quotation_date": receipt.quotation_date
            })),
        )
            .into_response(),
        Ok(receipt) => (
            StatusCode::OK,
            Json(json!({
                "message": "Quotation updated successfully.",
                "quotation_number": receipt.quotation_number,
                "quotation_date": receipt.quotation_date
            })),
        )
            .into_response(),
        Err(e) => error_response("Quotation", e),
    }
}

/// GET /quotation/:follow_id - Lead snapshot with nested addresses and its
/// quotation (null when none exists yet).
pub async fn get_lead_with_quotation(
    State(db): State<DatabaseConnection>,
    Path(follow_id): Path<i32>,
) -> impl IntoResponse {
    match quotation::get_by_follow_id(&db, follow_id).await {
        Ok(details) => (StatusCode::OK, Json(details)).into_response(),
        Err(e) => error_response("Lead", e),
    }
}

/// GET /quotation/leads/:leads_id - The quotation row for a lead.
pub async fn get_quotation_by_lead(
    State(db): State<DatabaseConnection>,
    Path(leads_id): Path<i32>,
) -> impl IntoResponse {
    match quotation::get_by_lead(&db, leads_id).await {
        Ok(row) => (StatusCode::OK, Json(row)).into_response(),
        Err(e) => error_response("Quotation", e),
    }
}
