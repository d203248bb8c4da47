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
use crate::models::invoice::PaymentType;
use crate::models::line_item::{self, Discount, DiscountType};
use crate::services::invoice::{self, InvoiceInput};

/// Wire shape of an invoice submission. An invoice_number targets an
/// existing row; omitting it creates a new invoice.
#[derive(Debug, Deserialize)]
pub struct InvoiceSubmission {
    pub invoice_number: Option<String>,
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
    pub payment_type: String,
    #[serde(rename = "transactionId")]
    pub transaction_id: Option<String>,
}

impl InvoiceSubmission {
    fn into_input(self) -> Result<InvoiceInput, crate::services::ServiceError> {
        let payment_type = PaymentType::parse(&self.payment_type)?;
        Ok(InvoiceInput {
            invoice_number: self.invoice_number.filter(|n| !n.trim().is_empty()),
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
            payment_type,
            transaction_id: self.transaction_id,
        })
    }
}

/// POST /invoices - Create an invoice (allocates a number and refreshes
/// the customer snapshot) or update the row named by invoice_number.
pub async fn submit_invoice(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<InvoiceSubmission>,
) -> impl IntoResponse {
    let input = match payload.into_input() {
        Ok(input) => input,
        Err(e) => return error_response("Invoice", e),
    };

    match invoice::upsert_invoice(&db, input).await {
        Ok(receipt) if receipt.created => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Invoice created and customer data updated successfully.",
                "invoice_number": receipt.invoice_number,
                "invoice_date": receipt.invoice_date,
                "payment_type": receipt.payment_type,
                "transactionId": receipt.transaction_id
            })),
        )
            .into_response(),
        Ok(receipt) => (
            StatusCode::OK,
            Json(json!({
                "message": "Invoice updated successfully",
                "invoice_number": receipt.invoice_number
            })),
        )
            .into_response(),
        Err(e) => error_response("Invoice", e),
    }
}

/// GET /invoice/leads/:leads_id - Quotation left-joined with the lead's
/// latest invoice.
pub async fn get_invoice_by_lead(
    State(db): State<DatabaseConnection>,
    Path(leads_id): Path<i32>,
) -> impl IntoResponse {
    match invoice::get_by_lead(&db, leads_id).await {
        Ok(row) => (StatusCode::OK, Json(row)).into_response(),
        Err(e) => error_response("Quotation or invoice", e),
    }
}

/// GET /invoicelist/:leads_id - Every invoice raised for a lead. An empty
/// history is an empty array, not an error.
pub async fn list_invoices(
    State(db): State<DatabaseConnection>,
    Path(leads_id): Path<i32>,
) -> impl IntoResponse {
    match invoice::list_for_lead(&db, leads_id).await {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(e) => error_response("Invoices", e),
    }
}

/// GET /invoiceHistory - Lead+invoice join across all employees.
pub async fn invoice_history(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match invoice::history(&db, None).await {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(e) => error_response("Invoice history", e),
    }
}

/// GET /invoiceHistory/:emp_id - Same join restricted to one employee.
pub async fn invoice_history_for_emp(
    State(db): State<DatabaseConnection>,
    Path(emp_id): Path<i32>,
) -> impl IntoResponse {
    match invoice::history(&db, Some(emp_id)).await {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(e) => error_response("Invoice history", e),
    }
}
