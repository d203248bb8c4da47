use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::services::ServiceError;

/// Invoice rows are historical: a lead can accumulate several, and updates
/// address an existing row by invoice_number rather than by lead.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoice_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub invoice_number: String,
    pub leads_id: i32,
    pub leads_name: String,
    pub leads_mobile: Option<String>,
    pub leads_email: Option<String>,
    pub product_details: String,
    pub total_without_tax: f64,
    pub total_with_tax: f64,
    pub paid_amount: f64,
    pub balance: f64,
    pub discount: f64,
    pub gst: f64,
    pub discount_type: String,
    pub payment_type: String,
    pub transaction_id: Option<String>,
    pub invoice_date: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Accepted payment modes. Everything except Cash must carry a
/// transaction reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentType {
    Cash,
    #[serde(rename = "UPI")]
    Upi,
    Banking,
}

impl PaymentType {
    pub fn parse(raw: &str) -> Result<Self, ServiceError> {
        match raw {
            "Cash" => Ok(PaymentType::Cash),
            "UPI" => Ok(PaymentType::Upi),
            "Banking" => Ok(PaymentType::Banking),
            other => Err(ServiceError::Validation(format!(
                "Unknown payment type: {}",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Cash => "Cash",
            PaymentType::Upi => "UPI",
            PaymentType::Banking => "Banking",
        }
    }

    pub fn requires_transaction_id(&self) -> bool {
        !matches!(self, PaymentType::Cash)
    }
}
