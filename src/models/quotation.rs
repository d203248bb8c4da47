use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// At most one quotation per lead, enforced by a UNIQUE index on leads_id.
/// Line items live in product_details as a JSON-serialized list.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quotation_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub quotation_number: String,
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
    pub quotation_date: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
