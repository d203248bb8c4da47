use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Durable snapshot of a lead, created or refreshed when an invoice is
/// finalized. At most one row per leads_id (UNIQUE index).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub leads_id: i32,
    pub follow_id: i32,
    pub emp_id: i32,
    pub leads_name: String,
    pub leads_mobile: Option<String>,
    pub leads_email: Option<String>,
    pub product_name: Option<String>,
    pub leads_company: Option<String>,
    pub leads_address: Option<String>,
    pub leads_state: Option<String>,
    pub leads_city: Option<String>,
    pub call_discussion: Option<String>,
    pub remember: Option<String>,
    pub reminder_date: Option<String>,
    pub description: Option<String>,
    pub call_attended: Option<String>,
    pub gst_number: Option<String>,
    pub billing_door_number: Option<String>,
    pub billing_street: Option<String>,
    pub billing_landmark: Option<String>,
    pub billing_city: Option<String>,
    pub billing_state: Option<String>,
    pub billing_pincode: Option<String>,
    pub shipping_door_number: Option<String>,
    pub shipping_street: Option<String>,
    pub shipping_landmark: Option<String>,
    pub shipping_city: Option<String>,
    pub shipping_state: Option<String>,
    pub shipping_pincode: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
