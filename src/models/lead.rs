use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A lead snapshot taken when an employee starts following it.
/// Written by the lead-capture flows; read-only to the billing cluster.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "following_leads")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub follow_id: i32,
    pub emp_id: i32,
    pub leads_id: i32,
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

/// Structured postal address assembled from the flat lead columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub door_number: Option<String>,
    pub street: Option<String>,
    pub landmark: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
}

impl Model {
    pub fn billing_address(&self) -> Address {
        Address {
            door_number: self.billing_door_number.clone(),
            street: self.billing_street.clone(),
            landmark: self.billing_landmark.clone(),
            city: self.billing_city.clone(),
            state: self.billing_state.clone(),
            pincode: self.billing_pincode.clone(),
        }
    }

    pub fn shipping_address(&self) -> Address {
        Address {
            door_number: self.shipping_door_number.clone(),
            street: self.shipping_street.clone(),
            landmark: self.shipping_landmark.clone(),
            city: self.shipping_city.clone(),
            state: self.shipping_state.clone(),
            pincode: self.shipping_pincode.clone(),
        }
    }
}
