use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Purchase ledger rows. Only the GST-inclusive total feeds the
/// financial rollup; purchase entry itself is handled elsewhere.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchases")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub item_name: String,
    pub total_price_with_gst: f64,
    pub purchase_date: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
