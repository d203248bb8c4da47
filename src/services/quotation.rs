//! Quotation lifecycle - one quotation per lead, replaced on resubmission.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::Serialize;

use crate::models::lead::{self, Address};
use crate::models::line_item::{Discount, LineItem};
use crate::models::quotation::{self, Entity as Quotation};
use crate::services::{ServiceError, now_timestamp, pricing, today};

/// Validated submission, already coerced from the loosely typed wire shape.
#[derive(Debug, Clone)]
pub struct QuotationInput {
    pub leads_id: i32,
    pub leads_name: String,
    pub leads_mobile: Option<String>,
    pub leads_email: Option<String>,
    pub items: Vec<LineItem>,
    pub discount: Discount,
    pub gst: f64,
    /// New payment received with this submission; prior payments are read
    /// from the stored row and accumulated server-side.
    pub new_paid: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuotationReceipt {
    pub quotation_number: String,
    pub quotation_date: String,
    #[serde(skip)]
    pub created: bool,
}

/// Lead snapshot with nested addresses and its quotation, if any.
#[derive(Debug, Serialize)]
pub struct LeadWithQuotation {
    #[serde(flatten)]
    pub lead: lead::Model,
    pub billing_address: Address,
    pub shipping_address: Address,
    pub quotation: Option<quotation::Model>,
}

pub(crate) fn encode_items(items: &[LineItem]) -> Result<String, ServiceError> {
    serde_json::to_string(items).map_err(|e| ServiceError::Database(e.to_string()))
}

/// Create the quotation for a lead, or replace its line items and totals
/// if one already exists. The insert carries an ON CONFLICT clause on
/// leads_id, so two racing first submissions collapse into one row.
pub async fn upsert_quotation(
    db: &DatabaseConnection,
    input: QuotationInput,
) -> Result<QuotationReceipt, ServiceError> {
    let existing = Quotation::find()
        .filter(quotation::Column::LeadsId.eq(input.leads_id))
        .one(db)
        .await?;

    let prior_paid = existing.as_ref().map(|q| q.paid_amount).unwrap_or(0.0);
    let totals = pricing::compute(
        &input.items,
        &input.discount,
        input.gst,
        prior_paid,
        input.new_paid,
    );
    let product_details = encode_items(&input.items)?;
    let now = now_timestamp();

    if let Some(current) = existing {
        let number = current.quotation_number.clone();
        let date = current.quotation_date.clone();

        let mut active: quotation::ActiveModel = current.into();
        active.leads_name = Set(input.leads_name);
        active.leads_mobile = Set(input.leads_mobile);
        active.leads_email = Set(input.leads_email);
        active.product_details = Set(product_details);
        active.total_without_tax = Set(pricing::round2(totals.total_without_tax));
        active.total_with_tax = Set(pricing::round2(totals.total_with_tax));
        active.paid_amount = Set(pricing::round2(totals.paid_amount));
        active.balance = Set(pricing::round2(totals.balance));
        active.discount = Set(input.discount.value);
        active.gst = Set(input.gst);
        active.discount_type = Set(input.discount.discount_type.as_str().to_owned());
        active.updated_at = Set(now);
        active.update(db).await?;

        return Ok(QuotationReceipt {
            quotation_number: number,
            quotation_date: date,
            created: false,
        });
    }

    let quotation_number = super::numbering::next_quotation_number(db).await?;
    let quotation_date = today();

    let new_quotation = quotation::ActiveModel {
        quotation_number: Set(quotation_number.clone()),
        leads_id: Set(input.leads_id),
        leads_name: Set(input.leads_name),
        leads_mobile: Set(input.leads_mobile),
        leads_email: Set(input.leads_email),
        product_details: Set(product_details),
        total_without_tax: Set(pricing::round2(totals.total_without_tax)),
        total_with_tax: Set(pricing::round2(totals.total_with_tax)),
        paid_amount: Set(pricing::round2(totals.paid_amount)),
        balance: Set(pricing::round2(totals.balance)),
        discount: Set(input.discount.value),
        gst: Set(input.gst),
        discount_type: Set(input.discount.discount_type.as_str().to_owned()),
        quotation_date: Set(quotation_date.clone()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    Quotation::insert(new_quotation)
        .on_conflict(
            OnConflict::column(quotation::Column::LeadsId)
                .update_columns([
                    quotation::Column::LeadsName,
                    quotation::Column::LeadsMobile,
                    quotation::Column::LeadsEmail,
                    quotation::Column::ProductDetails,
                    quotation::Column::TotalWithoutTax,
                    quotation::Column::TotalWithTax,
                    quotation::Column::PaidAmount,
                    quotation::Column::Balance,
                    quotation::Column::Discount,
                    quotation::Column::Gst,
                    quotation::Column::DiscountType,
                    quotation::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec(db)
        .await?;

    Ok(QuotationReceipt {
        quotation_number,
        quotation_date,
        created: true,
    })
}

/// The quotation row for a lead, or NotFound.
pub async fn get_by_lead(
    db: &DatabaseConnection,
    leads_id: i32,
) -> Result<quotation::Model, ServiceError> {
    Quotation::find()
        .filter(quotation::Column::LeadsId.eq(leads_id))
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)
}

/// Lead details for a follow relation, with nested billing/shipping
/// addresses and the lead's quotation when one exists.
pub async fn get_by_follow_id(
    db: &DatabaseConnection,
    follow_id: i32,
) -> Result<LeadWithQuotation, ServiceError> {
    let lead_row = lead::Entity::find_by_id(follow_id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let quotation_row = Quotation::find()
        .filter(quotation::Column::LeadsId.eq(lead_row.leads_id))
        .one(db)
        .await?;

    Ok(LeadWithQuotation {
        billing_address: lead_row.billing_address(),
        shipping_address: lead_row.shipping_address(),
        quotation: quotation_row,
        lead: lead_row,
    })
}
