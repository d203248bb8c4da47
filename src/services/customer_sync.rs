//! Lead/Customer Sync - point-in-time copy of a lead's snapshot into the
//! durable customers table when an invoice is created.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::models::customer::{self, Entity as Customer};
use crate::models::lead::{self, Entity as Lead};
use crate::services::{ServiceError, now_timestamp};

/// Copy the lead's current attributes into the customers table, updating
/// the existing row when one exists for this lead. Later lead edits are
/// not reflected until the next invoice creation. A missing lead row is
/// skipped rather than failed, matching the insert-from-select it replaces.
pub async fn sync_from_lead(db: &DatabaseConnection, leads_id: i32) -> Result<(), ServiceError> {
    let Some(l) = Lead::find()
        .filter(lead::Column::LeadsId.eq(leads_id))
        .one(db)
        .await?
    else {
        tracing::warn!("customer sync skipped: no lead row for leads_id {}", leads_id);
        return Ok(());
    };

    let now = now_timestamp();
    let snapshot = customer::ActiveModel {
        leads_id: Set(l.leads_id),
        follow_id: Set(l.follow_id),
        emp_id: Set(l.emp_id),
        leads_name: Set(l.leads_name),
        leads_mobile: Set(l.leads_mobile),
        leads_email: Set(l.leads_email),
        product_name: Set(l.product_name),
        leads_company: Set(l.leads_company),
        leads_address: Set(l.leads_address),
        leads_state: Set(l.leads_state),
        leads_city: Set(l.leads_city),
        call_discussion: Set(l.call_discussion),
        remember: Set(l.remember),
        reminder_date: Set(l.reminder_date),
        description: Set(l.description),
        call_attended: Set(l.call_attended),
        gst_number: Set(l.gst_number),
        billing_door_number: Set(l.billing_door_number),
        billing_street: Set(l.billing_street),
        billing_landmark: Set(l.billing_landmark),
        billing_city: Set(l.billing_city),
        billing_state: Set(l.billing_state),
        billing_pincode: Set(l.billing_pincode),
        shipping_door_number: Set(l.shipping_door_number),
        shipping_street: Set(l.shipping_street),
        shipping_landmark: Set(l.shipping_landmark),
        shipping_city: Set(l.shipping_city),
        shipping_state: Set(l.shipping_state),
        shipping_pincode: Set(l.shipping_pincode),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    Customer::insert(snapshot)
        .on_conflict(
            OnConflict::column(customer::Column::LeadsId)
                .update_columns([
                    customer::Column::FollowId,
                    customer::Column::EmpId,
                    customer::Column::LeadsName,
                    customer::Column::LeadsMobile,
                    customer::Column::LeadsEmail,
                    customer::Column::ProductName,
                    customer::Column::LeadsCompany,
                    customer::Column::LeadsAddress,
                    customer::Column::LeadsState,
                    customer::Column::LeadsCity,
                    customer::Column::CallDiscussion,
                    customer::Column::Remember,
                    customer::Column::ReminderDate,
                    customer::Column::Description,
                    customer::Column::CallAttended,
                    customer::Column::GstNumber,
                    customer::Column::BillingDoorNumber,
                    customer::Column::BillingStreet,
                    customer::Column::BillingLandmark,
                    customer::Column::BillingCity,
                    customer::Column::BillingState,
                    customer::Column::BillingPincode,
                    customer::Column::ShippingDoorNumber,
                    customer::Column::ShippingStreet,
                    customer::Column::ShippingLandmark,
                    customer::Column::ShippingCity,
                    customer::Column::ShippingState,
                    customer::Column::ShippingPincode,
                    customer::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec(db)
        .await?;

    Ok(())
}
