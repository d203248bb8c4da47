//! Invoice lifecycle - creation with customer sync, update by number,
//! historical listings and the lead+invoice join.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Serialize;

use crate::models::invoice::{self, Entity as Invoice, PaymentType};
use crate::models::lead::{self, Entity as Lead};
use crate::models::line_item::{Discount, LineItem};
use crate::models::quotation::{self, Entity as Quotation};
use crate::services::quotation::encode_items;
use crate::services::{ServiceError, customer_sync, now_timestamp, pricing, today};

#[derive(Debug, Clone)]
pub struct InvoiceInput {
    /// Present when updating an existing invoice; absent on creation.
    pub invoice_number: Option<String>,
    pub leads_id: i32,
    pub leads_name: String,
    pub leads_mobile: Option<String>,
    pub leads_email: Option<String>,
    pub items: Vec<LineItem>,
    pub discount: Discount,
    pub gst: f64,
    pub new_paid: f64,
    pub payment_type: PaymentType,
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceReceipt {
    pub invoice_number: String,
    pub invoice_date: String,
    pub payment_type: String,
    pub transaction_id: Option<String>,
    #[serde(skip)]
    pub created: bool,
}

/// Quotation row joined with the lead's invoice, when one exists.
#[derive(Debug, Serialize)]
pub struct QuotationWithInvoice {
    #[serde(flatten)]
    pub quotation: quotation::Model,
    pub invoice_number: Option<String>,
    pub invoice_date: Option<String>,
    pub payment_type: Option<String>,
    pub transaction_id: Option<String>,
}

/// One row of the invoice history report: invoice fields joined with the
/// snapshot of the lead it was raised against.
#[derive(Debug, Serialize)]
pub struct InvoiceHistoryRow {
    pub follow_id: i32,
    pub emp_id: i32,
    pub leads_id: i32,
    pub leads_company: Option<String>,
    pub product_name: Option<String>,
    pub remember: Option<String>,
    pub reminder_date: Option<String>,
    pub description: Option<String>,
    pub call_attended: Option<String>,
    pub created_at: String,
    pub updated_at: String,
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
    pub invoice_id: i32,
    pub invoice_number: String,
    pub leads_name: String,
    pub leads_mobile: Option<String>,
    pub leads_email: Option<String>,
    pub product_details: String,
    pub discount: f64,
    pub gst: f64,
    pub total_without_tax: f64,
    pub total_with_tax: f64,
    pub payment_type: String,
    pub invoice_date: String,
    pub invoice_created_at: String,
    pub invoice_updated_at: String,
    pub discount_type: String,
    pub transaction_id: Option<String>,
}

/// Reject non-cash payments without a transaction reference. The store
/// itself persists whatever it is given; this gate runs first.
fn validate_payment(
    payment_type: PaymentType,
    transaction_id: &Option<String>,
) -> Result<(), ServiceError> {
    if payment_type.requires_transaction_id()
        && transaction_id.as_deref().map(str::trim).unwrap_or("").is_empty()
    {
        return Err(ServiceError::Validation(format!(
            "transaction_id is required for {} payments",
            payment_type.as_str()
        )));
    }
    Ok(())
}

/// Create a new invoice (allocating a number and syncing the customer
/// snapshot) or, when a number is supplied, update that invoice in place.
/// Customer sync runs on creation only.
pub async fn upsert_invoice(
    db: &DatabaseConnection,
    input: InvoiceInput,
) -> Result<InvoiceReceipt, ServiceError> {
    validate_payment(input.payment_type, &input.transaction_id)?;

    let product_details = encode_items(&input.items)?;
    let now = now_timestamp();

    if let Some(number) = input.invoice_number {
        let current = Invoice::find()
            .filter(invoice::Column::InvoiceNumber.eq(number.as_str()))
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound)?;

        let totals = pricing::compute(
            &input.items,
            &input.discount,
            input.gst,
            current.paid_amount,
            input.new_paid,
        );
        let date = current.invoice_date.clone();

        let mut active: invoice::ActiveModel = current.into();
        active.leads_id = Set(input.leads_id);
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
        active.payment_type = Set(input.payment_type.as_str().to_owned());
        active.transaction_id = Set(input.transaction_id.clone());
        active.updated_at = Set(now);
        active.update(db).await?;

        return Ok(InvoiceReceipt {
            invoice_number: number,
            invoice_date: date,
            payment_type: input.payment_type.as_str().to_owned(),
            transaction_id: input.transaction_id,
            created: false,
        });
    }

    let invoice_number = super::numbering::next_invoice_number(db).await?;
    let invoice_date = today();
    let totals = pricing::compute(&input.items, &input.discount, input.gst, 0.0, input.new_paid);

    let new_invoice = invoice::ActiveModel {
        invoice_number: Set(invoice_number.clone()),
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
        payment_type: Set(input.payment_type.as_str().to_owned()),
        transaction_id: Set(input.transaction_id.clone()),
        invoice_date: Set(invoice_date.clone()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    new_invoice.insert(db).await?;

    // Not atomic with the insert above: a crash here leaves an invoice
    // without a refreshed customer snapshot.
    customer_sync::sync_from_lead(db, input.leads_id).await?;

    Ok(InvoiceReceipt {
        invoice_number,
        invoice_date,
        payment_type: input.payment_type.as_str().to_owned(),
        transaction_id: input.transaction_id,
        created: true,
    })
}

/// Quotation left-joined with the newest invoice for a lead. NotFound when
/// the lead has no quotation.
pub async fn get_by_lead(
    db: &DatabaseConnection,
    leads_id: i32,
) -> Result<QuotationWithInvoice, ServiceError> {
    let quotation_row = Quotation::find()
        .filter(quotation::Column::LeadsId.eq(leads_id))
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let invoice_row = Invoice::find()
        .filter(invoice::Column::LeadsId.eq(leads_id))
        .order_by_desc(invoice::Column::Id)
        .one(db)
        .await?;

    Ok(QuotationWithInvoice {
        quotation: quotation_row,
        invoice_number: invoice_row.as_ref().map(|i| i.invoice_number.clone()),
        invoice_date: invoice_row.as_ref().map(|i| i.invoice_date.clone()),
        payment_type: invoice_row.as_ref().map(|i| i.payment_type.clone()),
        transaction_id: invoice_row.and_then(|i| i.transaction_id),
    })
}

/// All invoice rows ever raised for a lead, oldest first.
pub async fn list_for_lead(
    db: &DatabaseConnection,
    leads_id: i32,
) -> Result<Vec<invoice::Model>, ServiceError> {
    let rows = Invoice::find()
        .filter(invoice::Column::LeadsId.eq(leads_id))
        .order_by_asc(invoice::Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

/// Invoice history joined with lead snapshots, optionally restricted to
/// one employee's leads. Leads without invoices are omitted.
pub async fn history(
    db: &DatabaseConnection,
    emp_id: Option<i32>,
) -> Result<Vec<InvoiceHistoryRow>, ServiceError> {
    let mut lead_query = Lead::find();
    if let Some(emp_id) = emp_id {
        lead_query = lead_query.filter(lead::Column::EmpId.eq(emp_id));
    }
    let leads = lead_query.all(db).await?;

    let leads_by_id: HashMap<i32, lead::Model> =
        leads.into_iter().map(|l| (l.leads_id, l)).collect();

    if leads_by_id.is_empty() {
        return Ok(Vec::new());
    }

    let lead_ids: Vec<i32> = leads_by_id.keys().copied().collect();
    let invoices = Invoice::find()
        .filter(invoice::Column::LeadsId.is_in(lead_ids))
        .order_by_asc(invoice::Column::Id)
        .all(db)
        .await?;

    let rows = invoices
        .into_iter()
        .filter_map(|inv| {
            let l = leads_by_id.get(&inv.leads_id)?;
            Some(InvoiceHistoryRow {
                follow_id: l.follow_id,
                emp_id: l.emp_id,
                leads_id: l.leads_id,
                leads_company: l.leads_company.clone(),
                product_name: l.product_name.clone(),
                remember: l.remember.clone(),
                reminder_date: l.reminder_date.clone(),
                description: l.description.clone(),
                call_attended: l.call_attended.clone(),
                created_at: l.created_at.clone(),
                updated_at: l.updated_at.clone(),
                gst_number: l.gst_number.clone(),
                billing_door_number: l.billing_door_number.clone(),
                billing_street: l.billing_street.clone(),
                billing_landmark: l.billing_landmark.clone(),
                billing_city: l.billing_city.clone(),
                billing_state: l.billing_state.clone(),
                billing_pincode: l.billing_pincode.clone(),
                shipping_door_number: l.shipping_door_number.clone(),
                shipping_street: l.shipping_street.clone(),
                shipping_landmark: l.shipping_landmark.clone(),
                shipping_city: l.shipping_city.clone(),
                shipping_state: l.shipping_state.clone(),
                shipping_pincode: l.shipping_pincode.clone(),
                invoice_id: inv.id,
                invoice_number: inv.invoice_number,
                leads_name: inv.leads_name,
                leads_mobile: inv.leads_mobile,
                leads_email: inv.leads_email,
                product_details: inv.product_details,
                discount: inv.discount,
                gst: inv.gst,
                total_without_tax: inv.total_without_tax,
                total_with_tax: inv.total_with_tax,
                payment_type: inv.payment_type,
                invoice_date: inv.invoice_date,
                invoice_created_at: inv.created_at,
                invoice_updated_at: inv.updated_at,
                discount_type: inv.discount_type,
                transaction_id: inv.transaction_id,
            })
        })
        .collect();

    Ok(rows)
}
