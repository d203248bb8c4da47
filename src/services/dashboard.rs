//! Dashboard Aggregator - read-only rollups over leads, invoices and
//! customers. Aggregation happens in Rust over filtered entity queries;
//! dates are server-local calendar days.

use std::collections::HashMap;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::Serialize;

use crate::models::customer::{self, Entity as Customer};
use crate::models::invoice::{self, Entity as Invoice};
use crate::models::lead::{self, Entity as Lead};
use crate::models::purchase::Entity as Purchase;
use crate::services::{ServiceError, pricing, today};

#[derive(Debug, Serialize)]
pub struct EmpDashboard {
    pub leads_followed_today: i64,
    pub leads_names_today: String,
    pub total_sales_value_today: f64,
    pub invoice_count_today: i64,
    pub invoice_lead_names_today: String,
    pub invoice_details_today: String,
}

#[derive(Debug, Serialize)]
pub struct CustomerTransaction {
    pub leads_name: String,
    pub leads_id: i32,
    pub total_with_tax_sum: f64,
    pub paid_amount_sum: f64,
    pub balance_sum: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialData {
    pub total_sales: f64,
    pub total_purchases: f64,
    pub profit: f64,
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !value.is_empty() && !list.iter().any(|v| v.as_str() == value) {
        list.push(value.to_owned());
    }
}

/// Today's activity for one employee: distinct leads followed with their
/// names, plus sales value, count and per-invoice detail strings for
/// invoices raised against the employee's customers.
pub async fn emp_dashboard(
    db: &DatabaseConnection,
    emp_id: i32,
) -> Result<EmpDashboard, ServiceError> {
    let day = today();

    let followed = Lead::find()
        .filter(lead::Column::EmpId.eq(emp_id))
        .filter(lead::Column::CreatedAt.starts_with(&day))
        .all(db)
        .await?;

    let mut followed_ids: Vec<i32> = Vec::new();
    let mut followed_names: Vec<String> = Vec::new();
    for l in &followed {
        if !followed_ids.contains(&l.leads_id) {
            followed_ids.push(l.leads_id);
        }
        push_unique(&mut followed_names, &l.leads_name);
    }

    let customers = Customer::find()
        .filter(customer::Column::EmpId.eq(emp_id))
        .all(db)
        .await?;
    let customer_names: HashMap<i32, String> = customers
        .into_iter()
        .map(|c| (c.leads_id, c.leads_name))
        .collect();

    let mut total_sales = 0.0;
    let mut invoice_numbers: Vec<String> = Vec::new();
    let mut invoice_lead_names: Vec<String> = Vec::new();
    let mut invoice_details: Vec<String> = Vec::new();

    if !customer_names.is_empty() {
        let lead_ids: Vec<i32> = customer_names.keys().copied().collect();
        let todays_invoices = Invoice::find()
            .filter(invoice::Column::LeadsId.is_in(lead_ids))
            .filter(invoice::Column::InvoiceDate.eq(day.as_str()))
            .all(db)
            .await?;

        for inv in &todays_invoices {
            total_sales += inv.total_with_tax;
            if let Some(name) = customer_names.get(&inv.leads_id) {
                push_unique(&mut invoice_lead_names, name);
            }
            if !invoice_numbers.contains(&inv.invoice_number) {
                invoice_numbers.push(inv.invoice_number.clone());
                invoice_details.push(format!(
                    "{} (Price: ₹{:.2})",
                    inv.invoice_number, inv.total_with_tax
                ));
            }
        }
    }

    Ok(EmpDashboard {
        leads_followed_today: followed_ids.len() as i64,
        leads_names_today: followed_names.join(", "),
        total_sales_value_today: pricing::round2(total_sales),
        invoice_count_today: invoice_numbers.len() as i64,
        invoice_lead_names_today: invoice_lead_names.join(", "),
        invoice_details_today: invoice_details.join(", "),
    })
}

/// Per-customer lifetime sums of invoiced, paid and outstanding amounts.
/// Customers without invoices appear with zero sums.
pub async fn customer_transactions(
    db: &DatabaseConnection,
) -> Result<Vec<CustomerTransaction>, ServiceError> {
    let customers = Customer::find().all(db).await?;
    let invoices = Invoice::find().all(db).await?;

    let mut sums: HashMap<i32, (f64, f64, f64)> = HashMap::new();
    for inv in invoices {
        let entry = sums.entry(inv.leads_id).or_insert((0.0, 0.0, 0.0));
        entry.0 += inv.total_with_tax;
        entry.1 += inv.paid_amount;
        entry.2 += inv.balance;
    }

    let rows = customers
        .into_iter()
        .map(|c| {
            let (total, paid, balance) = sums.get(&c.leads_id).copied().unwrap_or((0.0, 0.0, 0.0));
            CustomerTransaction {
                leads_name: c.leads_name,
                leads_id: c.leads_id,
                total_with_tax_sum: pricing::round2(total),
                paid_amount_sum: pricing::round2(paid),
                balance_sum: pricing::round2(balance),
            }
        })
        .collect();

    Ok(rows)
}

/// Global sales vs purchases rollup.
pub async fn financial_data(db: &DatabaseConnection) -> Result<FinancialData, ServiceError> {
    let total_sales: f64 = Invoice::find()
        .all(db)
        .await?
        .iter()
        .map(|i| i.total_with_tax)
        .sum();

    let total_purchases: f64 = Purchase::find()
        .all(db)
        .await?
        .iter()
        .map(|p| p.total_price_with_gst)
        .sum();

    Ok(FinancialData {
        total_sales: pricing::round2(total_sales),
        total_purchases: pricing::round2(total_purchases),
        profit: pricing::round2(total_sales - total_purchases),
    })
}
