use kricrm::db;
use kricrm::models::invoice::PaymentType;
use kricrm::models::line_item::{Discount, DiscountType, LineItem};
use kricrm::models::{customer, invoice, lead, quotation};
use kricrm::services::invoice::{self as invoice_service, InvoiceInput};
use kricrm::services::quotation::{self as quotation_service, QuotationInput};
use kricrm::services::{ServiceError, dashboard};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};

// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    // In-memory SQLite for testing
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

// Helper to create a test lead
async fn create_test_lead(
    db: &DatabaseConnection,
    emp_id: i32,
    leads_id: i32,
    name: &str,
) -> i32 {
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let lead = lead::ActiveModel {
        emp_id: Set(emp_id),
        leads_id: Set(leads_id),
        leads_name: Set(name.to_string()),
        leads_mobile: Set(Some("9000000000".to_string())),
        leads_email: Set(Some("lead@example.com".to_string())),
        billing_city: Set(Some("Coimbatore".to_string())),
        shipping_city: Set(Some("Chennai".to_string())),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    let res = lead.insert(db).await.expect("Failed to create lead");
    res.follow_id
}

fn item(quantity: u32, price: f64) -> LineItem {
    LineItem {
        pro_id: Some("P1".to_string()),
        quantity,
        price,
    }
}

fn quotation_input(leads_id: i32, new_paid: f64) -> QuotationInput {
    QuotationInput {
        leads_id,
        leads_name: "Test Lead".to_string(),
        leads_mobile: Some("9000000000".to_string()),
        leads_email: None,
        items: vec![item(2, 100.0), item(1, 50.0)],
        discount: Discount {
            discount_type: DiscountType::Percentage,
            value: 10.0,
        },
        gst: 18.0,
        new_paid,
    }
}

fn invoice_input(leads_id: i32, payment_type: PaymentType) -> InvoiceInput {
    InvoiceInput {
        invoice_number: None,
        leads_id,
        leads_name: "Test Lead".to_string(),
        leads_mobile: None,
        leads_email: None,
        items: vec![item(2, 100.0), item(1, 50.0)],
        discount: Discount {
            discount_type: DiscountType::Percentage,
            value: 10.0,
        },
        gst: 18.0,
        new_paid: 0.0,
        payment_type,
        transaction_id: None,
    }
}

#[tokio::test]
async fn test_quotation_create_then_update_keeps_one_row() {
    let db = setup_test_db().await;
    create_test_lead(&db, 101, 1001, "Ramesh Traders").await;

    let first = quotation_service::upsert_quotation(&db, quotation_input(1001, 0.0))
        .await
        .expect("create failed");
    assert!(first.created);
    assert_eq!(first.quotation_number, "KRI00001");

    let second = quotation_service::upsert_quotation(&db, quotation_input(1001, 0.0))
        .await
        .expect("update failed");
    assert!(!second.created);
    assert_eq!(second.quotation_number, "KRI00001");

    let count = quotation::Entity::find().count(&db).await.unwrap();
    assert_eq!(count, 1);

    let row = quotation_service::get_by_lead(&db, 1001).await.unwrap();
    assert!((row.total_with_tax - 265.50).abs() < 0.01);
    assert!((row.total_without_tax - 225.0).abs() < 0.01);
}

#[tokio::test]
async fn test_quotation_numbers_increase_sequentially() {
    let db = setup_test_db().await;

    for (i, leads_id) in [2001, 2002, 2003].iter().enumerate() {
        let receipt = quotation_service::upsert_quotation(&db, quotation_input(*leads_id, 0.0))
            .await
            .expect("create failed");
        assert_eq!(receipt.quotation_number, format!("KRI{:05}", i + 1));
    }
}

#[tokio::test]
async fn test_quotation_payments_accumulate() {
    let db = setup_test_db().await;

    quotation_service::upsert_quotation(&db, quotation_input(3001, 100.0))
        .await
        .unwrap();
    quotation_service::upsert_quotation(&db, quotation_input(3001, 65.50))
        .await
        .unwrap();

    let row = quotation_service::get_by_lead(&db, 3001).await.unwrap();
    assert!((row.paid_amount - 165.50).abs() < 0.01);
    assert!((row.balance - 100.0).abs() < 0.01);
}

#[tokio::test]
async fn test_quotation_lookup_by_follow_id() {
    let db = setup_test_db().await;
    let follow_id = create_test_lead(&db, 101, 1001, "Ramesh Traders").await;

    // No quotation yet: lead details come back with a null quotation
    let details = quotation_service::get_by_follow_id(&db, follow_id)
        .await
        .expect("lookup failed");
    assert_eq!(details.lead.leads_name, "Ramesh Traders");
    assert_eq!(details.billing_address.city.as_deref(), Some("Coimbatore"));
    assert_eq!(details.shipping_address.city.as_deref(), Some("Chennai"));
    assert!(details.quotation.is_none());

    quotation_service::upsert_quotation(&db, quotation_input(1001, 0.0))
        .await
        .unwrap();

    let details = quotation_service::get_by_follow_id(&db, follow_id)
        .await
        .unwrap();
    assert!(details.quotation.is_some());

    // Unknown follow id is NotFound
    let missing = quotation_service::get_by_follow_id(&db, 9999).await;
    assert!(matches!(missing, Err(ServiceError::NotFound)));
}

#[tokio::test]
async fn test_invoice_creation_syncs_customer_once() {
    let db = setup_test_db().await;
    create_test_lead(&db, 101, 1001, "Ramesh Traders").await;

    let receipt = invoice_service::upsert_invoice(&db, invoice_input(1001, PaymentType::Cash))
        .await
        .expect("create failed");
    assert!(receipt.created);
    assert_eq!(receipt.invoice_number, "KRINV00001");

    let customers = customer::Entity::find().all(&db).await.unwrap();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0].leads_id, 1001);
    assert_eq!(customers[0].leads_name, "Ramesh Traders");
    assert_eq!(customers[0].emp_id, 101);

    // A second invoice for the same lead refreshes, never duplicates
    let receipt = invoice_service::upsert_invoice(&db, invoice_input(1001, PaymentType::Cash))
        .await
        .unwrap();
    assert_eq!(receipt.invoice_number, "KRINV00002");

    let customers = customer::Entity::find().count(&db).await.unwrap();
    assert_eq!(customers, 1);

    let invoices = invoice_service::list_for_lead(&db, 1001).await.unwrap();
    assert_eq!(invoices.len(), 2);
}

#[tokio::test]
async fn test_invoice_update_targets_existing_row() {
    let db = setup_test_db().await;
    create_test_lead(&db, 101, 1001, "Ramesh Traders").await;

    let created = invoice_service::upsert_invoice(&db, invoice_input(1001, PaymentType::Cash))
        .await
        .unwrap();

    let mut update = invoice_input(1001, PaymentType::Upi);
    update.invoice_number = Some(created.invoice_number.clone());
    update.transaction_id = Some("TXN-42".to_string());
    update.new_paid = 65.50;

    let updated = invoice_service::upsert_invoice(&db, update).await.unwrap();
    assert!(!updated.created);
    assert_eq!(updated.invoice_number, created.invoice_number);

    let rows = invoice::Entity::find().all(&db).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].payment_type, "UPI");
    assert_eq!(rows[0].transaction_id.as_deref(), Some("TXN-42"));
    assert!((rows[0].paid_amount - 65.50).abs() < 0.01);

    // Updating a number that never existed is NotFound
    let mut missing = invoice_input(1001, PaymentType::Cash);
    missing.invoice_number = Some("KRINV99999".to_string());
    let res = invoice_service::upsert_invoice(&db, missing).await;
    assert!(matches!(res, Err(ServiceError::NotFound)));
}

#[tokio::test]
async fn test_invoice_validation_rejects_missing_transaction_id() {
    let db = setup_test_db().await;
    create_test_lead(&db, 101, 1001, "Ramesh Traders").await;

    let res = invoice_service::upsert_invoice(&db, invoice_input(1001, PaymentType::Upi)).await;
    assert!(matches!(res, Err(ServiceError::Validation(_))));

    let mut blank = invoice_input(1001, PaymentType::Banking);
    blank.transaction_id = Some("   ".to_string());
    let res = invoice_service::upsert_invoice(&db, blank).await;
    assert!(matches!(res, Err(ServiceError::Validation(_))));

    // Nothing was persisted and no customer was synced
    assert_eq!(invoice::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(customer::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_invoice_join_with_quotation() {
    let db = setup_test_db().await;
    create_test_lead(&db, 101, 1001, "Ramesh Traders").await;

    // No quotation at all: NotFound
    let res = invoice_service::get_by_lead(&db, 1001).await;
    assert!(matches!(res, Err(ServiceError::NotFound)));

    quotation_service::upsert_quotation(&db, quotation_input(1001, 0.0))
        .await
        .unwrap();

    // Quotation without invoice: invoice columns are null
    let joined = invoice_service::get_by_lead(&db, 1001).await.unwrap();
    assert!(joined.invoice_number.is_none());

    invoice_service::upsert_invoice(&db, invoice_input(1001, PaymentType::Cash))
        .await
        .unwrap();
    let joined = invoice_service::get_by_lead(&db, 1001).await.unwrap();
    assert_eq!(joined.invoice_number.as_deref(), Some("KRINV00001"));
    assert_eq!(joined.payment_type.as_deref(), Some("Cash"));
}

#[tokio::test]
async fn test_invoice_history_filters_by_employee() {
    let db = setup_test_db().await;
    create_test_lead(&db, 101, 1001, "Ramesh Traders").await;
    create_test_lead(&db, 102, 1002, "Lakshmi Mills").await;

    invoice_service::upsert_invoice(&db, invoice_input(1001, PaymentType::Cash))
        .await
        .unwrap();

    let mut other = invoice_input(1002, PaymentType::Cash);
    other.leads_name = "Lakshmi Mills".to_string();
    invoice_service::upsert_invoice(&db, other).await.unwrap();

    let all = invoice_service::history(&db, None).await.unwrap();
    assert_eq!(all.len(), 2);

    let emp = invoice_service::history(&db, Some(101)).await.unwrap();
    assert_eq!(emp.len(), 1);
    assert_eq!(emp[0].leads_id, 1001);
    assert_eq!(emp[0].invoice_number, "KRINV00001");

    // Leads without invoices are omitted entirely
    let none = invoice_service::history(&db, Some(999)).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_emp_dashboard_counts_todays_activity() {
    let db = setup_test_db().await;
    create_test_lead(&db, 101, 1001, "Ramesh Traders").await;
    create_test_lead(&db, 101, 1002, "Lakshmi Mills").await;

    invoice_service::upsert_invoice(&db, invoice_input(1001, PaymentType::Cash))
        .await
        .unwrap();

    let data = dashboard::emp_dashboard(&db, 101).await.unwrap();
    assert_eq!(data.leads_followed_today, 2);
    assert!(data.leads_names_today.contains("Ramesh Traders"));
    assert!(data.leads_names_today.contains("Lakshmi Mills"));
    assert_eq!(data.invoice_count_today, 1);
    assert!((data.total_sales_value_today - 265.50).abs() < 0.01);
    assert!(data.invoice_details_today.contains("KRINV00001"));

    // Another employee sees an empty day
    let other = dashboard::emp_dashboard(&db, 999).await.unwrap();
    assert_eq!(other.leads_followed_today, 0);
    assert_eq!(other.invoice_count_today, 0);
    assert_eq!(other.leads_names_today, "");
}

#[tokio::test]
async fn test_customer_transactions_and_financial_rollup() {
    let db = setup_test_db().await;
    create_test_lead(&db, 101, 1001, "Ramesh Traders").await;

    invoice_service::upsert_invoice(&db, invoice_input(1001, PaymentType::Cash))
        .await
        .unwrap();
    invoice_service::upsert_invoice(&db, invoice_input(1001, PaymentType::Cash))
        .await
        .unwrap();

    let transactions = dashboard::customer_transactions(&db).await.unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].leads_id, 1001);
    assert!((transactions[0].total_with_tax_sum - 531.0).abs() < 0.01);

    let financial = dashboard::financial_data(&db).await.unwrap();
    assert!((financial.total_sales - 531.0).abs() < 0.01);
    assert_eq!(financial.total_purchases, 0.0);
    assert!((financial.profit - 531.0).abs() < 0.01);
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let db = setup_test_db().await;

    kricrm::seed::seed_demo_data(&db).await.expect("first seed");
    kricrm::seed::seed_demo_data(&db).await.expect("second seed");

    let leads = lead::Entity::find().count(&db).await.unwrap();
    assert_eq!(leads, 3);
}
