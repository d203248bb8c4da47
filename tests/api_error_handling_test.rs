use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use kricrm::{api, db};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tower::util::ServiceExt; // for `oneshot`

// Helper to create a test router over an in-memory database
async fn setup_test_app() -> (Router, DatabaseConnection) {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    (api::api_router(db.clone()), db)
}

async fn create_test_lead(db: &DatabaseConnection, emp_id: i32, leads_id: i32, name: &str) {
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let lead = kricrm::models::lead::ActiveModel {
        emp_id: Set(emp_id),
        leads_id: Set(leads_id),
        leads_name: Set(name.to_string()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    lead.insert(db).await.expect("Failed to create lead");
}

fn json_post(uri: &str, payload: serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_lookups_for_unknown_ids_return_404() {
    let (app, _db) = setup_test_app().await;

    let response = app.clone().oneshot(get("/quotation/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(get("/quotation/leads/999"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get("/invoice/leads/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_invoice_list_is_200_with_empty_array() {
    let (app, _db) = setup_test_app().await;

    let response = app.oneshot(get("/invoicelist/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_quotation_submission_created_then_updated() {
    let (app, _db) = setup_test_app().await;

    let payload = serde_json::json!({
        "leads_id": 1001,
        "leads_name": "Ramesh Traders",
        "product_details": [
            {"pro_id": "P1", "quantity": 2, "price": 100},
            {"pro_id": "P2", "quantity": "1", "price": "50"}
        ],
        "discount": "10",
        "discountType": "percentage",
        "gst": 18,
        "paidAmount": 0
    });

    let response = app
        .clone()
        .oneshot(json_post("/quotations", payload.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["quotation_number"], "KRI00001");

    // Same lead again: the row is replaced, not duplicated
    let response = app
        .oneshot(json_post("/quotations", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_invoice_without_transaction_id_is_rejected() {
    let (app, db) = setup_test_app().await;
    create_test_lead(&db, 101, 1001, "Ramesh Traders").await;

    let payload = serde_json::json!({
        "leads_id": 1001,
        "leads_name": "Ramesh Traders",
        "product_details": [{"quantity": 1, "price": 100}],
        "gst": 18,
        "payment_type": "UPI",
        "transactionId": ""
    });

    let response = app
        .clone()
        .oneshot(json_post("/invoices", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unknown payment modes are rejected the same way
    let payload = serde_json::json!({
        "leads_id": 1001,
        "leads_name": "Ramesh Traders",
        "product_details": [],
        "payment_type": "Cheque"
    });

    let response = app.oneshot(json_post("/invoices", payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cash_invoice_needs_no_transaction_id() {
    let (app, db) = setup_test_app().await;
    create_test_lead(&db, 101, 1001, "Ramesh Traders").await;

    let payload = serde_json::json!({
        "leads_id": 1001,
        "leads_name": "Ramesh Traders",
        "product_details": [{"quantity": 1, "price": 100}],
        "gst": 18,
        "payment_type": "Cash"
    });

    let response = app.oneshot(json_post("/invoices", payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["invoice_number"], "KRINV00001");
    assert_eq!(body["payment_type"], "Cash");
}

#[tokio::test]
async fn test_dashboard_is_zeroed_for_unknown_employee() {
    let (app, _db) = setup_test_app().await;

    let response = app.oneshot(get("/empDashBoard/777")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["leads_followed_today"], 0);
    assert_eq!(body["invoice_count_today"], 0);
    assert_eq!(body["leads_names_today"], "");
}

#[tokio::test]
async fn test_health_check() {
    let (app, _db) = setup_test_app().await;

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "kricrm");
}
