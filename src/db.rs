use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Lead snapshots, written by the lead-capture flows. This cluster only
    // reads them (and the demo seed inserts a few).
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS following_leads (
            follow_id INTEGER PRIMARY KEY AUTOINCREMENT,
            emp_id INTEGER NOT NULL,
            leads_id INTEGER NOT NULL,
            leads_name TEXT NOT NULL,
            leads_mobile TEXT,
            leads_email TEXT,
            product_name TEXT,
            leads_company TEXT,
            leads_address TEXT,
            leads_state TEXT,
            leads_city TEXT,
            call_discussion TEXT,
            remember TEXT,
            reminder_date TEXT,
            description TEXT,
            call_attended TEXT,
            gst_number TEXT,
            billing_door_number TEXT,
            billing_street TEXT,
            billing_landmark TEXT,
            billing_city TEXT,
            billing_state TEXT,
            billing_pincode TEXT,
            shipping_door_number TEXT,
            shipping_street TEXT,
            shipping_landmark TEXT,
            shipping_city TEXT,
            shipping_state TEXT,
            shipping_pincode TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_following_leads_emp_id ON following_leads(emp_id);
        CREATE INDEX IF NOT EXISTS idx_following_leads_leads_id ON following_leads(leads_id);
        "#
        .to_owned(),
    ))
    .await?;

    // One quotation per lead. The UNIQUE index on leads_id is what makes
    // the ON CONFLICT upsert a single conditional write.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS quotation_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            quotation_number TEXT NOT NULL UNIQUE,
            leads_id INTEGER NOT NULL UNIQUE,
            leads_name TEXT NOT NULL,
            leads_mobile TEXT,
            leads_email TEXT,
            product_details TEXT NOT NULL DEFAULT '[]',
            total_without_tax REAL NOT NULL DEFAULT 0,
            total_with_tax REAL NOT NULL DEFAULT 0,
            paid_amount REAL NOT NULL DEFAULT 0,
            balance REAL NOT NULL DEFAULT 0,
            discount REAL NOT NULL DEFAULT 0,
            gst REAL NOT NULL DEFAULT 0,
            discount_type TEXT NOT NULL DEFAULT 'percentage',
            quotation_date TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#
        .to_owned(),
    ))
    .await?;

    // Invoices are historical: several rows per lead are allowed, updates
    // target a row by its unique invoice_number.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS invoice_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            invoice_number TEXT NOT NULL UNIQUE,
            leads_id INTEGER NOT NULL,
            leads_name TEXT NOT NULL,
            leads_mobile TEXT,
            leads_email TEXT,
            product_details TEXT NOT NULL DEFAULT '[]',
            total_without_tax REAL NOT NULL DEFAULT 0,
            total_with_tax REAL NOT NULL DEFAULT 0,
            paid_amount REAL NOT NULL DEFAULT 0,
            balance REAL NOT NULL DEFAULT 0,
            discount REAL NOT NULL DEFAULT 0,
            gst REAL NOT NULL DEFAULT 0,
            discount_type TEXT NOT NULL DEFAULT 'percentage',
            payment_type TEXT NOT NULL DEFAULT 'Cash',
            transaction_id TEXT,
            invoice_date TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_invoice_history_leads_id ON invoice_history(leads_id);
        CREATE INDEX IF NOT EXISTS idx_invoice_history_invoice_date ON invoice_history(invoice_date);
        "#
        .to_owned(),
    ))
    .await?;

    // Durable customer snapshots, refreshed on invoice creation.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS customers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            leads_id INTEGER NOT NULL UNIQUE,
            follow_id INTEGER NOT NULL,
            emp_id INTEGER NOT NULL,
            leads_name TEXT NOT NULL,
            leads_mobile TEXT,
            leads_email TEXT,
            product_name TEXT,
            leads_company TEXT,
            leads_address TEXT,
            leads_state TEXT,
            leads_city TEXT,
            call_discussion TEXT,
            remember TEXT,
            reminder_date TEXT,
            description TEXT,
            call_attended TEXT,
            gst_number TEXT,
            billing_door_number TEXT,
            billing_street TEXT,
            billing_landmark TEXT,
            billing_city TEXT,
            billing_state TEXT,
            billing_pincode TEXT,
            shipping_door_number TEXT,
            shipping_street TEXT,
            shipping_landmark TEXT,
            shipping_city TEXT,
            shipping_state TEXT,
            shipping_pincode TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_customers_emp_id ON customers(emp_id);
        "#
        .to_owned(),
    ))
    .await?;

    // Purchase ledger, only summed by the financial rollup.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS purchases (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            item_name TEXT NOT NULL,
            total_price_with_gst REAL NOT NULL DEFAULT 0,
            purchase_date TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#
        .to_owned(),
    ))
    .await?;

    Ok(())
}
