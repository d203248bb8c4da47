use sea_orm::sea_query::OnConflict;
use sea_orm::*;

use crate::models::{lead, purchase};

/// Insert demo leads and purchases so the read-only collaborator tables
/// have data for manual runs. Idempotent: rerunning leaves one copy.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();

    let leads = vec![
        lead::ActiveModel {
            follow_id: Set(1),
            emp_id: Set(101),
            leads_id: Set(1001),
            leads_name: Set("Ramesh Traders".to_owned()),
            leads_mobile: Set(Some("9876543210".to_owned())),
            leads_email: Set(Some("ramesh@traders.example".to_owned())),
            product_name: Set(Some("Industrial Mixer".to_owned())),
            leads_company: Set(Some("Ramesh Traders Pvt Ltd".to_owned())),
            leads_city: Set(Some("Coimbatore".to_owned())),
            leads_state: Set(Some("Tamil Nadu".to_owned())),
            gst_number: Set(Some("33AABCR1234M1Z5".to_owned())),
            billing_door_number: Set(Some("12/4".to_owned())),
            billing_street: Set(Some("Mettupalayam Road".to_owned())),
            billing_city: Set(Some("Coimbatore".to_owned())),
            billing_state: Set(Some("Tamil Nadu".to_owned())),
            billing_pincode: Set(Some("641002".to_owned())),
            shipping_door_number: Set(Some("12/4".to_owned())),
            shipping_street: Set(Some("Mettupalayam Road".to_owned())),
            shipping_city: Set(Some("Coimbatore".to_owned())),
            shipping_state: Set(Some("Tamil Nadu".to_owned())),
            shipping_pincode: Set(Some("641002".to_owned())),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        },
        lead::ActiveModel {
            follow_id: Set(2),
            emp_id: Set(101),
            leads_id: Set(1002),
            leads_name: Set("Lakshmi Mills".to_owned()),
            leads_mobile: Set(Some("9123456780".to_owned())),
            leads_email: Set(Some("purchase@lakshmimills.example".to_owned())),
            product_name: Set(Some("Conveyor Belt".to_owned())),
            leads_company: Set(Some("Lakshmi Mills".to_owned())),
            leads_city: Set(Some("Madurai".to_owned())),
            leads_state: Set(Some("Tamil Nadu".to_owned())),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        },
        lead::ActiveModel {
            follow_id: Set(3),
            emp_id: Set(102),
            leads_id: Set(1003),
            leads_name: Set("Sundar Agencies".to_owned()),
            leads_mobile: Set(Some("9988776655".to_owned())),
            product_name: Set(Some("Packaging Unit".to_owned())),
            leads_city: Set(Some("Salem".to_owned())),
            leads_state: Set(Some("Tamil Nadu".to_owned())),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        },
    ];

    for model in leads {
        let res = lead::Entity::insert(model)
            .on_conflict(
                OnConflict::column(lead::Column::FollowId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(db)
            .await;
        // RecordNotInserted just means the row already exists
        if let Err(e) = res {
            if !matches!(e, DbErr::RecordNotInserted) {
                return Err(e);
            }
        }
    }

    let purchases = vec![
        purchase::ActiveModel {
            id: Set(1),
            item_name: Set("Steel sheets".to_owned()),
            total_price_with_gst: Set(45_000.0),
            purchase_date: Set(today.clone()),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
        },
        purchase::ActiveModel {
            id: Set(2),
            item_name: Set("Motor assemblies".to_owned()),
            total_price_with_gst: Set(82_500.0),
            purchase_date: Set(today),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        },
    ];

    for model in purchases {
        let res = purchase::Entity::insert(model)
            .on_conflict(
                OnConflict::column(purchase::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(db)
            .await;
        if let Err(e) = res {
            if !matches!(e, DbErr::RecordNotInserted) {
                return Err(e);
            }
        }
    }

    Ok(())
}
