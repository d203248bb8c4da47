//! Numbering Allocator - sequential human-readable document identifiers.
//!
//! Numbers derive from the current row count of the target table, so they
//! are strictly increasing only under serialized access. No lock is held
//! between the count and the subsequent insert; concurrent submissions can
//! allocate the same suffix. Kept as-is on purpose.

use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

use crate::models::{invoice, quotation};
use crate::services::ServiceError;

const QUOTATION_PREFIX: &str = "KRI";
const INVOICE_PREFIX: &str = "KRINV";

fn format_number(prefix: &str, existing_rows: u64) -> String {
    format!("{}{:05}", prefix, existing_rows + 1)
}

/// Next quotation number, e.g. KRI00001.
pub async fn next_quotation_number(db: &DatabaseConnection) -> Result<String, ServiceError> {
    let count = quotation::Entity::find().count(db).await?;
    Ok(format_number(QUOTATION_PREFIX, count))
}

/// Next invoice number, e.g. KRINV00001. Distinct sequence from quotations.
pub async fn next_invoice_number(db: &DatabaseConnection) -> Result<String, ServiceError> {
    let count = invoice::Entity::find().count(db).await?;
    Ok(format_number(INVOICE_PREFIX, count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_to_five_digits() {
        assert_eq!(format_number(QUOTATION_PREFIX, 0), "KRI00001");
        assert_eq!(format_number(QUOTATION_PREFIX, 9), "KRI00010");
        assert_eq!(format_number(INVOICE_PREFIX, 122), "KRINV00123");
    }

    #[test]
    fn does_not_truncate_past_five_digits() {
        assert_eq!(format_number(QUOTATION_PREFIX, 99_999), "KRI100000");
    }
}
