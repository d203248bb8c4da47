use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One line of a quotation or invoice. Owned by its parent document and
/// persisted as part of the JSON list in product_details, never as rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub pro_id: Option<String>,
    pub quantity: u32,
    pub price: f64,
}

impl LineItem {
    /// Build a line item from a loosely typed JSON object as submitted by
    /// the client. Quantity and price may arrive as numbers, numeric
    /// strings, or be absent entirely; anything unparseable counts as 0.
    pub fn from_value(value: &Value) -> Self {
        LineItem {
            pro_id: value.get("pro_id").and_then(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            }),
            quantity: lenient_u32(value.get("quantity")),
            price: lenient_f64(value.get("price")),
        }
    }

    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}

/// How a discount value is applied to the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Amount,
}

impl DiscountType {
    /// The wire format is inconsistent about casing ("percentage" vs
    /// "Amount"); anything that is not a percentage is a flat amount.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("percentage") {
            DiscountType::Percentage
        } else {
            DiscountType::Amount
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "percentage",
            DiscountType::Amount => "amount",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub discount_type: DiscountType,
    pub value: f64,
}

impl Default for Discount {
    fn default() -> Self {
        Discount {
            discount_type: DiscountType::Percentage,
            value: 0.0,
        }
    }
}

/// Coerce an optional JSON value to f64, treating missing, null and
/// non-numeric input as 0.
pub fn lenient_f64(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Coerce an optional JSON value to a non-negative integer quantity.
pub fn lenient_u32(value: Option<&Value>) -> u32 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .map(|v| u32::try_from(v).unwrap_or(0))
            .unwrap_or_else(|| {
                // Fractional quantities are truncated, negatives dropped to 0.
                n.as_f64().map(|f| if f > 0.0 { f as u32 } else { 0 }).unwrap_or(0)
            }),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            trimmed
                .parse::<u32>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|f| if f > 0.0 { f as u32 } else { 0 }))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

/// Parse the submitted product list, coercing each entry.
pub fn parse_line_items(values: &[Value]) -> Vec<LineItem> {
    values.iter().map(LineItem::from_value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerces_strings_and_numbers() {
        let item = LineItem::from_value(&json!({"pro_id": 7, "quantity": "3", "price": "12.50"}));
        assert_eq!(item.pro_id.as_deref(), Some("7"));
        assert_eq!(item.quantity, 3);
        assert_eq!(item.price, 12.5);
        assert_eq!(item.line_total(), 37.5);
    }

    #[test]
    fn missing_and_garbage_fields_become_zero() {
        let item = LineItem::from_value(&json!({"pro_id": "A1"}));
        assert_eq!(item.quantity, 0);
        assert_eq!(item.price, 0.0);

        let item = LineItem::from_value(&json!({"quantity": "lots", "price": null}));
        assert_eq!(item.quantity, 0);
        assert_eq!(item.price, 0.0);
    }

    #[test]
    fn quantity_beyond_u32_range_becomes_zero() {
        let item = LineItem::from_value(&json!({"quantity": 4294967297u64, "price": 10}));
        assert_eq!(item.quantity, 0);
        assert_eq!(item.line_total(), 0.0);

        let item = LineItem::from_value(&json!({"quantity": -5, "price": 10}));
        assert_eq!(item.quantity, 0);
    }

    #[test]
    fn discount_type_parsing_is_case_insensitive() {
        assert_eq!(DiscountType::parse("percentage"), DiscountType::Percentage);
        assert_eq!(DiscountType::parse("Percentage"), DiscountType::Percentage);
        assert_eq!(DiscountType::parse("Amount"), DiscountType::Amount);
        assert_eq!(DiscountType::parse(""), DiscountType::Amount);
    }
}
