//! Pricing Calculator - subtotal, discount, tax and balance derivation.
//!
//! Pure floating-point arithmetic; amounts are rounded to two decimals
//! only at the presentation boundary (round2).

use crate::models::line_item::{Discount, DiscountType, LineItem};

/// Derived monetary figures for one quotation or invoice submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    pub subtotal: f64,
    /// Subtotal after discount, before tax.
    pub total_without_tax: f64,
    pub total_with_tax: f64,
    /// Cumulative paid amount (prior payments plus the new one).
    pub paid_amount: f64,
    pub balance: f64,
}

/// Compute all totals for a line-item list. Missing or unparseable
/// quantities and prices have already been coerced to zero upstream.
pub fn compute(
    items: &[LineItem],
    discount: &Discount,
    gst_percent: f64,
    prior_paid: f64,
    new_paid: f64,
) -> Totals {
    let subtotal: f64 = items.iter().map(LineItem::line_total).sum();

    let discounted = match discount.discount_type {
        DiscountType::Percentage => subtotal - subtotal * discount.value / 100.0,
        DiscountType::Amount => subtotal - discount.value,
    };

    let total_with_tax = discounted + discounted * gst_percent / 100.0;

    let paid_amount = prior_paid + new_paid;
    let balance = total_with_tax - paid_amount;

    Totals {
        subtotal,
        total_without_tax: discounted,
        total_with_tax,
        paid_amount,
        balance,
    }
}

/// Round to two decimal places for storage and display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: u32, price: f64) -> LineItem {
        LineItem {
            pro_id: None,
            quantity,
            price,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 0.01,
            "expected {} within ±0.01 of {}",
            actual,
            expected
        );
    }

    #[test]
    fn percentage_discount_and_tax() {
        let items = [item(2, 100.0), item(1, 50.0)];
        let discount = Discount {
            discount_type: DiscountType::Percentage,
            value: 10.0,
        };

        let totals = compute(&items, &discount, 18.0, 0.0, 0.0);
        assert_close(totals.subtotal, 250.0);
        assert_close(totals.total_without_tax, 225.0);
        assert_close(totals.total_with_tax, 265.50);
    }

    #[test]
    fn flat_amount_discount() {
        let items = [item(1, 500.0)];
        let discount = Discount {
            discount_type: DiscountType::Amount,
            value: 50.0,
        };

        let totals = compute(&items, &discount, 0.0, 0.0, 0.0);
        assert_close(totals.total_without_tax, 450.0);
        assert_close(totals.total_with_tax, 450.0);
    }

    #[test]
    fn balance_accumulates_payments() {
        let items = [item(2, 100.0), item(1, 50.0)];
        let discount = Discount {
            discount_type: DiscountType::Percentage,
            value: 10.0,
        };

        let totals = compute(&items, &discount, 18.0, 100.0, 65.50);
        assert_close(totals.paid_amount, 165.50);
        assert_close(totals.balance, 100.0);
    }

    #[test]
    fn zeroed_items_contribute_nothing() {
        let items = [item(0, 100.0), item(3, 0.0), item(2, 25.0)];
        let totals = compute(&items, &Discount::default(), 0.0, 0.0, 0.0);
        assert_close(totals.subtotal, 50.0);
    }

    #[test]
    fn empty_item_list_is_zero_everywhere() {
        let totals = compute(&[], &Discount::default(), 18.0, 0.0, 0.0);
        assert_close(totals.subtotal, 0.0);
        assert_close(totals.total_with_tax, 0.0);
        assert_close(totals.balance, 0.0);
    }

    #[test]
    fn round2_truncates_to_cents() {
        assert_eq!(round2(265.504), 265.5);
        assert_eq!(round2(1.0 / 3.0), 0.33);
        assert_eq!(round2(100.0), 100.0);
    }
}
