pub mod customer;
pub mod invoice;
pub mod lead;
pub mod line_item;
pub mod purchase;
pub mod quotation;

pub use invoice::PaymentType;
pub use line_item::{Discount, DiscountType, LineItem};
