//! Payment methods record how a transaction was paid for, e.g. a specific credit card.

mod db;
mod domain;
mod dto;

pub use db::create_payment_method_table;
pub use domain::{NewPaymentMethod, PaymentMethod, PaymentMethodPatch, PaymentType};
pub use dto::PaymentMethodDto;
