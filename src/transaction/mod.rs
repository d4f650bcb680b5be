//! Transactions: amounts of money spent at a point in time.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model plus the drafts and patches used to write it
//! - Database functions for storing transactions and their tags, and for
//!   paging through the transactions of a category, payment method, vendor or tag
//! - The service and HTTP handlers for `/api/transactions`

mod db;
mod domain;
mod dto;
mod handlers;
mod service;

pub use db::create_transaction_tables;
pub use domain::{NewTransaction, Transaction, TransactionDetails, TransactionOwner, TransactionPatch};
pub use dto::{TransactionDto, TransactionRequest};
pub use handlers::routes;
pub use service::page_for_owner;
