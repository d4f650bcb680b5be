//! Database setup for the application.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error, category::create_category_table, payment_method::create_payment_method_table,
    tag::create_tag_table, transaction::create_transaction_tables, vendor::create_vendor_table,
};

/// Enable foreign key enforcement and create every table that does not exist yet.
///
/// The tables are created in a single exclusive transaction so a failure
/// leaves the database untouched.
///
/// # Errors
/// Returns an [Error::SqlError] if any statement fails.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // Must run outside of a transaction, SQLite ignores it otherwise.
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_category_table(&transaction)?;
    create_payment_method_table(&transaction)?;
    create_tag_table(&transaction)?;
    create_vendor_table(&transaction)?;
    create_transaction_tables(&transaction)?;

    transaction.commit()?;

    Ok(())
}
