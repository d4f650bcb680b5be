//! Transaction use cases: CRUD with reference checks, and owner pages.

use rusqlite::Connection;

use crate::{
    Error,
    category::Category,
    database_id::DatabaseId,
    pagination::PageRequest,
    payment_method::PaymentMethod,
    resource,
    tag::{Tag, TagId},
    transaction::{
        NewTransaction, Transaction, TransactionDetails, TransactionOwner, TransactionPatch,
    },
    vendor::Vendor,
};

const ENTITY: &str = "Transaction";

/// Get every transaction, oldest first.
pub fn list(connection: &Connection) -> Result<Vec<TransactionDetails>, Error> {
    Transaction::find_all(connection)?
        .into_iter()
        .map(|transaction| expand(transaction, connection))
        .collect()
}

/// Get the transaction with `id`.
///
/// # Errors
/// Returns an [Error::NotFound] if there is no such transaction.
pub fn get(id: DatabaseId, connection: &Connection) -> Result<TransactionDetails, Error> {
    expand(find(id, connection)?, connection)
}

/// Create a transaction.
///
/// # Errors
/// Returns an [Error::NotFound] naming the first referenced record that does not exist.
pub fn create(draft: NewTransaction, connection: &Connection) -> Result<TransactionDetails, Error> {
    check_references(
        draft.category_id,
        draft.payment_method_id,
        draft.vendor_id,
        &draft.tag_ids,
        connection,
    )?;

    let transaction = Transaction::insert(draft, connection)?;
    tracing::debug!("created transaction {}", transaction.id);

    expand(transaction, connection)
}

/// Overwrite every mutable field of the transaction with `id`.
///
/// # Errors
/// Returns an [Error::NotFound] if the transaction or a record it refers to does not exist.
pub fn replace(
    id: DatabaseId,
    draft: NewTransaction,
    connection: &Connection,
) -> Result<TransactionDetails, Error> {
    let mut transaction = find(id, connection)?;
    check_references(
        draft.category_id,
        draft.payment_method_id,
        draft.vendor_id,
        &draft.tag_ids,
        connection,
    )?;

    transaction.replace_with(draft);
    transaction.update(connection)?;

    expand(transaction, connection)
}

/// Overwrite the fields set in `patch` on the transaction with `id`.
///
/// # Errors
/// Returns an [Error::NotFound] if the transaction or a record it refers to does not exist.
pub fn patch(
    id: DatabaseId,
    patch: TransactionPatch,
    connection: &Connection,
) -> Result<TransactionDetails, Error> {
    let mut transaction = find(id, connection)?;

    transaction.merge(patch);
    check_references(
        transaction.category_id,
        transaction.payment_method_id,
        transaction.vendor_id,
        &transaction.tag_ids,
        connection,
    )?;
    transaction.update(connection)?;

    expand(transaction, connection)
}

/// Delete the transaction with `id`.
///
/// # Errors
/// Returns an [Error::NotFound] if there is no such transaction.
pub fn delete(id: DatabaseId, connection: &Connection) -> Result<(), Error> {
    find(id, connection)?;

    Transaction::delete_by_id(id, connection)
}

/// Get one page of the transactions that belong to `owner` and the total
/// number of transactions it owns.
///
/// The caller is responsible for checking that `owner` exists.
pub fn page_for_owner(
    owner: TransactionOwner,
    request: PageRequest,
    connection: &Connection,
) -> Result<(Vec<TransactionDetails>, u64), Error> {
    let total = Transaction::count_for_owner(owner, connection)?;
    let details = Transaction::find_page_for_owner(owner, request, connection)?
        .into_iter()
        .map(|transaction| expand(transaction, connection))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((details, total))
}

fn find(id: DatabaseId, connection: &Connection) -> Result<Transaction, Error> {
    Transaction::find_by_id(id, connection)?.ok_or_else(|| Error::not_found_id(ENTITY, id))
}

fn check_references(
    category_id: Option<DatabaseId>,
    payment_method_id: Option<DatabaseId>,
    vendor_id: Option<DatabaseId>,
    tag_ids: &[TagId],
    connection: &Connection,
) -> Result<(), Error> {
    if let Some(id) = category_id {
        resource::get::<Category>(id, connection)?;
    }

    if let Some(id) = payment_method_id {
        resource::get::<PaymentMethod>(id, connection)?;
    }

    if let Some(id) = vendor_id {
        resource::get::<Vendor>(id, connection)?;
    }

    for &id in tag_ids {
        resource::get::<Tag>(id, connection)?;
    }

    Ok(())
}

fn expand(transaction: Transaction, connection: &Connection) -> Result<TransactionDetails, Error> {
    let category = transaction
        .category_id
        .map(|id| resource::get::<Category>(id, connection))
        .transpose()?;
    let payment_method = transaction
        .payment_method_id
        .map(|id| resource::get::<PaymentMethod>(id, connection))
        .transpose()?;
    let vendor = transaction
        .vendor_id
        .map(|id| resource::get::<Vendor>(id, connection))
        .transpose()?;
    let tags = transaction
        .tag_ids
        .iter()
        .map(|&id| resource::get::<Tag>(id, connection))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TransactionDetails {
        transaction,
        category,
        payment_method,
        vendor,
        tags,
    })
}
