//! Business rules for named resources: existence checks, name uniqueness and
//! merge semantics for replace and patch.
//!
//! The name checks here only give a friendlier error. Two requests racing for
//! the same name are settled by the UNIQUE constraint in the database, and
//! that failure is translated into the same [Error::AlreadyExists].

use rusqlite::Connection;

use crate::{
    Error,
    database_id::DatabaseId,
    pagination::PageRequest,
    resource::{Named, Resource},
    transaction::{self, TransactionDetails},
};

/// Get every record.
pub fn list<R: Resource>(connection: &Connection) -> Result<Vec<R>, Error> {
    R::find_all(connection)
}

/// Get the record with `id`.
///
/// # Errors
///
/// Returns an [Error::NotFound] if there is no such record.
pub fn get<R: Resource>(id: DatabaseId, connection: &Connection) -> Result<R, Error> {
    R::find_by_id(id, connection)?.ok_or_else(|| Error::not_found_id(R::ENTITY, id))
}

/// Get the record named exactly `name`.
///
/// # Errors
///
/// Returns an [Error::NotFound] if there is no such record.
pub fn get_by_name<R: Resource>(name: &str, connection: &Connection) -> Result<R, Error> {
    R::find_by_name(name, connection)?.ok_or_else(|| Error::not_found_name(R::ENTITY, name))
}

/// Create a record.
///
/// # Errors
///
/// Returns an [Error::AlreadyExists] if another record already uses the name.
pub fn create<R: Resource>(draft: R::Draft, connection: &Connection) -> Result<R, Error> {
    let name = draft.name().to_owned();
    ensure_name_available::<R>(&name, None, connection)?;

    R::insert(draft, connection).map_err(|error| translate_duplicate::<R>(error, &name, connection))
}

/// Overwrite every mutable field of the record with `id`.
///
/// # Errors
///
/// Returns an:
/// - [Error::NotFound] if there is no such record,
/// - [Error::AlreadyExists] if a different record already uses the new name.
pub fn replace<R: Resource>(
    id: DatabaseId,
    draft: R::Draft,
    connection: &Connection,
) -> Result<R, Error> {
    let mut record = get::<R>(id, connection)?;
    ensure_name_available::<R>(draft.name(), Some(id), connection)?;

    record.replace(draft);
    save(record, connection)
}

/// Overwrite the fields present in `patch` on the record with `id`.
///
/// The name is only checked for uniqueness when the patch changes it.
///
/// # Errors
///
/// Returns an:
/// - [Error::NotFound] if there is no such record,
/// - [Error::Validation] if the patch cannot apply to the stored record,
/// - [Error::AlreadyExists] if a different record already uses the new name.
pub fn patch<R: Resource>(
    id: DatabaseId,
    patch: R::Patch,
    connection: &Connection,
) -> Result<R, Error> {
    let mut record = get::<R>(id, connection)?;
    let original_name = record.name().to_owned();

    record.apply_patch(patch)?;

    if record.name() != original_name {
        ensure_name_available::<R>(record.name(), Some(id), connection)?;
    }

    save(record, connection)
}

/// Delete the record with `id`.
///
/// # Errors
///
/// Returns an [Error::NotFound] if there is no such record.
pub fn delete<R: Resource>(id: DatabaseId, connection: &Connection) -> Result<(), Error> {
    get::<R>(id, connection)?;

    R::delete_by_id(id, connection)
}

/// Get one page of the transactions that belong to the record with `id`,
/// oldest first, plus the total number of such transactions.
///
/// # Errors
///
/// Returns an [Error::NotFound] if there is no such record.
pub fn transactions_page<R: Resource>(
    id: DatabaseId,
    request: PageRequest,
    connection: &Connection,
) -> Result<(Vec<TransactionDetails>, u64), Error> {
    get::<R>(id, connection)?;

    transaction::page_for_owner(R::owner(id), request, connection)
}

fn save<R: Resource>(record: R, connection: &Connection) -> Result<R, Error> {
    record
        .update(connection)
        .map_err(|error| translate_duplicate::<R>(error, record.name(), connection))?;

    Ok(record)
}

fn ensure_name_available<R: Resource>(
    name: &str,
    current_id: Option<DatabaseId>,
    connection: &Connection,
) -> Result<(), Error> {
    match R::find_by_name(name, connection)? {
        Some(existing) if Some(existing.id()) != current_id => Err(Error::AlreadyExists {
            entity: R::ENTITY,
            name: name.to_owned(),
            path: existing.path(),
        }),
        _ => Ok(()),
    }
}

fn translate_duplicate<R: Resource>(error: Error, name: &str, connection: &Connection) -> Error {
    if error != Error::DuplicateName {
        return error;
    }

    match R::find_by_name(name, connection) {
        Ok(Some(existing)) => Error::AlreadyExists {
            entity: R::ENTITY,
            name: name.to_owned(),
            path: existing.path(),
        },
        Ok(None) => error,
        Err(lookup_error) => lookup_error,
    }
}
