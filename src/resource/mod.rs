//! The CRUD contract shared by every uniquely named resource: categories,
//! payment methods, tags and vendors.
//!
//! A type takes part by implementing [Repository] (how it is stored) and
//! [Resource] (how it is exposed over HTTP). The service functions and route
//! handlers are written once against these traits.

mod handlers;
mod service;

pub use handlers::routes;
pub use service::{
    create, delete, get, get_by_name, list, patch, replace, transactions_page,
};

use rusqlite::Connection;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    Error,
    database_id::DatabaseId,
    endpoints::format_endpoint,
    transaction::TransactionOwner,
    validation::{RequestBody, ValidationMode},
};

/// A record or payload with a unique name.
pub trait Named {
    /// The name.
    fn name(&self) -> &str;
}

/// Persistence for a named entity type.
///
/// Implementations map SQLite's UNIQUE constraint failures on the name column
/// to [Error::DuplicateName].
pub trait Repository: Named + Sized {
    /// The validated payload used to create or fully replace a record.
    type Draft: Named;

    /// Get every record.
    fn find_all(connection: &Connection) -> Result<Vec<Self>, Error>;

    /// Get the record with `id`, if it exists.
    fn find_by_id(id: DatabaseId, connection: &Connection) -> Result<Option<Self>, Error>;

    /// Get the record named exactly `name`, if it exists.
    fn find_by_name(name: &str, connection: &Connection) -> Result<Option<Self>, Error>;

    /// Insert a new record and return it with its generated ID.
    fn insert(draft: Self::Draft, connection: &Connection) -> Result<Self, Error>;

    /// Overwrite the stored record that has the same ID as `self`.
    fn update(&self, connection: &Connection) -> Result<(), Error>;

    /// Delete the record with `id`, along with anything that cascades from it.
    fn delete_by_id(id: DatabaseId, connection: &Connection) -> Result<(), Error>;
}

/// A DTO that carries the canonical path of the record it was mapped from.
pub trait Linked {
    /// Set the path, e.g. `/api/categories/1`.
    fn set_path(&mut self, path: String);
}

/// A [Repository] type exposed as a REST resource.
pub trait Resource: Repository + Send + Sync + 'static {
    /// The validated partial update payload.
    type Patch;
    /// The JSON body accepted by POST, PUT and PATCH.
    type Request: DeserializeOwned + RequestBody + Send;
    /// The JSON representation sent to clients.
    type Dto: Serialize + Linked + From<Self> + Send;

    /// The human readable entity name used in error messages.
    const ENTITY: &'static str;
    /// The route for the whole collection.
    const COLLECTION: &'static str;
    /// The route for a single record, with an `{id}` parameter.
    const MEMBER: &'static str;
    /// The route for looking up a record by name, with a `{name}` parameter.
    const BY_NAME: &'static str;
    /// The route for the record's transactions, with an `{id}` parameter.
    const TRANSACTIONS: &'static str;

    /// The database ID.
    fn id(&self) -> DatabaseId;

    /// The canonical path of the record.
    fn path(&self) -> String {
        format_endpoint(Self::MEMBER, self.id())
    }

    /// Which transactions belong to the record with `id`.
    fn owner(id: DatabaseId) -> TransactionOwner;

    /// Validate a create or replace body.
    fn draft_from_request(
        request: Self::Request,
        mode: ValidationMode,
    ) -> Result<Self::Draft, Error>;

    /// Validate a patch body.
    fn patch_from_request(request: Self::Request) -> Result<Self::Patch, Error>;

    /// Overwrite every mutable field, keeping the ID.
    fn replace(&mut self, draft: Self::Draft);

    /// Overwrite the fields that are present in `patch`.
    ///
    /// # Errors
    ///
    /// Returns an [Error::Validation] if the patch cannot apply to this record.
    fn apply_patch(&mut self, patch: Self::Patch) -> Result<(), Error>;

    /// Map to the wire representation and set its path.
    fn into_linked_dto(self) -> Self::Dto {
        let path = self.path();
        let mut dto = Self::Dto::from(self);
        dto.set_path(path);
        dto
    }
}
