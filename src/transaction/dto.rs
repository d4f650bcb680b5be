//! The wire representation of transactions.
//!
//! Reads embed the full category, payment method, vendor and tags. Writes
//! refer to them by ID.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::{
    Error,
    category::CategoryDto,
    database_id::DatabaseId,
    endpoints::{self, format_endpoint},
    payment_method::PaymentMethodDto,
    resource::Resource,
    tag::{TagDto, TagId},
    transaction::{NewTransaction, Transaction, TransactionDetails, TransactionPatch},
    validation::{FieldErrors, RequestBody, ValidationMode, require},
    vendor::VendorDto,
};

/// A transaction as sent to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    pub id: DatabaseId,
    pub amount: Decimal,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub description: String,
    pub category: Option<CategoryDto>,
    pub payment_method: Option<PaymentMethodDto>,
    pub vendor: Option<VendorDto>,
    pub tags: Vec<TagDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// The body of a create, replace or patch request for a transaction.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub id: Option<DatabaseId>,
    pub amount: Option<Decimal>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date: Option<OffsetDateTime>,
    pub description: Option<String>,
    pub category_id: Option<DatabaseId>,
    pub payment_method_id: Option<DatabaseId>,
    pub vendor_id: Option<DatabaseId>,
    /// Absent or `null` leaves the tags of a patched transaction untouched,
    /// `[]` removes them.
    pub tag_ids: Option<Vec<TagId>>,
}

impl RequestBody for TransactionRequest {
    fn validate(&self, mode: ValidationMode) -> Result<(), Error> {
        let mut errors = FieldErrors::new();
        errors.id_must_be_null(self.id);
        errors.required("amount", &self.amount, mode);
        errors.required("date", &self.date, mode);
        errors.required("description", &self.description, mode);
        errors.finish()
    }
}

impl TransactionRequest {
    /// Validate a create or replace body.
    ///
    /// # Errors
    /// Returns an [Error::Validation] listing every offending field.
    pub fn into_draft(self, mode: ValidationMode) -> Result<NewTransaction, Error> {
        self.validate(mode)?;

        Ok(NewTransaction {
            amount: require("amount", self.amount)?,
            date: require("date", self.date)?.to_offset(UtcOffset::UTC),
            description: require("description", self.description)?,
            category_id: self.category_id,
            payment_method_id: self.payment_method_id,
            vendor_id: self.vendor_id,
            tag_ids: self.tag_ids.unwrap_or_default(),
        })
    }

    /// Validate a patch body.
    ///
    /// # Errors
    /// Returns an [Error::Validation] if the body sets `id`.
    pub fn into_patch(self) -> Result<TransactionPatch, Error> {
        self.validate(ValidationMode::Patch)?;

        Ok(TransactionPatch {
            amount: self.amount,
            date: self.date.map(|date| date.to_offset(UtcOffset::UTC)),
            description: self.description,
            category_id: self.category_id,
            payment_method_id: self.payment_method_id,
            vendor_id: self.vendor_id,
            tag_ids: self.tag_ids,
        })
    }
}

impl From<TransactionDetails> for TransactionDto {
    fn from(details: TransactionDetails) -> Self {
        let transaction = details.transaction;

        Self {
            id: transaction.id,
            amount: transaction.amount,
            date: transaction.date,
            description: transaction.description,
            category: details.category.map(CategoryDto::from),
            payment_method: details.payment_method.map(PaymentMethodDto::from),
            vendor: details.vendor.map(VendorDto::from),
            tags: details.tags.into_iter().map(TagDto::from).collect(),
            path: None,
        }
    }
}

impl From<TransactionDto> for TransactionDetails {
    fn from(dto: TransactionDto) -> Self {
        let category = dto.category.map(Into::into);
        let payment_method = dto.payment_method.map(Into::into);
        let vendor = dto.vendor.map(Into::into);
        let tags: Vec<_> = dto.tags.into_iter().map(Into::into).collect();

        let transaction = Transaction {
            id: dto.id,
            amount: dto.amount,
            date: dto.date,
            description: dto.description,
            category_id: category.as_ref().map(Resource::id),
            payment_method_id: payment_method.as_ref().map(Resource::id),
            vendor_id: vendor.as_ref().map(Resource::id),
            tag_ids: tags.iter().map(Resource::id).collect(),
        };

        Self {
            transaction,
            category,
            payment_method,
            vendor,
            tags,
        }
    }
}

impl TransactionDetails {
    /// Map to the wire representation and set the paths of the transaction
    /// and every embedded record.
    pub fn into_linked_dto(self) -> TransactionDto {
        let TransactionDetails {
            transaction,
            category,
            payment_method,
            vendor,
            tags,
        } = self;
        let path = format_endpoint(endpoints::TRANSACTION, transaction.id);

        TransactionDto {
            id: transaction.id,
            amount: transaction.amount,
            date: transaction.date,
            description: transaction.description,
            category: category.map(Resource::into_linked_dto),
            payment_method: payment_method.map(Resource::into_linked_dto),
            vendor: vendor.map(Resource::into_linked_dto),
            tags: tags.into_iter().map(Resource::into_linked_dto).collect(),
            path: Some(path),
        }
    }
}
