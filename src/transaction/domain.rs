//! Defines the core data models for transactions.

use rust_decimal::Decimal;
use time::OffsetDateTime;

use crate::{
    category::Category,
    database_id::DatabaseId,
    payment_method::PaymentMethod,
    tag::{Tag, TagId},
    vendor::Vendor,
};

/// An event where money was spent.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: DatabaseId,
    /// The amount of money spent.
    pub amount: Decimal,
    /// When the transaction happened, in UTC.
    pub date: OffsetDateTime,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The category the transaction belongs to, if any.
    pub category_id: Option<DatabaseId>,
    /// How the transaction was paid for, if known.
    pub payment_method_id: Option<DatabaseId>,
    /// Where the money was spent, if known.
    pub vendor_id: Option<DatabaseId>,
    /// The IDs of the transaction's tags in ascending order, without duplicates.
    pub tag_ids: Vec<TagId>,
}

/// The fields needed to create or fully replace a [Transaction].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The amount of money spent.
    pub amount: Decimal,
    /// When the transaction happened.
    pub date: OffsetDateTime,
    /// What the transaction was for.
    pub description: String,
    /// The category to file the transaction under.
    pub category_id: Option<DatabaseId>,
    /// How the transaction was paid for.
    pub payment_method_id: Option<DatabaseId>,
    /// Where the money was spent.
    pub vendor_id: Option<DatabaseId>,
    /// The IDs of the tags to attach.
    pub tag_ids: Vec<TagId>,
}

/// The fields of a [Transaction] to overwrite.
///
/// `None` leaves a field untouched. For `tag_ids`, `Some(vec![])` removes
/// every tag and a non-empty list replaces the tags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    /// The new amount.
    pub amount: Option<Decimal>,
    /// The new date.
    pub date: Option<OffsetDateTime>,
    /// The new description.
    pub description: Option<String>,
    /// The new category.
    pub category_id: Option<DatabaseId>,
    /// The new payment method.
    pub payment_method_id: Option<DatabaseId>,
    /// The new vendor.
    pub vendor_id: Option<DatabaseId>,
    /// The new set of tag IDs.
    pub tag_ids: Option<Vec<TagId>>,
}

/// A record that transactions can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionOwner {
    /// The transactions filed under a category.
    Category(DatabaseId),
    /// The transactions paid for with a payment method.
    PaymentMethod(DatabaseId),
    /// The transactions made at a vendor.
    Vendor(DatabaseId),
    /// The transactions carrying a tag.
    Tag(TagId),
}

/// A transaction with its references resolved to full records.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDetails {
    /// The stored transaction.
    pub transaction: Transaction,
    /// The category `transaction.category_id` refers to.
    pub category: Option<Category>,
    /// The payment method `transaction.payment_method_id` refers to.
    pub payment_method: Option<PaymentMethod>,
    /// The vendor `transaction.vendor_id` refers to.
    pub vendor: Option<Vendor>,
    /// The tags in `transaction.tag_ids`.
    pub tags: Vec<Tag>,
}

/// Sort `tag_ids` and drop duplicates.
pub(super) fn normalize_tag_ids(mut tag_ids: Vec<TagId>) -> Vec<TagId> {
    tag_ids.sort_unstable();
    tag_ids.dedup();
    tag_ids
}

impl Transaction {
    /// Overwrite every mutable field with those of `draft`.
    pub fn replace_with(&mut self, draft: NewTransaction) {
        self.amount = draft.amount;
        self.date = draft.date;
        self.description = draft.description;
        self.category_id = draft.category_id;
        self.payment_method_id = draft.payment_method_id;
        self.vendor_id = draft.vendor_id;
        self.tag_ids = normalize_tag_ids(draft.tag_ids);
    }

    /// Overwrite the fields that are set in `patch`.
    pub fn merge(&mut self, patch: TransactionPatch) {
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }

        if let Some(date) = patch.date {
            self.date = date;
        }

        if let Some(description) = patch.description {
            self.description = description;
        }

        if let Some(category_id) = patch.category_id {
            self.category_id = Some(category_id);
        }

        if let Some(payment_method_id) = patch.payment_method_id {
            self.payment_method_id = Some(payment_method_id);
        }

        if let Some(vendor_id) = patch.vendor_id {
            self.vendor_id = Some(vendor_id);
        }

        if let Some(tag_ids) = patch.tag_ids {
            self.tag_ids = normalize_tag_ids(tag_ids);
        }
    }
}
