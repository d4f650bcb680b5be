//! The payment method model.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::{database_id::DatabaseId, name::Name, resource::Named};

/// The kind of a payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    /// A credit card.
    CreditCard,
    /// A debit card.
    DebitCard,
    /// Notes and coins.
    Cash,
    /// A transfer between bank accounts.
    BankTransfer,
    /// A phone or online wallet.
    DigitalWallet,
    /// A paper cheque.
    Cheque,
}

impl PaymentType {
    /// Every legal payment type literal, in declaration order.
    pub const NAMES: &'static [&'static str] = &[
        "CREDIT_CARD",
        "DEBIT_CARD",
        "CASH",
        "BANK_TRANSFER",
        "DIGITAL_WALLET",
        "CHEQUE",
    ];

    /// The wire and database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::CreditCard => "CREDIT_CARD",
            PaymentType::DebitCard => "DEBIT_CARD",
            PaymentType::Cash => "CASH",
            PaymentType::BankTransfer => "BANK_TRANSFER",
            PaymentType::DigitalWallet => "DIGITAL_WALLET",
            PaymentType::Cheque => "CHEQUE",
        }
    }
}

impl FromStr for PaymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREDIT_CARD" => Ok(PaymentType::CreditCard),
            "DEBIT_CARD" => Ok(PaymentType::DebitCard),
            "CASH" => Ok(PaymentType::Cash),
            "BANK_TRANSFER" => Ok(PaymentType::BankTransfer),
            "DIGITAL_WALLET" => Ok(PaymentType::DigitalWallet),
            "CHEQUE" => Ok(PaymentType::Cheque),
            other => Err(format!("unknown payment type {other:?}")),
        }
    }
}

impl Display for PaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ToSql for PaymentType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for PaymentType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: String| FromSqlError::Other(error.into()))
    }
}

/// A way of paying, e.g. "Everyday Visa" or "Petty cash".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentMethod {
    /// The ID of the payment method.
    pub id: DatabaseId,
    /// The unique name of the payment method.
    pub name: Name,
    /// What kind of payment method this is.
    pub payment_type: PaymentType,
}

/// The fields needed to create or fully replace a [PaymentMethod].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaymentMethod {
    /// The unique name of the payment method.
    pub name: Name,
    /// What kind of payment method this is.
    pub payment_type: PaymentType,
}

/// The fields of a [PaymentMethod] to overwrite, `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentMethodPatch {
    /// The new name.
    pub name: Option<Name>,
    /// The new payment type.
    pub payment_type: Option<PaymentType>,
}

impl Named for PaymentMethod {
    fn name(&self) -> &str {
        self.name.as_ref()
    }
}

impl Named for NewPaymentMethod {
    fn name(&self) -> &str {
        self.name.as_ref()
    }
}
