//! Request body validation.
//!
//! The same request type is used for creating, replacing and patching a
//! record, and [ValidationMode] selects which rules apply.

use serde_json::Value;

use crate::{Error, database_id::DatabaseId};

/// Which set of field requirements a request body must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// `id` must be null and every required field must be present.
    Create,
    /// `id` must be null and every required field must be present.
    Replace,
    /// `id` must be null, every field is optional.
    Patch,
}

impl ValidationMode {
    /// Whether the required fields of a request must be present.
    pub fn requires_all_fields(self) -> bool {
        !matches!(self, ValidationMode::Patch)
    }
}

/// An enum-valued JSON field and the literals it accepts.
#[derive(Debug, Clone, Copy)]
pub struct EnumField {
    /// The JSON field name.
    pub name: &'static str,
    /// Every accepted literal.
    pub allowed: &'static [&'static str],
}

/// A JSON request body that is checked before it reaches the service layer.
pub trait RequestBody {
    /// The enum-valued fields of the body.
    ///
    /// These are checked against the raw JSON before typed decoding so that an
    /// unknown literal is reported as [Error::MalformedEnum].
    const ENUM_FIELDS: &'static [EnumField] = &[];

    /// Check the field requirements for `mode`.
    ///
    /// # Errors
    ///
    /// Returns an [Error::Validation] holding one message per offending field.
    fn validate(&self, mode: ValidationMode) -> Result<(), Error>;
}

/// Check each field in `fields` that is present in `body` against its legal values.
///
/// Fields that are absent or `null` are skipped.
///
/// # Errors
///
/// Returns an [Error::MalformedEnum] for the first field holding an illegal value.
pub fn check_enum_fields(body: &Value, fields: &[EnumField]) -> Result<(), Error> {
    for field in fields {
        let value = match body.get(field.name) {
            None | Some(Value::Null) => continue,
            Some(value) => value,
        };

        let is_legal = value
            .as_str()
            .is_some_and(|literal| field.allowed.contains(&literal));

        if !is_legal {
            return Err(Error::MalformedEnum {
                field: field.name.to_owned(),
                value: value.to_string(),
                allowed: field.allowed,
            });
        }
    }

    Ok(())
}

/// Take a required value out of a request field.
///
/// # Errors
///
/// Returns an [Error::Validation] naming `field` if `value` is missing.
pub fn require<T>(field: &str, value: Option<T>) -> Result<T, Error> {
    value.ok_or_else(|| Error::Validation(vec![format!("{field} is required")]))
}

/// Collects field-level validation messages.
#[derive(Debug, Default)]
pub struct FieldErrors {
    messages: Vec<String>,
}

impl FieldErrors {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message.
    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Clients may never choose the ID of a record.
    pub fn id_must_be_null(&mut self, id: Option<DatabaseId>) {
        if id.is_some() {
            self.push("id must be null");
        }
    }

    /// Record a message if `mode` requires all fields and `value` is missing.
    pub fn required<T>(&mut self, field: &str, value: &Option<T>, mode: ValidationMode) {
        if mode.requires_all_fields() && value.is_none() {
            self.push(format!("{field} is required"));
        }
    }

    /// Record a message if `value` is present but blank.
    pub fn not_blank(&mut self, field: &str, value: &Option<String>) {
        if value.as_deref().is_some_and(|text| text.trim().is_empty()) {
            self.push(format!("{field} must not be blank"));
        }
    }

    /// Record a message if `value` is present.
    pub fn absent<T>(&mut self, field: &str, value: &Option<T>, reason: &str) {
        if value.is_some() {
            self.push(format!("{field} {reason}"));
        }
    }

    /// Convert the collected messages into a result.
    ///
    /// # Errors
    ///
    /// Returns an [Error::Validation] if any message was recorded.
    pub fn finish(self) -> Result<(), Error> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self.messages))
        }
    }
}
