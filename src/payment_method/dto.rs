//! The wire representation of payment methods.
//!
//! The payment type is called `type` on the wire.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::DatabaseId,
    endpoints,
    name::Name,
    payment_method::{NewPaymentMethod, PaymentMethod, PaymentMethodPatch, PaymentType},
    resource::{Linked, Resource},
    transaction::TransactionOwner,
    validation::{EnumField, FieldErrors, RequestBody, ValidationMode, require},
};

/// A payment method as sent to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodDto {
    pub id: DatabaseId,
    pub name: String,
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// The body of a create, replace or patch request for a payment method.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodRequest {
    pub id: Option<DatabaseId>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub payment_type: Option<PaymentType>,
}

impl RequestBody for PaymentMethodRequest {
    const ENUM_FIELDS: &'static [EnumField] = &[EnumField {
        name: "type",
        allowed: PaymentType::NAMES,
    }];

    fn validate(&self, mode: ValidationMode) -> Result<(), Error> {
        let mut errors = FieldErrors::new();
        errors.id_must_be_null(self.id);
        errors.required("name", &self.name, mode);
        errors.not_blank("name", &self.name);
        errors.required("type", &self.payment_type, mode);
        errors.finish()
    }
}

impl From<PaymentMethod> for PaymentMethodDto {
    fn from(method: PaymentMethod) -> Self {
        Self {
            id: method.id,
            name: method.name.to_string(),
            payment_type: method.payment_type,
            path: None,
        }
    }
}

impl From<PaymentMethodDto> for PaymentMethod {
    fn from(dto: PaymentMethodDto) -> Self {
        Self {
            id: dto.id,
            name: Name::new_unchecked(&dto.name),
            payment_type: dto.payment_type,
        }
    }
}

impl Linked for PaymentMethodDto {
    fn set_path(&mut self, path: String) {
        self.path = Some(path);
    }
}

impl Resource for PaymentMethod {
    type Patch = PaymentMethodPatch;
    type Request = PaymentMethodRequest;
    type Dto = PaymentMethodDto;

    const ENTITY: &'static str = "Payment method";
    const COLLECTION: &'static str = endpoints::PAYMENT_METHODS;
    const MEMBER: &'static str = endpoints::PAYMENT_METHOD;
    const BY_NAME: &'static str = endpoints::PAYMENT_METHOD_BY_NAME;
    const TRANSACTIONS: &'static str = endpoints::PAYMENT_METHOD_TRANSACTIONS;

    fn id(&self) -> DatabaseId {
        self.id
    }

    fn owner(id: DatabaseId) -> TransactionOwner {
        TransactionOwner::PaymentMethod(id)
    }

    fn draft_from_request(
        request: PaymentMethodRequest,
        mode: ValidationMode,
    ) -> Result<NewPaymentMethod, Error> {
        request.validate(mode)?;

        Ok(NewPaymentMethod {
            name: Name::new(&require("name", request.name)?)?,
            payment_type: require("type", request.payment_type)?,
        })
    }

    fn patch_from_request(request: PaymentMethodRequest) -> Result<PaymentMethodPatch, Error> {
        request.validate(ValidationMode::Patch)?;

        Ok(PaymentMethodPatch {
            name: request.name.as_deref().map(Name::new).transpose()?,
            payment_type: request.payment_type,
        })
    }

    fn replace(&mut self, draft: NewPaymentMethod) {
        self.name = draft.name;
        self.payment_type = draft.payment_type;
    }

    fn apply_patch(&mut self, patch: PaymentMethodPatch) -> Result<(), Error> {
        if let Some(name) = patch.name {
            self.name = name;
        }

        if let Some(payment_type) = patch.payment_type {
            self.payment_type = payment_type;
        }

        Ok(())
    }
}
