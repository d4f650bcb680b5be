//! The wire representation of categories.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    category::{Category, CategoryPatch, NewCategory},
    color::Color,
    database_id::DatabaseId,
    endpoints,
    name::Name,
    resource::{Linked, Resource},
    transaction::TransactionOwner,
    validation::{EnumField, FieldErrors, RequestBody, ValidationMode, require},
};

/// A category as sent to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    /// The ID of the category.
    pub id: DatabaseId,
    /// The unique name of the category.
    pub name: String,
    /// The display color.
    pub color: Color,
    /// The canonical path of the category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// The body of a create, replace or patch request for a category.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    /// Must be absent or null, IDs are assigned by the server.
    pub id: Option<DatabaseId>,
    /// The name of the category.
    pub name: Option<String>,
    /// The display color.
    pub color: Option<Color>,
}

impl RequestBody for CategoryRequest {
    const ENUM_FIELDS: &'static [EnumField] = &[EnumField {
        name: "color",
        allowed: Color::NAMES,
    }];

    fn validate(&self, mode: ValidationMode) -> Result<(), Error> {
        let mut errors = FieldErrors::new();
        errors.id_must_be_null(self.id);
        errors.required("name", &self.name, mode);
        errors.not_blank("name", &self.name);
        errors.required("color", &self.color, mode);
        errors.finish()
    }
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name.to_string(),
            color: category.color,
            path: None,
        }
    }
}

impl From<CategoryDto> for Category {
    fn from(dto: CategoryDto) -> Self {
        Self {
            id: dto.id,
            name: Name::new_unchecked(&dto.name),
            color: dto.color,
        }
    }
}

impl Linked for CategoryDto {
    fn set_path(&mut self, path: String) {
        self.path = Some(path);
    }
}

impl Resource for Category {
    type Patch = CategoryPatch;
    type Request = CategoryRequest;
    type Dto = CategoryDto;

    const ENTITY: &'static str = "Category";
    const COLLECTION: &'static str = endpoints::CATEGORIES;
    const MEMBER: &'static str = endpoints::CATEGORY;
    const BY_NAME: &'static str = endpoints::CATEGORY_BY_NAME;
    const TRANSACTIONS: &'static str = endpoints::CATEGORY_TRANSACTIONS;

    fn id(&self) -> DatabaseId {
        self.id
    }

    fn owner(id: DatabaseId) -> TransactionOwner {
        TransactionOwner::Category(id)
    }

    fn draft_from_request(
        request: CategoryRequest,
        mode: ValidationMode,
    ) -> Result<NewCategory, Error> {
        request.validate(mode)?;

        Ok(NewCategory {
            name: Name::new(&require("name", request.name)?)?,
            color: require("color", request.color)?,
        })
    }

    fn patch_from_request(request: CategoryRequest) -> Result<CategoryPatch, Error> {
        request.validate(ValidationMode::Patch)?;

        Ok(CategoryPatch {
            name: request.name.as_deref().map(Name::new).transpose()?,
            color: request.color,
        })
    }

    fn replace(&mut self, draft: NewCategory) {
        self.replace_with(draft);
    }

    fn apply_patch(&mut self, patch: CategoryPatch) -> Result<(), Error> {
        self.merge(patch);
        Ok(())
    }
}
