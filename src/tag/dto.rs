//! The wire representation of tags.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    color::Color,
    endpoints,
    name::Name,
    resource::{Linked, Resource},
    tag::{NewTag, Tag, TagId, TagPatch},
    transaction::TransactionOwner,
    validation::{EnumField, FieldErrors, RequestBody, ValidationMode, require},
};

/// A tag as sent to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDto {
    pub id: TagId,
    pub name: String,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// The body of a create, replace or patch request for a tag.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRequest {
    pub id: Option<TagId>,
    pub name: Option<String>,
    pub color: Option<Color>,
}

impl RequestBody for TagRequest {
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

impl From<Tag> for TagDto {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name.to_string(),
            color: tag.color,
            path: None,
        }
    }
}

impl From<TagDto> for Tag {
    fn from(dto: TagDto) -> Self {
        Self {
            id: dto.id,
            name: Name::new_unchecked(&dto.name),
            color: dto.color,
        }
    }
}

impl Linked for TagDto {
    fn set_path(&mut self, path: String) {
        self.path = Some(path);
    }
}

impl Resource for Tag {
    type Patch = TagPatch;
    type Request = TagRequest;
    type Dto = TagDto;

    const ENTITY: &'static str = "Tag";
    const COLLECTION: &'static str = endpoints::TAGS;
    const MEMBER: &'static str = endpoints::TAG;
    const BY_NAME: &'static str = endpoints::TAG_BY_NAME;
    const TRANSACTIONS: &'static str = endpoints::TAG_TRANSACTIONS;

    fn id(&self) -> TagId {
        self.id
    }

    fn owner(id: TagId) -> TransactionOwner {
        TransactionOwner::Tag(id)
    }

    fn draft_from_request(request: TagRequest, mode: ValidationMode) -> Result<NewTag, Error> {
        request.validate(mode)?;

        Ok(NewTag {
            name: Name::new(&require("name", request.name)?)?,
            color: require("color", request.color)?,
        })
    }

    fn patch_from_request(request: TagRequest) -> Result<TagPatch, Error> {
        request.validate(ValidationMode::Patch)?;

        Ok(TagPatch {
            name: request.name.as_deref().map(Name::new).transpose()?,
            color: request.color,
        })
    }

    fn replace(&mut self, draft: NewTag) {
        self.name = draft.name;
        self.color = draft.color;
    }

    fn apply_patch(&mut self, patch: TagPatch) -> Result<(), Error> {
        self.merge(patch);
        Ok(())
    }
}
