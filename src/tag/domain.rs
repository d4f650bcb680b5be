//! Core tag domain types.

use crate::{color::Color, database_id::DatabaseId, name::Name, resource::Named};

/// Database identifier for a tag.
pub type TagId = DatabaseId;

/// A label for transactions (e.g., 'Holiday', 'Reimbursable').
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// The ID of the tag.
    pub id: TagId,
    /// The unique name of the tag.
    pub name: Name,
    /// The color the tag is displayed with.
    pub color: Color,
}

/// The fields needed to create or fully replace a [Tag].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    /// The unique name of the tag.
    pub name: Name,
    /// The color the tag is displayed with.
    pub color: Color,
}

/// The fields of a [Tag] to overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPatch {
    /// The new name.
    pub name: Option<Name>,
    /// The new color.
    pub color: Option<Color>,
}

impl Tag {
    /// Overwrite the fields that are set in `patch`.
    pub fn merge(&mut self, patch: TagPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }

        if let Some(color) = patch.color {
            self.color = color;
        }
    }
}

impl Named for Tag {
    fn name(&self) -> &str {
        self.name.as_ref()
    }
}

impl Named for NewTag {
    fn name(&self) -> &str {
        self.name.as_ref()
    }
}
