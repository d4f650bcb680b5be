//! The category model.

use crate::{color::Color, database_id::DatabaseId, name::Name, resource::Named};

/// A category that transactions can be filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// The ID of the category.
    pub id: DatabaseId,
    /// The unique name of the category.
    pub name: Name,
    /// The color the category is displayed with.
    pub color: Color,
}

/// The fields needed to create or fully replace a [Category].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    /// The unique name of the category.
    pub name: Name,
    /// The color the category is displayed with.
    pub color: Color,
}

/// The fields of a [Category] to overwrite, `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    /// The new name.
    pub name: Option<Name>,
    /// The new color.
    pub color: Option<Color>,
}

impl Category {
    /// Overwrite every mutable field with those of `draft`.
    pub fn replace_with(&mut self, draft: NewCategory) {
        self.name = draft.name;
        self.color = draft.color;
    }

    /// Overwrite the fields that are set in `patch`.
    pub fn merge(&mut self, patch: CategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }

        if let Some(color) = patch.color {
            self.color = color;
        }
    }
}

impl Named for Category {
    fn name(&self) -> &str {
        self.name.as_ref()
    }
}

impl Named for NewCategory {
    fn name(&self) -> &str {
        self.name.as_ref()
    }
}
