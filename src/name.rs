//! The validated display name shared by categories, payment methods, tags and vendors.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// A validated, non-blank name.
///
/// Names are unique per entity type, the database enforces this with a
/// `UNIQUE` constraint on each `name` column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Create a name.
    ///
    /// Leading and trailing whitespace is removed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::Validation] if `name` is empty or
    /// only contains whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::Validation(vec!["name must not be blank".to_owned()]))
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a name without validation.
    ///
    /// The caller should ensure that the string is not blank.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the non-blank invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Name {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Name::new(s)
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod name_tests {
    use crate::{Error, name::Name};

    #[test]
    fn new_fails_on_empty_string() {
        let name = Name::new("");

        assert_eq!(
            name,
            Err(Error::Validation(vec!["name must not be blank".to_owned()]))
        );
    }

    #[test]
    fn new_fails_on_just_whitespace() {
        let name = Name::new("\n\t \r");

        assert!(matches!(name, Err(Error::Validation(_))));
    }

    #[test]
    fn new_trims_surrounding_whitespace() {
        let name = Name::new("  Groceries ").unwrap();

        assert_eq!(name.as_ref(), "Groceries");
    }

    #[test]
    fn new_succeeds_on_non_empty_string() {
        let name = Name::new("🔥");

        assert!(name.is_ok())
    }
}
