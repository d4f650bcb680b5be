//! Tags label transactions across categories, e.g. "Holiday" or "Work".
//!
//! A transaction can have any number of tags. Deleting a tag only removes it
//! from the transactions that carry it.

mod db;
mod domain;
mod dto;

pub use db::create_tag_table;
pub use domain::{NewTag, Tag, TagId, TagPatch};
pub use dto::TagDto;
