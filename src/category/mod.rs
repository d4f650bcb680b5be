//! Categories group transactions by what the money was spent on, e.g. "Groceries".

mod db;
mod domain;
mod dto;

pub use db::create_category_table;
pub use domain::{Category, CategoryPatch, NewCategory};
pub use dto::CategoryDto;
