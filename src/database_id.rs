//! Database ID type definition.

/// Alias for the integer type used for mapping to database IDs.
///
/// IDs are assigned by the database when a record is first inserted and
/// never change afterwards.
pub type DatabaseId = i64;
