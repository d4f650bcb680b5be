//! Database operations for categories.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    Error,
    category::{Category, NewCategory},
    database_id::DatabaseId,
    name::Name,
    resource::Repository,
};

impl Repository for Category {
    type Draft = NewCategory;

    fn find_all(connection: &Connection) -> Result<Vec<Self>, Error> {
        connection
            .prepare("SELECT id, name, color FROM category ORDER BY id ASC;")?
            .query_map([], map_row)?
            .map(|maybe_category| maybe_category.map_err(|error| error.into()))
            .collect()
    }

    fn find_by_id(id: DatabaseId, connection: &Connection) -> Result<Option<Self>, Error> {
        let category = connection
            .prepare("SELECT id, name, color FROM category WHERE id = :id;")?
            .query_row(&[(":id", &id)], map_row)
            .optional()?;

        Ok(category)
    }

    fn find_by_name(name: &str, connection: &Connection) -> Result<Option<Self>, Error> {
        let category = connection
            .prepare("SELECT id, name, color FROM category WHERE name = :name;")?
            .query_row(&[(":name", &name)], map_row)
            .optional()?;

        Ok(category)
    }

    fn insert(draft: NewCategory, connection: &Connection) -> Result<Self, Error> {
        let category = connection
            .prepare("INSERT INTO category (name, color) VALUES (?1, ?2) RETURNING id, name, color;")?
            .query_row((draft.name.as_ref(), draft.color), map_row)?;

        Ok(category)
    }

    fn update(&self, connection: &Connection) -> Result<(), Error> {
        connection.execute(
            "UPDATE category SET name = ?1, color = ?2 WHERE id = ?3;",
            (self.name.as_ref(), self.color, self.id),
        )?;

        Ok(())
    }

    fn delete_by_id(id: DatabaseId, connection: &Connection) -> Result<(), Error> {
        connection.execute("DELETE FROM category WHERE id = ?1;", [id])?;

        Ok(())
    }
}

/// Create the category table.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            color TEXT NOT NULL
        );",
        (),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let color = row.get(2)?;

    Ok(Category {
        id,
        name: Name::new_unchecked(&raw_name),
        color,
    })
}
