//! Database operations for tags.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    Error,
    name::Name,
    resource::Repository,
    tag::{NewTag, Tag, TagId},
};

impl Repository for Tag {
    type Draft = NewTag;

    /// Retrieve all tags ordered alphabetically by name.
    fn find_all(connection: &Connection) -> Result<Vec<Self>, Error> {
        connection
            .prepare("SELECT id, name, color FROM tag ORDER BY name ASC;")?
            .query_map([], map_row)?
            .map(|maybe_tag| maybe_tag.map_err(|error| error.into()))
            .collect()
    }

    fn find_by_id(id: TagId, connection: &Connection) -> Result<Option<Self>, Error> {
        let tag = connection
            .prepare("SELECT id, name, color FROM tag WHERE id = :id;")?
            .query_row(&[(":id", &id)], map_row)
            .optional()?;

        Ok(tag)
    }

    fn find_by_name(name: &str, connection: &Connection) -> Result<Option<Self>, Error> {
        let tag = connection
            .prepare("SELECT id, name, color FROM tag WHERE name = :name;")?
            .query_row(&[(":name", &name)], map_row)
            .optional()?;

        Ok(tag)
    }

    fn insert(draft: NewTag, connection: &Connection) -> Result<Self, Error> {
        connection.execute(
            "INSERT INTO tag (name, color) VALUES (?1, ?2);",
            (draft.name.as_ref(), draft.color),
        )?;

        let id = connection.last_insert_rowid();

        Ok(Tag {
            id,
            name: draft.name,
            color: draft.color,
        })
    }

    fn update(&self, connection: &Connection) -> Result<(), Error> {
        connection.execute(
            "UPDATE tag SET name = ?1, color = ?2 WHERE id = ?3",
            (self.name.as_ref(), self.color, self.id),
        )?;

        Ok(())
    }

    /// Links to transactions are removed by the `transaction_tag` cascade.
    fn delete_by_id(id: TagId, connection: &Connection) -> Result<(), Error> {
        connection.execute("DELETE FROM tag WHERE id = ?1", [id])?;

        Ok(())
    }
}

/// Initialize the tag table and indexes.
pub fn create_tag_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS tag (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            color TEXT NOT NULL
        );",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Tag, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = Name::new_unchecked(&raw_name);
    let color = row.get(2)?;

    Ok(Tag { id, name, color })
}
