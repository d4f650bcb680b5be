//! Database operations for payment methods.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    Error,
    database_id::DatabaseId,
    name::Name,
    payment_method::{NewPaymentMethod, PaymentMethod},
    resource::Repository,
};

const COLUMNS: &str = "id, name, payment_type";

impl Repository for PaymentMethod {
    type Draft = NewPaymentMethod;

    fn find_all(connection: &Connection) -> Result<Vec<Self>, Error> {
        connection
            .prepare(&format!("SELECT {COLUMNS} FROM payment_method ORDER BY id ASC;"))?
            .query_map([], map_row)?
            .map(|maybe_method| maybe_method.map_err(|error| error.into()))
            .collect()
    }

    fn find_by_id(id: DatabaseId, connection: &Connection) -> Result<Option<Self>, Error> {
        let method = connection
            .prepare(&format!("SELECT {COLUMNS} FROM payment_method WHERE id = :id;"))?
            .query_row(&[(":id", &id)], map_row)
            .optional()?;

        Ok(method)
    }

    fn find_by_name(name: &str, connection: &Connection) -> Result<Option<Self>, Error> {
        let method = connection
            .prepare(&format!("SELECT {COLUMNS} FROM payment_method WHERE name = :name;"))?
            .query_row(&[(":name", &name)], map_row)
            .optional()?;

        Ok(method)
    }

    fn insert(draft: NewPaymentMethod, connection: &Connection) -> Result<Self, Error> {
        let method = connection
            .prepare(&format!(
                "INSERT INTO payment_method (name, payment_type) VALUES (?1, ?2) RETURNING {COLUMNS};"
            ))?
            .query_row((draft.name.as_ref(), draft.payment_type), map_row)?;

        Ok(method)
    }

    fn update(&self, connection: &Connection) -> Result<(), Error> {
        connection.execute(
            "UPDATE payment_method SET name = ?1, payment_type = ?2 WHERE id = ?3;",
            (self.name.as_ref(), self.payment_type, self.id),
        )?;

        Ok(())
    }

    fn delete_by_id(id: DatabaseId, connection: &Connection) -> Result<(), Error> {
        connection.execute("DELETE FROM payment_method WHERE id = ?1;", [id])?;

        Ok(())
    }
}

/// Create the payment method table.
pub fn create_payment_method_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS payment_method (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            payment_type TEXT NOT NULL
        );",
        (),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<PaymentMethod, rusqlite::Error> {
    let raw_name: String = row.get(1)?;

    Ok(PaymentMethod {
        id: row.get(0)?,
        name: Name::new_unchecked(&raw_name),
        payment_type: row.get(2)?,
    })
}
