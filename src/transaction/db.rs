//! Database functions for transactions and their tags.
//!
//! Amounts are stored as TEXT so that no precision is lost. Dates are stored
//! in UTC so that ordering by the `date` column is chronological.

use std::str::FromStr;

use rusqlite::{Connection, OptionalExtension, Row, types::Type};
use rust_decimal::Decimal;
use time::{OffsetDateTime, UtcOffset};

use crate::{
    Error,
    database_id::DatabaseId,
    pagination::PageRequest,
    tag::TagId,
    transaction::{
        NewTransaction, Transaction, TransactionOwner, domain::normalize_tag_ids,
    },
};

const COLUMNS: &str =
    "id, amount, date, description, category_id, payment_method_id, vendor_id";

impl Transaction {
    /// Retrieve every transaction, oldest first.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is an SQL error.
    pub fn find_all(connection: &Connection) -> Result<Vec<Self>, Error> {
        let transactions = connection
            .prepare(&format!(
                "SELECT {COLUMNS} FROM \"transaction\" ORDER BY date ASC, id ASC;"
            ))?
            .query_map([], map_transaction_row)?
            .collect::<Result<Vec<_>, _>>()?;

        with_tags(transactions, connection)
    }

    /// Retrieve a transaction by its `id`, if it exists.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is an SQL error.
    pub fn find_by_id(id: DatabaseId, connection: &Connection) -> Result<Option<Self>, Error> {
        let transaction = connection
            .prepare(&format!("SELECT {COLUMNS} FROM \"transaction\" WHERE id = :id;"))?
            .query_row(&[(":id", &id)], map_transaction_row)
            .optional()?;

        match transaction {
            Some(mut transaction) => {
                transaction.tag_ids = get_tag_ids(transaction.id, connection)?;
                Ok(Some(transaction))
            }
            None => Ok(None),
        }
    }

    /// Create a transaction along with its tag links and return it with its generated ID.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidReference] if a referenced record does not exist,
    /// - or [Error::SqlError] if there is some other SQL error.
    pub fn insert(draft: NewTransaction, connection: &Connection) -> Result<Self, Error> {
        let date = to_utc(draft.date);
        let tag_ids = normalize_tag_ids(draft.tag_ids);

        let sql_transaction = connection.unchecked_transaction()?;

        let id: DatabaseId = sql_transaction.query_row(
            "INSERT INTO \"transaction\" (amount, date, description, category_id, payment_method_id, vendor_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id;",
            (
                draft.amount.to_string(),
                date,
                &draft.description,
                draft.category_id,
                draft.payment_method_id,
                draft.vendor_id,
            ),
            |row| row.get(0),
        )?;
        set_tag_ids(id, &tag_ids, &sql_transaction)?;

        sql_transaction.commit()?;

        Ok(Transaction {
            id,
            amount: draft.amount,
            date,
            description: draft.description,
            category_id: draft.category_id,
            payment_method_id: draft.payment_method_id,
            vendor_id: draft.vendor_id,
            tag_ids,
        })
    }

    /// Overwrite the stored transaction and its tag links.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidReference] if a referenced record does not exist,
    /// - or [Error::SqlError] if there is some other SQL error.
    pub fn update(&self, connection: &Connection) -> Result<(), Error> {
        let sql_transaction = connection.unchecked_transaction()?;

        sql_transaction.execute(
            "UPDATE \"transaction\"
             SET amount = ?1, date = ?2, description = ?3, category_id = ?4, payment_method_id = ?5, vendor_id = ?6
             WHERE id = ?7;",
            (
                self.amount.to_string(),
                to_utc(self.date),
                &self.description,
                self.category_id,
                self.payment_method_id,
                self.vendor_id,
                self.id,
            ),
        )?;
        sql_transaction.execute(
            "DELETE FROM transaction_tag WHERE transaction_id = ?1;",
            [self.id],
        )?;
        set_tag_ids(self.id, &self.tag_ids, &sql_transaction)?;

        sql_transaction.commit()?;

        Ok(())
    }

    /// Delete the transaction with `id`. Its tag links are removed by cascade.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is an SQL error.
    pub fn delete_by_id(id: DatabaseId, connection: &Connection) -> Result<(), Error> {
        connection.execute("DELETE FROM \"transaction\" WHERE id = ?1;", [id])?;

        Ok(())
    }

    /// Retrieve one page of the transactions that belong to `owner`, ordered by date ascending.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is an SQL error.
    pub fn find_page_for_owner(
        owner: TransactionOwner,
        page: PageRequest,
        connection: &Connection,
    ) -> Result<Vec<Self>, Error> {
        let (filter, owner_id) = owner_filter(owner);
        let limit = i64::try_from(page.size).unwrap_or(i64::MAX);
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

        let transactions = connection
            .prepare(&format!(
                "SELECT {COLUMNS} FROM \"transaction\" WHERE {filter}
                 ORDER BY date ASC, id ASC
                 LIMIT ?2 OFFSET ?3;"
            ))?
            .query_map((owner_id, limit, offset), map_transaction_row)?
            .collect::<Result<Vec<_>, _>>()?;

        with_tags(transactions, connection)
    }

    /// Count the transactions that belong to `owner`.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is an SQL error.
    pub fn count_for_owner(owner: TransactionOwner, connection: &Connection) -> Result<u64, Error> {
        let (filter, owner_id) = owner_filter(owner);

        let count: i64 = connection.query_row(
            &format!("SELECT COUNT(id) FROM \"transaction\" WHERE {filter};"),
            [owner_id],
            |row| row.get(0),
        )?;

        Ok(u64::try_from(count).unwrap_or_default())
    }
}

/// Create the transaction and transaction tag tables.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn create_transaction_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            amount TEXT NOT NULL,
            date TEXT NOT NULL,
            description TEXT NOT NULL,
            category_id INTEGER REFERENCES category(id) ON DELETE CASCADE,
            payment_method_id INTEGER REFERENCES payment_method(id) ON DELETE CASCADE,
            vendor_id INTEGER REFERENCES vendor(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date, id);
        CREATE INDEX IF NOT EXISTS idx_transaction_category ON \"transaction\"(category_id);
        CREATE INDEX IF NOT EXISTS idx_transaction_payment_method ON \"transaction\"(payment_method_id);
        CREATE INDEX IF NOT EXISTS idx_transaction_vendor ON \"transaction\"(vendor_id);

        CREATE TABLE IF NOT EXISTS transaction_tag (
            transaction_id INTEGER NOT NULL REFERENCES \"transaction\"(id) ON DELETE CASCADE,
            tag_id INTEGER NOT NULL REFERENCES tag(id) ON DELETE CASCADE,
            PRIMARY KEY (transaction_id, tag_id)
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_tag_tag ON transaction_tag(tag_id);",
    )?;

    Ok(())
}

fn owner_filter(owner: TransactionOwner) -> (&'static str, DatabaseId) {
    match owner {
        TransactionOwner::Category(id) => ("category_id = ?1", id),
        TransactionOwner::PaymentMethod(id) => ("payment_method_id = ?1", id),
        TransactionOwner::Vendor(id) => ("vendor_id = ?1", id),
        TransactionOwner::Tag(id) => (
            "id IN (SELECT transaction_id FROM transaction_tag WHERE tag_id = ?1)",
            id,
        ),
    }
}

fn to_utc(date: OffsetDateTime) -> OffsetDateTime {
    date.to_offset(UtcOffset::UTC)
}

fn get_tag_ids(transaction_id: DatabaseId, connection: &Connection) -> Result<Vec<TagId>, Error> {
    connection
        .prepare("SELECT tag_id FROM transaction_tag WHERE transaction_id = ?1 ORDER BY tag_id ASC;")?
        .query_map([transaction_id], |row| row.get(0))?
        .map(|maybe_id| maybe_id.map_err(|error| error.into()))
        .collect()
}

fn set_tag_ids(
    transaction_id: DatabaseId,
    tag_ids: &[TagId],
    connection: &Connection,
) -> Result<(), Error> {
    let mut statement = connection
        .prepare("INSERT INTO transaction_tag (transaction_id, tag_id) VALUES (?1, ?2);")?;

    for tag_id in tag_ids {
        statement.execute((transaction_id, tag_id))?;
    }

    Ok(())
}

fn with_tags(
    mut transactions: Vec<Transaction>,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    for transaction in &mut transactions {
        transaction.tag_ids = get_tag_ids(transaction.id, connection)?;
    }

    Ok(transactions)
}

/// Map a database row to a [Transaction] without its tags.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let raw_amount: String = row.get(1)?;
    let amount = Decimal::from_str(&raw_amount).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(error))
    })?;

    Ok(Transaction {
        id: row.get(0)?,
        amount,
        date: row.get(2)?,
        description: row.get(3)?,
        category_id: row.get(4)?,
        payment_method_id: row.get(5)?,
        vendor_id: row.get(6)?,
        tag_ids: Vec::new(),
    })
}

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use time::macros::datetime;

    use crate::{
        Error,
        category::{Category, NewCategory},
        color::Color,
        db::initialize,
        name::Name,
        pagination::PageRequest,
        resource::Repository,
        tag::{NewTag, Tag},
        transaction::{NewTransaction, Transaction, TransactionOwner},
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn create_category(conn: &Connection) -> Category {
        Category::insert(
            NewCategory {
                name: Name::new_unchecked("Food"),
                color: Color::Green,
            },
            conn,
        )
        .expect("Could not create category")
    }

    fn create_tag(name: &str, conn: &Connection) -> Tag {
        Tag::insert(
            NewTag {
                name: Name::new_unchecked(name),
                color: Color::Blue,
            },
            conn,
        )
        .expect("Could not create tag")
    }

    fn draft(day: u8) -> NewTransaction {
        NewTransaction {
            amount: Decimal::new(1999, 2),
            date: datetime!(2025-01-01 12:00 UTC)
                .replace_day(day)
                .expect("Invalid day"),
            description: format!("Day {day}"),
            category_id: None,
            payment_method_id: None,
            vendor_id: None,
            tag_ids: vec![],
        }
    }

    #[test]
    fn insert_then_find_round_trips() {
        let conn = get_test_connection();
        let category = create_category(&conn);
        let tag = create_tag("Work", &conn);

        let inserted = Transaction::insert(
            NewTransaction {
                category_id: Some(category.id),
                tag_ids: vec![tag.id],
                ..draft(3)
            },
            &conn,
        )
        .unwrap();

        assert_eq!(
            Transaction::find_by_id(inserted.id, &conn),
            Ok(Some(inserted))
        );
    }

    #[test]
    fn amount_keeps_its_scale() {
        let conn = get_test_connection();

        let inserted = Transaction::insert(
            NewTransaction {
                amount: Decimal::new(10, 2),
                ..draft(1)
            },
            &conn,
        )
        .unwrap();

        let found = Transaction::find_by_id(inserted.id, &conn).unwrap().unwrap();
        assert_eq!(found.amount.to_string(), "0.10");
    }

    #[test]
    fn dates_are_stored_in_utc() {
        let conn = get_test_connection();

        let inserted = Transaction::insert(
            NewTransaction {
                date: datetime!(2025-01-02 08:00 +12:00),
                ..draft(1)
            },
            &conn,
        )
        .unwrap();

        let found = Transaction::find_by_id(inserted.id, &conn).unwrap().unwrap();
        assert_eq!(found.date, datetime!(2025-01-01 20:00 UTC));
        assert!(found.date.offset().is_utc());
    }

    #[test]
    fn insert_fails_on_missing_category() {
        let conn = get_test_connection();

        let result = Transaction::insert(
            NewTransaction {
                category_id: Some(42),
                ..draft(1)
            },
            &conn,
        );

        assert_eq!(result, Err(Error::InvalidReference));
    }

    #[test]
    fn update_replaces_tags() {
        let conn = get_test_connection();
        let work = create_tag("Work", &conn);
        let travel = create_tag("Travel", &conn);
        let mut transaction = Transaction::insert(
            NewTransaction {
                tag_ids: vec![work.id],
                ..draft(1)
            },
            &conn,
        )
        .unwrap();
        transaction.tag_ids = vec![travel.id];

        transaction.update(&conn).unwrap();

        let found = Transaction::find_by_id(transaction.id, &conn).unwrap().unwrap();
        assert_eq!(found.tag_ids, vec![travel.id]);
    }

    #[test]
    fn deleting_category_deletes_its_transactions() {
        let conn = get_test_connection();
        let category = create_category(&conn);
        let transaction = Transaction::insert(
            NewTransaction {
                category_id: Some(category.id),
                ..draft(1)
            },
            &conn,
        )
        .unwrap();

        Category::delete_by_id(category.id, &conn).unwrap();

        assert_eq!(Transaction::find_by_id(transaction.id, &conn), Ok(None));
    }

    #[test]
    fn deleting_tag_keeps_its_transactions() {
        let conn = get_test_connection();
        let work = create_tag("Work", &conn);
        let travel = create_tag("Travel", &conn);
        let transaction = Transaction::insert(
            NewTransaction {
                tag_ids: vec![work.id, travel.id],
                ..draft(1)
            },
            &conn,
        )
        .unwrap();

        Tag::delete_by_id(work.id, &conn).unwrap();

        let found = Transaction::find_by_id(transaction.id, &conn).unwrap().unwrap();
        assert_eq!(found.tag_ids, vec![travel.id]);
    }

    #[test]
    fn owner_pages_are_ordered_by_date() {
        let conn = get_test_connection();
        let category = create_category(&conn);
        let later = Transaction::insert(
            NewTransaction {
                category_id: Some(category.id),
                ..draft(9)
            },
            &conn,
        )
        .unwrap();
        let earlier = Transaction::insert(
            NewTransaction {
                category_id: Some(category.id),
                ..draft(2)
            },
            &conn,
        )
        .unwrap();
        Transaction::insert(draft(5), &conn).unwrap();
        let owner = TransactionOwner::Category(category.id);

        let first = Transaction::find_page_for_owner(owner, PageRequest::new(0, 1).unwrap(), &conn)
            .unwrap();
        let second =
            Transaction::find_page_for_owner(owner, PageRequest::new(1, 1).unwrap(), &conn)
                .unwrap();

        assert_eq!(first, vec![earlier]);
        assert_eq!(second, vec![later]);
        assert_eq!(Transaction::count_for_owner(owner, &conn), Ok(2));
    }

    #[test]
    fn tag_owner_pages_follow_links() {
        let conn = get_test_connection();
        let work = create_tag("Work", &conn);
        let tagged = Transaction::insert(
            NewTransaction {
                tag_ids: vec![work.id],
                ..draft(4)
            },
            &conn,
        )
        .unwrap();
        Transaction::insert(draft(3), &conn).unwrap();
        let owner = TransactionOwner::Tag(work.id);

        let page =
            Transaction::find_page_for_owner(owner, PageRequest::new(0, 10).unwrap(), &conn)
                .unwrap();

        assert_eq!(page, vec![tagged]);
        assert_eq!(Transaction::count_for_owner(owner, &conn), Ok(1));
    }
}
