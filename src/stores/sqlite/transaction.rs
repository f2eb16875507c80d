//! Implements a SQLite backed transaction store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    models::{DatabaseID, NewTransaction, Transaction, TransactionKind, UserID},
    stores::TransactionStore,
    Error,
};

/// Stores transactions in a SQLite database.
///
/// Note that because a transaction references the [User](crate::models::User)
/// and [Category](crate::models::Category) models, these tables must be set up
/// in the database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
        let id = row.get(0)?;
        let user_id = UserID::new(row.get(1)?);

        let raw_kind: String = row.get(2)?;
        let kind: TransactionKind = raw_kind.parse().map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                Box::new(error),
            )
        })?;

        let amount = row.get(3)?;
        let category_id = row.get(4)?;
        let date = row.get(5)?;
        let note = row.get(6)?;

        Ok(Transaction::new(
            id,
            user_id,
            kind,
            amount,
            category_id,
            date,
            note,
        ))
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidForeignKey] if the category or user id does not refer
    ///   to an existing row,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn create(&mut self, new_transaction: NewTransaction) -> Result<Transaction, Error> {
        let connection = self.connection.lock().unwrap();

        connection.execute(
            "INSERT INTO \"transaction\" (user_id, kind, amount, category_id, date, note)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                new_transaction.user_id().as_i64(),
                new_transaction.kind().as_str(),
                new_transaction.amount(),
                new_transaction.category_id(),
                new_transaction.date(),
                new_transaction.note(),
            ),
        )?;

        let id = connection.last_insert_rowid();

        Ok(Transaction::new(
            id,
            new_transaction.user_id(),
            new_transaction.kind(),
            new_transaction.amount(),
            new_transaction.category_id(),
            *new_transaction.date(),
            new_transaction.note().to_owned(),
        ))
    }

    /// Retrieve the transactions recorded by the user `user_id`.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Transaction>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, user_id, kind, amount, category_id, date, note
                 FROM \"transaction\" WHERE user_id = :user_id",
            )?
            .query_map(&[(":user_id", &user_id.as_i64())], Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
            .collect()
    }

    /// Delete the transaction with `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a transaction recorded
    ///   by `user_id`,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn delete(&mut self, id: DatabaseID, user_id: UserID) -> Result<(), Error> {
        let rows_deleted = self.connection.lock().unwrap().execute(
            "DELETE FROM \"transaction\" WHERE id = ?1 AND user_id = ?2",
            (id, user_id.as_i64()),
        )?;

        if rows_deleted == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}
