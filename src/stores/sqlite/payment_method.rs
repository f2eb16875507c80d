//! Implements a SQLite backed payment method store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    models::{DatabaseID, NewPaymentMethod, PaymentMethod, UserID},
    stores::PaymentMethodStore,
    Error,
};

/// Stores payment methods in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLitePaymentMethodStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLitePaymentMethodStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn map_row(row: &Row) -> Result<PaymentMethod, rusqlite::Error> {
        Ok(PaymentMethod::new(
            row.get(0)?,
            row.get(1)?,
            UserID::new(row.get(2)?),
        ))
    }
}

impl PaymentMethodStore for SQLitePaymentMethodStore {
    fn create(&mut self, new_payment_method: NewPaymentMethod) -> Result<PaymentMethod, Error> {
        let connection = self.connection.lock().unwrap();

        connection.execute(
            "INSERT INTO payment_method (name, user_id) VALUES (?1, ?2)",
            (
                new_payment_method.name(),
                new_payment_method.user_id().as_i64(),
            ),
        )?;

        let id = connection.last_insert_rowid();

        Ok(PaymentMethod::new(
            id,
            new_payment_method.name().to_owned(),
            new_payment_method.user_id(),
        ))
    }

    fn get_by_user(&self, user_id: UserID) -> Result<Vec<PaymentMethod>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT id, name, user_id FROM payment_method WHERE user_id = :user_id")?
            .query_map(&[(":user_id", &user_id.as_i64())], Self::map_row)?
            .map(|maybe_payment_method| maybe_payment_method.map_err(Error::from))
            .collect()
    }

    fn update(
        &mut self,
        id: DatabaseID,
        payment_method: NewPaymentMethod,
    ) -> Result<PaymentMethod, Error> {
        let rows_updated = self.connection.lock().unwrap().execute(
            "UPDATE payment_method SET name = ?1 WHERE id = ?2 AND user_id = ?3",
            (
                payment_method.name(),
                id,
                payment_method.user_id().as_i64(),
            ),
        )?;

        if rows_updated == 0 {
            return Err(Error::NotFound);
        }

        Ok(PaymentMethod::new(
            id,
            payment_method.name().to_owned(),
            payment_method.user_id(),
        ))
    }

    fn delete(&mut self, id: DatabaseID, user_id: UserID) -> Result<(), Error> {
        let rows_deleted = self.connection.lock().unwrap().execute(
            "DELETE FROM payment_method WHERE id = ?1 AND user_id = ?2",
            (id, user_id.as_i64()),
        )?;

        if rows_deleted == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}
