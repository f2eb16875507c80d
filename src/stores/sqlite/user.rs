//! Implements a SQLite backed user store.

use std::sync::{Arc, Mutex};

use email_address::EmailAddress;
use rusqlite::{Connection, Row};

use crate::{
    models::{NewUser, PasswordHash, User, UserID},
    stores::UserStore,
    Error,
};

/// Stores users in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteUserStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteUserStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn map_row(row: &Row) -> Result<User, rusqlite::Error> {
        let id = UserID::new(row.get(0)?);
        let name = row.get(1)?;
        let raw_email: String = row.get(2)?;
        let email = EmailAddress::new_unchecked(raw_email);
        let password_hash = PasswordHash::new_unchecked(row.get(3)?);

        Ok(User::new(id, name, email, password_hash))
    }
}

impl UserStore for SQLiteUserStore {
    /// Create a new user in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DuplicateEmail] if the email is already registered,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn create(&mut self, new_user: NewUser) -> Result<User, Error> {
        let connection = self.connection.lock().unwrap();

        connection.execute(
            "INSERT INTO user (name, email, password) VALUES (?1, ?2, ?3)",
            (
                &new_user.name,
                new_user.email.to_string(),
                new_user.password_hash.to_string(),
            ),
        )?;

        let id = UserID::new(connection.last_insert_rowid());

        Ok(User::new(
            id,
            new_user.name,
            new_user.email,
            new_user.password_hash,
        ))
    }

    /// Retrieve the user registered with `email`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if no user is registered with `email`,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn get_by_email(&self, email: &EmailAddress) -> Result<User, Error> {
        let user = self
            .connection
            .lock()
            .unwrap()
            .prepare("SELECT id, name, email, password FROM user WHERE email = :email")?
            .query_row(&[(":email", &email.to_string())], Self::map_row)?;

        Ok(user)
    }
}
