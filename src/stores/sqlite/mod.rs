//! SQLite backed implementations of the store traits.

mod budget;
mod category;
mod payment_method;
mod transaction;
mod user;

pub use budget::SQLiteBudgetStore;
pub use category::SQLiteCategoryStore;
pub use payment_method::SQLitePaymentMethodStore;
pub use transaction::SQLiteTransactionStore;
pub use user::SQLiteUserStore;

use rusqlite::Connection;

use crate::Error;

/// Create the application's tables in the database behind `connection`.
///
/// The tables are created inside a single exclusive SQL transaction so that a
/// half-initialized database is never left behind.
///
/// # Errors
/// Returns an error if the tables already exist or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // SQLite does not enforce foreign keys unless asked to.
    connection.pragma_update(None, "foreign_keys", true)?;

    let sql_transaction = rusqlite::Transaction::new_unchecked(
        connection,
        rusqlite::TransactionBehavior::Exclusive,
    )?;

    sql_transaction.execute(
        "CREATE TABLE user (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL
                )",
        (),
    )?;

    sql_transaction.execute(
        "CREATE TABLE category (
                id INTEGER PRIMARY KEY,
                name TEXT UNIQUE NOT NULL,
                description TEXT NOT NULL DEFAULT ''
                )",
        (),
    )?;

    sql_transaction.execute(
        "CREATE TABLE payment_method (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                user_id INTEGER NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    sql_transaction.execute(
        "CREATE TABLE \"transaction\" (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL,
                kind TEXT NOT NULL,
                amount REAL NOT NULL,
                category_id INTEGER NOT NULL,
                date TEXT NOT NULL,
                note TEXT NOT NULL DEFAULT '',
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE,
                FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    sql_transaction.execute(
        "CREATE TABLE budget (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL,
                category_id INTEGER NOT NULL,
                \"limit\" REAL NOT NULL,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE,
                FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    sql_transaction.commit()?;

    Ok(())
}
