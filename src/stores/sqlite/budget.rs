//! Implements a SQLite backed budget store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    models::{Budget, DatabaseID, NewBudget, UserID},
    stores::BudgetStore,
    Error,
};

/// Stores budgets in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteBudgetStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteBudgetStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn map_row(row: &Row) -> Result<Budget, rusqlite::Error> {
        Ok(Budget::new(
            row.get(0)?,
            UserID::new(row.get(1)?),
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
        ))
    }
}

impl BudgetStore for SQLiteBudgetStore {
    /// Create a new budget in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidForeignKey] if the category or user id does not refer
    ///   to an existing row,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn create(&mut self, new_budget: NewBudget) -> Result<Budget, Error> {
        let connection = self.connection.lock().unwrap();

        connection.execute(
            "INSERT INTO budget (user_id, category_id, \"limit\", start_date, end_date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                new_budget.user_id().as_i64(),
                new_budget.category_id(),
                new_budget.limit(),
                new_budget.start_date(),
                new_budget.end_date(),
            ),
        )?;

        let id = connection.last_insert_rowid();

        Ok(Budget::new(
            id,
            new_budget.user_id(),
            new_budget.category_id(),
            new_budget.limit(),
            *new_budget.start_date(),
            *new_budget.end_date(),
        ))
    }

    /// Retrieve the budgets owned by the user `user_id`, in insertion order.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Budget>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, user_id, category_id, \"limit\", start_date, end_date
                 FROM budget WHERE user_id = :user_id",
            )?
            .query_map(&[(":user_id", &user_id.as_i64())], Self::map_row)?
            .map(|maybe_budget| maybe_budget.map_err(Error::from))
            .collect()
    }

    /// Replace the budget with `id` with the validated data in `budget`.
    ///
    /// The update is scoped to the owning user so that clients cannot modify
    /// (or probe for) other users' budgets.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a budget owned by the
    ///   user in `budget`,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update(&mut self, id: DatabaseID, budget: NewBudget) -> Result<Budget, Error> {
        let rows_updated = self.connection.lock().unwrap().execute(
            "UPDATE budget
             SET category_id = ?1, \"limit\" = ?2, start_date = ?3, end_date = ?4
             WHERE id = ?5 AND user_id = ?6",
            (
                budget.category_id(),
                budget.limit(),
                budget.start_date(),
                budget.end_date(),
                id,
                budget.user_id().as_i64(),
            ),
        )?;

        if rows_updated == 0 {
            return Err(Error::NotFound);
        }

        Ok(Budget::new(
            id,
            budget.user_id(),
            budget.category_id(),
            budget.limit(),
            *budget.start_date(),
            *budget.end_date(),
        ))
    }

    /// Delete the budget with `id` belonging to the user `user_id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a budget owned by
    ///   `user_id`,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn delete(&mut self, id: DatabaseID, user_id: UserID) -> Result<(), Error> {
        let rows_deleted = self.connection.lock().unwrap().execute(
            "DELETE FROM budget WHERE id = ?1 AND user_id = ?2",
            (id, user_id.as_i64()),
        )?;

        if rows_deleted == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}
