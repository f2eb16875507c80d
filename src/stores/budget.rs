//! Defines the budget store trait.

use crate::{
    models::{Budget, DatabaseID, NewBudget, UserID},
    Error,
};

/// Handles the persistence of budgets.
pub trait BudgetStore {
    /// Persist a new budget and return the stored row.
    fn create(&mut self, new_budget: NewBudget) -> Result<Budget, Error>;

    /// Retrieve all budgets belonging to the user `user_id`, in the order
    /// they were stored.
    ///
    /// This is the lookup used to validate new expense transactions; the
    /// returned order decides which budget rejects a transaction when several
    /// budgets cover the same category.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Budget>, Error>;

    /// Replace the budget with `id` with the validated data in `budget`.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if `id` does not refer to an existing
    /// budget.
    fn update(&mut self, id: DatabaseID, budget: NewBudget) -> Result<Budget, Error>;

    /// Delete the budget with `id` belonging to the user `user_id`.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if `id` does not refer to a budget owned
    /// by `user_id`.
    fn delete(&mut self, id: DatabaseID, user_id: UserID) -> Result<(), Error>;
}
