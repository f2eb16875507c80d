//! Defines the transaction store trait.

use crate::{
    models::{DatabaseID, NewTransaction, Transaction, UserID},
    Error,
};

/// Handles the persistence of transactions.
///
/// Implementers do not apply any business rules; budget enforcement happens in
/// [TransactionService](crate::services::TransactionService) before a
/// transaction reaches the store.
pub trait TransactionStore {
    /// Persist a new transaction and return the stored row.
    fn create(&mut self, new_transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Retrieve all transactions recorded by the user `user_id`, in the order
    /// they were stored.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Transaction>, Error>;

    /// Delete the transaction with `id` belonging to the user `user_id`.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if `id` does not refer to a transaction
    /// recorded by `user_id`.
    fn delete(&mut self, id: DatabaseID, user_id: UserID) -> Result<(), Error>;
}
