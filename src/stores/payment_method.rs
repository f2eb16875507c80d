//! Defines the payment method store trait.

use crate::{
    models::{DatabaseID, NewPaymentMethod, PaymentMethod, UserID},
    Error,
};

/// Handles the persistence of payment methods.
pub trait PaymentMethodStore {
    /// Persist a new payment method and return the stored row.
    fn create(&mut self, new_payment_method: NewPaymentMethod) -> Result<PaymentMethod, Error>;

    /// Retrieve all payment methods belonging to the user `user_id`.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<PaymentMethod>, Error>;

    /// Replace the payment method with `id` with the data in `payment_method`.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if `id` does not refer to an existing
    /// payment method.
    fn update(
        &mut self,
        id: DatabaseID,
        payment_method: NewPaymentMethod,
    ) -> Result<PaymentMethod, Error>;

    /// Delete the payment method with `id` belonging to the user `user_id`.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if `id` does not refer to a payment
    /// method owned by `user_id`.
    fn delete(&mut self, id: DatabaseID, user_id: UserID) -> Result<(), Error>;
}
