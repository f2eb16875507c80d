use serde::{Deserialize, Serialize};

use crate::{
    models::{DatabaseID, UserID},
    Error,
};

/// A way of paying for a transaction, e.g., 'Credit Card', 'Cash', 'PayPal'.
///
/// Owned by the user that created it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    id: DatabaseID,
    name: String,
    user_id: UserID,
}

impl PaymentMethod {
    /// Create a new payment method.
    ///
    /// Note that this does *not* add the payment method to the application database.
    pub fn new(id: DatabaseID, name: String, user_id: UserID) -> Self {
        Self { id, name, user_id }
    }

    /// The ID of the payment method.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// The name of the payment method.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ID of the user that created the payment method.
    pub fn user_id(&self) -> UserID {
        self.user_id
    }
}

/// Data for creating a new payment method.
#[derive(Debug)]
pub struct NewPaymentMethod {
    name: String,
    user_id: UserID,
}

impl NewPaymentMethod {
    /// Validate the data for a new payment method.
    ///
    /// # Errors
    ///
    /// This function will return an error if `name` is an empty string.
    pub fn new(name: String, user_id: UserID) -> Result<Self, Error> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }

        Ok(Self { name, user_id })
    }

    /// The name of the payment method.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ID of the user creating the payment method.
    pub fn user_id(&self) -> UserID {
        self.user_id
    }
}
