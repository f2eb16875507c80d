//! Defines the user store trait.

use email_address::EmailAddress;

use crate::{
    models::{NewUser, User},
    Error,
};

/// Handles the persistence of users.
pub trait UserStore {
    /// Persist a new user and return the stored row.
    ///
    /// # Errors
    /// Returns an [Error::DuplicateEmail] if the email is already registered.
    fn create(&mut self, new_user: NewUser) -> Result<User, Error>;

    /// Retrieve the user registered with `email`.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if no user is registered with `email`.
    fn get_by_email(&self, email: &EmailAddress) -> Result<User, Error>;
}
