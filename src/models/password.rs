use std::fmt::Display;

use bcrypt::{hash, verify, DEFAULT_COST};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A password that has been received from the user but not yet hashed.
///
/// Raw passwords are never stored; they only exist in memory between the
/// request handler and the hashing call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPassword(String);

impl RawPassword {
    /// Validate a plain-text password.
    ///
    /// # Errors
    ///
    /// This function will return an error if the password is empty.
    pub fn new(raw_password: String) -> Result<Self, Error> {
        if raw_password.is_empty() {
            Err(Error::InvalidPassword(
                "passwords cannot be empty".to_string(),
            ))
        } else {
            Ok(Self(raw_password))
        }
    }
}

impl AsRef<str> for RawPassword {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A bcrypt hash of a user's password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash a validated password.
    ///
    /// # Errors
    ///
    /// This function will return an error if the password could not be hashed.
    pub fn new(raw_password: &RawPassword) -> Result<Self, Error> {
        hash(raw_password.as_ref(), DEFAULT_COST)
            .map(Self)
            .map_err(|error| Error::HashingError(error.to_string()))
    }

    /// Create a new `PasswordHash` without any validation or hashing.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because
    /// if the string is not a valid bcrypt hash it will cause incorrect
    /// behaviour but not affect memory safety. It should only be called on
    /// strings coming out of a trusted source such as the application's
    /// database.
    pub fn new_unchecked(raw_password_hash: String) -> Self {
        Self(raw_password_hash)
    }

    /// Check that `raw_password` matches the stored password.
    ///
    /// # Errors
    ///
    /// This function will return an error if the stored string is not a valid
    /// bcrypt hash.
    pub fn verify(&self, raw_password: &RawPassword) -> Result<bool, Error> {
        verify(raw_password.as_ref(), &self.0)
            .map_err(|error| Error::HashingError(error.to_string()))
    }
}

impl Display for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
