use std::fmt::Display;

use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

use crate::models::{DatabaseID, PasswordHash};

/// The ID of a [User].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserID(DatabaseID);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: DatabaseID) -> Self {
        Self(id)
    }

    /// The ID as an integer, e.g. for use in SQL queries.
    pub fn as_i64(&self) -> DatabaseID {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered user of the application.
///
/// New instances should be created through [`UserStore::create`](crate::stores::UserStore::create).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: UserID,
    name: String,
    email: EmailAddress,
    password_hash: PasswordHash,
}

impl User {
    /// Create a new `User`.
    ///
    /// Note that this does *not* add the user to the application database.
    pub fn new(id: UserID, name: String, email: EmailAddress, password_hash: PasswordHash) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
        }
    }

    /// The user's ID in the database.
    pub fn id(&self) -> UserID {
        self.id
    }

    /// The display name the user registered with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The email the user registered with.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// The hash of the user's password.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}

/// Data for creating a new user, produced by the registration handler.
#[derive(Debug)]
pub struct NewUser {
    /// The display name of the user.
    pub name: String,
    /// The email address of the user. Must not already be registered.
    pub email: EmailAddress,
    /// The hash of the user's password.
    pub password_hash: PasswordHash,
}
