//! The route handler for registering a new user.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

use crate::{
    config::AppState,
    models::{NewUser, PasswordHash, RawPassword, User, UserID},
    stores::UserStore,
    Error,
};

/// The data a client sends to register a new user.
#[derive(Deserialize)]
pub struct RegisterUser {
    /// The display name of the user.
    pub name: String,
    /// The email address to register with.
    pub email: EmailAddress,
    /// The plain-text password. It is hashed before being stored.
    pub password: String,
}

/// The view of a user sent back to clients. It omits the password hash.
#[derive(Serialize, Deserialize)]
pub struct UserView {
    /// The ID of the user.
    pub id: UserID,
    /// The display name of the user.
    pub name: String,
    /// The email address the user registered with.
    pub email: EmailAddress,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            name: user.name().to_string(),
            email: user.email().to_owned(),
        }
    }
}

/// Handler for registering a new user.
///
/// # Errors
///
/// This function will return an error if:
/// - the password is empty or could not be hashed,
/// - or the email address is already registered.
pub async fn register(
    State(mut state): State<AppState>,
    Json(data): Json<RegisterUser>,
) -> Result<impl IntoResponse, Error> {
    let raw_password = RawPassword::new(data.password)?;
    let password_hash = PasswordHash::new(&raw_password)?;

    let user = state.user_store.create(NewUser {
        name: data.name,
        email: data.email,
        password_hash,
    })?;

    Ok((StatusCode::CREATED, Json(UserView::from(&user))))
}
