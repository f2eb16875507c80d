//! Implements the struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use jsonwebtoken::{DecodingKey, EncodingKey};
use rusqlite::Connection;

use crate::{
    auth::AuthError,
    stores::sqlite::{
        SQLiteBudgetStore, SQLiteCategoryStore, SQLitePaymentMethodStore, SQLiteTransactionStore,
        SQLiteUserStore,
    },
};

#[derive(Clone)]
struct JwtKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

/// The state of the REST server: the JWT keys and a store per entity, all
/// sharing one SQLite connection.
#[derive(Clone)]
pub struct AppState {
    db_connection: Arc<Mutex<Connection>>,
    jwt_keys: JwtKeys,
    /// The store for managing [users](crate::models::User).
    pub user_store: SQLiteUserStore,
    /// The store for managing [categories](crate::models::Category).
    pub category_store: SQLiteCategoryStore,
    /// The store for managing [transactions](crate::models::Transaction).
    pub transaction_store: SQLiteTransactionStore,
    /// The store for managing [budgets](crate::models::Budget).
    pub budget_store: SQLiteBudgetStore,
    /// The store for managing [payment methods](crate::models::PaymentMethod).
    pub payment_method_store: SQLitePaymentMethodStore,
}

impl AppState {
    /// Create a new [AppState] that owns `db_connection` and signs JWTs with
    /// `jwt_secret`.
    pub fn new(db_connection: Connection, jwt_secret: &str) -> Self {
        let db_connection = Arc::new(Mutex::new(db_connection));

        Self {
            db_connection: db_connection.clone(),
            jwt_keys: JwtKeys {
                encoding_key: EncodingKey::from_secret(jwt_secret.as_ref()),
                decoding_key: DecodingKey::from_secret(jwt_secret.as_ref()),
            },
            user_store: SQLiteUserStore::new(db_connection.clone()),
            category_store: SQLiteCategoryStore::new(db_connection.clone()),
            transaction_store: SQLiteTransactionStore::new(db_connection.clone()),
            budget_store: SQLiteBudgetStore::new(db_connection.clone()),
            payment_method_store: SQLitePaymentMethodStore::new(db_connection),
        }
    }

    /// The database connection shared by the stores.
    ///
    /// Used by the readiness probe; everything else should go through the
    /// stores.
    pub fn db_connection(&self) -> &Mutex<Connection> {
        &self.db_connection
    }

    /// The encoding key for JWTs.
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.jwt_keys.encoding_key
    }

    /// The decoding key for JWTs.
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.jwt_keys.decoding_key
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AppState
where
    Self: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(_: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_ref(state))
    }
}
