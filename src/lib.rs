//! A personal finance tracker exposed as a JSON REST API.
//!
//! Users register and sign in with an email and password, record income and
//! expense transactions, and define per-category spending budgets. Creating an
//! expense transaction is gated by the user's budgets: an expense whose amount
//! exceeds the limit of a budget for the same category is rejected before
//! anything is written to the database.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_server::Handle;
use chrono::NaiveDate;
use serde_json::json;
use tokio::signal;

pub mod auth;
pub mod config;
pub mod models;
pub mod routes;
pub mod services;
pub mod stores;

pub use config::AppState;
pub use routes::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user's email already exists in the database. The client should try
    /// again with a different email address.
    #[error("the email address is already registered")]
    DuplicateEmail,

    /// The category name already exists in the database. The client should
    /// try again with a different name.
    #[error("the category name is already taken")]
    DuplicateName,

    /// A query was given an id that does not refer to an existing row. The
    /// client should check that the ids are valid.
    #[error("a referenced resource (e.g., category or user) does not exist")]
    InvalidForeignKey,

    /// A transaction was created with a zero or negative amount.
    #[error("{0} is not a valid amount, amounts must be greater than zero")]
    InvalidAmount(f64),

    /// A transaction kind other than `income` or `expense` was given.
    #[error("\"{0}\" is not a valid transaction kind, expected \"income\" or \"expense\"")]
    InvalidKind(String),

    /// A budget was created or updated with a zero or negative limit.
    #[error("{0} is not a valid budget limit, limits must be greater than zero")]
    InvalidLimit(f64),

    /// A budget's end date precedes its start date.
    #[error("the end date {end} must not be before the start date {start}")]
    InvalidDateRange {
        /// The first day of the budget period.
        start: NaiveDate,
        /// The offending last day of the budget period.
        end: NaiveDate,
    },

    /// An empty string was used to create a category or payment method name.
    #[error("names cannot be empty")]
    EmptyName,

    /// A password failed validation before hashing.
    #[error("the password is invalid: {0}")]
    InvalidPassword(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server,
    /// never sent to the client.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// An expense transaction's amount exceeds a budget limit for the same
    /// user and category. The transaction was not recorded.
    #[error("the transaction amount {amount} exceeds the budget limit {limit}")]
    BudgetExceeded {
        /// The amount of the rejected transaction.
        amount: f64,
        /// The limit of the violated budget.
        limit: f64,
    },

    /// The budgets needed to validate a transaction could not be fetched.
    /// The transaction was not recorded.
    #[error("could not fetch budgets to validate the transaction: {0}")]
    BudgetLookup(#[source] Box<Error>),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(_))
                if sql_error.extended_code == 787 =>
            {
                Error::InvalidForeignKey
            }
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("category.name") =>
            {
                Error::DuplicateName
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => Error::SqlError(error),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            Error::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            Error::DuplicateEmail | Error::DuplicateName => {
                (StatusCode::CONFLICT, self.to_string())
            }
            Error::BudgetExceeded { .. }
            | Error::InvalidForeignKey
            | Error::InvalidAmount(_)
            | Error::InvalidKind(_)
            | Error::InvalidLimit(_)
            | Error::InvalidDateRange { .. }
            | Error::InvalidPassword(_)
            | Error::EmptyName => (StatusCode::BAD_REQUEST, self.to_string()),
            // Everything else is a server-side failure whose details should
            // stay in the logs.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
