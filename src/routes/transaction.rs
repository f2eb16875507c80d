//! The route handlers for recording, listing and deleting transactions.
//!
//! Creation goes through [TransactionService] so that expenses are checked
//! against the authenticated user's budgets.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    auth::Claims,
    config::AppState,
    models::{DatabaseID, NewTransaction, Transaction, TransactionKind},
    services::TransactionService,
    stores::UserStore,
    Error,
};

/// The data a client sends to record a new transaction.
///
/// The user is taken from the bearer token, not the request body.
#[derive(Deserialize)]
pub struct CreateTransaction {
    /// Whether the transaction is an income or an expense.
    pub kind: TransactionKind,
    /// The amount of money earned or spent. Must be greater than zero.
    pub amount: f64,
    /// The ID of the category the transaction belongs to.
    pub category_id: DatabaseID,
    /// The date the transaction occurred.
    pub date: NaiveDate,
    /// An optional free-text note.
    #[serde(default)]
    pub note: String,
}

/// Handler for recording a new transaction for the authenticated user.
///
/// # Errors
///
/// This function will return an error if:
/// - the amount is not greater than zero,
/// - the category does not exist,
/// - the transaction is an expense whose amount exceeds the limit of one of
///   the user's budgets for the same category,
/// - or the user's budgets could not be fetched.
pub async fn create_transaction(
    State(state): State<AppState>,
    claims: Claims,
    Json(data): Json<CreateTransaction>,
) -> Result<impl IntoResponse, Error> {
    let user = state.user_store.get_by_email(&claims.email)?;

    let new_transaction = NewTransaction::new(
        user.id(),
        data.kind,
        data.amount,
        data.category_id,
        data.date,
        data.note,
    )?;

    let mut service = TransactionService::new(state.budget_store, state.transaction_store);
    let transaction = service.add_transaction(new_transaction)?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// Handler for listing the authenticated user's transactions.
pub async fn get_transactions(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<Vec<Transaction>>, Error> {
    let user = state.user_store.get_by_email(&claims.email)?;

    let service = TransactionService::new(state.budget_store, state.transaction_store);

    service.transactions_for_user(user.id()).map(Json)
}

/// Handler for deleting the transaction with `id`.
///
/// # Errors
///
/// This function will return an [Error::NotFound] if `id` does not refer to
/// a transaction recorded by the authenticated user.
pub async fn delete_transaction(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<DatabaseID>,
) -> Result<StatusCode, Error> {
    let user = state.user_store.get_by_email(&claims.email)?;

    let mut service = TransactionService::new(state.budget_store, state.transaction_store);

    service.delete_transaction(id, user.id())?;

    Ok(StatusCode::OK)
}
