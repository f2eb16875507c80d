//! The route handlers for managing the authenticated user's budgets.

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
    models::{Budget, DatabaseID, NewBudget},
    stores::{BudgetStore, UserStore},
    Error,
};

/// The data a client sends to create or update a budget.
///
/// The owner is taken from the bearer token, not the request body.
#[derive(Deserialize)]
pub struct CreateBudget {
    /// The ID of the category the budget applies to.
    pub category_id: DatabaseID,
    /// The maximum amount a single expense in the category may be. Must be
    /// greater than zero.
    pub limit: f64,
    /// The first day of the budget period.
    pub start_date: NaiveDate,
    /// The last day of the budget period. Must not precede `start_date`.
    pub end_date: NaiveDate,
}

/// Handler for creating a new budget for the authenticated user.
///
/// # Errors
///
/// This function will return an error if:
/// - the limit is not greater than zero,
/// - the end date precedes the start date,
/// - or the category does not exist.
pub async fn create_budget(
    State(mut state): State<AppState>,
    claims: Claims,
    Json(data): Json<CreateBudget>,
) -> Result<impl IntoResponse, Error> {
    let user = state.user_store.get_by_email(&claims.email)?;

    let new_budget = NewBudget::new(
        user.id(),
        data.category_id,
        data.limit,
        data.start_date,
        data.end_date,
    )?;

    let budget = state.budget_store.create(new_budget)?;

    Ok((StatusCode::CREATED, Json(budget)))
}

/// Handler for listing the authenticated user's budgets.
pub async fn get_budgets(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<Vec<Budget>>, Error> {
    let user = state.user_store.get_by_email(&claims.email)?;

    state.budget_store.get_by_user(user.id()).map(Json)
}

/// Handler for replacing the budget with `id`.
///
/// # Errors
///
/// This function will return an error if:
/// - the new data fails the same validation as for creation,
/// - or `id` does not refer to a budget owned by the authenticated user.
pub async fn update_budget(
    State(mut state): State<AppState>,
    claims: Claims,
    Path(id): Path<DatabaseID>,
    Json(data): Json<CreateBudget>,
) -> Result<Json<Budget>, Error> {
    let user = state.user_store.get_by_email(&claims.email)?;

    let new_budget = NewBudget::new(
        user.id(),
        data.category_id,
        data.limit,
        data.start_date,
        data.end_date,
    )?;

    state.budget_store.update(id, new_budget).map(Json)
}

/// Handler for deleting the budget with `id`.
///
/// # Errors
///
/// This function will return an [Error::NotFound] if `id` does not refer to
/// a budget owned by the authenticated user.
pub async fn delete_budget(
    State(mut state): State<AppState>,
    claims: Claims,
    Path(id): Path<DatabaseID>,
) -> Result<StatusCode, Error> {
    let user = state.user_store.get_by_email(&claims.email)?;

    state.budget_store.delete(id, user.id())?;

    Ok(StatusCode::OK)
}
