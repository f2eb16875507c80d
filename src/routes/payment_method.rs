//! The route handlers for managing the authenticated user's payment methods.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    auth::Claims,
    config::AppState,
    models::{DatabaseID, NewPaymentMethod, PaymentMethod},
    stores::{PaymentMethodStore, UserStore},
    Error,
};

/// The data a client sends to create or update a payment method.
///
/// The owner is taken from the bearer token, not the request body.
#[derive(Deserialize)]
pub struct CreatePaymentMethod {
    /// The name of the payment method, e.g., 'Credit Card'. Must be
    /// non-empty.
    pub name: String,
}

/// Handler for creating a new payment method for the authenticated user.
///
/// # Errors
///
/// This function will return an error if the name is empty.
pub async fn create_payment_method(
    State(mut state): State<AppState>,
    claims: Claims,
    Json(data): Json<CreatePaymentMethod>,
) -> Result<impl IntoResponse, Error> {
    let user = state.user_store.get_by_email(&claims.email)?;

    let new_payment_method = NewPaymentMethod::new(data.name, user.id())?;

    let payment_method = state.payment_method_store.create(new_payment_method)?;

    Ok((StatusCode::CREATED, Json(payment_method)))
}

/// Handler for listing the authenticated user's payment methods.
pub async fn get_payment_methods(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<Vec<PaymentMethod>>, Error> {
    let user = state.user_store.get_by_email(&claims.email)?;

    state.payment_method_store.get_by_user(user.id()).map(Json)
}

/// Handler for replacing the payment method with `id`.
///
/// # Errors
///
/// This function will return an error if the name is empty or `id` does not
/// refer to a payment method owned by the authenticated user.
pub async fn update_payment_method(
    State(mut state): State<AppState>,
    claims: Claims,
    Path(id): Path<DatabaseID>,
    Json(data): Json<CreatePaymentMethod>,
) -> Result<Json<PaymentMethod>, Error> {
    let user = state.user_store.get_by_email(&claims.email)?;

    let new_payment_method = NewPaymentMethod::new(data.name, user.id())?;

    state
        .payment_method_store
        .update(id, new_payment_method)
        .map(Json)
}

/// Handler for deleting the payment method with `id`.
///
/// # Errors
///
/// This function will return an [Error::NotFound] if `id` does not refer to
/// a payment method owned by the authenticated user.
pub async fn delete_payment_method(
    State(mut state): State<AppState>,
    claims: Claims,
    Path(id): Path<DatabaseID>,
) -> Result<StatusCode, Error> {
    let user = state.user_store.get_by_email(&claims.email)?;

    state.payment_method_store.delete(id, user.id())?;

    Ok(StatusCode::OK)
}
