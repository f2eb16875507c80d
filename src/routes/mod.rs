//! Defines the REST API's routes and their handlers.

pub mod budget;
pub mod category;
pub mod payment_method;
pub mod transaction;
pub mod user;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{auth, config::AppState};

/// Return a router with all of the app's routes.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/register", post(user::register))
        .route("/login", post(auth::sign_in))
        .route(
            "/transactions",
            get(transaction::get_transactions).post(transaction::create_transaction),
        )
        .route("/transactions/:id", delete(transaction::delete_transaction))
        .route(
            "/budgets",
            get(budget::get_budgets).post(budget::create_budget),
        )
        .route(
            "/budgets/:id",
            put(budget::update_budget).delete(budget::delete_budget),
        )
        .route(
            "/categories",
            get(category::get_categories).post(category::create_category),
        )
        .route(
            "/categories/:id",
            get(category::get_category)
                .put(category::update_category)
                .delete(category::delete_category),
        )
        .route(
            "/payment_methods",
            get(payment_method::get_payment_methods).post(payment_method::create_payment_method),
        )
        .route(
            "/payment_methods/:id",
            put(payment_method::update_payment_method)
                .delete(payment_method::delete_payment_method),
        )
        .layer(TraceLayer::new_for_http())
}

/// Liveness probe. Always succeeds while the server is running.
async fn health() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe. Succeeds once the database accepts queries.
async fn ready(State(state): State<AppState>) -> StatusCode {
    let Ok(connection) = state.db_connection().lock() else {
        return StatusCode::SERVICE_UNAVAILABLE;
    };

    match connection.query_row("SELECT 1", [], |_| Ok(())) {
        Ok(()) => StatusCode::OK,
        Err(error) => {
            tracing::error!("Readiness check failed: {error}");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
