//! The route handlers for managing categories.
//!
//! Categories are shared between all users, but managing them still requires
//! a valid bearer token.

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
    models::{Category, CategoryName, DatabaseID, NewCategory},
    stores::CategoryStore,
    Error,
};

/// The data a client sends to create or update a category.
#[derive(Deserialize)]
pub struct CreateCategory {
    /// The name of the category. Must be unique and non-empty.
    pub name: String,
    /// An optional free-text description.
    #[serde(default)]
    pub description: String,
}

/// Handler for creating a new category.
///
/// # Errors
///
/// This function will return an error if the name is empty or already taken.
pub async fn create_category(
    State(mut state): State<AppState>,
    _claims: Claims,
    Json(data): Json<CreateCategory>,
) -> Result<impl IntoResponse, Error> {
    let name = CategoryName::new(data.name)?;

    let category = state.category_store.create(NewCategory {
        name,
        description: data.description,
    })?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// Handler for retrieving the category with `id`.
///
/// # Errors
///
/// This function will return an [Error::NotFound] if `id` does not refer to
/// an existing category.
pub async fn get_category(
    State(state): State<AppState>,
    _claims: Claims,
    Path(id): Path<DatabaseID>,
) -> Result<Json<Category>, Error> {
    state.category_store.get(id).map(Json)
}

/// Handler for listing all categories.
pub async fn get_categories(
    State(state): State<AppState>,
    _claims: Claims,
) -> Result<Json<Vec<Category>>, Error> {
    state.category_store.get_all().map(Json)
}

/// Handler for replacing the category with `id`.
///
/// # Errors
///
/// This function will return an error if the name is empty or `id` does not
/// refer to an existing category.
pub async fn update_category(
    State(mut state): State<AppState>,
    _claims: Claims,
    Path(id): Path<DatabaseID>,
    Json(data): Json<CreateCategory>,
) -> Result<Json<Category>, Error> {
    let name = CategoryName::new(data.name)?;

    state
        .category_store
        .update(
            id,
            NewCategory {
                name,
                description: data.description,
            },
        )
        .map(Json)
}

/// Handler for deleting the category with `id`.
///
/// # Errors
///
/// This function will return an [Error::NotFound] if `id` does not refer to
/// an existing category.
pub async fn delete_category(
    State(mut state): State<AppState>,
    _claims: Claims,
    Path(id): Path<DatabaseID>,
) -> Result<StatusCode, Error> {
    state.category_store.delete(id)?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod category_route_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{build_router, models::Category, stores::sqlite::initialize, AppState};

    fn new_test_server() -> TestServer {
        let db_connection =
            Connection::open_in_memory().expect("Could not open database in memory.");
        initialize(&db_connection).expect("Could not initialize database.");

        let state = AppState::new(db_connection, "42");

        TestServer::new(build_router().with_state(state)).expect("Could not create test server.")
    }

    async fn sign_up(server: &TestServer, email: &str) -> String {
        server
            .post("/register")
            .content_type("application/json")
            .json(&json!({
                "name": "Test User",
                "email": email,
                "password": "averysafeandsecurepassword",
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post("/login")
            .content_type("application/json")
            .json(&json!({
                "email": email,
                "password": "averysafeandsecurepassword",
            }))
            .await;

        response.assert_status_ok();

        response.json::<String>()
    }

    #[tokio::test]
    async fn create_and_get_category() {
        let server = new_test_server();
        let token = sign_up(&server, "alice@example.com").await;

        let response = server
            .post("/categories")
            .authorization_bearer(&token)
            .content_type("application/json")
            .json(&json!({ "name": "Groceries", "description": "Food shopping" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let id = response.json::<Category>().id();

        let response = server
            .get(&format!("/categories/{id}"))
            .authorization_bearer(&token)
            .await;

        response.assert_status_ok();

        let category = response.json::<Category>();
        assert_eq!(category.name().as_ref(), "Groceries");
        assert_eq!(category.description(), "Food shopping");
    }

    #[tokio::test]
    async fn create_category_fails_with_empty_name() {
        let server = new_test_server();
        let token = sign_up(&server, "alice@example.com").await;

        server
            .post("/categories")
            .authorization_bearer(&token)
            .content_type("application/json")
            .json(&json!({ "name": "" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_category_fails_with_duplicate_name() {
        let server = new_test_server();
        let token = sign_up(&server, "alice@example.com").await;

        server
            .post("/categories")
            .authorization_bearer(&token)
            .content_type("application/json")
            .json(&json!({ "name": "Groceries" }))
            .await
            .assert_status(StatusCode::CREATED);

        server
            .post("/categories")
            .authorization_bearer(&token)
            .content_type("application/json")
            .json(&json!({ "name": "Groceries" }))
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn categories_are_shared_between_users() {
        let server = new_test_server();
        let alice = sign_up(&server, "alice@example.com").await;
        let bob = sign_up(&server, "bob@example.com").await;

        server
            .post("/categories")
            .authorization_bearer(&alice)
            .content_type("application/json")
            .json(&json!({ "name": "Groceries" }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server.get("/categories").authorization_bearer(&bob).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Vec<Category>>().len(), 1);
    }

    #[tokio::test]
    async fn update_category_replaces_name() {
        let server = new_test_server();
        let token = sign_up(&server, "alice@example.com").await;

        let response = server
            .post("/categories")
            .authorization_bearer(&token)
            .content_type("application/json")
            .json(&json!({ "name": "Graceries" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let id = response.json::<Category>().id();

        let response = server
            .put(&format!("/categories/{id}"))
            .authorization_bearer(&token)
            .content_type("application/json")
            .json(&json!({ "name": "Groceries" }))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Category>().name().as_ref(), "Groceries");
    }

    #[tokio::test]
    async fn delete_category_succeeds_then_reports_not_found() {
        let server = new_test_server();
        let token = sign_up(&server, "alice@example.com").await;

        let response = server
            .post("/categories")
            .authorization_bearer(&token)
            .content_type("application/json")
            .json(&json!({ "name": "Groceries" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let id = response.json::<Category>().id();

        server
            .delete(&format!("/categories/{id}"))
            .authorization_bearer(&token)
            .await
            .assert_status_ok();

        server
            .get(&format!("/categories/{id}"))
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_categories_fails_without_token() {
        let server = new_test_server();

        server
            .get("/categories")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
