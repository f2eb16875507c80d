//! JWT bearer authentication: the sign-in handler, the token claims and the
//! extractor that route handlers use to require a valid token.

use axum::{
    async_trait,
    body::Body,
    extract::{FromRef, FromRequestParts, Json, State},
    http::request::Parts,
    http::{Response, StatusCode},
    response::IntoResponse,
    RequestPartsExt,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use chrono::{Duration, Utc};
use email_address::EmailAddress;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    config::AppState,
    models::RawPassword,
    stores::UserStore,
    Error,
};

/// How long a token stays valid after it is issued.
const TOKEN_DURATION_MINUTES: i64 = 15;

/// The contents of a JSON Web Token.
///
/// Extracting `Claims` in a route handler requires a valid bearer token, which
/// makes the route require authentication.
#[derive(Serialize, Deserialize)]
pub struct Claims {
    /// The expiry time of the token.
    pub exp: usize,
    /// The time the token was issued.
    pub iat: usize,
    /// Email of the user the token was issued to.
    pub email: EmailAddress,
}

#[async_trait]
impl<S> FromRequestParts<S> for Claims
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AuthError::InvalidToken)?;

        let app_state = parts
            .extract_with_state::<AppState, _>(state)
            .await
            .map_err(|_| AuthError::InvalidToken)?;

        let token_data = decode_jwt(bearer.token(), app_state.decoding_key())?;

        Ok(token_data.claims)
    }
}

/// The email and password sent by a client to sign in.
#[derive(Deserialize)]
pub struct Credentials {
    /// Email entered during sign-in.
    pub email: EmailAddress,
    /// Password entered during sign-in.
    pub password: String,
}

/// The errors that may occur during authentication.
#[derive(Debug)]
pub enum AuthError {
    /// The email is not registered or the password does not match.
    WrongCredentials,
    /// The request did not contain a (complete) set of credentials.
    MissingCredentials,
    /// The JWT could not be created.
    TokenCreation,
    /// The bearer token is missing, malformed or expired.
    InvalidToken,
    /// An unexpected error occurred, e.g., in the password hashing library.
    InternalError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response<Body> {
        let (status, error_message) = match self {
            AuthError::WrongCredentials => (StatusCode::UNAUTHORIZED, "Wrong credentials"),
            AuthError::MissingCredentials => (StatusCode::BAD_REQUEST, "Missing credentials"),
            AuthError::TokenCreation => (StatusCode::INTERNAL_SERVER_ERROR, "Token creation error"),
            AuthError::InvalidToken => (StatusCode::BAD_REQUEST, "Invalid token"),
            AuthError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Handler for sign-in requests.
///
/// Returns a JWT to be sent as a bearer token on subsequent requests.
///
/// # Errors
///
/// This function will return an error if:
/// - the email does not belong to a registered user,
/// - the password is not correct,
/// - or an internal error occurred when verifying the password.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<String>, AuthError> {
    let user = state
        .user_store
        .get_by_email(&credentials.email)
        .map_err(|error| match error {
            Error::NotFound => AuthError::WrongCredentials,
            error => {
                tracing::error!("Error matching user: {error:?}");
                AuthError::InternalError
            }
        })?;

    let raw_password =
        RawPassword::new(credentials.password).map_err(|_| AuthError::WrongCredentials)?;

    let password_is_correct = user.password_hash().verify(&raw_password).map_err(|error| {
        tracing::error!("Error verifying password: {error}");
        AuthError::InternalError
    })?;

    if password_is_correct {
        let token = encode_jwt(user.email(), state.encoding_key())?;

        Ok(Json(token))
    } else {
        Err(AuthError::WrongCredentials)
    }
}

fn encode_jwt(email: &EmailAddress, encoding_key: &EncodingKey) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = (now + Duration::minutes(TOKEN_DURATION_MINUTES)).timestamp() as usize;
    let iat = now.timestamp() as usize;
    let claims = Claims {
        exp,
        iat,
        email: email.to_owned(),
    };

    encode(&Header::default(), &claims, encoding_key).map_err(|error| {
        tracing::error!("Error encoding JWT: {error}");
        AuthError::TokenCreation
    })
}

fn decode_jwt(jwt_token: &str, decoding_key: &DecodingKey) -> Result<TokenData<Claims>, AuthError> {
    decode(jwt_token, decoding_key, &Validation::default()).map_err(|_| AuthError::InvalidToken)
}

#[cfg(test)]
mod auth_tests {
    use std::str::FromStr;

    use axum::{
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use axum_test::TestServer;
    use email_address::EmailAddress;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        auth,
        models::{NewUser, PasswordHash, RawPassword, User},
        stores::{sqlite::initialize, UserStore},
        AppState,
    };

    fn get_test_app_state() -> AppState {
        let db_connection =
            Connection::open_in_memory().expect("Could not open database in memory.");
        initialize(&db_connection).expect("Could not initialize database.");

        AppState::new(db_connection, "42")
    }

    fn insert_test_user(state: &AppState, email: &str, password: &str) -> User {
        let raw_password = RawPassword::new(password.to_string()).unwrap();

        state
            .user_store
            .clone()
            .create(NewUser {
                name: "Test User".to_string(),
                email: EmailAddress::from_str(email).unwrap(),
                password_hash: PasswordHash::new(&raw_password).unwrap(),
            })
            .unwrap()
    }

    #[test]
    fn decode_jwt_gives_correct_email_address() {
        let state = get_test_app_state();
        let email = EmailAddress::from_str("averyemail@email.com").unwrap();

        let jwt = auth::encode_jwt(&email, state.encoding_key()).unwrap();
        let claims = auth::decode_jwt(&jwt, state.decoding_key()).unwrap().claims;

        assert_eq!(claims.email, email);
    }

    #[tokio::test]
    async fn sign_in_succeeds_with_valid_credentials() {
        let state = get_test_app_state();
        let user = insert_test_user(&state, "foo@bar.baz", "averysafeandsecurepassword");

        let app = Router::new()
            .route("/login", post(auth::sign_in))
            .with_state(state);
        let server = TestServer::new(app).expect("Could not create test server.");

        server
            .post("/login")
            .content_type("application/json")
            .json(&json!({
                "email": user.email(),
                "password": "averysafeandsecurepassword",
            }))
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn sign_in_fails_with_missing_credentials() {
        let app = Router::new()
            .route("/login", post(auth::sign_in))
            .with_state(get_test_app_state());
        let server = TestServer::new(app).expect("Could not create test server.");

        server
            .post("/login")
            .content_type("application/json")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn sign_in_fails_with_unregistered_email() {
        let app = Router::new()
            .route("/login", post(auth::sign_in))
            .with_state(get_test_app_state());
        let server = TestServer::new(app).expect("Could not create test server.");

        server
            .post("/login")
            .content_type("application/json")
            .json(&json!({
                "email": "wrongemail@gmail.com",
                "password": "definitelyNotTheCorrectPassword",
            }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn sign_in_fails_with_wrong_password() {
        let state = get_test_app_state();
        let user = insert_test_user(&state, "foo@bar.baz", "averysafeandsecurepassword");

        let app = Router::new()
            .route("/login", post(auth::sign_in))
            .with_state(state);
        let server = TestServer::new(app).expect("Could not create test server.");

        server
            .post("/login")
            .content_type("application/json")
            .json(&json!({
                "email": user.email(),
                "password": "definitelyNotTheCorrectPassword",
            }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    async fn handler_with_auth(claims: auth::Claims) -> Json<EmailAddress> {
        Json(claims.email)
    }

    #[tokio::test]
    async fn get_protected_route_with_valid_jwt() {
        let state = get_test_app_state();
        let user = insert_test_user(&state, "foo@bar.baz", "averysafeandsecurepassword");

        let app = Router::new()
            .route("/login", post(auth::sign_in))
            .route("/protected", get(handler_with_auth))
            .with_state(state);
        let server = TestServer::new(app).expect("Could not create test server.");

        let response = server
            .post("/login")
            .content_type("application/json")
            .json(&json!({
                "email": user.email(),
                "password": "averysafeandsecurepassword",
            }))
            .await;

        response.assert_status_ok();
        let token = response.json::<String>();

        server
            .get("/protected")
            .authorization_bearer(token)
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn get_protected_route_fails_with_missing_header() {
        let app = Router::new()
            .route("/protected", get(handler_with_auth))
            .with_state(get_test_app_state());
        let server = TestServer::new(app).expect("Could not create test server.");

        server
            .get("/protected")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_protected_route_fails_with_garbage_token() {
        let app = Router::new()
            .route("/protected", get(handler_with_auth))
            .with_state(get_test_app_state());
        let server = TestServer::new(app).expect("Could not create test server.");

        server
            .get("/protected")
            .authorization_bearer("notavalidjwt")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
