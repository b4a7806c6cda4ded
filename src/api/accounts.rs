//! Account API endpoints
//!
//! Registration and login, both answering with a bearer token

use axum::Extension;
use axum::Json;
use axum::extract::OriginalUri;
use serde::Deserialize;

use crate::config::Config;
use crate::password;
use crate::storage;
use crate::storage::CreateAccountValues;
use crate::storage::Storage;

use super::ApiError;
use super::Form;
use super::JwtKeys;
use super::TokenResponse;
use super::current_account::issue_token;

/// Shortest accepted password
const MIN_PASSWORD_LENGTH: usize = 8;

/// Longest accepted email
const MAX_EMAIL_LENGTH: usize = 320;

/// Credentials for registration and login
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    /// Login credential
    email: String,

    /// Plain text password, only its hash is ever stored
    password: String,
}

/// Register a new account
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -d '{ "email": "someone@example.com", "password": "verysecret" }' \
///     http://localhost:7000/api/register
/// ```
///
/// Response:
/// ```json
/// { "token": "<jwt>" }
/// ```
pub async fn register<S: Storage>(
    Extension(storage): Extension<S>,
    Extension(jwt_keys): Extension<JwtKeys>,
    Extension(config): Extension<Config>,
    OriginalUri(uri): OriginalUri,
    Form(form): Form<CredentialsForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let path = uri.path();

    validate_credentials(&form, path)?;

    let hashed_password = password::hash(&form.password);
    let values = CreateAccountValues {
        email: &form.email,
        hashed_password: &hashed_password,
    };

    let account = match storage.create_account(&values).await {
        Ok(account) => account,
        Err(storage::Error::Conflict(_)) => {
            return Err(ApiError::conflict("Email is already registered", path));
        }
        Err(err) => return Err(ApiError::internal_server_error(err, path)),
    };

    tracing::debug!("Registered account {}", account.id);

    let token = issue_token(&jwt_keys, &account, config.token_expiry, path)?;

    Ok(Json(token))
}

/// Log in with existing credentials
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -d '{ "email": "someone@example.com", "password": "verysecret" }' \
///     http://localhost:7000/api/login
/// ```
///
/// Response:
/// ```json
/// { "token": "<jwt>" }
/// ```
pub async fn login<S: Storage>(
    Extension(storage): Extension<S>,
    Extension(jwt_keys): Extension<JwtKeys>,
    Extension(config): Extension<Config>,
    OriginalUri(uri): OriginalUri,
    Form(form): Form<CredentialsForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let path = uri.path();

    let account = storage
        .find_account_by_email(&form.email)
        .await
        .map_err(|err| ApiError::internal_server_error(err, path))?;

    // one answer for unknown email and wrong password, nothing to probe
    let invalid_credentials = || ApiError::unauthorized("Invalid email or password", path);

    let account = account.ok_or_else(invalid_credentials)?;

    if !password::verify(&account.hashed_password, &form.password) {
        return Err(invalid_credentials());
    }

    let token = issue_token(&jwt_keys, &account, config.token_expiry, path)?;

    Ok(Json(token))
}

/// Check registration credentials before they hit storage
fn validate_credentials(form: &CredentialsForm, path: &str) -> Result<(), ApiError> {
    let email = &form.email;

    if email.len() < 3 || email.len() > MAX_EMAIL_LENGTH || !email.contains('@') {
        return Err(ApiError::bad_request(
            "Email must be a valid address",
            path,
        ));
    }

    if form.password.len() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::bad_request(
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
            path,
        ));
    }

    Ok(())
}
