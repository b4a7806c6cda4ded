//! All API endpoint setup

use axum::Router;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;

pub use current_account::CurrentAccount;
pub use current_account::JwtKeys;
pub use current_account::TokenResponse;
pub use request::Form;
pub use request::PathParameters;
pub use response::ApiError;

use crate::storage::Storage;

mod accounts;
mod current_account;
mod request;
mod response;
mod urls;

/// Get the Axum router for all API routes
pub fn router<S: Storage>() -> Router {
    Router::new()
        .route("/register", post(accounts::register::<S>))
        .route("/login", post(accounts::login::<S>))
        .route("/shorten", post(urls::shorten::<S>))
        .route("/urls", get(urls::list::<S>))
        .route("/urls/{id}", delete(urls::deactivate::<S>))
}
