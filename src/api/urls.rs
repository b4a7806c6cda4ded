//! Short URL API endpoints
//!
//! Everything related to alias management: shorten, list, deactivate. All
//! of it is scoped to the account behind the bearer token.

use axum::Extension;
use axum::Json;
use axum::extract::OriginalUri;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::aliases::Alias;
use crate::service::AliasService;
use crate::storage::Storage;

use super::ApiError;
use super::CurrentAccount;
use super::Form;
use super::PathParameters;

/// Short URL response going to the account
///
/// Basically filtering which fields are shown to the caller
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortUrlResponse {
    /// Alias ID
    pub id: Uuid,

    /// The URL the alias redirects to
    pub original_url: String,

    /// Public short link
    pub short_url: String,

    /// Does the alias still resolve?
    pub active: bool,

    /// Creation date
    pub created_at: DateTime<Utc>,
}

impl ShortUrlResponse {
    /// Create a response from an [`Alias`]
    fn from_alias(alias: Alias) -> Self {
        Self {
            id: alias.id,
            original_url: alias.target_url,
            short_url: alias.public_url,
            active: alias.status.is_active(),
            created_at: alias.created_at,
        }
    }
}

/// Shorten form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenForm {
    /// The URL to shorten
    original_url: String,
}

/// Shorten a URL for the current account
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -H 'Authorization: Bearer tokentokentoken' \
///     -d '{ "originalUrl": "https://example.com/resource" }' \
///     http://localhost:7000/api/shorten
/// ```
///
/// Response:
/// ```json
/// { "id": "<uuid>", "originalUrl": "https://example.com/resource", ... }
/// ```
pub async fn shorten<S: Storage>(
    Extension(service): Extension<AliasService<S>>,
    current_account: CurrentAccount,
    OriginalUri(uri): OriginalUri,
    Form(form): Form<ShortenForm>,
) -> Result<Json<ShortUrlResponse>, ApiError> {
    let alias = service
        .create_alias(&current_account.id, &form.original_url)
        .await
        .map_err(|err| ApiError::from_service(err, uri.path()))?;

    tracing::debug!(r#"Shortened "{}" to /r/{}"#, alias.target_url, alias.code);

    Ok(Json(ShortUrlResponse::from_alias(alias)))
}

/// List all short URLs of the current account, newest first
///
/// Request:
/// ```sh
/// curl -v -H 'Authorization: Bearer tokentokentoken' \
///     http://localhost:7000/api/urls
/// ```
///
/// Response:
/// ```json
/// [ { "id": "<uuid>", "originalUrl": "https://example.com/resource", ... } ]
/// ```
pub async fn list<S: Storage>(
    Extension(service): Extension<AliasService<S>>,
    current_account: CurrentAccount,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<Vec<ShortUrlResponse>>, ApiError> {
    let aliases = service
        .list_aliases(&current_account.id)
        .await
        .map_err(|err| ApiError::from_service(err, uri.path()))?;

    Ok(Json(
        aliases
            .into_iter()
            .map(ShortUrlResponse::from_alias)
            .collect(),
    ))
}

/// Deactivate a short URL of the current account
///
/// The alias keeps existing and keeps its code reserved, it just no longer
/// resolves. Repeating the call is fine.
///
/// Request:
/// ```sh
/// curl -v -XDELETE \
///     -H 'Authorization: Bearer tokentokentoken' \
///     http://localhost:7000/api/urls/<uuid>
/// ```
pub async fn deactivate<S: Storage>(
    Extension(service): Extension<AliasService<S>>,
    current_account: CurrentAccount,
    OriginalUri(uri): OriginalUri,
    PathParameters(alias_id): PathParameters<Uuid>,
) -> Result<StatusCode, ApiError> {
    service
        .deactivate(&alias_id, &current_account.id)
        .await
        .map_err(|err| ApiError::from_service(err, uri.path()))?;

    Ok(StatusCode::NO_CONTENT)
}
