//! Current account service
//!
//! Issues bearer tokens and gets the acting account back out of the
//! Authorization header. The token is the only thing the rest of the system
//! needs to scope alias operations: a validated token yields a stable
//! account identifier.

use axum::Extension;
use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::accounts::Account;
use crate::api::ApiError;
use crate::api::request::request_path;

/// The keys used for encoding/decoding JWT tokens
#[derive(Clone)]
pub struct JwtKeys {
    /// The encoding key
    encoding: EncodingKey,

    /// The decoding key
    decoding: DecodingKey,
}

impl JwtKeys {
    /// Create new encoding/decoding keys, derived from a secret
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// The JWT claims that identify an account
#[derive(Debug, Deserialize, Serialize)]
struct Claims {
    /// The account ID
    sub: Uuid,

    /// The account email
    email: String,

    /// Issued at, seconds since the epoch
    iat: i64,

    /// Expires at, seconds since the epoch
    exp: i64,
}

/// Token response served to the account
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// The bearer token for follow up requests
    pub token: String,
}

/// The account acting in the current request
///
/// Extracted from a validated bearer token, without touching storage
#[derive(Clone, Debug)]
pub struct CurrentAccount {
    /// The account ID, scopes all alias operations
    pub id: Uuid,

    /// The account email
    pub email: String,
}

/// Issue a token for the outside world for a given account
///
/// # Errors
///
/// Will return `Err` when the claims can not be signed
pub fn issue_token(
    jwt_keys: &JwtKeys,
    account: &Account,
    expires_in: i64,
    path: &str,
) -> Result<TokenResponse, ApiError> {
    use jsonwebtoken::Header;
    use jsonwebtoken::encode;

    let issued_at = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: account.id,
        email: account.email.clone(),
        iat: issued_at,
        exp: issued_at + expires_in,
    };

    let token = encode(&Header::default(), &claims, &jwt_keys.encoding)
        .map_err(|err| ApiError::internal_server_error(err, path))?;

    Ok(TokenResponse { token })
}

impl<S> FromRequestParts<S> for CurrentAccount
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        use jsonwebtoken::Validation;
        use jsonwebtoken::decode;

        let path = request_path(parts);

        // Extract the token from the authorization header
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::unauthorized("Missing bearer token", &path))?;

        let Extension(jwt_keys) = parts
            .extract::<Extension<JwtKeys>>()
            .await
            .map_err(|err| ApiError::internal_server_error(err, &path))?;

        // Signature and expiry are both verified here
        let token_data = decode::<Claims>(bearer.token(), &jwt_keys.decoding, &Validation::default())
            .map_err(|err| ApiError::unauthorized(format!("Invalid token: {err}"), &path))?;

        let claims = token_data.claims;

        Ok(CurrentAccount {
            id: claims.sub,
            email: claims.email,
        })
    }
}
