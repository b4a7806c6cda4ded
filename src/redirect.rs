//! The redirect!
//!
//! The most important part of Curtail, the actual redirect logic

use axum::Extension;
use axum::extract::OriginalUri;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::http::header::LOCATION;

use crate::api::ApiError;
use crate::api::PathParameters;
use crate::service::AliasService;
use crate::storage::Storage;

/// Follow a short link
///
/// Looks up the active alias behind the code and answers with a
/// `302 Found` pointing at the target. Unknown and deactivated codes get
/// the same 404, the difference is nobody's business.
pub async fn redirect<S: Storage>(
    Extension(service): Extension<AliasService<S>>,
    OriginalUri(uri): OriginalUri,
    PathParameters(code): PathParameters<String>,
) -> Result<(StatusCode, HeaderMap), ApiError> {
    let alias = service
        .resolve(&code)
        .await
        .map_err(|err| ApiError::from_service(err, uri.path()))?;

    tracing::debug!(r#"Code "{code}" redirecting to: {}"#, alias.target_url);

    let mut headers = HeaderMap::new();
    headers.insert(
        LOCATION,
        // the target was validated as a URL at creation
        HeaderValue::from_str(&alias.target_url)
            .map_err(|err| ApiError::internal_server_error(err, uri.path()))?,
    );

    Ok((StatusCode::FOUND, headers))
}
