//! API request helpers
//!
//! Wrappers around the JSON body and path parameter extractors so that
//! rejections come out in the shared error body shape, with a 400 status

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::extract::Json;
use axum::extract::OriginalUri;
use axum::extract::Path;
use axum::extract::Request;
use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::ApiError;

/// Wrapper for the JSON body extractor
pub struct Form<F>(pub F);

impl<S, F> FromRequest<S> for Form<F>
where
    S: Send + Sync,
    F: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let path = req
            .extensions()
            .get::<OriginalUri>()
            .map_or_else(|| req.uri().path().to_string(), |uri| uri.0.path().to_string());

        match Json::<F>::from_request(req, state).await {
            Ok(Json(form)) => Ok(Form(form)),
            Err(rejection) => Err(json_error(&rejection, &path)),
        }
    }
}

fn json_error(rejection: &JsonRejection, path: &str) -> ApiError {
    let message = match rejection {
        JsonRejection::JsonDataError(err) => format!("Validation failed: {err}"),
        JsonRejection::JsonSyntaxError(_) => "JSON syntax error".to_string(),
        JsonRejection::MissingJsonContentType(_) => {
            "Missing `application/json` content type".to_string()
        }
        _ => "Could not read request body".to_string(),
    };

    ApiError::bad_request(message, path)
}

/// Wrapper for the path parameter extractor
pub struct PathParameters<P>(pub P);

impl<S, P> FromRequestParts<S> for PathParameters<P>
where
    S: Send + Sync,
    P: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = request_path(parts);

        match Path::<P>::from_request_parts(parts, state).await {
            Ok(Path(parameters)) => Ok(PathParameters(parameters)),
            Err(PathRejection::FailedToDeserializePathParams(_)) => {
                Err(ApiError::bad_request("Invalid path parameter", &path))
            }
            Err(_) => Err(ApiError::bad_request("Missing path parameter", &path)),
        }
    }
}

/// Full path of the request, even inside a nested router
pub fn request_path(parts: &Parts) -> String {
    parts
        .extensions
        .get::<OriginalUri>()
        .map_or_else(|| parts.uri.path().to_string(), |uri| uri.0.path().to_string())
}
