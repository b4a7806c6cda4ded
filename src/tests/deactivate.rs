use axum::http::StatusCode;

use crate::tests::helper;

#[tokio::test]
async fn test_deactivate_is_idempotent() {
    let app = helper::setup_test_app().await;

    let access_token = helper::register(&app, "someone@example.com").await;
    let short_url = helper::shorten(&app, &access_token, "https://example.com/").await;

    let id = short_url.id.to_string();

    let (status_code, _) = helper::deactivate(&app, &access_token, &id).await;
    assert_eq!(StatusCode::NO_CONTENT, status_code);

    // deactivating again is fine
    let (status_code, _) = helper::deactivate(&app, &access_token, &id).await;
    assert_eq!(StatusCode::NO_CONTENT, status_code);

    // the alias stays in the listing, just inactive
    let (_, urls) = helper::list_urls(&app, &access_token).await;
    assert_eq!(1, urls.len());
    assert!(!urls[0].active);
}

#[tokio::test]
async fn test_deactivate_foreign_alias_is_not_found() {
    let app = helper::setup_test_app().await;

    let someone = helper::register(&app, "someone@example.com").await;
    let other = helper::register(&app, "other@example.com").await;

    let short_url = helper::shorten(&app, &someone, "https://example.com/").await;
    let id = short_url.id.to_string();

    // not a forbidden, existence must not leak
    let (status_code, body) = helper::deactivate(&app, &other, &id).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    helper::assert_error_body(&body, StatusCode::NOT_FOUND, &format!("/api/urls/{id}"));

    // still resolves for the public
    let (status_code, _) = helper::follow(&app, short_url.code()).await;
    assert_eq!(StatusCode::FOUND, status_code);
}

#[tokio::test]
async fn test_deactivate_unknown_alias() {
    let app = helper::setup_test_app().await;

    let access_token = helper::register(&app, "someone@example.com").await;

    let (status_code, _) =
        helper::deactivate(&app, &access_token, &uuid::Uuid::new_v4().to_string()).await;

    assert_eq!(StatusCode::NOT_FOUND, status_code);
}

#[tokio::test]
async fn test_deactivate_invalid_id() {
    let app = helper::setup_test_app().await;

    let access_token = helper::register(&app, "someone@example.com").await;

    let (status_code, body) = helper::deactivate(&app, &access_token, "some-id").await;

    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    helper::assert_error_body(&body, StatusCode::BAD_REQUEST, "/api/urls/some-id");
}
