use axum::http::StatusCode;

use crate::tests::helper;

#[tokio::test]
async fn test_redirect_round_trip() {
    let app = helper::setup_test_app().await;

    let access_token = helper::register(&app, "someone@example.com").await;
    let short_url = helper::shorten(&app, &access_token, "https://example.com/resource").await;

    let (status_code, location) = helper::follow(&app, short_url.code()).await;

    assert_eq!(StatusCode::FOUND, status_code);
    assert_eq!(Some("https://example.com/resource".to_string()), location);

    // after deactivation the code no longer resolves
    let (status_code, _) =
        helper::deactivate(&app, &access_token, &short_url.id.to_string()).await;
    assert_eq!(StatusCode::NO_CONTENT, status_code);

    let (status_code, location) = helper::follow(&app, short_url.code()).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!(None, location);
}

#[tokio::test]
async fn test_redirect_unknown_code() {
    let app = helper::setup_test_app().await;

    let (status_code, location) = helper::follow(&app, "unknown").await;

    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!(None, location);
}

#[tokio::test]
async fn test_redirect_needs_no_token() {
    let app = helper::setup_test_app().await;

    let someone = helper::register(&app, "someone@example.com").await;
    let short_url = helper::shorten(&app, &someone, "https://example.com/").await;

    // anonymous follow of someone else's alias
    let (status_code, location) = helper::follow(&app, short_url.code()).await;

    assert_eq!(StatusCode::FOUND, status_code);
    assert_eq!(Some("https://example.com/".to_string()), location);
}
