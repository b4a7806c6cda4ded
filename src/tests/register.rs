use axum::http::StatusCode;

use crate::tests::helper;

#[tokio::test]
async fn test_register() {
    let app = helper::setup_test_app().await;

    let (status_code, body) = helper::maybe_register(&app, "someone@example.com", "verysecret").await;

    assert_eq!(StatusCode::OK, status_code);
    assert!(helper::get_token(&body).len() > 10);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = helper::setup_test_app().await;

    helper::register(&app, "someone@example.com").await;

    let (status_code, body) = helper::maybe_register(&app, "someone@example.com", "verysecret").await;

    assert_eq!(StatusCode::CONFLICT, status_code);
    helper::assert_error_body(&body, StatusCode::CONFLICT, "/api/register");
}

#[tokio::test]
async fn test_register_invalid_credentials() {
    let app = helper::setup_test_app().await;

    // not an email
    let (status_code, body) = helper::maybe_register(&app, "not-an-email", "verysecret").await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    helper::assert_error_body(&body, StatusCode::BAD_REQUEST, "/api/register");

    // email longer than 320 characters
    let long_email = format!("{}@example.com", "a".repeat(320));
    let (status_code, _) = helper::maybe_register(&app, &long_email, "verysecret").await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);

    // password too short
    let (status_code, _) = helper::maybe_register(&app, "someone@example.com", "short").await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
}
