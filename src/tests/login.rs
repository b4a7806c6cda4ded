use axum::http::StatusCode;

use crate::tests::helper;

#[tokio::test]
async fn test_login() {
    let app = helper::setup_test_app().await;

    helper::register(&app, "someone@example.com").await;

    let (status_code, body) = helper::maybe_login(&app, "someone@example.com", "verysecret").await;

    assert_eq!(StatusCode::OK, status_code);
    assert!(helper::get_token(&body).len() > 10);
}

#[tokio::test]
async fn test_login_bad_credentials_are_indistinguishable() {
    let app = helper::setup_test_app().await;

    helper::register(&app, "someone@example.com").await;

    // wrong password
    let (status_code, wrong_password) =
        helper::maybe_login(&app, "someone@example.com", "not-the-password").await;
    assert_eq!(StatusCode::UNAUTHORIZED, status_code);
    helper::assert_error_body(&wrong_password, StatusCode::UNAUTHORIZED, "/api/login");

    // unknown email
    let (status_code, unknown_email) =
        helper::maybe_login(&app, "nobody@example.com", "verysecret").await;
    assert_eq!(StatusCode::UNAUTHORIZED, status_code);

    // same message for both failure modes
    assert_eq!(wrong_password.get("message"), unknown_email.get("message"));
}
