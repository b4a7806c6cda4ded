use axum::http::StatusCode;

use crate::tests::helper;

#[tokio::test]
async fn test_listing_newest_first() {
    let app = helper::setup_test_app().await;

    let access_token = helper::register(&app, "someone@example.com").await;

    let first = helper::shorten(&app, &access_token, "https://example.com/1").await;
    let second = helper::shorten(&app, &access_token, "https://example.com/2").await;
    let third = helper::shorten(&app, &access_token, "https://example.com/3").await;

    let (status_code, urls) = helper::list_urls(&app, &access_token).await;

    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(vec![third, second, first], urls);
}

#[tokio::test]
async fn test_listing_is_scoped_to_the_account() {
    let app = helper::setup_test_app().await;

    let someone = helper::register(&app, "someone@example.com").await;
    let other = helper::register(&app, "other@example.com").await;

    helper::shorten(&app, &someone, "https://example.com/mine").await;

    let (status_code, urls) = helper::list_urls(&app, &other).await;

    assert_eq!(StatusCode::OK, status_code);
    assert!(urls.is_empty());
}
