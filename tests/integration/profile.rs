use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn profile_shows_plan_and_usage() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signup("Ada", "ada@example.com").await;
    app.upload_ok(&token, "cells.pdf", "Biology").await;

    let res = app.get(routes::PROFILE, Some(&token)).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.data()["name"], "Ada");
    assert_eq!(res.data()["plan"], "free");
    assert_eq!(res.data()["documentCount"], 1);
    assert_eq!(res.data()["documentLimit"], 3);
}

#[tokio::test]
async fn update_name_and_reject_taken_email() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signup("Ada", "ada@example.com").await;
    app.signup("Bob", "bob@example.com").await;

    let renamed = app
        .put(routes::PROFILE, &json!({"name": "Ada Lovelace"}), &token)
        .await;
    assert_eq!(renamed.status, 200, "{}", renamed.text);
    assert_eq!(renamed.data()["name"], "Ada Lovelace");

    let taken = app
        .put(routes::PROFILE, &json!({"email": "bob@example.com"}), &token)
        .await;
    assert_eq!(taken.status, 409);
    assert_eq!(taken.error_code(), "EMAIL_TAKEN");
}

#[tokio::test]
async fn change_password_checks_the_current_one() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signup("Ada", "ada@example.com").await;

    let wrong = app
        .put(
            routes::PROFILE_PASSWORD,
            &json!({"currentPassword": "nope-nope", "newPassword": "brand-new-pass"}),
            &token,
        )
        .await;
    assert_eq!(wrong.status, 401);

    let changed = app
        .put(
            routes::PROFILE_PASSWORD,
            &json!({"currentPassword": "correct-horse", "newPassword": "brand-new-pass"}),
            &token,
        )
        .await;
    assert_eq!(changed.status, 200, "{}", changed.text);

    let login = app
        .post(
            routes::LOGIN,
            &json!({"email": "ada@example.com", "password": "brand-new-pass"}),
            None,
        )
        .await;
    assert_eq!(login.status, 200);
}

#[tokio::test]
async fn deleting_the_account_removes_everything() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signup("Ada", "ada@example.com").await;
    app.upload_ok(&token, "cells.pdf", "Biology").await;
    app.post(routes::SESSIONS, &json!({}), Some(&token)).await;

    let res = app.delete(routes::PROFILE, &token).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert!(res.set_cookie.is_some_and(|c| c.contains("Max-Age=0")));
    assert_eq!(app.storage.len(), 0);
    assert_eq!(app.store.session_count(), 0);

    let status = app.get(routes::AUTH_STATUS, Some(&token)).await;
    assert_eq!(status.status, 401);

    let health = app.get(routes::HEALTH, None).await;
    assert_eq!(health.data()["status"], "healthy");
}
