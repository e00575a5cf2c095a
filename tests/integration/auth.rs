use serde_json::json;

use crate::common::{TestApp, routes};

mod signup {
    use super::*;

    #[tokio::test]
    async fn new_user_gets_session_cookie_and_free_plan() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::SIGNUP,
                &json!({"name": "Ada", "email": "Ada@Example.com", "password": "correct-horse"}),
                None,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.data()["user"]["email"], "ada@example.com");
        assert_eq!(res.data()["user"]["plan"], "free");
        assert!(res.data()["token"].is_string());

        let cookie = res.set_cookie.expect("signup sets the session cookie");
        assert!(cookie.starts_with("authToken="));
        assert!(cookie.contains("HttpOnly"));
    }

    #[tokio::test]
    async fn cannot_register_an_email_twice() {
        let app = TestApp::spawn().await;
        app.signup("Ada", "ada@example.com").await;

        let res = app
            .post(
                routes::SIGNUP,
                &json!({"name": "Other", "email": "ADA@example.com", "password": "another-pass"}),
                None,
            )
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.error_code(), "EMAIL_TAKEN");
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::SIGNUP,
                &json!({"name": "Ada", "email": "ada@example.com", "password": "short"}),
                None,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.error_code(), "VALIDATION_ERROR");
    }
}

mod login {
    use super::*;

    #[tokio::test]
    async fn registered_user_can_log_in() {
        let app = TestApp::spawn().await;
        app.signup("Ada", "ada@example.com").await;

        let res = app
            .post(
                routes::LOGIN,
                &json!({"email": "ada@example.com", "password": "correct-horse"}),
                None,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert!(res.set_cookie.is_some());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let app = TestApp::spawn().await;
        app.signup("Ada", "ada@example.com").await;

        let wrong_password = app
            .post(
                routes::LOGIN,
                &json!({"email": "ada@example.com", "password": "not-the-password"}),
                None,
            )
            .await;
        let unknown = app
            .post(
                routes::LOGIN,
                &json!({"email": "nobody@example.com", "password": "correct-horse"}),
                None,
            )
            .await;

        assert_eq!(wrong_password.status, 401);
        assert_eq!(unknown.status, 401);
        assert_eq!(wrong_password.error_code(), "INVALID_CREDENTIALS");
        assert_eq!(unknown.error_code(), "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn logout_clears_the_cookie() {
        let app = TestApp::spawn().await;

        let res = app.post(routes::LOGOUT, &json!({}), None).await;

        assert_eq!(res.status, 200);
        let cookie = res.set_cookie.expect("logout resets the cookie");
        assert!(cookie.starts_with("authToken="));
        assert!(cookie.contains("Max-Age=0"));
    }
}

mod session {
    use super::*;

    #[tokio::test]
    async fn auth_status_requires_a_token() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::AUTH_STATUS, None).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.error_code(), "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::AUTH_STATUS, Some("not.a.jwt")).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.error_code(), "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn session_cookie_authenticates() {
        let app = TestApp::spawn().await;
        let (_, token) = app.signup("Ada", "ada@example.com").await;

        let res = app
            .send(
                app.client
                    .get(app.url(routes::AUTH_STATUS))
                    .header("Cookie", format!("authToken={token}")),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.data()["authenticated"], true);
        assert_eq!(res.data()["documentCount"], 0);
        assert_eq!(res.data()["documentLimit"], 3);
    }
}

mod classes {
    use super::*;

    #[tokio::test]
    async fn add_list_and_reject_duplicate_class() {
        let app = TestApp::spawn().await;
        let (_, token) = app.signup("Ada", "ada@example.com").await;

        let added = app
            .post(routes::CLASSES, &json!({"name": "Biology"}), Some(&token))
            .await;
        assert_eq!(added.status, 201, "{}", added.text);

        let again = app
            .post(routes::CLASSES, &json!({"name": "Biology"}), Some(&token))
            .await;
        assert_eq!(again.status, 409);

        let listed = app.get(routes::CLASSES, Some(&token)).await;
        assert_eq!(listed.data()["classes"], json!(["Biology"]));
    }

    #[tokio::test]
    async fn removing_a_class_cascades_to_its_content() {
        let app = TestApp::spawn().await;
        let (user_id, token) = app.signup("Ada", "ada@example.com").await;

        let doc_id = app.upload_ok(&token, "cells.pdf", "Biology").await;
        app.upload_ok(&token, "forces.pdf", "Physics").await;
        app.store.add_chunk(class_chat::domain::entities::Chunk::new(
            user_id,
            doc_id,
            "Biology".to_string(),
            1,
            "Mitochondria".to_string(),
        ));
        app.post(
            routes::SESSIONS,
            &json!({"assignedClass": "Biology"}),
            Some(&token),
        )
        .await;
        app.post(
            routes::SESSIONS,
            &json!({"assignedDocument": doc_id}),
            Some(&token),
        )
        .await;
        app.post(routes::SESSIONS, &json!({}), Some(&token)).await;

        let res = app.delete(&routes::class("Biology"), &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.data()["documentsRemoved"], 1);
        assert_eq!(res.data()["chunksRemoved"], 1);
        assert_eq!(res.data()["sessionsRemoved"], 2);
        assert_eq!(app.store.session_count(), 1);
        assert_eq!(app.storage.len(), 1);

        let classes = app.get(routes::CLASSES, Some(&token)).await;
        assert_eq!(classes.data()["classes"], json!(["Physics"]));
    }

    #[tokio::test]
    async fn removing_an_unknown_class_is_not_found() {
        let app = TestApp::spawn().await;
        let (_, token) = app.signup("Ada", "ada@example.com").await;

        let res = app.delete(&routes::class("Chemistry"), &token).await;

        assert_eq!(res.status, 404);
    }
}
