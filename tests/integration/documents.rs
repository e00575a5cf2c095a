use serde_json::json;
use std::time::Duration;

use class_chat::domain::entities::Chunk;
use class_chat::domain::value_objects::Plan;

use crate::common::{TestApp, pdf_bytes, routes};

mod upload {
    use super::*;

    #[tokio::test]
    async fn upload_stores_records_and_hands_off_to_ingestion() {
        let app = TestApp::spawn().await;
        let (user_id, token) = app.signup("Ada", "ada@example.com").await;

        let res = app
            .upload(&token, "cells.pdf", "Biology", pdf_bytes("cells"))
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.data()["fileName"], "cells.pdf");
        assert_eq!(res.data()["className"], "Biology");
        assert_eq!(res.data()["isProcessed"], false);
        assert_eq!(app.storage.len(), 1);

        let mut jobs = app.ingestion.jobs();
        for _ in 0..50 {
            if !jobs.is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
            jobs = app.ingestion.jobs();
        }
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].user_id, user_id);
        assert_eq!(jobs[0].class_name, "Biology");

        let classes = app.get(routes::CLASSES, Some(&token)).await;
        assert_eq!(classes.data()["classes"], json!(["Biology"]));
    }

    #[tokio::test]
    async fn non_pdf_is_rejected() {
        let app = TestApp::spawn().await;
        let (_, token) = app.signup("Ada", "ada@example.com").await;

        let res = app
            .upload(&token, "notes.txt", "Biology", b"just some text".to_vec())
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(app.storage.len(), 0);
    }

    #[tokio::test]
    async fn same_content_in_same_class_is_a_conflict() {
        let app = TestApp::spawn().await;
        let (_, token) = app.signup("Ada", "ada@example.com").await;

        let first = app
            .upload(&token, "cells.pdf", "Biology", pdf_bytes("cells"))
            .await;
        assert_eq!(first.status, 201);

        let again = app
            .upload(&token, "cells-copy.pdf", "Biology", pdf_bytes("cells"))
            .await;
        assert_eq!(again.status, 409);

        let other_class = app
            .upload(&token, "cells.pdf", "Physics", pdf_bytes("cells"))
            .await;
        assert_eq!(other_class.status, 201, "{}", other_class.text);
    }

    #[tokio::test]
    async fn free_plan_stops_at_the_document_limit() {
        let app = TestApp::spawn().await;
        let (_, token) = app.signup("Ada", "ada@example.com").await;

        for name in ["a.pdf", "b.pdf", "c.pdf"] {
            app.upload_ok(&token, name, "Biology").await;
        }

        let res = app
            .upload(&token, "d.pdf", "Biology", pdf_bytes("d"))
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.error_code(), "PLAN_LIMIT_REACHED");
        assert_eq!(app.storage.len(), 3);
    }

    #[tokio::test]
    async fn premium_plan_has_no_limit() {
        let app = TestApp::spawn().await;
        let (_, token) = app.signup("Ada", "ada@example.com").await;
        app.store.set_plan_for("ada@example.com", Plan::Premium);

        for name in ["a.pdf", "b.pdf", "c.pdf", "d.pdf"] {
            app.upload_ok(&token, name, "Biology").await;
        }

        let profile = app.get(routes::PROFILE, Some(&token)).await;
        assert_eq!(profile.data()["documentCount"], 4);
        assert!(profile.data()["documentLimit"].is_null());
    }

    #[tokio::test]
    async fn upload_requires_authentication() {
        let app = TestApp::spawn().await;

        let res = app
            .send(
                app.client
                    .post(app.url(routes::UPLOAD))
                    .body(pdf_bytes("anon")),
            )
            .await;

        assert_eq!(res.status, 401);
    }

    #[tokio::test]
    async fn concurrent_uploads_cannot_pass_the_plan_limit() {
        let app = TestApp::spawn().await;
        let (_, token) = app.signup("Ada", "ada@example.com").await;
        app.upload_ok(&token, "a.pdf", "Biology").await;
        app.upload_ok(&token, "b.pdf", "Biology").await;
        app.storage.delay_writes(Duration::from_millis(50));

        let (first, second) = tokio::join!(
            app.upload(&token, "c.pdf", "Biology", pdf_bytes("c")),
            app.upload(&token, "d.pdf", "Biology", pdf_bytes("d")),
        );

        let mut statuses = [first.status, second.status];
        statuses.sort_unstable();
        assert_eq!(statuses, [201, 403], "{} / {}", first.text, second.text);
        assert_eq!(app.storage.len(), 3);

        let profile = app.get(routes::PROFILE, Some(&token)).await;
        assert_eq!(profile.data()["documentCount"], 3);
    }

    #[tokio::test]
    async fn concurrent_identical_uploads_conflict() {
        let app = TestApp::spawn().await;
        let (_, token) = app.signup("Ada", "ada@example.com").await;
        app.storage.delay_writes(Duration::from_millis(50));

        let (first, second) = tokio::join!(
            app.upload(&token, "cells.pdf", "Biology", pdf_bytes("cells")),
            app.upload(&token, "cells-copy.pdf", "Biology", pdf_bytes("cells")),
        );

        let mut statuses = [first.status, second.status];
        statuses.sort_unstable();
        assert_eq!(statuses, [201, 409], "{} / {}", first.text, second.text);
    }

    #[tokio::test]
    async fn password_change_during_upload_is_kept() {
        let app = TestApp::spawn().await;
        let (_, token) = app.signup("Ada", "ada@example.com").await;
        app.storage.delay_writes(Duration::from_millis(150));

        let upload = app.upload(&token, "forces.pdf", "Physics", pdf_bytes("forces"));
        let change = async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            app.put(
                routes::PROFILE_PASSWORD,
                &json!({"currentPassword": "correct-horse", "newPassword": "brand-new-pass"}),
                &token,
            )
            .await
        };
        let (uploaded, changed) = tokio::join!(upload, change);
        assert_eq!(uploaded.status, 201, "{}", uploaded.text);
        assert_eq!(changed.status, 200, "{}", changed.text);

        let login = app
            .post(
                routes::LOGIN,
                &json!({"email": "ada@example.com", "password": "brand-new-pass"}),
                None,
            )
            .await;
        assert_eq!(login.status, 200, "{}", login.text);

        let classes = app.get(routes::CLASSES, Some(&token)).await;
        assert_eq!(classes.data()["classes"], json!(["Physics"]));
    }
}

mod manage {
    use super::*;

    #[tokio::test]
    async fn list_filters_by_class() {
        let app = TestApp::spawn().await;
        let (_, token) = app.signup("Ada", "ada@example.com").await;
        app.upload_ok(&token, "cells.pdf", "Biology").await;
        app.upload_ok(&token, "forces.pdf", "Physics").await;

        let all = app.get(routes::DOCUMENTS, Some(&token)).await;
        assert_eq!(all.data()["total"], 2);

        let biology = app
            .get(&format!("{}?class=Biology", routes::DOCUMENTS), Some(&token))
            .await;
        assert_eq!(biology.data()["total"], 1);
        assert_eq!(biology.data()["documents"][0]["fileName"], "cells.pdf");
    }

    #[tokio::test]
    async fn document_detail_falls_back_to_download_route() {
        let app = TestApp::spawn().await;
        let (_, token) = app.signup("Ada", "ada@example.com").await;
        let doc_id = app.upload_ok(&token, "cells.pdf", "Biology").await;

        let res = app.get(&routes::document(doc_id), Some(&token)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.data()["url"], routes::download(doc_id));
    }

    #[tokio::test]
    async fn other_users_cannot_see_a_document() {
        let app = TestApp::spawn().await;
        let (_, owner) = app.signup("Ada", "ada@example.com").await;
        let (_, other) = app.signup("Bob", "bob@example.com").await;
        let doc_id = app.upload_ok(&owner, "cells.pdf", "Biology").await;

        let detail = app.get(&routes::document(doc_id), Some(&other)).await;
        let download = app.get(&routes::download(doc_id), Some(&other)).await;
        let delete = app.delete(&routes::document(doc_id), &other).await;

        assert_eq!(detail.status, 404);
        assert_eq!(download.status, 404);
        assert_eq!(delete.status, 404);
        assert!(app.store.document(doc_id).is_some());
    }

    #[tokio::test]
    async fn move_to_another_class() {
        let app = TestApp::spawn().await;
        let (_, token) = app.signup("Ada", "ada@example.com").await;
        let doc_id = app.upload_ok(&token, "cells.pdf", "Biology").await;

        let res = app
            .patch(
                &routes::document(doc_id),
                &json!({"className": "Genetics"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.data()["className"], "Genetics");
        assert_eq!(
            app.store.document(doc_id).map(|d| d.class_name().to_string()),
            Some("Genetics".to_string())
        );
    }

    #[tokio::test]
    async fn move_into_class_holding_same_content_is_a_conflict() {
        let app = TestApp::spawn().await;
        let (_, token) = app.signup("Ada", "ada@example.com").await;
        let original = app
            .upload(&token, "cells.pdf", "Biology", pdf_bytes("cells"))
            .await;
        assert_eq!(original.status, 201);
        let copy = app
            .upload(&token, "cells.pdf", "Physics", pdf_bytes("cells"))
            .await;
        assert_eq!(copy.status, 201);
        let copy_id = copy.data()["id"]
            .as_str()
            .and_then(|id| uuid::Uuid::parse_str(id).ok())
            .expect("document id");

        let res = app
            .patch(
                &routes::document(copy_id),
                &json!({"className": "Biology"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 409, "{}", res.text);
        assert_eq!(res.error_code(), "CONFLICT");
        assert_eq!(
            app.store.document(copy_id).map(|d| d.class_name().to_string()),
            Some("Physics".to_string())
        );
    }

    #[tokio::test]
    async fn delete_cascades_to_chunks_sessions_and_object() {
        let app = TestApp::spawn().await;
        let (user_id, token) = app.signup("Ada", "ada@example.com").await;
        let doc_id = app.upload_ok(&token, "cells.pdf", "Biology").await;
        app.store.add_chunk(Chunk::new(
            user_id,
            doc_id,
            "Biology".to_string(),
            2,
            "Ribosomes".to_string(),
        ));
        let session = app
            .post(
                routes::SESSIONS,
                &json!({"assignedDocument": doc_id}),
                Some(&token),
            )
            .await;
        assert_eq!(session.status, 201, "{}", session.text);

        let res = app.delete(&routes::document(doc_id), &token).await;

        assert_eq!(res.status, 200);
        assert!(app.store.document(doc_id).is_none());
        assert_eq!(app.store.chunk_count(), 0);
        assert_eq!(app.store.session_count(), 0);
        assert_eq!(app.storage.len(), 0);
    }

    #[tokio::test]
    async fn download_streams_pdf_inline() {
        let app = TestApp::spawn().await;
        let (_, token) = app.signup("Ada", "ada@example.com").await;
        let doc_id = app.upload_ok(&token, "cells.pdf", "Biology").await;

        let res = app
            .client
            .get(app.url(&routes::download(doc_id)))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), 200);
        assert_eq!(res.headers()["content-type"], "application/pdf");
        assert_eq!(
            res.headers()["content-disposition"],
            "inline; filename=\"cells.pdf\""
        );
        assert_eq!(res.bytes().await.unwrap().to_vec(), pdf_bytes("cells.pdf"));
    }
}
