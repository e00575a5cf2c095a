use serde_json::json;
use std::time::Duration;
use uuid::Uuid;

use class_chat::domain::entities::Chunk;
use class_chat::domain::value_objects::SourceChunk;

use crate::common::{TestApp, routes};

async fn create_session(app: &TestApp, token: &str, body: serde_json::Value) -> Uuid {
    let res = app.post(routes::SESSIONS, &body, Some(token)).await;
    assert_eq!(res.status, 201, "Session create failed: {}", res.text);
    res.data()["id"]
        .as_str()
        .and_then(|id| Uuid::parse_str(id).ok())
        .expect("session id")
}

mod sessions {
    use super::*;

    #[tokio::test]
    async fn new_session_gets_default_name() {
        let app = TestApp::spawn().await;
        let (_, token) = app.signup("Ada", "ada@example.com").await;

        let res = app.post(routes::SESSIONS, &json!({}), Some(&token)).await;

        assert_eq!(res.status, 201);
        assert_eq!(res.data()["name"], "New Chat");
        assert_eq!(res.data()["messages"], json!([]));
    }

    #[tokio::test]
    async fn assignment_must_belong_to_the_user() {
        let app = TestApp::spawn().await;
        let (_, owner) = app.signup("Ada", "ada@example.com").await;
        let (_, other) = app.signup("Bob", "bob@example.com").await;
        let doc_id = app.upload_ok(&owner, "cells.pdf", "Biology").await;

        let foreign_document = app
            .post(
                routes::SESSIONS,
                &json!({"assignedDocument": doc_id}),
                Some(&other),
            )
            .await;
        let unknown_class = app
            .post(
                routes::SESSIONS,
                &json!({"assignedClass": "Biology"}),
                Some(&other),
            )
            .await;

        assert_eq!(foreign_document.status, 404);
        assert_eq!(unknown_class.status, 404);
    }

    #[tokio::test]
    async fn rename_list_and_delete() {
        let app = TestApp::spawn().await;
        let (_, token) = app.signup("Ada", "ada@example.com").await;
        let session_id = create_session(&app, &token, json!({"name": "Week 1"})).await;

        let renamed = app
            .patch(
                &routes::session(session_id),
                &json!({"name": "Week 1 review"}),
                &token,
            )
            .await;
        assert_eq!(renamed.status, 200);
        assert_eq!(renamed.data()["name"], "Week 1 review");

        let blank = app
            .patch(&routes::session(session_id), &json!({"name": "  "}), &token)
            .await;
        assert_eq!(blank.status, 400);

        let listed = app.get(routes::SESSIONS, Some(&token)).await;
        assert_eq!(listed.data().as_array().map(Vec::len), Some(1));
        assert!(listed.data()[0].get("messages").is_none());

        let deleted = app.delete(&routes::session(session_id), &token).await;
        assert_eq!(deleted.status, 200);

        let gone = app.get(&routes::session(session_id), Some(&token)).await;
        assert_eq!(gone.status, 404);
    }
}

mod messages {
    use super::*;

    #[tokio::test]
    async fn sending_requires_authentication() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                &routes::messages(Uuid::new_v4()),
                &json!({"message": "hello"}),
                None,
            )
            .await;

        assert_eq!(res.status, 401);
    }

    #[tokio::test]
    async fn reply_is_stored_with_citations_and_names_the_session() {
        let app = TestApp::spawn().await;
        let (user_id, token) = app.signup("Ada", "ada@example.com").await;
        let doc_id = app.upload_ok(&token, "cells.pdf", "Biology").await;
        let chunk = Chunk::new(
            user_id,
            doc_id,
            "Biology".to_string(),
            4,
            "The mitochondria produce ATP.".to_string(),
        );
        let chunk_id = chunk.id();
        app.store.add_chunk(chunk);
        app.rag.answer_with(
            "They produce ATP [1].",
            vec![SourceChunk {
                chunk_id,
                document_id: doc_id,
                file_name: "cells.pdf".to_string(),
                page_number: 4,
            }],
        );
        let session_id =
            create_session(&app, &token, json!({"assignedClass": "Biology"})).await;

        let res = app
            .post(
                &routes::messages(session_id),
                &json!({"message": "What do mitochondria do?"}),
                Some(&token),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.data()["sessionName"], "What do mitochondria do?");
        let reply = &res.data()["message"];
        assert_eq!(reply["role"], "assistant");
        assert_eq!(reply["citations"][0]["number"], 1);
        assert_eq!(reply["citations"][0]["chunkId"], chunk_id.to_string());
        assert_eq!(reply["citations"][0]["pageNumber"], 4);

        let queries = app.rag.queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].class_name.as_deref(), Some("Biology"));

        let session = app.get(&routes::session(session_id), Some(&token)).await;
        assert_eq!(session.data()["messages"].as_array().map(Vec::len), Some(2));
        assert_eq!(session.data()["messages"][0]["role"], "user");
    }

    #[tokio::test]
    async fn engine_failure_leaves_session_untouched() {
        let app = TestApp::spawn().await;
        let (_, token) = app.signup("Ada", "ada@example.com").await;
        app.rag.fail();
        let session_id = create_session(&app, &token, json!({})).await;

        let res = app
            .post(
                &routes::messages(session_id),
                &json!({"message": "hello?"}),
                Some(&token),
            )
            .await;

        assert_eq!(res.status, 500);
        assert_eq!(res.error_code(), "ENGINE_ERROR");
        assert!(res.body["error"]["cause"].is_string());

        let session = app.get(&routes::session(session_id), Some(&token)).await;
        assert_eq!(session.data()["messages"], json!([]));
        assert_eq!(session.data()["name"], "New Chat");
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let app = TestApp::spawn().await;
        let (_, token) = app.signup("Ada", "ada@example.com").await;
        let session_id = create_session(&app, &token, json!({})).await;

        let res = app
            .post(
                &routes::messages(session_id),
                &json!({"message": "   "}),
                Some(&token),
            )
            .await;

        assert_eq!(res.status, 400);
        assert!(app.rag.queries().is_empty());
    }

    #[tokio::test]
    async fn concurrent_sends_keep_both_exchanges() {
        let app = TestApp::spawn().await;
        let (_, token) = app.signup("Ada", "ada@example.com").await;
        app.rag.answer_with("Noted.", Vec::new());
        app.rag.delay_replies(Duration::from_millis(100));
        let session_id = create_session(&app, &token, json!({})).await;
        let path = routes::messages(session_id);

        let first_body = json!({"message": "First question"});
        let second_body = json!({"message": "Second question"});
        let (first, second) = tokio::join!(
            app.post(&path, &first_body, Some(&token)),
            app.post(&path, &second_body, Some(&token)),
        );
        assert_eq!(first.status, 200, "{}", first.text);
        assert_eq!(second.status, 200, "{}", second.text);

        let session = app.get(&routes::session(session_id), Some(&token)).await;
        let messages = session.data()["messages"].as_array().cloned().unwrap_or_default();
        assert_eq!(messages.len(), 4);
        let questions: Vec<&str> = messages
            .iter()
            .filter(|m| m["role"] == "user")
            .filter_map(|m| m["content"].as_str())
            .collect();
        assert!(questions.contains(&"First question"));
        assert!(questions.contains(&"Second question"));
    }

    #[tokio::test]
    async fn rename_during_pending_send_is_kept() {
        let app = TestApp::spawn().await;
        let (_, token) = app.signup("Ada", "ada@example.com").await;
        app.rag.answer_with("Noted.", Vec::new());
        app.rag.delay_replies(Duration::from_millis(150));
        let session_id = create_session(&app, &token, json!({})).await;

        let messages_path = routes::messages(session_id);
        let send_body = json!({"message": "What is osmosis?"});
        let send = app.post(&messages_path, &send_body, Some(&token));
        let rename = async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            app.patch(&routes::session(session_id), &json!({"name": "Exam prep"}), &token)
                .await
        };
        let (sent, renamed) = tokio::join!(send, rename);

        assert_eq!(renamed.status, 200, "{}", renamed.text);
        assert_eq!(sent.status, 200, "{}", sent.text);
        assert_eq!(sent.data()["sessionName"], "Exam prep");

        let session = app.get(&routes::session(session_id), Some(&token)).await;
        assert_eq!(session.data()["name"], "Exam prep");
        assert_eq!(session.data()["messages"].as_array().map(Vec::len), Some(2));
    }
}

mod citations {
    use super::*;

    #[tokio::test]
    async fn chunk_resolves_for_its_owner_only() {
        let app = TestApp::spawn().await;
        let (user_id, owner) = app.signup("Ada", "ada@example.com").await;
        let (_, other) = app.signup("Bob", "bob@example.com").await;
        let doc_id = app.upload_ok(&owner, "cells.pdf", "Biology").await;
        let chunk = Chunk::new(
            user_id,
            doc_id,
            "Biology".to_string(),
            7,
            "Osmosis".to_string(),
        );
        let chunk_id = chunk.id();
        app.store.add_chunk(chunk);

        let res = app.get(&routes::chunk(chunk_id), Some(&owner)).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.data()["documentId"], doc_id.to_string());
        assert_eq!(res.data()["pageNumber"], 7);
        assert_eq!(res.data()["fileName"], "cells.pdf");
        assert_eq!(res.data()["url"], routes::download(doc_id));

        let foreign = app.get(&routes::chunk(chunk_id), Some(&other)).await;
        assert_eq!(foreign.status, 404);

        let missing = app.get(&routes::chunk(Uuid::new_v4()), Some(&owner)).await;
        assert_eq!(missing.status, 404);
    }
}
