use std::time::Duration;

use futures::StreamExt;
use serde_json::{Value, json};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{self, Message, client::IntoClientRequest};

use class_chat::application::ports::{DocumentReadyEvent, Notifier, ServerEvent};

use crate::common::TestApp;

const EVENTS_WS: &str = "/api/v1/events/ws";
const EVENTS_STREAM: &str = "/api/v1/events/stream";

fn ws_request(app: &TestApp, token: Option<&str>) -> tungstenite::handshake::client::Request {
    let mut request = format!("ws://{}{}", app.addr, EVENTS_WS)
        .into_client_request()
        .unwrap();
    if let Some(token) = token {
        request
            .headers_mut()
            .insert("cookie", format!("authToken={token}").parse().unwrap());
    }
    request
}

/// Keeps pushing to the user's room until the hub holds no rooms, so a server
/// side write notices a closed connection. Gives up after about two seconds.
async fn wait_for_empty_hub(app: &TestApp, user_id: uuid::Uuid) -> usize {
    let hub = &app.container.notification_hub;
    for _ in 0..100 {
        if hub.room_count() == 0 {
            break;
        }
        hub.publish(
            user_id,
            ServerEvent::DocumentReady(DocumentReadyEvent {
                doc_id: uuid::Uuid::nil(),
                file_name: "ping.pdf".to_string(),
                class_name: "Biology".to_string(),
            }),
        )
        .await;
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    hub.room_count()
}

#[tokio::test]
async fn watcher_announces_each_processed_document_once() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.signup("Ada", "ada@example.com").await;
    let doc_id = app.upload_ok(&token, "cells.pdf", "Biology").await;
    let mut receiver = app.container.notification_hub.subscribe(user_id);
    let watcher = app.container.ready_watcher();

    assert_eq!(watcher.tick().await.unwrap(), 0);

    app.store.mark_processed(doc_id);
    assert_eq!(watcher.tick().await.unwrap(), 1);
    assert_eq!(watcher.tick().await.unwrap(), 0);

    let event = receiver.try_recv().expect("one event delivered");
    assert_eq!(
        event,
        ServerEvent::DocumentReady(DocumentReadyEvent {
            doc_id,
            file_name: "cells.pdf".to_string(),
            class_name: "Biology".to_string(),
        })
    );
    assert!(receiver.try_recv().is_err());
    assert!(app.store.document(doc_id).unwrap().ready_notified());
}

#[tokio::test]
async fn events_only_reach_the_owner() {
    let app = TestApp::spawn().await;
    let (owner_id, token) = app.signup("Ada", "ada@example.com").await;
    let (other_id, _) = app.signup("Bob", "bob@example.com").await;
    let doc_id = app.upload_ok(&token, "cells.pdf", "Biology").await;
    let mut owner = app.container.notification_hub.subscribe(owner_id);
    let mut other = app.container.notification_hub.subscribe(other_id);

    app.store.mark_processed(doc_id);
    app.container.ready_watcher().tick().await.unwrap();

    assert!(owner.try_recv().is_ok());
    assert!(other.try_recv().is_err());
}

#[tokio::test]
async fn event_stream_pushes_document_ready() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.signup("Ada", "ada@example.com").await;

    let mut res = app
        .client
        .get(app.url(EVENTS_STREAM))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert!(
        res.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/event-stream")
    );

    let delivered = app
        .container
        .notification_hub
        .publish(
            user_id,
            ServerEvent::DocumentReady(DocumentReadyEvent {
                doc_id: uuid::Uuid::nil(),
                file_name: "cells.pdf".to_string(),
                class_name: "Biology".to_string(),
            }),
        )
        .await;
    assert_eq!(delivered, 1);

    let chunk = tokio::time::timeout(Duration::from_secs(5), res.chunk())
        .await
        .expect("event arrives before timeout")
        .unwrap()
        .expect("stream still open");
    let text = String::from_utf8_lossy(&chunk);
    assert!(text.contains("event: document-ready"), "{text}");
    assert!(text.contains("\"fileName\":\"cells.pdf\""), "{text}");
}

#[tokio::test]
async fn event_stream_requires_authentication() {
    let app = TestApp::spawn().await;

    let res = app.get(EVENTS_STREAM, None).await;

    assert_eq!(res.status, 401);
}

#[tokio::test]
async fn closing_the_event_stream_leaves_the_room() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.signup("Ada", "ada@example.com").await;

    let res = app
        .client
        .get(app.url(EVENTS_STREAM))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(app.container.notification_hub.subscriber_count(user_id), 1);

    drop(res);

    assert_eq!(wait_for_empty_hub(&app, user_id).await, 0);
}

#[tokio::test]
async fn websocket_pushes_document_ready() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.signup("Ada", "ada@example.com").await;
    let doc_id = app.upload_ok(&token, "cells.pdf", "Biology").await;

    let (mut socket, response) = connect_async(ws_request(&app, Some(&token)))
        .await
        .expect("websocket handshake");
    assert_eq!(response.status().as_u16(), 101);
    assert_eq!(app.container.notification_hub.subscriber_count(user_id), 1);

    app.store.mark_processed(doc_id);
    assert_eq!(app.container.ready_watcher().tick().await.unwrap(), 1);

    let frame = tokio::time::timeout(Duration::from_secs(5), socket.next())
        .await
        .expect("frame arrives before timeout")
        .expect("socket still open")
        .unwrap();
    let Message::Text(text) = frame else {
        panic!("expected a text frame, got {frame:?}");
    };
    let payload: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        payload,
        json!({
            "event": "document-ready",
            "data": {
                "docId": doc_id.to_string(),
                "fileName": "cells.pdf",
                "className": "Biology",
            }
        })
    );

    socket.close(None).await.unwrap();
    assert_eq!(wait_for_empty_hub(&app, user_id).await, 0);
}

#[tokio::test]
async fn websocket_requires_authentication() {
    let app = TestApp::spawn().await;

    match connect_async(ws_request(&app, None)).await {
        Err(tungstenite::Error::Http(response)) => assert_eq!(response.status().as_u16(), 401),
        Err(other) => panic!("unexpected handshake error: {other}"),
        Ok(_) => panic!("upgrade without a token was accepted"),
    }
    assert_eq!(app.container.notification_hub.room_count(), 0);
}
