use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::{
        IntoResponse, Response, Sse,
        sse::{Event, KeepAlive},
    },
};
use futures::{
    SinkExt, StreamExt,
    stream::{self, Stream},
};
use std::{convert::Infallible, sync::Arc, time::Duration};
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

use crate::application::ports::ServerEvent;
use crate::infrastructure::messaging::{NotificationHub, Subscription};
use crate::presentation::http::extractors::AuthUser;
use crate::presentation::http::session::{SessionAuth, SessionAuthority};

/// Live push channel. Each authenticated connection joins the room of its
/// user and receives every event published there.
pub struct EventsHandler {
    session_auth: Arc<SessionAuth>,
    hub: Arc<NotificationHub>,
    keep_alive: Duration,
}

impl SessionAuthority for EventsHandler {
    fn session_auth(&self) -> &SessionAuth {
        &self.session_auth
    }
}

impl EventsHandler {
    pub fn new(session_auth: Arc<SessionAuth>, hub: Arc<NotificationHub>, keep_alive: Duration) -> Self {
        Self {
            session_auth,
            hub,
            keep_alive,
        }
    }

    pub async fn websocket(
        State(handler): State<Arc<EventsHandler>>,
        auth: AuthUser,
        ws: WebSocketUpgrade,
    ) -> Response {
        let subscription = handler.hub.subscribe(auth.user_id);
        ws.on_upgrade(move |socket| pump_socket(socket, subscription, auth.user_id))
    }

    pub async fn stream(
        State(handler): State<Arc<EventsHandler>>,
        auth: AuthUser,
    ) -> Response {
        let subscription = handler.hub.subscribe(auth.user_id);
        tracing::debug!(user_id = %auth.user_id, "Event stream opened");

        // Dropping the stream on disconnect drops the subscription.
        let stream = stream::unfold(subscription, move |mut subscription| async move {
            loop {
                match subscription.recv().await {
                    Ok(event) => {
                        return Some((Ok::<_, Infallible>(sse_event(&event)), subscription));
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(user_id = %auth.user_id, skipped, "Event stream lagged");
                    }
                    Err(RecvError::Closed) => return None,
                }
            }
        });

        create_sse_response(stream, handler.keep_alive)
    }
}

fn sse_event(event: &ServerEvent) -> Event {
    let data = match event {
        ServerEvent::DocumentReady(payload) => serde_json::to_string(payload),
    };
    Event::default()
        .event(event.name())
        .data(data.unwrap_or_default())
}

async fn pump_socket(
    socket: WebSocket,
    mut subscription: Subscription,
    user_id: Uuid,
) {
    tracing::debug!(%user_id, "WebSocket connected");
    let (mut outgoing, mut incoming) = socket.split();

    loop {
        tokio::select! {
            event = subscription.recv() => match event {
                Ok(event) => {
                    let Ok(text) = serde_json::to_string(&event) else {
                        continue;
                    };
                    if outgoing.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(%user_id, skipped, "WebSocket receiver lagged");
                }
                Err(RecvError::Closed) => break,
            },
            message = incoming.next() => match message {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!(%user_id, "WebSocket error: {}", e);
                    break;
                }
            },
        }
    }

    tracing::debug!(%user_id, "WebSocket disconnected");
}

pub fn create_sse_response<S>(stream: S, keep_alive: Duration) -> Response
where
    S: Stream<Item = Result<Event, Infallible>> + Send + 'static,
{
    Sse::new(stream)
        .keep_alive(KeepAlive::new().interval(keep_alive).text("keep-alive"))
        .into_response()
}
