use axum::{Router, routing::get};
use std::sync::Arc;

use crate::presentation::http::handlers::EventsHandler;

pub fn events_routes(events_handler: Arc<EventsHandler>) -> Router {
    Router::new()
        .route("/events/ws", get(EventsHandler::websocket))
        .route("/events/stream", get(EventsHandler::stream))
        .with_state(events_handler)
}
