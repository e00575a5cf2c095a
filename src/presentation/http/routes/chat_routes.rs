use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::ChatHandler;

pub fn chat_routes(chat_handler: Arc<ChatHandler>) -> Router {
    Router::new()
        .route(
            "/chat/sessions",
            post(ChatHandler::create_session).get(ChatHandler::list_sessions),
        )
        .route(
            "/chat/sessions/{session_id}",
            get(ChatHandler::get_session)
                .patch(ChatHandler::rename_session)
                .delete(ChatHandler::delete_session),
        )
        .route(
            "/chat/sessions/{session_id}/messages",
            post(ChatHandler::send_message),
        )
        .route("/chat/chunks/{chunk_id}", get(ChatHandler::resolve_citation))
        .with_state(chat_handler)
}
