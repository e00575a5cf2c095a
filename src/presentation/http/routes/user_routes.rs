use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::UserHandler;

pub fn user_routes(user_handler: Arc<UserHandler>) -> Router {
    Router::new()
        .route("/user/signup", post(UserHandler::signup))
        .route("/user/login", post(UserHandler::login))
        .route("/user/logout", post(UserHandler::logout))
        .route("/user/auth-status", get(UserHandler::auth_status))
        .route(
            "/user/classes",
            get(UserHandler::list_classes).post(UserHandler::add_class),
        )
        .route("/user/classes/{name}", delete(UserHandler::remove_class))
        .with_state(user_handler)
}
