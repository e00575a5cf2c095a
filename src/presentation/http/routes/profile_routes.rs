use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;

use crate::presentation::http::handlers::ProfileHandler;

pub fn profile_routes(profile_handler: Arc<ProfileHandler>) -> Router {
    Router::new()
        .route(
            "/profile",
            get(ProfileHandler::get_profile)
                .put(ProfileHandler::update_profile)
                .delete(ProfileHandler::delete_account),
        )
        .route("/profile/password", put(ProfileHandler::change_password))
        .with_state(profile_handler)
}
