use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::{DocumentHandler, DownloadHandler};

pub fn document_routes(document_handler: Arc<DocumentHandler>) -> Router {
    Router::new()
        .route("/documents/upload", post(DocumentHandler::upload_document))
        .route("/documents", get(DocumentHandler::list_documents))
        .route(
            "/documents/{document_id}",
            get(DocumentHandler::get_document)
                .patch(DocumentHandler::move_document)
                .delete(DocumentHandler::delete_document),
        )
        .with_state(document_handler)
}

pub fn download_routes(download_handler: Arc<DownloadHandler>) -> Router {
    Router::new()
        .route(
            "/download/{document_id}",
            get(DownloadHandler::download_document),
        )
        .with_state(download_handler)
}
