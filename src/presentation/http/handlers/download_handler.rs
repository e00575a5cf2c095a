use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::DownloadDocumentUseCase;
use crate::presentation::http::error::AppError;
use crate::presentation::http::extractors::AuthUser;
use crate::presentation::http::session::{SessionAuth, SessionAuthority};

pub struct DownloadHandler {
    session_auth: Arc<SessionAuth>,
    download_use_case: Arc<DownloadDocumentUseCase>,
}

impl SessionAuthority for DownloadHandler {
    fn session_auth(&self) -> &SessionAuth {
        &self.session_auth
    }
}

impl DownloadHandler {
    pub fn new(
        session_auth: Arc<SessionAuth>,
        download_use_case: Arc<DownloadDocumentUseCase>,
    ) -> Self {
        Self {
            session_auth,
            download_use_case,
        }
    }

    /// Streams the stored PDF inline so the browser can open it at a page.
    pub async fn download_document(
        State(handler): State<Arc<DownloadHandler>>,
        auth: AuthUser,
        Path(document_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, AppError> {
        let file = handler
            .download_use_case
            .execute(auth.user_id, document_id)
            .await?;

        let disposition = format!(
            "inline; filename=\"{}\"",
            file.file_name.replace(['"', '\\', '\r', '\n'], "_")
        );

        Ok((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            file.data,
        ))
    }
}
