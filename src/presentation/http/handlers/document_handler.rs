use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::{
    DeleteDocumentUseCase, ListDocumentsUseCase, MoveDocumentUseCase, UploadDocumentUseCase,
    upload_document::UploadDocumentRequest,
};
use crate::presentation::http::dto::{
    ApiResponse, DocumentDetailDto, DocumentListDto, DocumentQueryDto, DocumentResponseDto,
    MessageResponseDto, MoveDocumentRequestDto, download_path,
};
use crate::presentation::http::error::AppError;
use crate::presentation::http::extractors::{AppJson, AuthUser};
use crate::presentation::http::session::{SessionAuth, SessionAuthority};

pub struct DocumentHandler {
    session_auth: Arc<SessionAuth>,
    upload_use_case: Arc<UploadDocumentUseCase>,
    list_use_case: Arc<ListDocumentsUseCase>,
    move_use_case: Arc<MoveDocumentUseCase>,
    delete_use_case: Arc<DeleteDocumentUseCase>,
}

impl SessionAuthority for DocumentHandler {
    fn session_auth(&self) -> &SessionAuth {
        &self.session_auth
    }
}

impl DocumentHandler {
    pub fn new(
        session_auth: Arc<SessionAuth>,
        upload_use_case: Arc<UploadDocumentUseCase>,
        list_use_case: Arc<ListDocumentsUseCase>,
        move_use_case: Arc<MoveDocumentUseCase>,
        delete_use_case: Arc<DeleteDocumentUseCase>,
    ) -> Self {
        Self {
            session_auth,
            upload_use_case,
            list_use_case,
            move_use_case,
            delete_use_case,
        }
    }

    /// Multipart upload with a `file` part and a `className` text part.
    pub async fn upload_document(
        State(handler): State<Arc<DocumentHandler>>,
        auth: AuthUser,
        mut multipart: Multipart,
    ) -> Result<impl IntoResponse, AppError> {
        let mut file: Option<(String, Vec<u8>)> = None;
        let mut class_name: Option<String> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?
        {
            match field.name() {
                Some("file") => {
                    let file_name = field
                        .file_name()
                        .map(str::to_string)
                        .ok_or_else(|| AppError::Validation("File part has no file name".into()))?;
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(e.body_text()))?;
                    file = Some((file_name, data.to_vec()));
                }
                Some("className") | Some("class_name") => {
                    class_name = Some(
                        field
                            .text()
                            .await
                            .map_err(|e| AppError::Validation(e.body_text()))?,
                    );
                }
                _ => {}
            }
        }

        let (file_name, data) =
            file.ok_or_else(|| AppError::Validation("No file provided in the request".into()))?;
        let class_name =
            class_name.ok_or_else(|| AppError::Validation("className is required".into()))?;

        let document = handler
            .upload_use_case
            .execute(UploadDocumentRequest {
                user_id: auth.user_id,
                file_name,
                class_name,
                data,
            })
            .await?;

        Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(DocumentResponseDto::from(&document))),
        ))
    }

    pub async fn list_documents(
        State(handler): State<Arc<DocumentHandler>>,
        auth: AuthUser,
        Query(query): Query<DocumentQueryDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let documents = handler
            .list_use_case
            .list(auth.user_id, query.class.as_deref())
            .await?;

        let documents: Vec<DocumentResponseDto> =
            documents.iter().map(DocumentResponseDto::from).collect();
        let dto = DocumentListDto {
            total: documents.len(),
            documents,
        };

        Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
    }

    pub async fn get_document(
        State(handler): State<Arc<DocumentHandler>>,
        auth: AuthUser,
        Path(document_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, AppError> {
        let view = handler.list_use_case.get(auth.user_id, document_id).await?;

        let dto = DocumentDetailDto {
            url: view.url.unwrap_or_else(|| download_path(view.document.id())),
            document: DocumentResponseDto::from(&view.document),
        };

        Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
    }

    pub async fn move_document(
        State(handler): State<Arc<DocumentHandler>>,
        auth: AuthUser,
        Path(document_id): Path<Uuid>,
        AppJson(body): AppJson<MoveDocumentRequestDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let document = handler
            .move_use_case
            .execute(auth.user_id, document_id, &body.class_name)
            .await?;

        Ok((
            StatusCode::OK,
            Json(ApiResponse::success(DocumentResponseDto::from(&document))),
        ))
    }

    pub async fn delete_document(
        State(handler): State<Arc<DocumentHandler>>,
        auth: AuthUser,
        Path(document_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, AppError> {
        handler
            .delete_use_case
            .execute(auth.user_id, document_id)
            .await?;

        Ok((
            StatusCode::OK,
            Json(ApiResponse::success(MessageResponseDto::new("Document deleted"))),
        ))
    }
}
