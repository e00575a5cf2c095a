use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::{
    ManageChatSessionsUseCase, ResolveCitationUseCase, SendMessageUseCase,
    manage_chat_sessions::CreateSessionRequest, send_message::SendMessageRequest,
};
use crate::presentation::http::dto::{
    ApiResponse, CitationSourceDto, CreateSessionRequestDto, MessageResponseDto,
    RenameSessionRequestDto, SendMessageRequestDto, SendMessageResponseDto, SessionDetailDto,
    SessionSummaryDto,
};
use crate::presentation::http::error::AppError;
use crate::presentation::http::extractors::{AppJson, AuthUser};
use crate::presentation::http::session::{SessionAuth, SessionAuthority};

pub struct ChatHandler {
    session_auth: Arc<SessionAuth>,
    sessions_use_case: Arc<ManageChatSessionsUseCase>,
    send_message_use_case: Arc<SendMessageUseCase>,
    resolve_citation_use_case: Arc<ResolveCitationUseCase>,
}

impl SessionAuthority for ChatHandler {
    fn session_auth(&self) -> &SessionAuth {
        &self.session_auth
    }
}

impl ChatHandler {
    pub fn new(
        session_auth: Arc<SessionAuth>,
        sessions_use_case: Arc<ManageChatSessionsUseCase>,
        send_message_use_case: Arc<SendMessageUseCase>,
        resolve_citation_use_case: Arc<ResolveCitationUseCase>,
    ) -> Self {
        Self {
            session_auth,
            sessions_use_case,
            send_message_use_case,
            resolve_citation_use_case,
        }
    }

    pub async fn create_session(
        State(handler): State<Arc<ChatHandler>>,
        auth: AuthUser,
        AppJson(body): AppJson<CreateSessionRequestDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let session = handler
            .sessions_use_case
            .create(CreateSessionRequest {
                user_id: auth.user_id,
                name: body.name,
                assigned_class: body.assigned_class,
                assigned_document: body.assigned_document,
            })
            .await?;

        Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(SessionDetailDto::from(session))),
        ))
    }

    pub async fn list_sessions(
        State(handler): State<Arc<ChatHandler>>,
        auth: AuthUser,
    ) -> Result<impl IntoResponse, AppError> {
        let sessions = handler.sessions_use_case.list(auth.user_id).await?;
        let dto: Vec<SessionSummaryDto> = sessions.iter().map(SessionSummaryDto::from).collect();

        Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
    }

    pub async fn get_session(
        State(handler): State<Arc<ChatHandler>>,
        auth: AuthUser,
        Path(session_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, AppError> {
        let session = handler.sessions_use_case.get(auth.user_id, session_id).await?;
        Ok((
            StatusCode::OK,
            Json(ApiResponse::success(SessionDetailDto::from(session))),
        ))
    }

    pub async fn rename_session(
        State(handler): State<Arc<ChatHandler>>,
        auth: AuthUser,
        Path(session_id): Path<Uuid>,
        AppJson(body): AppJson<RenameSessionRequestDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let session = handler
            .sessions_use_case
            .rename(auth.user_id, session_id, &body.name)
            .await?;

        Ok((
            StatusCode::OK,
            Json(ApiResponse::success(SessionSummaryDto::from(&session))),
        ))
    }

    pub async fn delete_session(
        State(handler): State<Arc<ChatHandler>>,
        auth: AuthUser,
        Path(session_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, AppError> {
        handler
            .sessions_use_case
            .delete(auth.user_id, session_id)
            .await?;

        Ok((
            StatusCode::OK,
            Json(ApiResponse::success(MessageResponseDto::new("Chat session deleted"))),
        ))
    }

    pub async fn send_message(
        State(handler): State<Arc<ChatHandler>>,
        auth: AuthUser,
        Path(session_id): Path<Uuid>,
        AppJson(body): AppJson<SendMessageRequestDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let response = handler
            .send_message_use_case
            .execute(SendMessageRequest {
                user_id: auth.user_id,
                session_id,
                message: body.message,
            })
            .await?;

        Ok((
            StatusCode::OK,
            Json(ApiResponse::success(SendMessageResponseDto::from(response))),
        ))
    }

    pub async fn resolve_citation(
        State(handler): State<Arc<ChatHandler>>,
        auth: AuthUser,
        Path(chunk_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, AppError> {
        let target = handler
            .resolve_citation_use_case
            .execute(auth.user_id, chunk_id)
            .await?;

        Ok((
            StatusCode::OK,
            Json(ApiResponse::success(CitationSourceDto::from(target))),
        ))
    }
}
