use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::application::AccountError;
use crate::application::use_cases::{
    GetCurrentUserUseCase, LoginUserUseCase, ManageClassesUseCase, RegisterUserUseCase,
    login_user::LoginUserRequest, register_user::RegisterUserRequest,
};
use crate::presentation::http::dto::{
    ApiResponse, AuthResponseDto, AuthStatusDto, ClassListDto, ClassRemovalDto, ClassRequestDto,
    LoginRequestDto, MessageResponseDto, SignupRequestDto, UserResponseDto,
};
use crate::presentation::http::error::AppError;
use crate::presentation::http::extractors::{AppJson, AuthUser};
use crate::presentation::http::session::{SessionAuth, SessionAuthority};

pub struct UserHandler {
    session_auth: Arc<SessionAuth>,
    register_use_case: Arc<RegisterUserUseCase>,
    login_use_case: Arc<LoginUserUseCase>,
    current_user_use_case: Arc<GetCurrentUserUseCase>,
    classes_use_case: Arc<ManageClassesUseCase>,
}

impl SessionAuthority for UserHandler {
    fn session_auth(&self) -> &SessionAuth {
        &self.session_auth
    }
}

impl UserHandler {
    pub fn new(
        session_auth: Arc<SessionAuth>,
        register_use_case: Arc<RegisterUserUseCase>,
        login_use_case: Arc<LoginUserUseCase>,
        current_user_use_case: Arc<GetCurrentUserUseCase>,
        classes_use_case: Arc<ManageClassesUseCase>,
    ) -> Self {
        Self {
            session_auth,
            register_use_case,
            login_use_case,
            current_user_use_case,
            classes_use_case,
        }
    }

    pub async fn signup(
        State(handler): State<Arc<UserHandler>>,
        jar: CookieJar,
        AppJson(body): AppJson<SignupRequestDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let user = handler
            .register_use_case
            .execute(RegisterUserRequest {
                name: body.name,
                email: body.email,
                password: body.password,
            })
            .await?;

        let (token, cookie) = handler.session_auth.issue(&user)?;
        let dto = AuthResponseDto {
            user: UserResponseDto::from(&user),
            token,
        };

        Ok((StatusCode::CREATED, jar.add(cookie), Json(ApiResponse::success(dto))))
    }

    pub async fn login(
        State(handler): State<Arc<UserHandler>>,
        jar: CookieJar,
        AppJson(body): AppJson<LoginRequestDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let user = handler
            .login_use_case
            .execute(LoginUserRequest {
                email: body.email,
                password: body.password,
            })
            .await?;

        let (token, cookie) = handler.session_auth.issue(&user)?;
        let dto = AuthResponseDto {
            user: UserResponseDto::from(&user),
            token,
        };

        Ok((StatusCode::OK, jar.add(cookie), Json(ApiResponse::success(dto))))
    }

    pub async fn logout(
        State(handler): State<Arc<UserHandler>>,
        jar: CookieJar,
    ) -> impl IntoResponse {
        (
            StatusCode::OK,
            jar.add(handler.session_auth.removal()),
            Json(ApiResponse::success(MessageResponseDto::new("Logged out"))),
        )
    }

    pub async fn auth_status(
        State(handler): State<Arc<UserHandler>>,
        auth: AuthUser,
    ) -> Result<impl IntoResponse, AppError> {
        // A valid token for a deleted account is not a session.
        let overview = handler
            .current_user_use_case
            .execute(auth.user_id)
            .await
            .map_err(|e| match e {
                AccountError::UserNotFound => AppError::TokenInvalid,
                other => other.into(),
            })?;

        Ok((
            StatusCode::OK,
            Json(ApiResponse::success(AuthStatusDto::from(overview))),
        ))
    }

    pub async fn list_classes(
        State(handler): State<Arc<UserHandler>>,
        auth: AuthUser,
    ) -> Result<impl IntoResponse, AppError> {
        let classes = handler.classes_use_case.list(auth.user_id).await?;
        Ok((StatusCode::OK, Json(ApiResponse::success(ClassListDto { classes }))))
    }

    pub async fn add_class(
        State(handler): State<Arc<UserHandler>>,
        auth: AuthUser,
        AppJson(body): AppJson<ClassRequestDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let classes = handler.classes_use_case.add(auth.user_id, &body.name).await?;
        Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(ClassListDto { classes })),
        ))
    }

    pub async fn remove_class(
        State(handler): State<Arc<UserHandler>>,
        auth: AuthUser,
        Path(class_name): Path<String>,
    ) -> Result<impl IntoResponse, AppError> {
        let removal = handler
            .classes_use_case
            .remove(auth.user_id, &class_name)
            .await?;

        Ok((
            StatusCode::OK,
            Json(ApiResponse::success(ClassRemovalDto::new(class_name, removal))),
        ))
    }
}
