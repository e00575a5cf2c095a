use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::application::use_cases::{
    DeleteAccountUseCase, GetCurrentUserUseCase, UpdateProfileUseCase,
    update_profile::UpdateProfileRequest,
};
use crate::presentation::http::dto::{
    ApiResponse, ChangePasswordRequestDto, MessageResponseDto, ProfileDto,
    UpdateProfileRequestDto,
};
use crate::presentation::http::error::AppError;
use crate::presentation::http::extractors::{AppJson, AuthUser};
use crate::presentation::http::session::{SessionAuth, SessionAuthority};

pub struct ProfileHandler {
    session_auth: Arc<SessionAuth>,
    current_user_use_case: Arc<GetCurrentUserUseCase>,
    update_profile_use_case: Arc<UpdateProfileUseCase>,
    delete_account_use_case: Arc<DeleteAccountUseCase>,
}

impl SessionAuthority for ProfileHandler {
    fn session_auth(&self) -> &SessionAuth {
        &self.session_auth
    }
}

impl ProfileHandler {
    pub fn new(
        session_auth: Arc<SessionAuth>,
        current_user_use_case: Arc<GetCurrentUserUseCase>,
        update_profile_use_case: Arc<UpdateProfileUseCase>,
        delete_account_use_case: Arc<DeleteAccountUseCase>,
    ) -> Self {
        Self {
            session_auth,
            current_user_use_case,
            update_profile_use_case,
            delete_account_use_case,
        }
    }

    pub async fn get_profile(
        State(handler): State<Arc<ProfileHandler>>,
        auth: AuthUser,
    ) -> Result<impl IntoResponse, AppError> {
        let overview = handler.current_user_use_case.execute(auth.user_id).await?;
        Ok((StatusCode::OK, Json(ApiResponse::success(ProfileDto::from(overview)))))
    }

    /// Updates name and/or email. The session cookie is reissued so the token
    /// carries the new email.
    pub async fn update_profile(
        State(handler): State<Arc<ProfileHandler>>,
        auth: AuthUser,
        jar: CookieJar,
        AppJson(body): AppJson<UpdateProfileRequestDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let user = handler
            .update_profile_use_case
            .update(
                auth.user_id,
                UpdateProfileRequest {
                    name: body.name,
                    email: body.email,
                },
            )
            .await?;

        let (_, cookie) = handler.session_auth.issue(&user)?;
        let overview = handler.current_user_use_case.execute(user.id()).await?;

        Ok((
            StatusCode::OK,
            jar.add(cookie),
            Json(ApiResponse::success(ProfileDto::from(overview))),
        ))
    }

    pub async fn change_password(
        State(handler): State<Arc<ProfileHandler>>,
        auth: AuthUser,
        AppJson(body): AppJson<ChangePasswordRequestDto>,
    ) -> Result<impl IntoResponse, AppError> {
        handler
            .update_profile_use_case
            .change_password(auth.user_id, &body.current_password, &body.new_password)
            .await?;

        Ok((
            StatusCode::OK,
            Json(ApiResponse::success(MessageResponseDto::new("Password updated"))),
        ))
    }

    pub async fn delete_account(
        State(handler): State<Arc<ProfileHandler>>,
        auth: AuthUser,
        jar: CookieJar,
    ) -> Result<impl IntoResponse, AppError> {
        let removed = handler.delete_account_use_case.execute(auth.user_id).await?;

        Ok((
            StatusCode::OK,
            jar.add(handler.session_auth.removal()),
            Json(ApiResponse::success(MessageResponseDto::new(format!(
                "Account deleted along with {} documents",
                removed
            )))),
        ))
    }
}
