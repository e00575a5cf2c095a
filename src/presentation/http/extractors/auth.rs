use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use uuid::Uuid;

use crate::presentation::http::error::AppError;
use crate::presentation::http::session::SessionAuthority;

/// Authenticated user taken from the session cookie, or from an
/// `Authorization: Bearer <token>` header when no cookie is sent.
///
/// Add this as a handler parameter to require authentication.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
}

fn bearer_token(parts: &Parts) -> Result<Option<String>, AppError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let value = header.to_str().map_err(|_| AppError::TokenInvalid)?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or(AppError::TokenInvalid)?;
    Ok(Some(token.trim().to_string()))
}

impl<H> FromRequestParts<Arc<H>> for AuthUser
where
    H: SessionAuthority + Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<H>) -> Result<Self, Self::Rejection> {
        let auth = state.session_auth();
        let jar = CookieJar::from_headers(&parts.headers);

        let token = match jar.get(auth.cookie_name()) {
            Some(cookie) if !cookie.value().is_empty() => cookie.value().to_string(),
            _ => bearer_token(parts)?.ok_or(AppError::TokenMissing)?,
        };

        let claims = auth
            .tokens()
            .verify(&token)
            .map_err(|_| AppError::TokenInvalid)?;
        let user_id = claims.user_id().map_err(|_| AppError::TokenInvalid)?;

        Ok(AuthUser {
            user_id,
            email: claims.email,
        })
    }
}
