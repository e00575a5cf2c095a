use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::config::AuthConfig;
use crate::domain::entities::User;
use crate::infrastructure::security::TokenService;
use crate::presentation::http::error::AppError;

/// Issues and clears the session cookie that carries the JWT.
pub struct SessionAuth {
    tokens: TokenService,
    cookie_name: String,
    cookie_secure: bool,
}

impl SessionAuth {
    pub fn new(tokens: TokenService, cookie_name: impl Into<String>, cookie_secure: bool) -> Self {
        Self {
            tokens,
            cookie_name: cookie_name.into(),
            cookie_secure,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            TokenService::from_config(config),
            config.cookie_name.clone(),
            config.cookie_secure,
        )
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Signs a token for the user and wraps it in the session cookie.
    pub fn issue(&self, user: &User) -> Result<(String, Cookie<'static>), AppError> {
        let token = self
            .tokens
            .sign(user.id(), user.email())
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))?;

        let cookie = Cookie::build((self.cookie_name.clone(), token.clone()))
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.cookie_secure)
            .path("/")
            .max_age(time::Duration::seconds(self.tokens.ttl().num_seconds()))
            .build();

        Ok((token, cookie))
    }

    /// Expired session cookie. Added to the jar rather than removed from it so
    /// the browser is told to drop it even when the request carried no cookie.
    pub fn removal(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build((self.cookie_name.clone(), ""))
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.cookie_secure)
            .path("/")
            .build();
        cookie.make_removal();
        cookie
    }
}

/// Handler states that can authenticate requests.
pub trait SessionAuthority {
    fn session_auth(&self) -> &SessionAuth;
}
