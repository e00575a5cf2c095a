use std::sync::Arc;
use tracing::instrument;

use crate::application::errors::AccountError;
use crate::application::services::credentials::verify_password;
use crate::domain::entities::{User, user::normalize_email};
use crate::domain::repositories::UserRepository;

#[derive(Debug, Clone)]
pub struct LoginUserRequest {
    pub email: String,
    pub password: String,
}

pub struct LoginUserUseCase {
    user_repository: Arc<dyn UserRepository>,
}

impl LoginUserUseCase {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn execute(&self, request: LoginUserRequest) -> Result<User, AccountError> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(AccountError::Validation(
                "Email and password are required".into(),
            ));
        }

        let user = self
            .user_repository
            .find_by_email(&normalize_email(&request.email))
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let stored_hash = user
            .password_hash()
            .ok_or(AccountError::InvalidCredentials)?;

        if !verify_password(&request.password, stored_hash)? {
            tracing::info!(user_id = %user.id(), "Rejected login with wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        Ok(user)
    }
}
