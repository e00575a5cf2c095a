use std::sync::Arc;
use tracing::instrument;

use crate::application::errors::AccountError;
use crate::application::services::credentials::{
    hash_password, validate_email, validate_name, validate_password,
};
use crate::domain::entities::{User, user::normalize_email};
use crate::domain::repositories::{RepositoryError, UserRepository};

#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterUserUseCase {
    user_repository: Arc<dyn UserRepository>,
}

impl RegisterUserUseCase {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn execute(&self, request: RegisterUserRequest) -> Result<User, AccountError> {
        validate_name(&request.name)?;
        validate_email(&request.email)?;
        validate_password(&request.password)?;

        let email = normalize_email(&request.email);
        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(AccountError::EmailTaken);
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::new(request.name, &email, password_hash);

        self.user_repository
            .insert(&user)
            .await
            .map_err(|e| match e {
                RepositoryError::Duplicate(_) => {
                    tracing::debug!("Signup race: unique email constraint caught on insert");
                    AccountError::EmailTaken
                }
                other => AccountError::from(other),
            })?;

        tracing::info!(user_id = %user.id(), "User registered");
        Ok(user)
    }
}
