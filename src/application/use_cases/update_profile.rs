use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::application::errors::AccountError;
use crate::application::services::credentials::{
    hash_password, validate_email, validate_name, validate_password, verify_password,
};
use crate::domain::entities::{User, user::normalize_email};
use crate::domain::repositories::{RepositoryError, UserRepository};

#[derive(Debug, Clone, Default)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

pub struct UpdateProfileUseCase {
    user_repository: Arc<dyn UserRepository>,
}

impl UpdateProfileUseCase {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    async fn load_user(&self, user_id: Uuid) -> Result<User, AccountError> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AccountError::UserNotFound)
    }

    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> Result<User, AccountError> {
        if request.name.is_none() && request.email.is_none() {
            return Err(AccountError::Validation("Nothing to update".into()));
        }

        let mut user = self.load_user(user_id).await?;

        if let Some(name) = request.name.as_deref() {
            validate_name(name)?;
            user.rename(name);
        }

        if let Some(email) = request.email.as_deref() {
            validate_email(email)?;
            let email = normalize_email(email);
            if email != user.email() {
                if let Some(other) = self.user_repository.find_by_email(&email).await? {
                    if other.id() != user_id {
                        return Err(AccountError::EmailTaken);
                    }
                }
                user.change_email(&email);
            }
        }

        self.user_repository
            .update(&user)
            .await
            .map_err(|e| match e {
                RepositoryError::Duplicate(_) => AccountError::EmailTaken,
                other => AccountError::from(other),
            })?;

        Ok(user)
    }

    #[instrument(skip(self, current_password, new_password))]
    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AccountError> {
        validate_password(new_password)?;

        let mut user = self.load_user(user_id).await?;
        let stored_hash = user
            .password_hash()
            .ok_or(AccountError::InvalidCredentials)?;

        if !verify_password(current_password, stored_hash)? {
            return Err(AccountError::InvalidCredentials);
        }

        user.set_password_hash(hash_password(new_password)?);
        self.user_repository.update(&user).await?;

        tracing::info!("Password changed");
        Ok(())
    }
}
