use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::use_cases::get_current_user::UserOverview;
use crate::application::use_cases::manage_classes::ClassRemoval;
use crate::domain::entities::User;
use crate::domain::value_objects::Plan;

#[derive(Debug, Deserialize)]
pub struct SignupRequestDto {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequestDto {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub plan: Plan,
    pub classes: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponseDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            plan: user.plan(),
            classes: user.classes().to_vec(),
            created_at: user.created_at(),
        }
    }
}

/// Body of signup and login. The token is also set as the session cookie.
#[derive(Debug, Serialize)]
pub struct AuthResponseDto {
    pub user: UserResponseDto,
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatusDto {
    pub authenticated: bool,
    pub user: UserResponseDto,
    pub document_count: i64,
    pub document_limit: Option<usize>,
}

impl From<UserOverview> for AuthStatusDto {
    fn from(overview: UserOverview) -> Self {
        Self {
            authenticated: true,
            user: UserResponseDto::from(&overview.user),
            document_count: overview.document_count,
            document_limit: overview.document_limit,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ClassRequestDto {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ClassListDto {
    pub classes: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRemovalDto {
    pub class_name: String,
    pub documents_removed: usize,
    pub chunks_removed: i64,
    pub sessions_removed: i64,
}

impl ClassRemovalDto {
    pub fn new(class_name: String, removal: ClassRemoval) -> Self {
        Self {
            class_name,
            documents_removed: removal.documents_removed,
            chunks_removed: removal.chunks_removed,
            sessions_removed: removal.sessions_removed,
        }
    }
}
