use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::use_cases::get_current_user::UserOverview;
use crate::domain::value_objects::Plan;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub plan: Plan,
    pub classes: Vec<String>,
    pub document_count: i64,
    pub document_limit: Option<usize>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserOverview> for ProfileDto {
    fn from(overview: UserOverview) -> Self {
        let user = overview.user;
        Self {
            id: user.id(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            plan: user.plan(),
            classes: user.classes().to_vec(),
            document_count: overview.document_count,
            document_limit: overview.document_limit,
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequestDto {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequestDto {
    pub current_password: String,
    pub new_password: String,
}
