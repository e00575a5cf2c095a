use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::User;
use crate::domain::repositories::RepositoryError;
use crate::domain::value_objects::Plan;
use crate::infrastructure::database::schema::users;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserModel {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub plan: String,
    pub classes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUserModel {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub plan: String,
    pub classes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for NewUserModel {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            password_hash: user.password_hash().map(str::to_string),
            plan: user.plan().as_str().to_string(),
            classes: user.classes().to_vec(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

/// Account fields written by profile updates. The class list has its own
/// targeted statements.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct UserChangesModel {
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub plan: String,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserChangesModel {
    fn from(user: &User) -> Self {
        Self {
            name: user.name().to_string(),
            email: user.email().to_string(),
            password_hash: user.password_hash().map(str::to_string),
            plan: user.plan().as_str().to_string(),
            updated_at: user.updated_at(),
        }
    }
}

impl TryFrom<UserModel> for User {
    type Error = RepositoryError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let plan = model
            .plan
            .parse::<Plan>()
            .map_err(|e| RepositoryError::Corrupt(format!("user {}: {}", model.id, e)))?;

        Ok(User {
            id: model.id,
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            plan,
            classes: model.classes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
