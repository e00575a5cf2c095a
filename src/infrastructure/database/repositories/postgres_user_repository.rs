use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{Text, Uuid as SqlUuid};
use uuid::Uuid;

use crate::domain::entities::{Document, User};
use crate::domain::repositories::{RepositoryError, UserRepository};
use crate::infrastructure::database::models::{
    DocumentModel, NewUserModel, UserChangesModel, UserModel,
};
use crate::infrastructure::database::schema::{chat_sessions, chunks, documents, users};
use crate::infrastructure::database::{DbPool, with_connection};

pub struct PostgresUserRepository {
    pool: DbPool,
}

impl PostgresUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
        let new_user = NewUserModel::from(user);

        with_connection(&self.pool, move |conn| {
            diesel::insert_into(users::table)
                .values(&new_user)
                .execute(conn)?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, RepositoryError> {
        with_connection(&self.pool, move |conn| {
            users::table
                .find(user_id)
                .select(UserModel::as_select())
                .first(conn)
                .optional()?
                .map(User::try_from)
                .transpose()
        })
        .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let email = email.to_string();

        with_connection(&self.pool, move |conn| {
            users::table
                .filter(users::email.eq(&email))
                .select(UserModel::as_select())
                .first(conn)
                .optional()?
                .map(User::try_from)
                .transpose()
        })
        .await
    }

    async fn update(&self, user: &User) -> Result<(), RepositoryError> {
        let user_id = user.id();
        let changes = UserChangesModel::from(user);

        with_connection(&self.pool, move |conn| {
            let updated = diesel::update(users::table.find(user_id))
                .set(&changes)
                .execute(conn)?;
            if updated == 0 {
                return Err(RepositoryError::NotFound(format!("user {}", user_id)));
            }
            Ok(())
        })
        .await
    }

    async fn add_class(&self, user_id: Uuid, class_name: &str) -> Result<bool, RepositoryError> {
        let class_name = class_name.to_string();

        with_connection(&self.pool, move |conn| {
            let updated = diesel::sql_query(
                "UPDATE users SET classes = array_append(classes, $1), updated_at = NOW() \
                 WHERE id = $2 AND NOT ($1 = ANY(classes))",
            )
            .bind::<Text, _>(class_name)
            .bind::<SqlUuid, _>(user_id)
            .execute(conn)?;
            Ok(updated > 0)
        })
        .await
    }

    async fn remove_class(&self, user_id: Uuid, class_name: &str) -> Result<bool, RepositoryError> {
        let class_name = class_name.to_string();

        with_connection(&self.pool, move |conn| {
            let updated = diesel::sql_query(
                "UPDATE users SET classes = array_remove(classes, $1), updated_at = NOW() \
                 WHERE id = $2 AND $1 = ANY(classes)",
            )
            .bind::<Text, _>(class_name)
            .bind::<SqlUuid, _>(user_id)
            .execute(conn)?;
            Ok(updated > 0)
        })
        .await
    }

    async fn delete_with_content(
        &self,
        user_id: Uuid,
    ) -> Result<Option<Vec<Document>>, RepositoryError> {
        with_connection(&self.pool, move |conn| {
            conn.transaction::<_, RepositoryError, _>(|conn| {
                let exists = users::table
                    .find(user_id)
                    .select(users::id)
                    .first::<Uuid>(conn)
                    .optional()?
                    .is_some();
                if !exists {
                    return Ok(None);
                }

                let owned = documents::table
                    .filter(documents::user_id.eq(user_id))
                    .select(DocumentModel::as_select())
                    .load(conn)?;

                diesel::delete(chunks::table.filter(chunks::user_id.eq(user_id))).execute(conn)?;
                diesel::delete(chat_sessions::table.filter(chat_sessions::user_id.eq(user_id)))
                    .execute(conn)?;
                diesel::delete(documents::table.filter(documents::user_id.eq(user_id)))
                    .execute(conn)?;
                diesel::delete(users::table.find(user_id)).execute(conn)?;

                Ok(Some(owned.into_iter().map(Document::from).collect()))
            })
        })
        .await
    }
}
