use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::{ChatExchange, ChatSession};
use crate::domain::repositories::{ChatRepository, RepositoryError};
use crate::infrastructure::database::models::{ChatSessionModel, NewChatSessionModel};
use crate::infrastructure::database::schema::chat_sessions;
use crate::infrastructure::database::{DbPool, with_connection};

pub struct PostgresChatRepository {
    pool: DbPool,
}

impl PostgresChatRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatRepository for PostgresChatRepository {
    async fn insert(&self, session: &ChatSession) -> Result<(), RepositoryError> {
        let new_session = NewChatSessionModel::try_from(session)?;

        with_connection(&self.pool, move |conn| {
            diesel::insert_into(chat_sessions::table)
                .values(&new_session)
                .execute(conn)?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, session_id: Uuid) -> Result<Option<ChatSession>, RepositoryError> {
        with_connection(&self.pool, move |conn| {
            chat_sessions::table
                .find(session_id)
                .select(ChatSessionModel::as_select())
                .first(conn)
                .optional()?
                .map(ChatSession::try_from)
                .transpose()
        })
        .await
    }

    async fn find_for_user(&self, user_id: Uuid) -> Result<Vec<ChatSession>, RepositoryError> {
        with_connection(&self.pool, move |conn| {
            chat_sessions::table
                .filter(chat_sessions::user_id.eq(user_id))
                .order(chat_sessions::updated_at.desc())
                .select(ChatSessionModel::as_select())
                .load(conn)?
                .into_iter()
                .map(ChatSession::try_from)
                .collect()
        })
        .await
    }

    async fn rename(&self, session_id: Uuid, name: &str) -> Result<bool, RepositoryError> {
        let name = name.to_string();

        with_connection(&self.pool, move |conn| {
            let updated = diesel::update(chat_sessions::table.find(session_id))
                .set((
                    chat_sessions::name.eq(&name),
                    chat_sessions::updated_at.eq(Utc::now()),
                ))
                .execute(conn)?;
            Ok(updated > 0)
        })
        .await
    }

    async fn append_exchange(
        &self,
        session_id: Uuid,
        exchange: ChatExchange,
    ) -> Result<Option<ChatSession>, RepositoryError> {
        with_connection(&self.pool, move |conn| {
            conn.transaction::<_, RepositoryError, _>(|conn| {
                let model = chat_sessions::table
                    .find(session_id)
                    .select(ChatSessionModel::as_select())
                    .for_update()
                    .get_result(conn)
                    .optional()?;
                let Some(model) = model else {
                    return Ok(None);
                };

                let mut session = ChatSession::try_from(model)?;
                session.record_exchange(exchange.question, exchange.answer, exchange.citations);

                let NewChatSessionModel {
                    name,
                    messages,
                    updated_at,
                    ..
                } = NewChatSessionModel::try_from(&session)?;
                diesel::update(chat_sessions::table.find(session_id))
                    .set((
                        chat_sessions::name.eq(name),
                        chat_sessions::messages.eq(messages),
                        chat_sessions::updated_at.eq(updated_at),
                    ))
                    .execute(conn)?;

                Ok(Some(session))
            })
        })
        .await
    }

    async fn delete(&self, session_id: Uuid) -> Result<bool, RepositoryError> {
        with_connection(&self.pool, move |conn| {
            let deleted = diesel::delete(chat_sessions::table.find(session_id)).execute(conn)?;
            Ok(deleted > 0)
        })
        .await
    }
}
