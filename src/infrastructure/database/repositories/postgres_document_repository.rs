use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Document;
use crate::domain::repositories::{ClassPurge, DocumentRepository, RepositoryError};
use crate::infrastructure::database::models::DocumentModel;
use crate::infrastructure::database::schema::{chat_sessions, chunks, documents, users};
use crate::infrastructure::database::{DbPool, with_connection};

pub struct PostgresDocumentRepository {
    pool: DbPool,
}

impl PostgresDocumentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn insert_within_limit(
        &self,
        document: &Document,
        limit: Option<usize>,
    ) -> Result<bool, RepositoryError> {
        let model = DocumentModel::from(document);

        with_connection(&self.pool, move |conn| {
            conn.transaction::<_, RepositoryError, _>(|conn| {
                // Held until commit; concurrent uploads of this user wait here.
                users::table
                    .find(model.user_id)
                    .select(users::id)
                    .for_update()
                    .get_result::<Uuid>(conn)?;

                if let Some(limit) = limit {
                    let current: i64 = documents::table
                        .filter(documents::user_id.eq(model.user_id))
                        .count()
                        .get_result(conn)?;
                    if current >= limit as i64 {
                        return Ok(false);
                    }
                }

                diesel::insert_into(documents::table)
                    .values(&model)
                    .execute(conn)?;
                Ok(true)
            })
        })
        .await
    }

    async fn find_by_id(&self, document_id: Uuid) -> Result<Option<Document>, RepositoryError> {
        with_connection(&self.pool, move |conn| {
            let model = documents::table
                .find(document_id)
                .select(DocumentModel::as_select())
                .first(conn)
                .optional()?;
            Ok(model.map(Document::from))
        })
        .await
    }

    async fn find_for_user(
        &self,
        user_id: Uuid,
        class_name: Option<&str>,
    ) -> Result<Vec<Document>, RepositoryError> {
        let class_name = class_name.map(str::to_string);

        with_connection(&self.pool, move |conn| {
            let mut query = documents::table
                .filter(documents::user_id.eq(user_id))
                .into_boxed();
            if let Some(class_name) = class_name {
                query = query.filter(documents::class_name.eq(class_name));
            }

            let models = query
                .order(documents::uploaded_at.desc())
                .select(DocumentModel::as_select())
                .load(conn)?;
            Ok(models.into_iter().map(Document::from).collect())
        })
        .await
    }

    async fn count_for_user(&self, user_id: Uuid) -> Result<i64, RepositoryError> {
        with_connection(&self.pool, move |conn| {
            Ok(documents::table
                .filter(documents::user_id.eq(user_id))
                .count()
                .get_result(conn)?)
        })
        .await
    }

    async fn find_by_hash(
        &self,
        user_id: Uuid,
        class_name: &str,
        content_hash: &str,
    ) -> Result<Option<Document>, RepositoryError> {
        let class_name = class_name.to_string();
        let content_hash = content_hash.to_string();

        with_connection(&self.pool, move |conn| {
            let model = documents::table
                .filter(documents::user_id.eq(user_id))
                .filter(documents::class_name.eq(&class_name))
                .filter(documents::content_hash.eq(&content_hash))
                .select(DocumentModel::as_select())
                .first(conn)
                .optional()?;
            Ok(model.map(Document::from))
        })
        .await
    }

    async fn update_class(&self, document_id: Uuid, class_name: &str) -> Result<bool, RepositoryError> {
        let class_name = class_name.to_string();

        with_connection(&self.pool, move |conn| {
            conn.transaction::<_, RepositoryError, _>(|conn| {
                let updated = diesel::update(documents::table.find(document_id))
                    .set((
                        documents::class_name.eq(&class_name),
                        documents::updated_at.eq(Utc::now()),
                    ))
                    .execute(conn)?;
                if updated == 0 {
                    return Ok(false);
                }

                diesel::update(chunks::table.filter(chunks::document_id.eq(document_id)))
                    .set(chunks::class_name.eq(&class_name))
                    .execute(conn)?;
                Ok(true)
            })
        })
        .await
    }

    async fn delete_with_dependents(&self, document_id: Uuid) -> Result<bool, RepositoryError> {
        with_connection(&self.pool, move |conn| {
            conn.transaction::<_, RepositoryError, _>(|conn| {
                let chunks_removed =
                    diesel::delete(chunks::table.filter(chunks::document_id.eq(document_id)))
                        .execute(conn)?;
                let sessions_removed = diesel::delete(
                    chat_sessions::table.filter(chat_sessions::assigned_document.eq(document_id)),
                )
                .execute(conn)?;
                let deleted = diesel::delete(documents::table.find(document_id)).execute(conn)?;

                tracing::debug!(
                    %document_id,
                    chunks_removed,
                    sessions_removed,
                    "Document cascade"
                );
                Ok(deleted > 0)
            })
        })
        .await
    }

    async fn delete_class(
        &self,
        user_id: Uuid,
        class_name: &str,
    ) -> Result<ClassPurge, RepositoryError> {
        let class_name = class_name.to_string();

        with_connection(&self.pool, move |conn| {
            conn.transaction::<_, RepositoryError, _>(|conn| {
                let models = documents::table
                    .filter(documents::user_id.eq(user_id))
                    .filter(documents::class_name.eq(&class_name))
                    .select(DocumentModel::as_select())
                    .load(conn)?;
                let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();

                let chunks_removed = diesel::delete(
                    chunks::table
                        .filter(chunks::user_id.eq(user_id))
                        .filter(
                            chunks::document_id
                                .eq_any(&ids)
                                .or(chunks::class_name.eq(&class_name)),
                        ),
                )
                .execute(conn)?;

                let sessions_removed = diesel::delete(
                    chat_sessions::table
                        .filter(chat_sessions::user_id.eq(user_id))
                        .filter(
                            chat_sessions::assigned_class
                                .eq(&class_name)
                                .or(chat_sessions::assigned_document.eq_any(&ids)),
                        ),
                )
                .execute(conn)?;

                diesel::delete(documents::table.filter(documents::id.eq_any(&ids))).execute(conn)?;

                Ok(ClassPurge {
                    documents: models.into_iter().map(Document::from).collect(),
                    chunks_removed: chunks_removed as i64,
                    sessions_removed: sessions_removed as i64,
                })
            })
        })
        .await
    }

    async fn find_awaiting_ready_notice(&self, limit: i64) -> Result<Vec<Document>, RepositoryError> {
        with_connection(&self.pool, move |conn| {
            let models = documents::table
                .filter(documents::is_processed.eq(true))
                .filter(documents::ready_notified.eq(false))
                .order(documents::uploaded_at.asc())
                .limit(limit)
                .select(DocumentModel::as_select())
                .load(conn)?;
            Ok(models.into_iter().map(Document::from).collect())
        })
        .await
    }

    async fn mark_ready_notified(&self, ids: &[Uuid]) -> Result<usize, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let ids = ids.to_vec();

        with_connection(&self.pool, move |conn| {
            Ok(diesel::update(documents::table.filter(documents::id.eq_any(&ids)))
                .set(documents::ready_notified.eq(true))
                .execute(conn)?)
        })
        .await
    }
}
