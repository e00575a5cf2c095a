use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Chunk;
use crate::domain::repositories::{ChunkRepository, RepositoryError};
use crate::infrastructure::database::models::ChunkModel;
use crate::infrastructure::database::schema::chunks;
use crate::infrastructure::database::{DbPool, with_connection};

pub struct PostgresChunkRepository {
    pool: DbPool,
}

impl PostgresChunkRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChunkRepository for PostgresChunkRepository {
    async fn find_by_id(&self, chunk_id: Uuid) -> Result<Option<Chunk>, RepositoryError> {
        with_connection(&self.pool, move |conn| {
            let model = chunks::table
                .find(chunk_id)
                .select(ChunkModel::as_select())
                .first(conn)
                .optional()?;
            Ok(model.map(Chunk::from))
        })
        .await
    }

    async fn count_by_document(&self, document_id: Uuid) -> Result<i64, RepositoryError> {
        with_connection(&self.pool, move |conn| {
            Ok(chunks::table
                .filter(chunks::document_id.eq(document_id))
                .count()
                .get_result(conn)?)
        })
        .await
    }
}
