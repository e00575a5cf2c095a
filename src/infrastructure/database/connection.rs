use diesel::{
    PgConnection,
    r2d2::{self, ConnectionManager},
    result::{DatabaseErrorKind, Error as DieselError},
};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::config::DatabaseConfig;
use crate::domain::repositories::RepositoryError;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;
pub type DbConnection = r2d2::PooledConnection<ConnectionManager<PgConnection>>;

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Pool error: {0}")]
    PoolError(String),
    #[error("Migration error: {0}")]
    MigrationError(String),
}

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/");

pub fn create_connection_pool(config: &DatabaseConfig) -> Result<DbPool, DatabaseError> {
    let manager = ConnectionManager::<PgConnection>::new(&config.url);

    r2d2::Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(1))
        .build(manager)
        .map_err(|e| DatabaseError::PoolError(e.to_string()))
}

pub fn get_connection_from_pool(pool: &DbPool) -> Result<DbConnection, DatabaseError> {
    pool.get().map_err(|e| DatabaseError::PoolError(e.to_string()))
}

pub fn run_migrations(pool: &DbPool) -> Result<(), DatabaseError> {
    let mut conn = get_connection_from_pool(pool)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

    for version in applied {
        tracing::info!("Applied migration {}", version);
    }
    Ok(())
}

/// Runs a blocking diesel closure on the blocking thread pool with a pooled
/// connection.
pub async fn with_connection<T, F>(pool: &DbPool, f: F) -> Result<T, RepositoryError>
where
    T: Send + 'static,
    F: FnOnce(&mut PgConnection) -> Result<T, RepositoryError> + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = get_connection_from_pool(&pool)
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;
        f(&mut conn)
    })
    .await
    .map_err(|e| RepositoryError::Connection(format!("Database task failed: {}", e)))?
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound("Record not found".to_string()),
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                RepositoryError::Duplicate(info.message().to_string())
            }
            DieselError::DeserializationError(e) => RepositoryError::Corrupt(e.to_string()),
            other => RepositoryError::Database(other.to_string()),
        }
    }
}
