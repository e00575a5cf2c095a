pub mod connection;
pub mod models;
pub mod repositories;
pub mod schema;

pub use connection::{DbPool, create_connection_pool, run_migrations, with_connection};
pub use repositories::{
    PostgresChatRepository, PostgresChunkRepository, PostgresDocumentRepository,
    PostgresUserRepository,
};
