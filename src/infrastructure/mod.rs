pub mod container;
pub mod database;
pub mod external_services;
pub mod file_system;
pub mod messaging;
pub mod object_storage;
pub mod security;

// Re-export commonly used items
pub use container::{AppContainer, Backends};
pub use database::{DbPool, create_connection_pool};
pub use file_system::LocalFileStorage;
