pub mod chat_routes;
pub mod document_routes;
pub mod events_routes;
pub mod health_routes;
pub mod profile_routes;
pub mod user_routes;

pub use chat_routes::*;
pub use document_routes::*;
pub use events_routes::*;
pub use health_routes::*;
pub use profile_routes::*;
pub use user_routes::*;
