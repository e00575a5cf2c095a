pub mod chat_session_model;
pub mod chunk_model;
pub mod document_model;
pub mod user_model;

pub use chat_session_model::*;
pub use chunk_model::*;
pub use document_model::*;
pub use user_model::*;
