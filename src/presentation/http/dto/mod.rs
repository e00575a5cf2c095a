pub mod chat_dto;
pub mod document_dto;
pub mod profile_dto;
pub mod response_dto;
pub mod user_dto;

pub use chat_dto::*;
pub use document_dto::*;
pub use profile_dto::*;
pub use response_dto::*;
pub use user_dto::*;
