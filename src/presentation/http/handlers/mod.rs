pub mod chat_handler;
pub mod document_handler;
pub mod download_handler;
pub mod events_handler;
pub mod profile_handler;
pub mod user_handler;

pub use chat_handler::ChatHandler;
pub use document_handler::DocumentHandler;
pub use download_handler::DownloadHandler;
pub use events_handler::EventsHandler;
pub use profile_handler::ProfileHandler;
pub use user_handler::UserHandler;
