pub mod delete_account;
pub mod delete_document;
pub mod download_document;
pub mod get_current_user;
pub mod list_documents;
pub mod login_user;
pub mod manage_chat_sessions;
pub mod manage_classes;
pub mod move_document;
pub mod register_user;
pub mod resolve_citation;
pub mod send_message;
pub mod update_profile;
pub mod upload_document;

pub use delete_account::DeleteAccountUseCase;
pub use delete_document::DeleteDocumentUseCase;
pub use download_document::DownloadDocumentUseCase;
pub use get_current_user::GetCurrentUserUseCase;
pub use list_documents::ListDocumentsUseCase;
pub use login_user::LoginUserUseCase;
pub use manage_chat_sessions::ManageChatSessionsUseCase;
pub use manage_classes::ManageClassesUseCase;
pub use move_document::MoveDocumentUseCase;
pub use register_user::RegisterUserUseCase;
pub use resolve_citation::ResolveCitationUseCase;
pub use send_message::SendMessageUseCase;
pub use update_profile::UpdateProfileUseCase;
pub use upload_document::UploadDocumentUseCase;
