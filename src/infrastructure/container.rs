use anyhow::Context;
use std::{path::PathBuf, sync::Arc, time::Duration};

use crate::{
    application::{
        ports::{FileStorage, IngestionService, Notifier, RagEngine},
        use_cases::{
            DeleteAccountUseCase, DeleteDocumentUseCase, DownloadDocumentUseCase,
            GetCurrentUserUseCase, ListDocumentsUseCase, LoginUserUseCase,
            ManageChatSessionsUseCase, ManageClassesUseCase, MoveDocumentUseCase,
            RegisterUserUseCase, ResolveCitationUseCase, SendMessageUseCase,
            UpdateProfileUseCase, UploadDocumentUseCase,
        },
    },
    config::{AppConfig, StorageBackend},
    domain::repositories::{ChatRepository, ChunkRepository, DocumentRepository, UserRepository},
    infrastructure::{
        database::{
            PostgresChatRepository, PostgresChunkRepository, PostgresDocumentRepository,
            PostgresUserRepository, create_connection_pool, run_migrations,
        },
        external_services::{HttpIngestionClient, IngestionClientConfig, SubprocessRagEngine},
        file_system::LocalFileStorage,
        messaging::{DocumentReadyWatcher, NotificationHub},
        object_storage::S3FileStorage,
    },
    presentation::http::{
        handlers::{
            ChatHandler, DocumentHandler, DownloadHandler, EventsHandler, ProfileHandler,
            UserHandler,
        },
        session::SessionAuth,
    },
};

/// The outward-facing adapters the rest of the graph is built on. Production
/// wiring fills this from config; tests pass in-memory doubles.
pub struct Backends {
    pub users: Arc<dyn UserRepository>,
    pub documents: Arc<dyn DocumentRepository>,
    pub chats: Arc<dyn ChatRepository>,
    pub chunks: Arc<dyn ChunkRepository>,
    pub storage: Arc<dyn FileStorage>,
    pub rag: Arc<dyn RagEngine>,
    pub ingestion: Arc<dyn IngestionService>,
}

pub struct AppContainer {
    pub config: AppConfig,

    // Repositories
    pub document_repository: Arc<dyn DocumentRepository>,

    // Messaging
    pub notification_hub: Arc<NotificationHub>,

    // HTTP Handlers
    pub user_handler: Arc<UserHandler>,
    pub profile_handler: Arc<ProfileHandler>,
    pub document_handler: Arc<DocumentHandler>,
    pub download_handler: Arc<DownloadHandler>,
    pub chat_handler: Arc<ChatHandler>,
    pub events_handler: Arc<EventsHandler>,
}

impl AppContainer {
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        // Create database connection pool
        let db_pool =
            create_connection_pool(&config.database).context("Failed to create database pool")?;
        run_migrations(&db_pool).context("Failed to run database migrations")?;

        // Create external services
        let storage: Arc<dyn FileStorage> = match config.storage.backend {
            StorageBackend::Local => {
                tracing::info!(dir = %config.storage.local_dir, "Using local file storage");
                Arc::new(LocalFileStorage::new(PathBuf::from(&config.storage.local_dir)))
            }
            StorageBackend::S3 => {
                tracing::info!(bucket = %config.storage.s3.bucket, "Using S3 object storage");
                Arc::new(
                    S3FileStorage::new(&config.storage.s3)
                        .context("Failed to configure S3 storage")?,
                )
            }
        };

        let ingestion = HttpIngestionClient::new(IngestionClientConfig::from(&config.ingestion))
            .context("Failed to build ingestion client")?;

        let backends = Backends {
            users: Arc::new(PostgresUserRepository::new(db_pool.clone())),
            documents: Arc::new(PostgresDocumentRepository::new(db_pool.clone())),
            chats: Arc::new(PostgresChatRepository::new(db_pool.clone())),
            chunks: Arc::new(PostgresChunkRepository::new(db_pool)),
            storage,
            rag: Arc::new(SubprocessRagEngine::from_config(&config.rag)),
            ingestion: Arc::new(ingestion),
        };

        Ok(Self::assemble(config, backends))
    }

    pub fn assemble(config: AppConfig, backends: Backends) -> Self {
        let Backends {
            users,
            documents,
            chats,
            chunks,
            storage,
            rag,
            ingestion,
        } = backends;
        let free_limit = config.plans.free_document_limit;

        let session_auth = Arc::new(SessionAuth::from_config(&config.auth));
        let notification_hub = Arc::new(NotificationHub::new(
            config.notifications.channel_capacity,
        ));

        // Create use cases
        let register_use_case = Arc::new(RegisterUserUseCase::new(users.clone()));
        let login_use_case = Arc::new(LoginUserUseCase::new(users.clone()));
        let current_user_use_case = Arc::new(GetCurrentUserUseCase::new(
            users.clone(),
            documents.clone(),
            free_limit,
        ));
        let classes_use_case = Arc::new(ManageClassesUseCase::new(
            users.clone(),
            documents.clone(),
            storage.clone(),
        ));
        let update_profile_use_case = Arc::new(UpdateProfileUseCase::new(users.clone()));
        let delete_account_use_case =
            Arc::new(DeleteAccountUseCase::new(users.clone(), storage.clone()));

        let upload_use_case = Arc::new(UploadDocumentUseCase::new(
            users.clone(),
            documents.clone(),
            storage.clone(),
            ingestion,
            free_limit,
        ));
        let list_documents_use_case =
            Arc::new(ListDocumentsUseCase::new(documents.clone(), storage.clone()));
        let move_document_use_case =
            Arc::new(MoveDocumentUseCase::new(users.clone(), documents.clone()));
        let delete_document_use_case =
            Arc::new(DeleteDocumentUseCase::new(documents.clone(), storage.clone()));
        let download_use_case =
            Arc::new(DownloadDocumentUseCase::new(documents.clone(), storage.clone()));

        let sessions_use_case = Arc::new(ManageChatSessionsUseCase::new(
            chats.clone(),
            users,
            documents.clone(),
        ));
        let send_message_use_case = Arc::new(SendMessageUseCase::new(
            chats,
            rag,
            config.rag.history_limit,
        ));
        let resolve_citation_use_case = Arc::new(ResolveCitationUseCase::new(
            chunks,
            documents.clone(),
            storage,
        ));

        // Create HTTP handlers
        let user_handler = Arc::new(UserHandler::new(
            session_auth.clone(),
            register_use_case,
            login_use_case,
            current_user_use_case.clone(),
            classes_use_case,
        ));
        let profile_handler = Arc::new(ProfileHandler::new(
            session_auth.clone(),
            current_user_use_case,
            update_profile_use_case,
            delete_account_use_case,
        ));
        let document_handler = Arc::new(DocumentHandler::new(
            session_auth.clone(),
            upload_use_case,
            list_documents_use_case,
            move_document_use_case,
            delete_document_use_case,
        ));
        let download_handler = Arc::new(DownloadHandler::new(
            session_auth.clone(),
            download_use_case,
        ));
        let chat_handler = Arc::new(ChatHandler::new(
            session_auth.clone(),
            sessions_use_case,
            send_message_use_case,
            resolve_citation_use_case,
        ));
        let events_handler = Arc::new(EventsHandler::new(
            session_auth,
            notification_hub.clone(),
            Duration::from_secs(config.notifications.keep_alive_secs.max(1)),
        ));

        Self {
            config,
            document_repository: documents,
            notification_hub,
            user_handler,
            profile_handler,
            document_handler,
            download_handler,
            chat_handler,
            events_handler,
        }
    }

    pub fn ready_watcher(&self) -> DocumentReadyWatcher {
        let notifier: Arc<dyn Notifier> = self.notification_hub.clone();
        DocumentReadyWatcher::new(
            self.document_repository.clone(),
            notifier,
            Duration::from_secs(self.config.notifications.poll_interval_secs.max(1)),
        )
    }
}
