use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Browser origins allowed to send the auth cookie.
    pub cors_origins: Vec<String>,
    pub body_limit_mb: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_origins: vec!["http://localhost:5173".to_string()],
            body_limit_mb: 25,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/class_chat".to_string(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_days: i64,
    pub cookie_name: String,
    pub cookie_secure: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_days: 7,
            cookie_name: "authToken".to_string(),
            cookie_secure: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Local,
    S3,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible stores such as MinIO.
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub url_expiry_secs: u32,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            bucket: "class-chat".to_string(),
            region: "us-east-1".to_string(),
            endpoint: None,
            access_key: None,
            secret_key: None,
            url_expiry_secs: 3600,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub local_dir: String,
    pub s3: S3Config,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Local,
            local_dir: "./uploads".to_string(),
            s3: S3Config::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RagConfig {
    pub python_path: String,
    pub script_path: String,
    pub timeout_secs: u64,
    pub history_limit: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            python_path: "python3".to_string(),
            script_path: "rag/query.py".to_string(),
            timeout_secs: 120,
            history_limit: 10,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct IngestionConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_factor: f64,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
            max_retries: 2,
            backoff_factor: 1.5,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PlansConfig {
    pub free_document_limit: usize,
}

impl Default for PlansConfig {
    fn default() -> Self {
        Self {
            free_document_limit: 3,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NotificationsConfig {
    pub poll_interval_secs: u64,
    /// Per-user broadcast buffer; subscribers further behind skip events.
    pub channel_capacity: usize,
    pub keep_alive_secs: u64,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 2,
            channel_capacity: 64,
            keep_alive_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub rag: RagConfig,
    pub ingestion: IngestionConfig,
    pub plans: PlansConfig,
    pub notifications: NotificationsConfig,
    pub log: LogConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., CLASSCHAT__AUTH__JWT_SECRET)
            .add_source(
                Environment::with_prefix("CLASSCHAT")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins"),
            )
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .build()?;

        let config: AppConfig = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_secret.len() < 16 {
            return Err(ConfigError::Message(
                "auth.jwt_secret must be set and at least 16 bytes long".into(),
            ));
        }
        if self.auth.token_ttl_days <= 0 {
            return Err(ConfigError::Message(
                "auth.token_ttl_days must be positive".into(),
            ));
        }
        if self.notifications.channel_capacity == 0 {
            return Err(ConfigError::Message(
                "notifications.channel_capacity must be positive".into(),
            ));
        }
        if self.storage.backend == StorageBackend::S3 && self.storage.s3.bucket.trim().is_empty() {
            return Err(ConfigError::Message(
                "storage.s3.bucket is required for the s3 backend".into(),
            ));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn body_limit_bytes(&self) -> usize {
        self.server.body_limit_mb * 1024 * 1024
    }
}
