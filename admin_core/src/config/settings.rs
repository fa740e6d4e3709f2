use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Upload directory of the original pet backend host. Image paths stored
/// before the backend served relative names still carry it.
pub const LEGACY_UPLOAD_PREFIX: &str = r"E:\project\pet-platform\pet\backend\pet-platform\pet\public\uploads\";

/// Comma-separated list that replaces `cors.allowed_origins`.
const CORS_ORIGINS_ENV: &str = "APP_CORS__ALLOWED_ORIGINS";

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub admin: AdminConfig,
    pub navigation: NavigationConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_seconds: u64,
    pub shutdown_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub request_timeout_seconds: u64,
    pub legacy_upload_prefix: String,
    pub uploads_path: String,
}

/// Credentials checked by the admin gate. The password has no default and
/// must come from `config.toml` or `APP_ADMIN__PASSWORD`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    pub pet_form_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub log_requests: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            backend: BackendConfig::default(),
            admin: AdminConfig::default(),
            navigation: NavigationConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            request_timeout_seconds: 30,
            shutdown_timeout_seconds: 10,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "https://full-stack-pet-backend.onrender.com".to_string(),
            request_timeout_seconds: 15,
            legacy_upload_prefix: LEGACY_UPLOAD_PREFIX.to_string(),
            uploads_path: "/uploads".to_string(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: String::new(),
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            pet_form_url: "/petform".to_string(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { log_requests: true }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if std::path::Path::new("config.toml").exists() {
            builder = builder.add_source(File::with_name("config"));
        }

        // No type sniffing: typed fields convert during deserialization and
        // string fields keep the raw value.
        builder = builder.add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        );

        if let Ok(origins) = std::env::var(CORS_ORIGINS_ENV) {
            builder = builder.set_override("cors.allowed_origins", split_origins(&origins))?;
        }

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.backend.base_url.is_empty() {
            return Err(ConfigError::Message(
                "Backend base URL cannot be empty".to_string(),
            ));
        }

        if !self.backend.base_url.starts_with("http://")
            && !self.backend.base_url.starts_with("https://")
        {
            return Err(ConfigError::Message(format!(
                "Backend base URL must be http(s), got '{}'",
                self.backend.base_url
            )));
        }

        if self.backend.request_timeout_seconds == 0 {
            return Err(ConfigError::Message(
                "Backend request timeout must be greater than 0".to_string(),
            ));
        }

        if self.admin.username.is_empty() {
            return Err(ConfigError::Message(
                "Admin username cannot be empty".to_string(),
            ));
        }

        if self.admin.password.is_empty() {
            return Err(ConfigError::Message(
                "Admin password must be configured (APP_ADMIN__PASSWORD)".to_string(),
            ));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
