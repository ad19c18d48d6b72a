/// Dashboard configuration
use crate::error::{DashboardError, Result};
use deck_api_client::{auth::DEFAULT_SCOPES, ApiConfig, Session, DEFAULT_BASE_URL};
use deck_playback::PlayerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default config file, read from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "deck.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeckConfig {
    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default = "default_app")]
    pub app: AppSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    /// Application client id issued by the developer dashboard
    #[serde(default)]
    pub client_id: String,

    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,

    #[serde(default = "default_scopes")]
    pub scopes: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppSettings {
    /// Where the front end is served; logout returns here
    #[serde(default = "default_app_url")]
    pub url: String,

    #[serde(default = "default_progress_interval_ms")]
    pub progress_interval_ms: u64,

    /// Directory holding the persisted state file
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl DeckConfig {
    /// Load configuration from `path` (or `deck.toml` if present) and environment
    ///
    /// Environment variables use the `DECK_` prefix and a double underscore
    /// between section and key, e.g. `DECK_AUTH__CLIENT_ID`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("DECK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| DashboardError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| DashboardError::Config(e.to_string()))
    }

    /// Parse configuration from TOML text, without environment overrides
    pub fn from_toml_str(text: &str) -> Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(text, config::FileFormat::Toml))
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| DashboardError::Config(e.to_string()))
    }

    /// Validate configuration
    ///
    /// Only login needs a client id, so it is checked by
    /// [`require_client_id`](Self::require_client_id) instead.
    pub fn validate(&self) -> Result<()> {
        if self.app.progress_interval_ms == 0 {
            return Err(DashboardError::Config(
                "app.progress_interval_ms must be greater than zero".to_string(),
            ));
        }

        for (name, value) in [
            ("api.base_url", &self.api.base_url),
            ("auth.redirect_uri", &self.auth.redirect_uri),
        ] {
            if !value.starts_with("http://") && !value.starts_with("https://") {
                return Err(DashboardError::Config(format!(
                    "{name} must be an http(s) URL, got {value:?}"
                )));
            }
        }

        if self.auth.scopes.trim().is_empty() {
            return Err(DashboardError::Config("auth.scopes is empty".to_string()));
        }

        Ok(())
    }

    /// The client id, or an error explaining how to set it
    pub fn require_client_id(&self) -> Result<&str> {
        if self.auth.client_id.trim().is_empty() {
            return Err(DashboardError::Config(
                "client id is required (set DECK_AUTH__CLIENT_ID)".to_string(),
            ));
        }
        Ok(self.auth.client_id.trim())
    }

    /// File backing the key-value store
    pub fn state_file(&self) -> PathBuf {
        self.app.data_dir.join("state.json")
    }

    pub fn player_config(&self) -> PlayerConfig {
        PlayerConfig {
            progress_interval: Duration::from_millis(self.app.progress_interval_ms),
            ..PlayerConfig::default()
        }
    }

    pub fn api_config(&self, session: &Session) -> ApiConfig {
        ApiConfig::for_session(self.api.base_url.clone(), session)
    }
}

// Default values
fn default_auth() -> AuthSettings {
    AuthSettings {
        client_id: String::new(),
        redirect_uri: default_redirect_uri(),
        scopes: default_scopes(),
    }
}

fn default_redirect_uri() -> String {
    "http://localhost:3000/login/login.html".to_string()
}

fn default_scopes() -> String {
    DEFAULT_SCOPES.to_string()
}

fn default_api() -> ApiSettings {
    ApiSettings {
        base_url: default_base_url(),
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_app() -> AppSettings {
    AppSettings {
        url: default_app_url(),
        progress_interval_ms: default_progress_interval_ms(),
        data_dir: default_data_dir(),
    }
}

fn default_app_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_progress_interval_ms() -> u64 {
    100
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            auth: default_auth(),
            api: default_api(),
            app: default_app(),
        }
    }
}
