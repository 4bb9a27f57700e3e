//! Application configuration
//!
//! Resolution order, lowest to highest precedence:
//! 1. Embedded defaults (`config/default.toml`)
//! 2. Override file: an explicit path, else `~/.local/share/smart-budget/config.toml`
//! 3. Environment variables (`SMART_BUDGET_DB`, `AI_BACKEND`, `GEMINI_*`, `OLLAMA_*`)
//!
//! Only keys present in the override file replace defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::format::DEFAULT_CURRENCY;

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Directory name under the platform data dir
const APP_DIR: &str = "smart-budget";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub display: DisplayConfig,
    pub ai: AiConfig,
    pub server: ServerSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StorageConfig {
    /// Database file; `None` means the platform default
    pub db_path: Option<PathBuf>,
}

impl StorageConfig {
    /// Configured path, else `~/.local/share/smart-budget/budget.db`, else `./budget.db`
    pub fn resolved_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .or_else(|| app_data_dir().map(|d| d.join("budget.db")))
            .unwrap_or_else(|| PathBuf::from("budget.db"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayConfig {
    /// Label appended to amounts
    pub currency: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AiConfig {
    /// gemini, ollama, mock, or none
    pub backend: String,
    pub model: Option<String>,
    pub host: Option<String>,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            backend: "gemini".to_string(),
            model: None,
            host: None,
            api_key: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Cross-origin callers allowed by CORS; empty means same-origin only
    pub allowed_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            allowed_origins: vec![],
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        parse_config(DEFAULT_CONFIG).unwrap_or_else(|_| Self::builtin())
    }
}

impl AppConfig {
    fn builtin() -> Self {
        Self {
            storage: StorageConfig::default(),
            display: DisplayConfig::default(),
            ai: AiConfig::default(),
            server: ServerSettings::default(),
        }
    }

    /// Load defaults, the override file, and environment overrides
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let path = match override_path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };

        if let Some(path) = path {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read {}: {}", path.display(), e))
            })?;
            config.apply_toml(&content)?;
            tracing::debug!(path = %path.display(), "Loaded config override");
        }

        config.apply_env();
        Ok(config)
    }

    /// Apply overrides from process environment variables
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Apply environment-style overrides from any lookup
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("SMART_BUDGET_DB") {
            self.storage.db_path = Some(PathBuf::from(path));
        }
        if let Some(backend) = lookup("AI_BACKEND") {
            let backend = backend.to_lowercase();
            if backend != self.ai.backend {
                self.ai.host = None;
                self.ai.model = None;
            }
            self.ai.backend = backend;
        }

        match self.ai.backend.as_str() {
            "gemini" => {
                if let Some(key) = lookup("GEMINI_API_KEY") {
                    self.ai.api_key = Some(key);
                }
                if let Some(model) = lookup("GEMINI_MODEL") {
                    self.ai.model = Some(model);
                }
                if let Some(host) = lookup("GEMINI_HOST") {
                    self.ai.host = Some(host);
                }
            }
            "ollama" => {
                if let Some(host) = lookup("OLLAMA_HOST") {
                    self.ai.host = Some(host);
                }
                if let Some(model) = lookup("OLLAMA_MODEL") {
                    self.ai.model = Some(model);
                }
            }
            _ => {}
        }
    }

    /// Layer a TOML document over the current values
    pub fn apply_toml(&mut self, content: &str) -> Result<()> {
        let raw: RawConfig = toml::from_str(content)?;

        if let Some(storage) = raw.storage {
            if let Some(path) = storage.db_path {
                self.storage.db_path = Some(path);
            }
        }

        if let Some(display) = raw.display {
            if let Some(currency) = display.currency {
                self.display.currency = currency;
            }
        }

        if let Some(ai) = raw.ai {
            if let Some(backend) = ai.backend {
                let backend = backend.to_lowercase();
                // Host and model defaults belong to the previous backend
                if backend != self.ai.backend {
                    self.ai.host = None;
                    self.ai.model = None;
                }
                self.ai.backend = backend;
            }
            if ai.model.is_some() {
                self.ai.model = ai.model;
            }
            if ai.host.is_some() {
                self.ai.host = ai.host;
            }
            if ai.api_key.is_some() {
                self.ai.api_key = ai.api_key;
            }
            if let Some(timeout) = ai.timeout_secs {
                self.ai.timeout_secs = timeout;
            }
        }

        if let Some(server) = raw.server {
            if let Some(host) = server.host {
                self.server.host = host;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
            if let Some(origins) = server.allowed_origins {
                self.server.allowed_origins = origins;
            }
        }

        Ok(())
    }
}

/// `~/.local/share/smart-budget` (platform equivalent elsewhere)
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join(APP_DIR))
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    app_data_dir().map(|d| d.join("config.toml"))
}

fn parse_config(content: &str) -> Result<AppConfig> {
    let mut config = AppConfig::builtin();
    config.apply_toml(content)?;
    Ok(config)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    storage: Option<RawStorage>,
    display: Option<RawDisplay>,
    ai: Option<RawAi>,
    server: Option<RawServer>,
}

#[derive(Debug, Deserialize)]
struct RawStorage {
    db_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAi {
    backend: Option<String>,
    model: Option<String>,
    host: Option<String>,
    api_key: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawServer {
    host: Option<String>,
    port: Option<u16>,
    allowed_origins: Option<Vec<String>>,
}
