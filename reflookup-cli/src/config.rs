//! Lookup configuration with builder pattern
//!
//! Defaults first, then `<config_dir>/reflookup/config.toml` when present, then
//! `REFLOOKUP_*` environment overrides (a `.env` file is honoured via dotenvy).

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use serde::Deserialize;

use crate::error::LookupError;

/// Default quiet period between the last keystroke and the direct query
pub const DEFAULT_DEBOUNCE_MS: u64 = 180;

/// Runtime configuration for the lookup widget and its HTTP client
#[derive(Debug, Clone, PartialEq)]
pub struct LookupConfig {
    /// Quiet period before a direct-strategy query fires
    pub debounce: Duration,
    /// Query parameter carrying the typed code
    pub code_param: String,
    /// Query parameter carrying the session's reference key
    pub reference_param: String,
    /// Also send the reference key on direct-strategy queries. Off by default:
    /// direct queries are exactly `<endpoint>?code=<query>`.
    pub direct_reference: bool,
    /// Per-request timeout for the HTTP search client
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            code_param: "code".to_string(),
            reference_param: "ref".to_string(),
            direct_reference: false,
            request_timeout: Duration::from_secs(10),
            user_agent: concat!("reflookup/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// On-disk shape of the config file; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    debounce_ms: Option<u64>,
    code_param: Option<String>,
    reference_param: Option<String>,
    direct_reference: Option<bool>,
    request_timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

impl LookupConfig {
    /// Create a new builder for LookupConfig
    pub fn builder() -> LookupConfigBuilder {
        LookupConfigBuilder::new()
    }

    /// Default config file location (`<config_dir>/reflookup/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("reflookup").join("config.toml"))
    }

    /// Load from the default location. A missing file is not an error.
    pub fn load() -> Result<Self, LookupError> {
        let _ = dotenvy::dotenv();
        let mut config = Self::default();
        if let Some(path) = Self::default_path() {
            if path.exists() {
                config.apply_file(&path)?;
            }
        }
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from an explicit file, which must exist
    pub fn load_from(path: &Path) -> Result<Self, LookupError> {
        let _ = dotenvy::dotenv();
        let mut config = Self::default();
        config.apply_file(path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse TOML config text on top of the current values
    pub fn merge_toml(&mut self, path: &Path, text: &str) -> Result<(), LookupError> {
        let file: ConfigFile = toml::from_str(text).map_err(|source| LookupError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(ms) = file.debounce_ms {
            self.debounce = Duration::from_millis(ms);
        }
        if let Some(param) = file.code_param {
            self.code_param = param;
        }
        if let Some(param) = file.reference_param {
            self.reference_param = param;
        }
        if let Some(enabled) = file.direct_reference {
            self.direct_reference = enabled;
        }
        if let Some(secs) = file.request_timeout_secs {
            self.request_timeout = Duration::from_secs(secs);
        }
        if let Some(agent) = file.user_agent {
            self.user_agent = agent;
        }
        Ok(())
    }

    fn apply_file(&mut self, path: &Path) -> Result<(), LookupError> {
        debug!("Loading lookup config from {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|source| LookupError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.merge_toml(path, &text)
    }

    /// Apply `REFLOOKUP_*` overrides. Unparseable numbers are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ms) = lookup("REFLOOKUP_DEBOUNCE_MS").and_then(|v| v.trim().parse().ok()) {
            self.debounce = Duration::from_millis(ms);
        }
        if let Some(secs) = lookup("REFLOOKUP_TIMEOUT_SECS").and_then(|v| v.trim().parse().ok()) {
            self.request_timeout = Duration::from_secs(secs);
        }
        if let Some(param) = lookup("REFLOOKUP_CODE_PARAM").filter(|v| !v.trim().is_empty()) {
            self.code_param = param.trim().to_string();
        }
        if let Some(param) = lookup("REFLOOKUP_REFERENCE_PARAM").filter(|v| !v.trim().is_empty()) {
            self.reference_param = param.trim().to_string();
        }
    }
}

/// Builder for LookupConfig
#[derive(Debug, Clone)]
pub struct LookupConfigBuilder {
    config: LookupConfig,
}

impl LookupConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: LookupConfig::default(),
        }
    }

    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.config.debounce = debounce;
        self
    }

    pub fn code_param(mut self, param: impl Into<String>) -> Self {
        self.config.code_param = param.into();
        self
    }

    pub fn reference_param(mut self, param: impl Into<String>) -> Self {
        self.config.reference_param = param.into();
        self
    }

    pub fn direct_reference(mut self, enabled: bool) -> Self {
        self.config.direct_reference = enabled;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    pub fn build(self) -> LookupConfig {
        self.config
    }
}

impl Default for LookupConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
