//! Error types for the lookup library
//!
//! The widget itself never surfaces these: query failures are logged and
//! rendered as an empty result list. They exist for the CLI and for hosts
//! that call the client or config loader directly.

use std::path::PathBuf;

#[derive(Debug)]
pub enum LookupError {
    /// The HTTP request could not be sent or the body could not be read
    Transport(reqwest::Error),
    /// The endpoint answered with a non-2xx status
    Status(u16),
    /// The body was not a JSON array of result objects
    Decode(String),
    /// Config file exists but could not be read
    ConfigRead { path: PathBuf, source: std::io::Error },
    /// Config file is not valid TOML for `LookupConfig`
    ConfigParse { path: PathBuf, source: toml::de::Error },
    /// Form definition could not be read or parsed
    FormDefinition(String),
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupError::Transport(e) => write!(f, "Search request failed: {}", e),
            LookupError::Status(code) => write!(f, "Search endpoint returned HTTP {}", code),
            LookupError::Decode(msg) => write!(f, "Search response is not a result list: {}", msg),
            LookupError::ConfigRead { path, source } => {
                write!(f, "Failed to read config file '{}': {}", path.display(), source)
            }
            LookupError::ConfigParse { path, source } => {
                write!(f, "Invalid config file '{}': {}", path.display(), source)
            }
            LookupError::FormDefinition(msg) => write!(f, "Invalid form definition: {}", msg),
        }
    }
}

impl std::error::Error for LookupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LookupError::Transport(e) => Some(e),
            LookupError::ConfigRead { source, .. } => Some(source),
            LookupError::ConfigParse { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        LookupError::Transport(e)
    }
}
