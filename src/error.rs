//! Domain-specific error types for snippet-board

use thiserror::Error;

/// Why a fetch produced no payload.
///
/// `Display` is the user-facing reason string, so `err.to_string()` is what
/// ends up behind `Error: ` in a section's status line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("empty url")]
    EmptyUrl,

    #[error("network {status}")]
    Network { status: u16 },

    #[error("{message}")]
    Transport { message: String },

    #[error("{message}")]
    ProxyFailure { message: String },

    #[error("invalid url {url}: {message}")]
    InvalidUrl { url: String, message: String },
}

impl FetchError {
    pub fn reason(&self) -> String {
        self.to_string()
    }

    pub(crate) fn transport(err: reqwest::Error) -> Self {
        FetchError::Transport {
            message: err.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("no clipboard command configured")]
    NotConfigured,

    #[error("failed to start clipboard command `{program}`: {message}")]
    Spawn { program: String, message: String },

    #[error("failed to write to clipboard command: {message}")]
    Write { message: String },

    #[error("clipboard command exited with status {code:?}")]
    Exit { code: Option<i32> },

    #[error("clipboard command timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

/// Main error type for snippet-board wiring and configuration
#[derive(Error, Debug)]
pub enum SnippetError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),
}

impl From<toml::de::Error> for SnippetError {
    fn from(err: toml::de::Error) -> Self {
        SnippetError::Config {
            message: format!("invalid config file: {}", err),
        }
    }
}

impl From<reqwest::Error> for SnippetError {
    fn from(err: reqwest::Error) -> Self {
        SnippetError::Config {
            message: format!("HTTP client setup failed: {}", err),
        }
    }
}

/// Result type alias for snippet-board operations
pub type Result<T> = std::result::Result<T, SnippetError>;
