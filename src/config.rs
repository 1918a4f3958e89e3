use serde::{Deserialize, Serialize};

use crate::category::DEFAULT_FUN_FACT_THEME;
use crate::error::{Result, SnippetError};

pub const DEFAULT_MOTIVATION_URL: &str = "https://62859b3f-a13c-4f4f-bb69-66ab5bf6ee06-00-28rysu4yb3bg.spock.replit.dev:3000/api/motivation";
pub const DEFAULT_DAD_JOKE_URL: &str =
    "https://913387d7-0eb3-4599-96f0-772a3e360312-00-3vtig4shz731w.riker.replit.dev/api/dadjokes";
pub const DEFAULT_FUN_FACT_URL: &str = "https://fun-fact-generator-backend-new.onrender.com/funfact";
pub const DEFAULT_PROXY_BASE: &str = "https://api.allorigins.win/raw";
pub const DEFAULT_PROXY_PARAM: &str = "url";

/// Main configuration structure loaded from snippet_board.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub endpoints: EndpointsConfig,
    pub http: HttpConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// Remote endpoints, one per section, plus the pass-through proxy
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub motivation: String,
    pub dad_jokes: String,
    pub fun_facts: String,
    pub proxy_base: String,
    pub proxy_param: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            motivation: DEFAULT_MOTIVATION_URL.to_string(),
            dad_jokes: DEFAULT_DAD_JOKE_URL.to_string(),
            fun_facts: DEFAULT_FUN_FACT_URL.to_string(),
            proxy_base: DEFAULT_PROXY_BASE.to_string(),
            proxy_param: DEFAULT_PROXY_PARAM.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// None (or 0) leaves timeouts to the HTTP client
    pub timeout_ms: Option<u64>,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: None,
            user_agent: concat!("snippet-board/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub log_level: String,
    /// Command line that receives copied text on stdin, e.g. `wl-copy`
    pub clipboard_command: Option<String>,
    pub clipboard_timeout_ms: u64,
    pub default_theme: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: "snippet_board=info".to_string(),
            clipboard_command: None,
            clipboard_timeout_ms: 5_000,
            default_theme: DEFAULT_FUN_FACT_THEME.to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Load runtime configuration from environment variables
    pub fn load_from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            clipboard_command: std::env::var("SNIPPET_CLIPBOARD_CMD")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            clipboard_timeout_ms: std::env::var("SNIPPET_CLIPBOARD_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.clipboard_timeout_ms),
            default_theme: std::env::var("SNIPPET_DEFAULT_THEME")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.default_theme),
        }
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables
    /// Uses SNIPPET_BOARD_CONFIG environment variable or defaults to "snippet_board.toml"
    pub fn load() -> Result<Self> {
        if let Ok(env_path) = std::env::var("SNIPPET_ENV_FILE") {
            let _ = dotenvy::from_path(env_path);
        } else {
            let _ = dotenvy::from_path(".env");
        }

        let config_path = std::env::var("SNIPPET_BOARD_CONFIG")
            .unwrap_or_else(|_| "snippet_board.toml".to_string());

        let mut config = match std::fs::read_to_string(&config_path) {
            Ok(content) => Self::from_toml(&content)?,
            Err(_) => {
                tracing::warn!("Config file {} not found, using defaults", config_path);
                Self::default()
            }
        };

        config.apply_env_overrides();
        config.runtime = RuntimeConfig::load_from_env();
        config.validate();

        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Env-first overrides for endpoints and HTTP settings
    pub fn apply_env_overrides(&mut self) {
        let overrides: [(&str, &mut String); 5] = [
            ("SNIPPET_MOTIVATION_URL", &mut self.endpoints.motivation),
            ("SNIPPET_DADJOKE_URL", &mut self.endpoints.dad_jokes),
            ("SNIPPET_FUNFACT_URL", &mut self.endpoints.fun_facts),
            ("SNIPPET_PROXY_BASE", &mut self.endpoints.proxy_base),
            ("SNIPPET_PROXY_PARAM", &mut self.endpoints.proxy_param),
        ];
        for (var, field) in overrides {
            if let Ok(value) = std::env::var(var) {
                tracing::debug!("{} env override applied", var);
                *field = value;
            }
        }

        if let Some(ms) = std::env::var("SNIPPET_HTTP_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            tracing::debug!("SNIPPET_HTTP_TIMEOUT_MS env override applied");
            self.http.timeout_ms = Some(ms);
        }
    }

    /// Warn about values that will not work; nothing here is fatal.
    pub fn validate(&mut self) {
        let endpoints = [
            ("motivation", &self.endpoints.motivation),
            ("dad_jokes", &self.endpoints.dad_jokes),
            ("fun_facts", &self.endpoints.fun_facts),
            ("proxy_base", &self.endpoints.proxy_base),
        ];
        for (name, url) in endpoints {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                tracing::warn!(
                    "Endpoint {} '{}' doesn't start with http:// or https://",
                    name,
                    url
                );
            }
        }

        if self.endpoints.proxy_param.is_empty() {
            tracing::warn!("proxy_param is empty, using '{}'", DEFAULT_PROXY_PARAM);
            self.endpoints.proxy_param = DEFAULT_PROXY_PARAM.to_string();
        }

        if self.http.timeout_ms == Some(0) {
            self.http.timeout_ms = None;
        }
    }

    pub fn require_clipboard_command(&self) -> Result<&str> {
        self.runtime
            .clipboard_command
            .as_deref()
            .ok_or_else(|| SnippetError::Config {
                message: "SNIPPET_CLIPBOARD_CMD is not set".to_string(),
            })
    }
}
