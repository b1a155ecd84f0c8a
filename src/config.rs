//! Application settings loaded from the environment

use std::env;
use std::path::Path;

use tracing::warn;

/// Origins always permitted so a local Vite dev server can reach the API
pub const LOCAL_DEV_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://127.0.0.1:5173"];

/// Immutable application configuration
///
/// Built once at startup and shared as `Arc<Settings>`. Every field has a
/// default, so loading never fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub app_name: String,
    pub app_version: String,
    pub debug: bool,

    /// Server-side Gemini API key
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    /// Base URL of an external LLM service, if any
    pub llm_api_base_url: Option<String>,
    pub gemini_default_model: String,
    /// Which provider backs the client ("simulated" or "gemini")
    pub llm_provider: String,

    /// Comma-separated list of allowed CORS origins
    pub allowed_origins: Option<String>,
    pub cors_allow_all: bool,

    pub default_max_tokens: u32,
    pub max_allowed_tokens: u32,
    pub min_allowed_tokens: u32,

    pub host: String,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "LLM API".to_string(),
            app_version: "1.0.0".to_string(),
            debug: true,
            gemini_api_key: None,
            openai_api_key: None,
            llm_api_base_url: None,
            gemini_default_model: "models/gemini-2.5-flash".to_string(),
            llm_provider: "simulated".to_string(),
            allowed_origins: None,
            cors_allow_all: false,
            default_max_tokens: 1024,
            max_allowed_tokens: 100_000,
            min_allowed_tokens: 1,
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl Settings {
    /// Load settings from the process environment
    ///
    /// Call [`load_dotenv`] first if `.env` should be honoured.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup
    ///
    /// Tests pass a map-backed closure here instead of mutating env vars.
    /// Keys the lookup knows about but `Settings` doesn't are never asked for.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            app_name: get("APP_NAME").unwrap_or(defaults.app_name),
            app_version: get("APP_VERSION").unwrap_or(defaults.app_version),
            debug: parse_or("DEBUG", get("DEBUG"), parse_bool, defaults.debug),
            gemini_api_key: get("GEMINI_API_KEY"),
            openai_api_key: get("OPENAI_API_KEY"),
            llm_api_base_url: get("LLM_API_BASE_URL"),
            gemini_default_model: get("GEMINI_DEFAULT_MODEL")
                .unwrap_or(defaults.gemini_default_model),
            llm_provider: get("LLM_PROVIDER")
                .map(|p| p.trim().to_ascii_lowercase())
                .unwrap_or(defaults.llm_provider),
            allowed_origins: get("ALLOWED_ORIGINS"),
            cors_allow_all: parse_or(
                "CORS_ALLOW_ALL",
                get("CORS_ALLOW_ALL"),
                parse_bool,
                defaults.cors_allow_all,
            ),
            default_max_tokens: parse_or(
                "DEFAULT_MAX_TOKENS",
                get("DEFAULT_MAX_TOKENS"),
                |v| v.trim().parse().ok(),
                defaults.default_max_tokens,
            ),
            max_allowed_tokens: parse_or(
                "MAX_ALLOWED_TOKENS",
                get("MAX_ALLOWED_TOKENS"),
                |v| v.trim().parse().ok(),
                defaults.max_allowed_tokens,
            ),
            min_allowed_tokens: parse_or(
                "MIN_ALLOWED_TOKENS",
                get("MIN_ALLOWED_TOKENS"),
                |v| v.trim().parse().ok(),
                defaults.min_allowed_tokens,
            ),
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", get("PORT"), |v| v.trim().parse().ok(), defaults.port),
        }
    }

    /// Allowed CORS origins
    ///
    /// - `cors_allow_all` wins and yields `["*"]`
    /// - otherwise the configured list (trimmed, empties dropped) followed by
    ///   the local dev origins, deduplicated in first-seen order
    /// - with nothing configured, just the local dev origins
    pub fn cors_origins(&self) -> Vec<String> {
        if self.cors_allow_all {
            return vec!["*".to_string()];
        }

        let configured = self
            .allowed_origins
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let mut merged: Vec<String> = Vec::new();
        for origin in configured.into_iter().chain(LOCAL_DEV_ORIGINS) {
            if !merged.iter().any(|o| o == origin) {
                merged.push(origin.to_string());
            }
        }
        merged
    }

    /// Resolve the token budget for a request
    ///
    /// Missing values take `default_max_tokens`; the result is clamped into
    /// `[min_allowed_tokens, max_allowed_tokens]` and never exceeds the max.
    pub fn clamp_max_tokens(&self, requested: Option<u32>) -> u32 {
        let wanted = requested.unwrap_or(self.default_max_tokens);
        wanted
            .max(self.min_allowed_tokens)
            .min(self.max_allowed_tokens)
    }

    /// Log filter directive implied by the debug flag
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }

    /// `host:port` string the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Load a `.env` file into the process environment
///
/// `None` searches the working directory and its parents. A missing file is
/// fine; unreadable or malformed files are reported. Variables already set
/// in the environment are never overridden.
pub fn load_dotenv(path: Option<&Path>) -> Result<(), dotenvy::Error> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };
    match loaded {
        Err(e) if e.not_found() => Ok(()),
        other => other,
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Some(true),
        "false" | "0" | "no" | "off" | "f" | "n" => Some(false),
        _ => None,
    }
}

fn parse_or<T, P>(key: &str, raw: Option<String>, parse: P, default: T) -> T
where
    P: Fn(&str) -> Option<T>,
{
    match raw {
        None => default,
        Some(value) => parse(&value).unwrap_or_else(|| {
            warn!(key, value = %value, "ignoring unparseable setting, using default");
            default
        }),
    }
}
