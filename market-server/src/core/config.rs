//! Server configuration
//!
//! All settings load from environment variables with defaults suitable for
//! development.
//!
//! | Env var | Default | Description |
//! |---------|---------|-------------|
//! | HTTP_PORT | 8080 | HTTP API port |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | REQUEST_TIMEOUT_MS | 30000 | Per-request timeout |
//! | AI_BASE_URL | http://localhost:8090 | Generative endpoint base URL |
//! | AI_API_KEY | (unset) | Bearer token for the generative endpoint |
//! | AI_TIMEOUT_MS | 8000 | Deliberate timeout for AI calls |
//! | SEED_DEMO_DATA | true | Seed the demo produce catalog on startup |
//! | LOG_DIR | (unset) | Enable rolling file logs in this directory |

#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Running environment: development | staging | production
    pub environment: String,
    /// Per-request timeout (milliseconds)
    pub request_timeout_ms: u64,
    /// Base URL of the generative AI endpoint
    pub ai_base_url: String,
    /// Bearer token for the generative AI endpoint
    pub ai_api_key: Option<String>,
    /// Timeout applied to every AI call (milliseconds)
    pub ai_timeout_ms: u64,
    /// Seed the demo produce catalog on startup
    pub seed_demo_data: bool,
    /// Directory for rolling file logs
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            ai_base_url: std::env::var("AI_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8090".into()),
            ai_api_key: std::env::var("AI_API_KEY").ok().filter(|k| !k.is_empty()),
            ai_timeout_ms: std::env::var("AI_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            seed_demo_data: std::env::var("SEED_DEMO_DATA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
        }
    }

    /// Override port and environment, for tests
    pub fn with_overrides(http_port: u16, environment: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.http_port = http_port;
        config.environment = environment.into();
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
