use serde::Deserialize;
use std::net::{AddrParseError, IpAddr, SocketAddr};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub session: SessionConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

impl From<&DatabaseConfig> for persistence::db::DatabaseConfig {
    fn from(c: &DatabaseConfig) -> Self {
        Self {
            url: c.url.clone(),
            max_connections: c.max_connections,
            min_connections: c.min_connections,
            connect_timeout_secs: c.connect_timeout_secs,
            idle_timeout_secs: c.idle_timeout_secs,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// Allowed CORS origins; empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Per-IP limit for login and counter endpoints; 0 disables limiting.
    #[serde(default = "default_rate_limit")]
    pub rate_limit_per_minute: u32,

    /// Reverse proxies whose `X-Forwarded-For` / `X-Real-IP` headers are
    /// honored when keying the rate limiter. Empty trusts no one.
    #[serde(default)]
    pub trusted_proxies: Vec<String>,

    #[serde(default)]
    pub hsts_enabled: bool,
}

impl SecurityConfig {
    /// Parsed trusted proxy addresses; unparsable entries are skipped
    /// (`Config::validate` rejects them at startup).
    pub fn trusted_proxy_ips(&self) -> Vec<IpAddr> {
        self.trusted_proxies
            .iter()
            .filter_map(|p| p.trim().parse().ok())
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Session lifetime in seconds (default: 7 days)
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: i64,

    /// Mark the session cookie `Secure` (requires HTTPS).
    #[serde(default = "default_true")]
    pub secure: bool,

    /// SameSite attribute: strict, lax or none.
    #[serde(default = "default_same_site")]
    pub same_site: String,

    /// Optional cookie domain for sharing across subdomains.
    #[serde(default)]
    pub domain: String,
}

/// Initial admin account created on startup when both fields are set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub bootstrap_email: String,

    #[serde(default)]
    pub bootstrap_password: String,

    #[serde(default = "default_admin_name")]
    pub bootstrap_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_claps")]
    pub max_claps_per_request: i64,

    /// Maximum blog content size in bytes.
    #[serde(default = "default_max_content_length")]
    pub max_content_length: usize,

    #[serde(default = "default_session_cleanup_interval")]
    pub session_cleanup_interval_minutes: u64,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_max_body_size() -> usize {
    2_097_152
}
fn default_max_connections() -> u32 {
    10
}
fn default_min_connections() -> u32 {
    2
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_idle_timeout() -> u64 {
    600
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_rate_limit() -> u32 {
    60
}
fn default_cookie_name() -> String {
    "pf_session".to_string()
}
fn default_session_ttl() -> i64 {
    604_800 // 7 days
}
fn default_true() -> bool {
    true
}
fn default_same_site() -> String {
    "lax".to_string()
}
fn default_admin_name() -> String {
    "Administrator".to_string()
}
fn default_max_claps() -> i64 {
    50
}
fn default_max_content_length() -> usize {
    1_000_000
}
fn default_session_cleanup_interval() -> u64 {
    60
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with PF__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("PF").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration from embedded defaults plus overrides, without
    /// touching config files. Validation is skipped to allow partial configs.
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            request_timeout_secs = 30
            max_body_size = 2097152

            [database]
            url = ""
            max_connections = 10
            min_connections = 2
            connect_timeout_secs = 10
            idle_timeout_secs = 600

            [logging]
            level = "info"
            format = "json"

            [security]
            cors_origins = []
            rate_limit_per_minute = 60
            trusted_proxies = []
            hsts_enabled = false

            [session]
            cookie_name = "pf_session"
            ttl_secs = 604800
            secure = false
            same_site = "lax"
            domain = ""

            [admin]
            bootstrap_email = ""
            bootstrap_password = ""
            bootstrap_name = "Administrator"

            [limits]
            max_claps_per_request = 50
            max_content_length = 1000000
            session_cleanup_interval_minutes = 60
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.database.url.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "PF__DATABASE__URL environment variable must be set".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Server port cannot be 0".to_string(),
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigValidationError::InvalidValue(
                "min_connections cannot exceed max_connections".to_string(),
            ));
        }

        if self.session.ttl_secs <= 0 {
            return Err(ConfigValidationError::InvalidValue(
                "session.ttl_secs must be positive".to_string(),
            ));
        }

        if !matches!(
            self.session.same_site.to_lowercase().as_str(),
            "strict" | "lax" | "none"
        ) {
            return Err(ConfigValidationError::InvalidValue(format!(
                "session.same_site must be strict, lax or none (got '{}')",
                self.session.same_site
            )));
        }

        if let Some(bad) = self
            .security
            .trusted_proxies
            .iter()
            .find(|p| p.trim().parse::<IpAddr>().is_err())
        {
            return Err(ConfigValidationError::InvalidValue(format!(
                "security.trusted_proxies entries must be IP addresses (got '{}')",
                bad
            )));
        }

        if self.limits.max_claps_per_request < 1 {
            return Err(ConfigValidationError::InvalidValue(
                "limits.max_claps_per_request must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }
}
