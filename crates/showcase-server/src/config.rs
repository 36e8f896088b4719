use serde::{Deserialize, Serialize};
use showcase_auth::AuthConfig;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be > 0".into());
        }
        if self.cache.ttl_secs == 0 {
            return Err("cache.ttl_secs must be > 0".into());
        }
        if self.cache.capacity == 0 {
            return Err("cache.capacity must be > 0".into());
        }
        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(format!("logging.level must be one of {valid_levels:?}"));
        }
        self.auth
            .validate()
            .map_err(|e| format!("auth config error: {e}"))?;
        if self.bootstrap.enabled && self.bootstrap.admin_password.len() < 6 {
            return Err("bootstrap.admin_password must be at least 6 characters".into());
        }
        Ok(())
    }

    pub fn addr(&self) -> SocketAddr {
        use std::net::{IpAddr, Ipv4Addr};
        let host: IpAddr = self
            .server
            .host
            .parse()
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));
        SocketAddr::from((host, self.server.port))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entry time-to-live in seconds. Short by design.
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
    /// Soft capacity before stale sweeps kick in.
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

fn default_cache_ttl_secs() -> u64 {
    30
}

fn default_cache_capacity() -> usize {
    1024
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl_secs(),
            capacity: default_cache_capacity(),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Startup seeding (roles plus an initial admin when the store is empty).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
    #[serde(default = "default_admin_display_name")]
    pub admin_display_name: String,
}

fn default_true() -> bool {
    true
}

fn default_admin_email() -> String {
    "admin@example.com".to_string()
}

fn default_admin_password() -> String {
    "Admin!23".to_string()
}

fn default_admin_display_name() -> String {
    "Admin".to_string()
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            admin_email: default_admin_email(),
            admin_password: default_admin_password(),
            admin_display_name: default_admin_display_name(),
        }
    }
}

/// Loads configuration from an optional TOML file plus
/// `SHOWCASE__`-prefixed environment variables (e.g.
/// `SHOWCASE__SERVER__PORT=9090`).
pub fn load_config(path: Option<&str>) -> Result<AppConfig, config::ConfigError> {
    let path = path.unwrap_or("showcase.toml");

    let raw = config::Config::builder()
        .add_source(config::File::from(std::path::Path::new(path)).required(false))
        .add_source(
            config::Environment::with_prefix("SHOWCASE")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let cfg: AppConfig = raw.try_deserialize()?;
    cfg.validate().map_err(config::ConfigError::Message)?;
    Ok(cfg)
}
