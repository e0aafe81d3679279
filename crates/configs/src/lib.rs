use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

/// Used when neither `database.url` nor `DATABASE_URL` is provided.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data.db?mode=rwc";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 5000, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self { Self::from_url("") }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to environment
    /// variables when the file does not exist, then normalize and validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = if std::path::Path::new(&config_path()).exists() {
            load_default()?
        } else {
            Self::from_env()
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// `SERVER_HOST`, `SERVER_PORT`, `TOKIO_WORKER_THREADS`, `DATABASE_URL`.
    pub fn from_env() -> Self {
        let defaults = ServerConfig::default();
        let host = std::env::var("SERVER_HOST").unwrap_or(defaults.host);
        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(defaults.port);
        let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .or(defaults.worker_threads);
        Self {
            server: ServerConfig { host, port, worker_threads },
            database: DatabaseConfig::default(),
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }

    /// Single-connection in-memory SQLite; the pool must never open a second
    /// connection or it would see a different database.
    pub fn in_memory() -> Self {
        Self { max_connections: 1, min_connections: 1, ..Self::from_url("sqlite::memory:") }
    }

    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            self.url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        }
    }

    pub fn is_sqlite(&self) -> bool {
        self.url.to_lowercase().starts_with("sqlite:")
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || self.is_sqlite()) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}
