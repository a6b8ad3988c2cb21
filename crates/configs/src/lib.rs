use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub jwt: JwtConfig,
    #[serde(default)]
    pub store: StoreKind,
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
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
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

/// Token signing settings shared by the auth service and the bearer middleware.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    #[serde(default)]
    pub key: String,
    #[serde(default = "default_issuer")]
    pub issuer: String,
    #[serde(default = "default_audience")]
    pub audience: String,
    #[serde(default = "default_expire_minutes")]
    pub expire_minutes: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            issuer: default_issuer(),
            audience: default_audience(),
            expire_minutes: default_expire_minutes(),
        }
    }
}

/// Backing store for the unit of work.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Postgres,
    Memory,
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_issuer() -> String { "news-management".into() }
fn default_audience() -> String { "news-management-clients".into() }
fn default_expire_minutes() -> i64 { 60 }

const MIN_JWT_KEY_LEN: usize = 16;

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Config used when no file is present: everything from the environment.
    pub fn from_env() -> Result<Self> {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") { cfg.server.host = host; }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if matches!(std::env::var("STORE").as_deref(), Ok("memory")) {
            cfg.store = StoreKind::Memory;
        }
        cfg.database.max_connections = default_max_connections();
        cfg.database.min_connections = default_min_connections();
        cfg.database.connect_timeout_secs = default_connect_timeout();
        cfg.database.idle_timeout_secs = default_idle_timeout();
        cfg.database.max_lifetime_secs = default_max_lifetime();
        cfg.database.acquire_timeout_secs = default_acquire_timeout();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.jwt.normalize_from_env();
        self.jwt.validate()?;
        // the memory store never opens a connection
        if self.store == StoreKind::Postgres {
            self.database.normalize_from_env();
            self.database.validate()?;
        }
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
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

impl JwtConfig {
    pub fn normalize_from_env(&mut self) {
        if self.key.trim().is_empty() {
            if let Ok(key) = std::env::var("JWT_SECRET") {
                self.key = key;
            }
        }
        if self.expire_minutes <= 0 {
            self.expire_minutes = default_expire_minutes();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.key.len() < MIN_JWT_KEY_LEN {
            return Err(anyhow!("jwt.key must be at least {MIN_JWT_KEY_LEN} bytes; set it in config.toml or JWT_SECRET"));
        }
        if self.issuer.trim().is_empty() || self.audience.trim().is_empty() {
            return Err(anyhow!("jwt.issuer and jwt.audience are required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
store = "memory"

[server]
host = ""
port = 9000
worker_threads = 0

[jwt]
key = "0123456789abcdef0123"
issuer = "news"
audience = "news-web"
"#;

    #[test]
    fn parses_and_normalizes_sample() {
        let mut cfg = load_from_str(SAMPLE).unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.store, StoreKind::Memory);
        assert_eq!(cfg.jwt.issuer, "news");
        assert_eq!(cfg.jwt.expire_minutes, 60);
    }

    #[test]
    fn short_jwt_key_is_rejected() {
        let jwt = JwtConfig { key: "short".into(), ..JwtConfig::default() };
        assert!(jwt.validate().is_err());
    }

    #[test]
    fn database_url_must_be_postgres() {
        let db = DatabaseConfig {
            url: "mysql://localhost/news".into(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 5,
            idle_timeout_secs: 5,
            max_lifetime_secs: 5,
            acquire_timeout_secs: 5,
            sqlx_logging: false,
        };
        assert!(db.validate().is_err());
    }

    #[test]
    fn store_defaults_to_postgres() {
        let cfg = load_from_str("").unwrap();
        assert_eq!(cfg.store, StoreKind::Postgres);
    }
}
