use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
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

#[derive(Debug, Clone, Deserialize, Default)]
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
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Deployment environment; drives session-cookie attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    /// Session token validity window in hours.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: u64,
    #[serde(default)]
    pub environment: Environment,
}

fn default_token_ttl_hours() -> u64 { 180 }

/// Development-only signing key; `validate` refuses it in production.
const DEV_JWT_SECRET: &str = "dev-secret-change-me";

impl Default for AuthConfig {
    fn default() -> Self {
        Self { jwt_secret: String::new(), token_ttl_hours: default_token_ttl_hours(), environment: Environment::default() }
    }
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.auth.normalize_from_env();
        self.auth.validate()?;
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
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// Fill URL from DATABASE_URL when the TOML does not provide one.
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or via DATABASE_URL"));
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

impl AuthConfig {
    /// JWT_SECRET and APP_ENV override the TOML values.
    pub fn normalize_from_env(&mut self) {
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            self.jwt_secret = secret;
        }
        if self.jwt_secret.trim().is_empty() {
            self.jwt_secret = DEV_JWT_SECRET.to_string();
        }
        if let Ok(env) = std::env::var("APP_ENV") {
            if env.eq_ignore_ascii_case("production") {
                self.environment = Environment::Production;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.token_ttl_hours == 0 {
            return Err(anyhow!("auth.token_ttl_hours must be >= 1"));
        }
        // A missing secret normalizes to the dev fallback; in production
        // either form means session tokens anyone can forge.
        if self.environment == Environment::Production
            && (self.jwt_secret.trim().is_empty() || self.jwt_secret == DEV_JWT_SECRET)
        {
            return Err(anyhow!(
                "auth.jwt_secret must be set explicitly in production (config.toml or JWT_SECRET)"
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_defaults_to_180_hours_dev() {
        let cfg = AuthConfig::default();
        assert_eq!(cfg.token_ttl_hours, 180);
        assert_eq!(cfg.environment, Environment::Development);
    }

    #[test]
    fn production_refuses_missing_or_default_jwt_secret() {
        let cfg = AuthConfig {
            jwt_secret: DEV_JWT_SECRET.into(),
            token_ttl_hours: 180,
            environment: Environment::Production,
        };
        assert!(cfg.validate().is_err());

        let cfg = AuthConfig {
            jwt_secret: String::new(),
            token_ttl_hours: 180,
            environment: Environment::Production,
        };
        assert!(cfg.validate().is_err());

        let cfg = AuthConfig {
            jwt_secret: "long-random-production-secret".into(),
            token_ttl_hours: 180,
            environment: Environment::Production,
        };
        assert!(cfg.validate().is_ok());

        // Development keeps the fallback for local runs
        let cfg = AuthConfig {
            jwt_secret: DEV_JWT_SECRET.into(),
            token_ttl_hours: 180,
            environment: Environment::Development,
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn server_port_zero_rejected() {
        let mut cfg = ServerConfig { host: " ".into(), port: 0, worker_threads: None };
        assert!(cfg.normalize().is_err());
    }

    #[test]
    fn database_requires_postgres_scheme() {
        let cfg = DatabaseConfig { url: "mysql://x".into(), ..Default::default() };
        assert!(cfg.validate().is_err());
    }
}
