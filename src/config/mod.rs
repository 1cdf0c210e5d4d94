use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Top-level application configuration.
///
/// Built once in `main` via [`AppConfig::from_env`] and handed to the
/// components that need it (session gate, asset store, repository wiring).
/// Nothing reads the environment after startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub database: DatabaseConfig,
    pub uploads: UploadConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Shared admin password. Empty means admin login is disabled.
    pub admin_password: String,
    /// Key used to sign session tokens.
    pub session_secret: String,
    /// Session validity window from issuance, in hours.
    pub session_ttl_hours: i64,
    /// Whether the session cookie carries the Secure attribute.
    pub cookie_secure: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Postgres connection string. Absent means the in-memory repository.
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Directory poster files are written to.
    pub dir: PathBuf,
    /// Public URL prefix the stored files are served under.
    pub public_prefix: String,
    /// Upper bound on an uploaded poster payload.
    pub max_poster_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        // Environment profile first, then specific env var overrides
        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        if let Ok(v) = env::var("ADMIN_PASSWORD") {
            self.security.admin_password = v;
        }
        if let Ok(v) = env::var("SESSION_SECRET") {
            self.security.session_secret = v;
        }
        if let Ok(v) = env::var("SESSION_TTL_HOURS") {
            self.security.session_ttl_hours = v.parse().unwrap_or(self.security.session_ttl_hours);
        }

        if let Ok(v) = env::var("DATABASE_URL") {
            if !v.trim().is_empty() {
                self.database.url = Some(v);
            }
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }

        if let Ok(v) = env::var("UPLOAD_DIR") {
            self.uploads.dir = PathBuf::from(v);
        }
        if let Ok(v) = env::var("UPLOAD_PUBLIC_PREFIX") {
            self.uploads.public_prefix = v;
        }
        if let Ok(v) = env::var("UPLOAD_MAX_BYTES") {
            self.uploads.max_poster_bytes = v.parse().unwrap_or(self.uploads.max_poster_bytes);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 3000 },
            security: SecurityConfig {
                admin_password: String::new(),
                session_secret: "la-comedia-dev-session-secret".to_string(),
                session_ttl_hours: 4,
                cookie_secure: false,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
            },
            uploads: UploadConfig {
                dir: PathBuf::from("public/uploads"),
                public_prefix: "/uploads".to_string(),
                max_poster_bytes: 10 * 1024 * 1024, // 10MB
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 3000 },
            security: SecurityConfig {
                admin_password: String::new(),
                session_secret: String::new(),
                session_ttl_hours: 4,
                cookie_secure: true,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
            },
            uploads: UploadConfig {
                dir: PathBuf::from("public/uploads"),
                public_prefix: "/uploads".to_string(),
                max_poster_bytes: 5 * 1024 * 1024, // 5MB
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_profile_defaults() {
        let config = AppConfig::development();
        assert_eq!(config.security.session_ttl_hours, 4);
        assert!(!config.security.cookie_secure);
        assert_eq!(config.uploads.public_prefix, "/uploads");
        assert!(config.database.url.is_none());
    }

    #[test]
    fn production_profile_hardens_cookies() {
        let config = AppConfig::production();
        assert!(config.security.cookie_secure);
        assert_eq!(config.security.session_ttl_hours, 4);
        assert!(config.security.admin_password.is_empty());
    }
}
