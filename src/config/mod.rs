use std::env;

use anyhow::bail;

/// Shortest JWT secret accepted at startup. HS256 wants at least a
/// 256-bit key; anything shorter is a misconfiguration, not a warning.
pub const MIN_JWT_SECRET_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub security: SecurityConfig,
    pub database: DatabaseConfig,
    pub school_service: SchoolServiceConfig,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Symmetric signing key shared by the gateway layer and the auth
    /// handlers. Injected here, never read from a global.
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// When unset the process falls back to the in-memory stores.
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct SchoolServiceConfig {
    /// Base URL for the school lookup during composite student reads.
    /// Defaults to the process's own listen address when unset.
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(s) => s,
            Err(_) => bail!("JWT_SECRET must be set"),
        };

        let jwt_expiry_hours = env::var("JWT_EXPIRY_HOURS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(24);

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(10);

        let timeout_secs = env::var("SCHOOL_CLIENT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(5);

        let config = Self {
            http: HttpConfig { port },
            security: SecurityConfig {
                jwt_secret,
                jwt_expiry_hours,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").ok(),
                max_connections,
            },
            school_service: SchoolServiceConfig {
                base_url: env::var("SCHOOL_SERVICE_URL").ok(),
                timeout_secs,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.security.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            bail!(
                "JWT_SECRET must be at least {} bytes, got {}",
                MIN_JWT_SECRET_LEN,
                self.security.jwt_secret.len()
            );
        }
        if self.school_service.timeout_secs == 0 {
            bail!("SCHOOL_CLIENT_TIMEOUT_SECS must be greater than zero");
        }
        Ok(())
    }
}
