//! Server configuration from environment variables.

use std::env;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server port to listen on.
    pub port: u16,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// CORS allowed origins (comma-separated or "*" for all).
    pub cors_allowed_origins: String,
    /// Secret used to sign JWT session tokens.
    pub jwt_secret: String,
    /// Session token lifetime in hours.
    pub jwt_expiry_hours: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `JWT_SECRET`: signing secret for session tokens
    ///
    /// Optional:
    /// - `PORT`: Server port (default: 3000)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `CORS_ALLOWED_ORIGINS`: Allowed CORS origins (default: "*")
    /// - `JWT_EXPIRY_HOURS`: Token lifetime in hours (default: 24)
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?;

        if jwt_secret.len() < 16 {
            return Err(ConfigError::InvalidValue {
                name: "JWT_SECRET".to_string(),
                reason: "must be at least 16 bytes".to_string(),
            });
        }

        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let cors_allowed_origins =
            env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string());

        let jwt_expiry_hours = env::var("JWT_EXPIRY_HOURS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(24);

        Ok(Self {
            port,
            log_level,
            cors_allowed_origins,
            jwt_secret,
            jwt_expiry_hours,
        })
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env() {
        // SAFETY: This test is not run in parallel with other tests that read JWT_SECRET.
        unsafe { env::set_var("JWT_SECRET", "test_secret_key_12345") };

        let config = ServerConfig::from_env().unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.cors_allowed_origins, "*");
        assert_eq!(config.jwt_expiry_hours, 24);

        // SAFETY: This test is not run in parallel with other tests that read JWT_SECRET.
        unsafe { env::set_var("JWT_SECRET", "short") };

        let result = ServerConfig::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

        // SAFETY: This test is not run in parallel with other tests that read JWT_SECRET.
        unsafe { env::remove_var("JWT_SECRET") };
    }

    #[test]
    fn test_socket_addr_uses_port() {
        let config = ServerConfig {
            port: 8080,
            log_level: "info".to_string(),
            cors_allowed_origins: "*".to_string(),
            jwt_secret: "test_secret_key_12345".to_string(),
            jwt_expiry_hours: 24,
        };
        assert_eq!(config.socket_addr().port(), 8080);
    }
}
