//! Environment-based configuration module
//!
//! Configuration can be set via:
//! 1. Environment variables (highest priority)
//! 2. Default values (lowest priority)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Application environment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    /// Get environment from APP_ENV variable or default to Development
    pub fn from_env() -> Self {
        match env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()).as_str() {
            "production" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub app_name: String,
    pub version: String,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
    pub limits: ListLimits,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database file name (relative to the data dir)
    pub path: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    /// How long a statement waits on a locked database before giving up.
    pub busy_timeout_secs: u64,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Session lifetime in minutes
    pub session_timeout_mins: i64,
    pub min_password_length: usize,
    pub bcrypt_cost: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    pub log_to_file: bool,
    pub log_to_stdout: bool,
    /// Use JSON format (true for production)
    pub json_format: bool,
    pub max_file_size_mb: u64,
    pub max_log_files: u32,
}

/// Upper bounds on read endpoints, enforced regardless of what the caller asks for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListLimits {
    pub activity_default: i64,
    pub activity_max: i64,
    pub sales_max: i64,
    pub heatmap_default_days: i64,
    pub heatmap_max_days: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env_mode = Environment::from_env();

        Self {
            environment: env_mode,
            app_name: env::var("APP_NAME").unwrap_or_else(|_| "POS Backend".to_string()),
            version: env!("CARGO_PKG_VERSION").to_string(),

            database: DatabaseConfig {
                path: env::var("DB_PATH").unwrap_or_else(|_| "pos.db".to_string()),
                max_connections: env::var("DB_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
                min_connections: env::var("DB_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(2),
                connect_timeout_secs: 30,
                idle_timeout_secs: 600,
                busy_timeout_secs: env::var("DB_BUSY_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            },

            security: SecurityConfig {
                session_timeout_mins: env::var("SESSION_TIMEOUT_MINS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
                min_password_length: 8,
                bcrypt_cost: env::var("BCRYPT_COST")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(12),
            },

            logging: LoggingConfig {
                level: env::var("RUST_LOG").unwrap_or_else(|_| {
                    if env_mode.is_production() { "warn".to_string() } else { "debug".to_string() }
                }),
                log_to_file: true,
                log_to_stdout: env::var("LOG_TO_STDOUT")
                    .map(|s| s == "true")
                    .unwrap_or(true),
                json_format: env_mode.is_production(),
                max_file_size_mb: 10,
                max_log_files: 5,
            },

            limits: ListLimits {
                activity_default: 200,
                activity_max: 500,
                sales_max: 500,
                heatmap_default_days: 90,
                heatmap_max_days: 365,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and defaults
    pub fn load() -> Self {
        Self::default()
    }

    /// Get the log directory path
    pub fn get_log_dir(&self, data_dir: &Path) -> PathBuf {
        data_dir.join("logs")
    }

    /// Get the database path
    pub fn get_database_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.database.path)
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}

/// Global configuration instance
static GLOBAL_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Initialize the global configuration
pub fn init_config() -> &'static AppConfig {
    GLOBAL_CONFIG.get_or_init(AppConfig::load)
}

/// Get the global configuration
pub fn get_config() -> &'static AppConfig {
    GLOBAL_CONFIG.get().expect("Configuration not initialized. Call init_config() first.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = AppConfig::default();
        assert!(config.database.max_connections >= config.database.min_connections);
        assert!(config.limits.activity_max >= config.limits.activity_default);
        assert!(config.limits.heatmap_max_days >= config.limits.heatmap_default_days);
        assert!(config.security.min_password_length >= 8);
    }
}
