//! Configuration management for web service
//!
//! Supports loading configuration from environment variables with fallback to defaults.

use std::num::NonZeroUsize;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_WORKER_COUNT: usize = 4;
pub const DEFAULT_SESSION_COOKIE: &str = "todo_session";
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 24 * 60 * 60;
pub const DEFAULT_SESSION_CAPACITY: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub session_cookie_name: String,
    pub session_idle_timeout: Duration,
    pub session_capacity: NonZeroUsize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            workers: DEFAULT_WORKER_COUNT,
            session_cookie_name: DEFAULT_SESSION_COOKIE.to_string(),
            session_idle_timeout: Duration::from_secs(DEFAULT_SESSION_IDLE_SECS),
            session_capacity: NonZeroUsize::new(DEFAULT_SESSION_CAPACITY)
                .unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl ServerConfig {
    /// Load ServerConfig from environment variables
    ///
    /// Environment variables:
    /// - `APP_HOST`: Bind address (default: 127.0.0.1)
    /// - `APP_PORT`: Listen port (default: 8080)
    /// - `APP_WORKERS`: HTTP worker threads (default: 4)
    /// - `SESSION_COOKIE_NAME`: Cookie carrying the session id (default: todo_session)
    /// - `SESSION_IDLE_TIMEOUT_SECS`: Idle sessions older than this are evicted (default: 86400)
    /// - `SESSION_CAPACITY`: Most sessions kept in memory at once (default: 10000)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            host: lookup("APP_HOST")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.host),
            port: lookup("APP_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            workers: lookup("APP_WORKERS")
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.workers),
            session_cookie_name: lookup("SESSION_COOKIE_NAME")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.session_cookie_name),
            session_idle_timeout: lookup("SESSION_IDLE_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_idle_timeout),
            session_capacity: lookup("SESSION_CAPACITY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.session_capacity),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
