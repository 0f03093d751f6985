/// Configuration management for the API server
///
/// Every setting is read from an environment variable with a documented
/// default. Malformed numeric or duration values fall back to the default
/// with a warning instead of failing startup.
///
/// # Environment Variables
///
/// | Variable | Default |
/// |---|---|
/// | `SERVER_HOST` | `0.0.0.0` |
/// | `SERVER_PORT` | `8080` |
/// | `SERVER_READ_TIMEOUT` | `15s` |
/// | `SERVER_WRITE_TIMEOUT` | `15s` |
/// | `SERVER_SHUTDOWN_TIMEOUT` | `10s` |
/// | `DB_HOST` / `DB_PORT` / `DB_USER` / `DB_PASSWORD` / `DB_NAME` | `localhost` / `5432` / `postgres` / `postgres` / `taskboard` |
/// | `DB_MAX_CONNECTIONS` | `10` |
/// | `JWT_SECRET` | development-only default (logged) |
/// | `JWT_ACCESS_TTL` | `15m` |
/// | `JWT_REFRESH_TTL` | `7d` |
/// | `CORS_ORIGINS` | `*` |
///
/// Durations accept `30s`, `15m`, `24h`, `7d`, or a bare integer (seconds).
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use taskboard_shared::db::pool::DatabaseConfig;
use tracing::warn;

/// Development-only fallback signing secret, long enough for HS256.
const DEV_JWT_SECRET: &str = "taskboard-insecure-dev-secret-0123456789abcdef";

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// Allowed CORS origins; `["*"]` means permissive
    pub cors_origins: Vec<String>,
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Per-request read deadline
    pub read_timeout: Duration,

    /// Per-request write deadline; also bounds handler execution
    pub write_timeout: Duration,

    /// How long to wait for in-flight requests during shutdown before
    /// force-closing connections
    pub shutdown_timeout: Duration,
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HS256 signing secret; should be at least 32 bytes
    pub secret: String,

    /// Access token lifetime
    pub access_ttl: Duration,

    /// Refresh token lifetime
    pub refresh_ttl: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Never fails: missing variables use their defaults, malformed values
    /// fall back to the default with a warning.
    pub fn from_env() -> Self {
        // Load .env if present (development convenience)
        dotenvy::dotenv().ok();

        let server = ServerConfig {
            host: env_or("SERVER_HOST", "0.0.0.0"),
            port: env_parse("SERVER_PORT", 8080),
            read_timeout: env_duration("SERVER_READ_TIMEOUT", Duration::from_secs(15)),
            write_timeout: env_duration("SERVER_WRITE_TIMEOUT", Duration::from_secs(15)),
            shutdown_timeout: env_duration("SERVER_SHUTDOWN_TIMEOUT", Duration::from_secs(10)),
        };

        let database = DatabaseConfig {
            host: env_or("DB_HOST", "localhost"),
            port: env_parse("DB_PORT", 5432),
            user: env_or("DB_USER", "postgres"),
            password: env_or("DB_PASSWORD", "postgres"),
            name: env_or("DB_NAME", "taskboard"),
            max_connections: env_parse("DB_MAX_CONNECTIONS", 10),
            connect_timeout_seconds: 30,
        };

        let secret = match env::var("JWT_SECRET") {
            Ok(value) if !value.is_empty() => {
                if value.len() < 32 {
                    warn!("JWT_SECRET is shorter than 32 bytes");
                }
                value
            }
            _ => {
                warn!("JWT_SECRET not set, using development default; do not use in production");
                DEV_JWT_SECRET.to_string()
            }
        };

        let jwt = JwtConfig {
            secret,
            access_ttl: env_duration("JWT_ACCESS_TTL", Duration::from_secs(15 * 60)),
            refresh_ttl: env_duration("JWT_REFRESH_TTL", Duration::from_secs(7 * 24 * 3600)),
        };

        let cors_origins = env_or("CORS_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            server,
            database,
            jwt,
            cors_origins,
        }
    }

    /// Returns the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Reads a string variable, defaulting when unset or empty.
fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

/// Reads and parses a variable, falling back to the default on parse errors.
fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Display + Copy,
{
    match env::var(key) {
        Ok(value) => match value.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!("Invalid value {:?} for {}, using default {}", value, key, default);
                default
            }
        },
        Err(_) => default,
    }
}

/// Reads a duration variable, falling back to the default on parse errors.
fn env_duration(key: &str, default: Duration) -> Duration {
    match env::var(key) {
        Ok(value) => match parse_duration(&value) {
            Some(parsed) => parsed,
            None => {
                warn!(
                    "Invalid duration {:?} for {}, using default {}s",
                    value,
                    key,
                    default.as_secs()
                );
                default
            }
        },
        Err(_) => default,
    }
}

/// Parses `30s`, `15m`, `24h`, `7d`, or a bare integer (seconds).
fn parse_duration(value: &str) -> Option<Duration> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let (number, unit_secs) = match value.chars().last() {
        Some('s') => (&value[..value.len() - 1], 1),
        Some('m') => (&value[..value.len() - 1], 60),
        Some('h') => (&value[..value.len() - 1], 3600),
        Some('d') => (&value[..value.len() - 1], 86400),
        _ => (value, 1),
    };

    let amount: u64 = number.trim().parse().ok()?;
    Some(Duration::from_secs(amount * unit_secs))
}
