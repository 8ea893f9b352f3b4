use chrono_tz::Tz;
use studio_core::policy::BookingPolicy;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long in-flight requests may drain after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// JWT validation settings.
    pub jwt: JwtConfig,
    /// Studio booking rules.
    pub policy: BookingPolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `3000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:3001` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`   | `30`                    |
    /// | `STUDIO_TIMEZONE`         | `Europe/Bucharest`      |
    /// | `SESSION_CAPACITY`        | `4`                     |
    /// | `RESCHEDULE_NOTICE_HOURS` | `24`                    |
    /// | `REFUND_ON_CANCEL`        | `false`                 |
    ///
    /// # Panics
    ///
    /// Panics on malformed values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:3001".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        let policy = parse_policy(|key| std::env::var(key).ok())
            .unwrap_or_else(|e| panic!("Invalid booking policy: {e}"));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt,
            policy,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Build a [`BookingPolicy`] from a variable lookup, falling back to the
/// defaults for anything unset.
pub fn parse_policy(lookup: impl Fn(&str) -> Option<String>) -> Result<BookingPolicy, String> {
    let defaults = BookingPolicy::default();

    let timezone = match lookup("STUDIO_TIMEZONE") {
        Some(raw) => raw
            .parse::<Tz>()
            .map_err(|e| format!("STUDIO_TIMEZONE '{raw}': {e}"))?,
        None => defaults.timezone,
    };

    let session_capacity = match lookup("SESSION_CAPACITY") {
        Some(raw) => match raw.parse::<i32>() {
            Ok(n) if n > 0 => n,
            _ => return Err(format!("SESSION_CAPACITY must be a positive integer, got '{raw}'")),
        },
        None => defaults.session_capacity,
    };

    let reschedule_notice_hours = match lookup("RESCHEDULE_NOTICE_HOURS") {
        Some(raw) => match raw.parse::<i64>() {
            Ok(n) if n >= 0 => n,
            _ => {
                return Err(format!(
                    "RESCHEDULE_NOTICE_HOURS must be a non-negative integer, got '{raw}'"
                ))
            }
        },
        None => defaults.reschedule_notice_hours,
    };

    let refund_on_cancel = match lookup("REFUND_ON_CANCEL") {
        Some(raw) => raw
            .parse::<bool>()
            .map_err(|_| format!("REFUND_ON_CANCEL must be true or false, got '{raw}'"))?,
        None => defaults.refund_on_cancel,
    };

    Ok(BookingPolicy {
        timezone,
        session_capacity,
        reschedule_notice_hours,
        refund_on_cancel,
    })
}
