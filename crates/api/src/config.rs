use std::path::PathBuf;
use std::str::FromStr;

use navdir_core::session::DEFAULT_SESSION_TIMEOUT_MINS;

/// Administrator password used when `ADMIN_PASSWORD` is not set.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local use. In production, override
/// via environment variables (a `.env` file is honoured by the binary).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Administrator secret. Either plaintext or an Argon2 PHC hash string.
    pub admin_password: String,
    /// Session lifetime in minutes (default: `30`).
    pub session_timeout_mins: i64,
    /// Directory holding `navigation.json` (default: `.data`).
    pub data_dir: PathBuf,
    /// Directory of static front-end files, served with an `index.html`
    /// fallback when it exists (default: `public`).
    pub static_dir: Option<PathBuf>,
    /// Verbose logging default when `RUST_LOG` is not set (default: `true`).
    pub debug: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default      |
    /// |------------------------|--------------|
    /// | `HOST`                 | `0.0.0.0`    |
    /// | `PORT`                 | `3000`       |
    /// | `CORS_ORIGINS`         | `*`          |
    /// | `REQUEST_TIMEOUT_SECS` | `30`         |
    /// | `ADMIN_PASSWORD`       | `admin123`   |
    /// | `SESSION_TIMEOUT_MINS` | `30`         |
    /// | `DATA_DIR`             | `.data`      |
    /// | `STATIC_DIR`           | `public`     |
    /// | `DEBUG`                | `true`       |
    ///
    /// # Panics
    ///
    /// Panics if a numeric or boolean variable does not parse. Misconfiguration
    /// should stop the server at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = parse_env("PORT", 3000);

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".into()),
        );

        let request_timeout_secs: u64 = parse_env("REQUEST_TIMEOUT_SECS", 30);

        let admin_password =
            std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.into());
        let session_timeout_mins: i64 =
            parse_env("SESSION_TIMEOUT_MINS", DEFAULT_SESSION_TIMEOUT_MINS);
        assert!(
            session_timeout_mins > 0,
            "SESSION_TIMEOUT_MINS must be positive"
        );

        let data_dir = PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| ".data".into()));
        let static_dir = match std::env::var("STATIC_DIR") {
            Ok(dir) if dir.is_empty() => None,
            Ok(dir) => Some(PathBuf::from(dir)),
            Err(_) => Some(PathBuf::from("public")),
        };

        let debug: bool = parse_env("DEBUG", true);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            admin_password,
            session_timeout_mins,
            data_dir,
            static_dir,
            debug,
        }
    }

    /// Session lifetime as a duration.
    pub fn session_timeout(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.session_timeout_mins)
    }

    /// Whether the built-in default administrator password is in effect.
    pub fn uses_default_password(&self) -> bool {
        self.admin_password == DEFAULT_ADMIN_PASSWORD
    }

    /// Whether CORS should accept any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

/// Read `key` from the environment and parse it, falling back to `default`
/// when unset.
fn parse_env<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
