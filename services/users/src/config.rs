use std::time::Duration;

const DEFAULT_DB_PASSWORD: &str = "123456789";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_HTTP_PORT: u16 = 8080;

/// Upper bound for a single request on the `/users` routes.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(50);

/// Startup configuration errors. Any of these aborts the process.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} not found or empty")]
    Missing(&'static str),
    #[error("invalid value for boolean environment variable {key}={value:?}")]
    InvalidBool { key: &'static str, value: String },
    #[error("invalid port in environment variable {key}={value:?}")]
    InvalidPort { key: &'static str, value: String },
}

/// Users service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct UsersConfig {
    /// TCP port for the HTTP server (default 8080). Env var: `PORT`.
    pub http_port: u16,
    pub db: DbArgs,
}

/// PostgreSQL connection parameters.
#[derive(Clone)]
pub struct DbArgs {
    /// Disables TLS on the database connection. Env var: `DB_INSECURE`.
    pub insecure: bool,
    pub host: String,
    pub user: String,
    pub password: String,
    pub name: String,
    pub port: u16,
}

// Hand-written so the password never reaches the logs.
impl std::fmt::Debug for DbArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbArgs")
            .field("insecure", &self.insecure)
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"***")
            .field("name", &self.name)
            .field("port", &self.port)
            .finish()
    }
}

impl UsersConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db = DbArgs {
            insecure: bool_var(&lookup, "DB_INSECURE")?,
            user: required_var(&lookup, "DB_USER")?,
            password: var_or(&lookup, "DB_PASSWORD", DEFAULT_DB_PASSWORD),
            name: required_var(&lookup, "DB_NAME")?,
            host: required_var(&lookup, "DB_HOST")?,
            port: port_var(&lookup, "DB_PORT", DEFAULT_DB_PORT)?,
        };
        Ok(Self {
            http_port: port_var(&lookup, "PORT", DEFAULT_HTTP_PORT)?,
            db,
        })
    }
}

fn required_var<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn var_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_owned())
}

fn bool_var<F>(lookup: &F, key: &'static str) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).unwrap_or_default();
    parse_bool(&value).ok_or(ConfigError::InvalidBool { key, value })
}

/// Strict boolean parsing: only the listed spellings are accepted.
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "TRUE" | "true" | "True" | "T" | "t" => Some(true),
        "FALSE" | "false" | "False" | "F" | "f" => Some(false),
        _ => None,
    }
}

fn port_var<F>(lookup: &F, key: &'static str, default: u16) -> Result<u16, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidPort { key, value }),
    }
}
