use crate::error::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub log: LogSettings,
}

impl Config {
    /// Checks the settings that cannot be expressed through serde alone.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database.endpoint()?;
        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.database.acquire_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "database.acquire_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// How the store acquires a connection for each round-trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ConnectionMode {
    /// Check a connection out of a bounded pool and return it afterwards.
    #[default]
    Pooled,
    /// Open a dedicated connection for every call and close it afterwards.
    PerCall,
}

/// Where and how to reach the store.
#[derive(Clone, Deserialize)]
pub struct DatabaseSettings {
    /// A full `postgres://` URL. Takes precedence over user/password/dsn.
    pub url: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    /// `host[:port]/service`
    pub dsn: Option<String>,
    #[serde(default)]
    pub mode: ConnectionMode,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_secs() -> u64 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            user: None,
            password: None,
            dsn: None,
            mode: ConnectionMode::default(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
        }
    }
}

// The password must never end up in a log line.
impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("dsn", &self.dsn)
            .field("mode", &self.mode)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish()
    }
}

/// The resolved target of the store connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Url(&'a str),
    Parts {
        user: &'a str,
        password: &'a str,
        dsn: Dsn,
    },
}

impl DatabaseSettings {
    /// Resolves the connection target, preferring an explicit URL.
    pub fn endpoint(&self) -> Result<Endpoint<'_>, ConfigError> {
        if let Some(url) = self.url.as_deref() {
            return Ok(Endpoint::Url(url));
        }
        match (self.user.as_deref(), self.password.as_deref(), self.dsn.as_deref()) {
            (Some(user), Some(password), Some(dsn)) => Ok(Endpoint::Parts {
                user,
                password,
                dsn: dsn.parse()?,
            }),
            _ => Err(ConfigError::ValidationError(
                "set DATABASE_URL, or all of DB_USER, DB_PASS and DB_DSN".to_string(),
            )),
        }
    }
}

/// A `host[:port]/service` connect descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dsn {
    pub host: String,
    pub port: Option<u16>,
    pub service: String,
}

impl FromStr for Dsn {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| {
            ConfigError::ValidationError(format!("invalid DB_DSN '{s}': {reason}"))
        };
        let (address, service) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| invalid("expected host[:port]/service"))?;
        if service.is_empty() || service.contains('/') {
            return Err(invalid("missing or malformed service name"));
        }
        let (host, port) = match address.rsplit_once(':') {
            Some((host, port)) => {
                let port = port.parse::<u16>().map_err(|_| invalid("port is not a number"))?;
                (host, Some(port))
            }
            None => (address, None),
        };
        if host.is_empty() {
            return Err(invalid("missing host"));
        }
        Ok(Self {
            host: host.to_string(),
            port,
            service: service.to_string(),
        })
    }
}

/// Contains parameters for the tracing subscriber.
#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// Default `EnvFilter` directive, used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs go to a daily-rolling file in this directory instead of stderr.
    pub directory: Option<PathBuf>,
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_file_prefix() -> String {
    "moviedb.log".to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
            file_prefix: default_file_prefix(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("db.local:1521/movies", "db.local", Some(1521), "movies")]
    #[case("localhost/movies", "localhost", None, "movies")]
    #[case(" 10.0.0.5:5432/reviews ", "10.0.0.5", Some(5432), "reviews")]
    fn parses_dsn(
        #[case] input: &str,
        #[case] host: &str,
        #[case] port: Option<u16>,
        #[case] service: &str,
    ) {
        let dsn: Dsn = input.parse().unwrap();
        assert_eq!(dsn.host, host);
        assert_eq!(dsn.port, port);
        assert_eq!(dsn.service, service);
    }

    #[rstest]
    #[case("localhost")]
    #[case("localhost:abc/movies")]
    #[case(":5432/movies")]
    #[case("localhost:5432/")]
    #[case("localhost/a/b")]
    fn rejects_malformed_dsn(#[case] input: &str) {
        assert!(input.parse::<Dsn>().is_err());
    }

    #[test]
    fn url_takes_precedence_over_parts() {
        let settings = DatabaseSettings {
            url: Some("postgres://u:p@h/db".to_string()),
            user: Some("ignored".to_string()),
            ..DatabaseSettings::default()
        };
        assert_eq!(settings.endpoint().unwrap(), Endpoint::Url("postgres://u:p@h/db"));
    }

    #[test]
    fn missing_credentials_fail_validation() {
        let settings = DatabaseSettings {
            user: Some("scott".to_string()),
            dsn: Some("localhost/movies".to_string()),
            ..DatabaseSettings::default()
        };
        assert!(matches!(
            settings.endpoint(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn zero_acquire_timeout_fails_validation() {
        let config = Config {
            database: DatabaseSettings {
                url: Some("postgres://u:p@h/db".to_string()),
                acquire_timeout_secs: 0,
                ..DatabaseSettings::default()
            },
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(msg)) if msg.contains("acquire_timeout_secs")
        ));
    }

    #[test]
    fn debug_output_hides_the_password() {
        let settings = DatabaseSettings {
            user: Some("scott".to_string()),
            password: Some("tiger".to_string()),
            dsn: Some("localhost/movies".to_string()),
            ..DatabaseSettings::default()
        };
        let rendered = format!("{settings:?}");
        assert!(rendered.contains("scott"));
        assert!(!rendered.contains("tiger"));
    }
}
