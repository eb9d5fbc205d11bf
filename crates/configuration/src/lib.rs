use crate::error::ConfigError;
use crate::settings::Config;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{ConnectionMode, DatabaseSettings, Dsn, Endpoint, LogSettings};

/// The file read when no `--config` path is given. It is optional.
pub const DEFAULT_CONFIG_FILE: &str = "moviedb.toml";

/// Environment variables and the configuration keys they override.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("DATABASE_URL", "database.url"),
    ("DB_USER", "database.user"),
    ("DB_PASS", "database.password"),
    ("DB_DSN", "database.dsn"),
    ("MOVIEDB_LOG", "log.level"),
    ("MOVIEDB_LOG_DIR", "log.directory"),
];

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Loads the application configuration.
///
/// Reads `.env` into the process environment (if present), then layers the
/// TOML file and the environment on top of the built-in defaults. An explicit
/// `path` must exist; the default file may be absent.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file."),
        Err(e) if e.not_found() => {}
        Err(e) => return Err(ConfigError::ValidationError(format!("invalid .env file: {e}"))),
    }
    match path {
        Some(path) => load_config_from(path, true, std::env::vars()),
        None => load_config_from(Path::new(DEFAULT_CONFIG_FILE), false, std::env::vars()),
    }
}

/// Builds a validated `Config` from a TOML file and a set of environment variables.
pub fn load_config_from<I>(path: &Path, required: bool, vars: I) -> Result<Config, ConfigError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let vars: HashMap<String, String> = vars
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .collect();

    let mut builder = config::Config::builder()
        .add_source(config::File::from(path).format(config::FileFormat::Toml).required(required));

    for (var, key) in ENV_OVERRIDES {
        builder = builder.set_override_option(*key, vars.get(*var).cloned())?;
    }

    let config = builder.build()?.try_deserialize::<Config>()?;
    config.validate()?;
    Ok(config)
}

/// Stores the configuration for the lifetime of the process.
///
/// Must be called once, before any store operation. The returned reference
/// is the only copy; it is never mutated afterwards.
pub fn init(config: Config) -> Result<&'static Config, ConfigError> {
    let mut stored_now = false;
    let stored = CONFIG.get_or_init(|| {
        stored_now = true;
        config
    });
    if stored_now {
        Ok(stored)
    } else {
        Err(ConfigError::AlreadyInitialized)
    }
}
