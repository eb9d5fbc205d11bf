use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    #[error("Configuration has already been initialized")]
    AlreadyInitialized,

    #[error("Failed to initialize logging: {0}")]
    LoggingError(String),
}
