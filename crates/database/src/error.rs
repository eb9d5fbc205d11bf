use configuration::error::ConfigError;
use std::time::Duration;
use thiserror::Error;

/// Everything that can go wrong in a single round-trip to the store.
///
/// `Display` is the diagnostic shown to the user, so `Rejected` prints the
/// store's own message and nothing else.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to connect to the database: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Timed out after {0:?} while connecting to the database")]
    ConnectTimeout(Duration),

    #[error("{message}")]
    Rejected {
        message: String,
        /// The SQLSTATE reported by the store, when there is one.
        code: Option<String>,
    },

    #[error("Database query failed: {0}")]
    Query(#[source] sqlx::Error),

    #[error("Invalid stored procedure name: {0:?}")]
    InvalidProcedure(String),

    #[error("Column {column} has unsupported type {type_name}")]
    UnsupportedColumn { column: String, type_name: String },

    #[error("Unexpected value in column {index}: expected {expected}")]
    Decode { index: usize, expected: &'static str },

    #[error("Database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    pub fn rejected(message: impl Into<String>) -> Self {
        StoreError::Rejected {
            message: message.into(),
            code: None,
        }
    }

    /// Classifies an error raised while running a statement. Errors the
    /// database itself reported keep their message verbatim.
    pub(crate) fn from_query(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => StoreError::Rejected {
                message: db_err.message().to_string(),
                code: db_err.code().map(|code| code.into_owned()),
            },
            other => StoreError::Query(other),
        }
    }

    /// True when the store could not be reached at all.
    pub fn is_connection(&self) -> bool {
        matches!(self, StoreError::Connection(_) | StoreError::ConnectTimeout(_))
    }
}
