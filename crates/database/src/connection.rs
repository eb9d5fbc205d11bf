use crate::error::StoreError;
use crate::postgres::PgStore;
use configuration::error::ConfigError;
use configuration::{ConnectionMode, DatabaseSettings, Endpoint};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// Translates the configured endpoint into driver connect options.
pub fn connect_options(settings: &DatabaseSettings) -> Result<PgConnectOptions, StoreError> {
    let options = match settings.endpoint()? {
        Endpoint::Url(url) => PgConnectOptions::from_str(url).map_err(|e| {
            StoreError::Config(ConfigError::ValidationError(format!(
                "invalid DATABASE_URL: {e}"
            )))
        })?,
        Endpoint::Parts {
            user,
            password,
            dsn,
        } => {
            let options = PgConnectOptions::new_without_pgpass()
                .host(&dsn.host)
                .database(&dsn.service)
                .username(user)
                .password(password);
            match dsn.port {
                Some(port) => options.port(port),
                None => options,
            }
        }
    };
    Ok(options)
}

/// Builds the store described by the configuration.
///
/// No connection is opened here: in pooled mode the pool connects lazily on
/// first use, and in per-call mode every operation opens its own. A store
/// that is down therefore surfaces as an error on the first action rather
/// than at startup.
pub fn connect(settings: &DatabaseSettings) -> Result<PgStore, StoreError> {
    let options = connect_options(settings)?;
    let timeout = Duration::from_secs(settings.acquire_timeout_secs);

    let store = match settings.mode {
        ConnectionMode::Pooled => {
            let pool = PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .acquire_timeout(timeout)
                .connect_lazy_with(options);
            PgStore::pooled(pool)
        }
        ConnectionMode::PerCall => PgStore::per_call(options, timeout),
    };
    tracing::debug!(mode = ?settings.mode, "Database store configured.");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> DatabaseSettings {
        DatabaseSettings {
            user: Some("scott".to_string()),
            password: Some("tiger".to_string()),
            dsn: Some("db.local:6543/movies".to_string()),
            ..DatabaseSettings::default()
        }
    }

    #[test]
    fn parts_become_connect_options() {
        let options = connect_options(&settings()).unwrap();
        assert_eq!(options.get_host(), "db.local");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_database(), Some("movies"));
        assert_eq!(options.get_username(), "scott");
    }

    #[test]
    fn malformed_urls_are_configuration_errors() {
        let settings = DatabaseSettings {
            url: Some("not a url".to_string()),
            ..DatabaseSettings::default()
        };
        assert!(matches!(
            connect_options(&settings),
            Err(StoreError::Config(_))
        ));
    }

    #[tokio::test]
    async fn building_a_store_does_not_touch_the_network() {
        let per_call = DatabaseSettings {
            mode: ConnectionMode::PerCall,
            ..settings()
        };
        assert!(connect(&per_call).is_ok());
        assert!(connect(&settings()).is_ok());
    }
}
