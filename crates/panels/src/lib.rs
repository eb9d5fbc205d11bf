//! # Panels
//!
//! The screen logic behind the console: the login page, the user panel and
//! the admin panel. Every action validates its input first and only then
//! makes a single repository call; a successful mutation is followed by one
//! refresh of the listing it affects.

pub mod admin;
pub mod error;
pub mod login;
pub mod user;
pub mod view;

pub use admin::AdminPanel;
pub use error::PanelError;
pub use login::{LoginPage, Session};
pub use user::UserPanel;
pub use view::{TableView, Tabular};

/// The result of a successful form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub message: &'static str,
    /// The affected listing, re-read after the change. `None` when the
    /// refresh itself failed; the change has still been committed.
    pub refreshed: Option<TableView>,
}

impl ActionOutcome {
    fn refreshed(message: &'static str, view: Result<TableView, PanelError>) -> Self {
        let refreshed = match view {
            Ok(view) => Some(view),
            Err(e) => {
                tracing::warn!(error = %e, "Refresh after a successful change failed.");
                None
            }
        };
        Self { message, refreshed }
    }
}
