use crate::error::PanelError;
use core_types::{Credentials, UserId};
use database::DbRepository;

/// Where a successful login leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Admin { name: String },
    User { user_id: UserId, name: String },
}

/// The login screen.
#[derive(Clone)]
pub struct LoginPage {
    repo: DbRepository,
}

impl LoginPage {
    pub fn new(repo: DbRepository) -> Self {
        Self { repo }
    }

    /// Validates the form, looks the user up, and decides which panel to open.
    ///
    /// A lookup that fails in the store is reported with the store's message;
    /// a lookup that simply finds no row is `InvalidCredentials`.
    pub async fn submit(&self, user_id: &str, password: &str) -> Result<Session, PanelError> {
        let credentials = Credentials::parse(user_id, password)?;

        let Some(identity) = self.repo.find_login(&credentials).await? else {
            tracing::warn!(user_id = %credentials.user_id, "Login rejected.");
            return Err(PanelError::InvalidCredentials);
        };

        tracing::info!(
            user_id = %credentials.user_id,
            admin = identity.admin.is_admin(),
            "Login succeeded."
        );
        Ok(if identity.admin.is_admin() {
            Session::Admin {
                name: identity.name,
            }
        } else {
            Session::User {
                user_id: credentials.user_id,
                name: identity.name,
            }
        })
    }
}
