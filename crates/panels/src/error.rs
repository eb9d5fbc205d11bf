use core_types::ValidationError;
use database::StoreError;
use thiserror::Error;

/// Why a screen action did not complete. `Display` is the text of the
/// notification shown to the user.
#[derive(Error, Debug)]
pub enum PanelError {
    /// The input was rejected before anything was sent to the store.
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    #[error("Invalid credentials!")]
    InvalidCredentials,

    /// The store could not be reached or refused the operation.
    #[error("Failed: {0}")]
    Store(#[from] StoreError),
}

impl PanelError {
    /// True for client-side validation failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, PanelError::Invalid(_))
    }
}
