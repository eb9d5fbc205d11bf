use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The `ADMIN` column of `USER_TABLE`, stored as `'Y'` or `'N'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminFlag {
    #[serde(rename = "Y")]
    Yes,
    #[serde(rename = "N")]
    No,
}

impl AdminFlag {
    /// Interprets a value read back from the store. Anything other than a
    /// `Y` (in any case, padding ignored) means a regular user.
    pub fn from_stored(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("Y") {
            AdminFlag::Yes
        } else {
            AdminFlag::No
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, AdminFlag::Yes)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AdminFlag::Yes => "Y",
            AdminFlag::No => "N",
        }
    }
}

impl FromStr for AdminFlag {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "Y" => Ok(AdminFlag::Yes),
            "N" => Ok(AdminFlag::No),
            _ => Err(ValidationError::InvalidAdminFlag),
        }
    }
}

impl fmt::Display for AdminFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
