use crate::error::{Field, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parses a form field that must hold a non-negative integer.
///
/// The input is trimmed and must then consist solely of ASCII digits. Signs,
/// whitespace inside the number and decimal points are all rejected, so a
/// value that passes is always a valid non-negative key.
pub fn parse_digits(input: &str, field: Field) -> Result<i64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::NotANumber(field));
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::OutOfRange(field))
}

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $field:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Parses user input with the digits-only rule.
            pub fn parse(input: &str) -> Result<Self, ValidationError> {
                parse_digits(input, $field).map(Self)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

id_type!(
    /// Primary key of a row in `USER_TABLE`.
    UserId,
    Field::UserId
);
id_type!(
    /// Primary key of a row in `MOVIE`.
    MovieId,
    Field::MovieId
);
id_type!(
    /// Primary key of a row in `REVIEW`.
    ReviewId,
    Field::ReviewId
);
