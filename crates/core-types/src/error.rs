use std::fmt;
use thiserror::Error;

/// The input fields a user can type into a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    UserId,
    MovieId,
    ReviewId,
    Rating,
    ReviewText,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::UserId => "User ID",
            Field::MovieId => "Movie ID",
            Field::ReviewId => "Review ID",
            Field::Rating => "Rating",
            Field::ReviewText => "Review Text",
        };
        f.write_str(label)
    }
}

/// A client-side validation failure. These never reach the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must be a number!")]
    NotANumber(Field),

    #[error("{0} is too large!")]
    OutOfRange(Field),

    #[error("{0} cannot be empty!")]
    Empty(Field),

    #[error("Rating must be between 0 and 5!")]
    RatingOutOfBounds,

    #[error("Admin must be Y or N!")]
    InvalidAdminFlag,

    #[error("User ID and Password required!")]
    CredentialsRequired,

    #[error("All fields required!")]
    AllFieldsRequired,

    #[error("Rating must be a number between 0 and 5!")]
    InvalidRating,

    #[error("Enter valid User ID, Name, and Admin (Y/N)!")]
    InvalidUserUpdate,
}
