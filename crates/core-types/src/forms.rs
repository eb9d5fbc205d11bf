//! Validated form submissions.
//!
//! Each `parse` takes the raw text typed into a form and either produces a
//! value that is safe to send to the store or the first validation error, in
//! the order the fields are checked on screen.

use crate::enums::AdminFlag;
use crate::error::{Field, ValidationError};
use crate::ids::{MovieId, UserId};
use crate::rating::Rating;

/// Login form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: UserId,
    pub password: String,
}

impl Credentials {
    pub fn parse(user_id: &str, password: &str) -> Result<Self, ValidationError> {
        let user_id = user_id.trim();
        let password = password.trim();
        if user_id.is_empty() || password.is_empty() {
            return Err(ValidationError::CredentialsRequired);
        }
        Ok(Self {
            user_id: UserId::parse(user_id)?,
            password: password.to_string(),
        })
    }
}

/// Review fields shared by the add and edit forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewInput {
    pub movie_id: MovieId,
    pub rating: Rating,
    pub text: String,
}

impl ReviewInput {
    /// Validation for the "Add Review" form: movie id, then rating, then text.
    pub fn parse_new(movie_id: &str, rating: &str, text: &str) -> Result<Self, ValidationError> {
        let movie_id = MovieId::parse(movie_id)?;
        let rating: Rating = rating.parse()?;
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::Empty(Field::ReviewText));
        }
        Ok(Self {
            movie_id,
            rating,
            text: text.to_string(),
        })
    }

    /// Validation for the "Edit Review" form: every field present, then the
    /// rating, then the movie id.
    pub fn parse_edit(movie_id: &str, rating: &str, text: &str) -> Result<Self, ValidationError> {
        let (movie_id, rating, text) = (movie_id.trim(), rating.trim(), text.trim());
        if movie_id.is_empty() || rating.is_empty() || text.is_empty() {
            return Err(ValidationError::AllFieldsRequired);
        }
        let rating: Rating = rating.parse().map_err(|_| ValidationError::InvalidRating)?;
        Ok(Self {
            movie_id: MovieId::parse(movie_id)?,
            rating,
            text: text.to_string(),
        })
    }
}

/// Admin "Modify User" form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdate {
    pub user_id: UserId,
    pub name: String,
    pub admin: AdminFlag,
}

impl UserUpdate {
    pub fn parse(user_id: &str, name: &str, admin: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        match (UserId::parse(user_id), admin.parse::<AdminFlag>()) {
            (Ok(user_id), Ok(admin)) if !name.is_empty() => Ok(Self {
                user_id,
                name: name.to_string(),
                admin,
            }),
            _ => Err(ValidationError::InvalidUserUpdate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "secret")]
    #[case("12", "   ")]
    #[case(" ", "")]
    fn credentials_require_both_fields(#[case] id: &str, #[case] pwd: &str) {
        assert_eq!(
            Credentials::parse(id, pwd),
            Err(ValidationError::CredentialsRequired)
        );
    }

    #[test]
    fn credentials_trim_the_password() {
        let creds = Credentials::parse(" 12 ", "  hunter2 ").unwrap();
        assert_eq!(creds.user_id, UserId::new(12));
        assert_eq!(creds.password, "hunter2");
    }

    #[test]
    fn credentials_reject_non_numeric_ids() {
        assert_eq!(
            Credentials::parse("bob", "pw").unwrap_err().to_string(),
            "User ID must be a number!"
        );
    }

    #[test]
    fn new_review_checks_movie_id_before_rating() {
        assert_eq!(
            ReviewInput::parse_new("x", "9", ""),
            Err(ValidationError::NotANumber(Field::MovieId))
        );
        assert_eq!(
            ReviewInput::parse_new("3", "9", ""),
            Err(ValidationError::RatingOutOfBounds)
        );
        assert_eq!(
            ReviewInput::parse_new("3", "four", "ok"),
            Err(ValidationError::NotANumber(Field::Rating))
        );
        assert_eq!(
            ReviewInput::parse_new("3", "4", "   "),
            Err(ValidationError::Empty(Field::ReviewText))
        );
    }

    #[test]
    fn new_review_keeps_trimmed_text() {
        let input = ReviewInput::parse_new("3", "4.5", "  Loved it \n").unwrap();
        assert_eq!(input.movie_id, MovieId::new(3));
        assert_eq!(input.rating.to_string(), "4.5");
        assert_eq!(input.text, "Loved it");
    }

    #[test]
    fn edit_review_requires_every_field_first() {
        assert_eq!(
            ReviewInput::parse_edit("", "x", "text"),
            Err(ValidationError::AllFieldsRequired)
        );
        assert_eq!(
            ReviewInput::parse_edit("abc", "7", "text"),
            Err(ValidationError::InvalidRating)
        );
        assert_eq!(
            ReviewInput::parse_edit("abc", "2", "text"),
            Err(ValidationError::NotANumber(Field::MovieId))
        );
        assert!(ReviewInput::parse_edit("5", "2", "text").is_ok());
    }

    #[rstest]
    #[case("abc", "Ann", "Y")]
    #[case("4", "  ", "N")]
    #[case("4", "Ann", "maybe")]
    fn user_update_rejects_invalid_forms(#[case] id: &str, #[case] name: &str, #[case] admin: &str) {
        assert_eq!(
            UserUpdate::parse(id, name, admin),
            Err(ValidationError::InvalidUserUpdate)
        );
    }

    #[test]
    fn user_update_normalises_the_admin_flag() {
        let update = UserUpdate::parse("4", " Ann ", "y").unwrap();
        assert_eq!(update.user_id, UserId::new(4));
        assert_eq!(update.name, "Ann");
        assert_eq!(update.admin, AdminFlag::Yes);
    }
}
