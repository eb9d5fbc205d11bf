use crate::error::{Field, ValidationError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A review score in the closed range `[0, 5]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Rating(Decimal);

impl Rating {
    pub const MIN: Decimal = dec!(0);
    pub const MAX: Decimal = dec!(5);

    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value < Self::MIN || value > Self::MAX {
            return Err(ValidationError::RatingOutOfBounds);
        }
        Ok(Self(value))
    }

    pub fn value(self) -> Decimal {
        self.0
    }
}

impl FromStr for Rating {
    type Err = ValidationError;

    /// Parses a rating typed by the user. Non-numeric input and numbers
    /// outside the bounds produce different errors.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| ValidationError::NotANumber(Field::Rating))?;
        Self::new(value)
    }
}

impl TryFrom<Decimal> for Rating {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for Decimal {
    fn from(rating: Rating) -> Decimal {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0")]
    #[case("5")]
    #[case("4.5")]
    #[case(" 3 ")]
    #[case("2.25")]
    #[case("4e0")]
    fn accepts_ratings_within_bounds(#[case] input: &str) {
        assert!(input.parse::<Rating>().is_ok(), "{input} should parse");
    }

    #[rstest]
    #[case("5.01")]
    #[case("-0.1")]
    #[case("6")]
    #[case("1e1")]
    fn rejects_ratings_out_of_bounds(#[case] input: &str) {
        assert_eq!(
            input.parse::<Rating>(),
            Err(ValidationError::RatingOutOfBounds)
        );
    }

    #[rstest]
    #[case("")]
    #[case("five")]
    #[case("nan")]
    #[case("4,5")]
    fn rejects_non_numeric_ratings(#[case] input: &str) {
        assert_eq!(
            input.parse::<Rating>(),
            Err(ValidationError::NotANumber(Field::Rating))
        );
    }

    #[test]
    fn display_drops_trailing_zeros() {
        let rating: Rating = "4.50".parse().unwrap();
        assert_eq!(rating.to_string(), "4.5");
    }
}
