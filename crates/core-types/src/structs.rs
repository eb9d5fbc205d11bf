use crate::enums::AdminFlag;
use crate::ids::{MovieId, ReviewId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The name and role returned by a successful login lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginIdentity {
    pub name: String,
    pub admin: AdminFlag,
}

/// A user account as listed on the admin panel. The password never leaves the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub user_id: UserId,
    pub name: String,
    pub admin: AdminFlag,
}

/// A movie as listed for regular users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub movie_id: MovieId,
    pub title: String,
    pub director_id: Option<i64>,
    pub genre_id: Option<i64>,
}

/// A movie as listed for admins, with release year and running time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub movie_id: MovieId,
    pub title: String,
    pub release_year: Option<i64>,
    /// Running time in minutes.
    pub duration: Option<i64>,
}

/// One of the logged-in user's own reviews.
///
/// Ratings are kept as the raw decimal the store returned, so rows written
/// by other tools outside `[0, 5]` still display instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReview {
    pub review_id: ReviewId,
    pub movie_id: MovieId,
    pub rating: Decimal,
    pub text: String,
}

/// A review from any user, as listed on the admin panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub review_id: ReviewId,
    pub movie_id: MovieId,
    pub user_id: UserId,
    pub rating: Decimal,
    pub text: String,
}

/// A title whose average rating clears the top-rated threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopRatedMovie {
    pub title: String,
    pub average: Decimal,
}

/// The average rating of one movie, rounded to two places by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieAverage {
    pub title: String,
    pub movie_id: MovieId,
    pub average: Decimal,
}
