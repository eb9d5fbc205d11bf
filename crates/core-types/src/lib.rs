//! # Core Types
//!
//! The vocabulary shared by every other crate: typed keys, ratings, the admin
//! flag, the records read back from the store, and the validated form inputs
//! that are allowed to reach it.

pub mod enums;
pub mod error;
pub mod forms;
pub mod ids;
pub mod rating;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::AdminFlag;
pub use error::{Field, ValidationError};
pub use forms::{Credentials, ReviewInput, UserUpdate};
pub use ids::{MovieId, ReviewId, UserId, parse_digits};
pub use rating::Rating;
pub use structs::{
    LoginIdentity, Movie, MovieAverage, MovieDetails, Review, TopRatedMovie, UserAccount,
    UserReview,
};
