//! Every statement the application sends to the store.

// --- Read queries ---

pub const LOGIN: &str =
    "SELECT NAME, ADMIN FROM USER_TABLE WHERE USER_ID = $1 AND TRIM(PASSWORD) = $2";

pub const USER_REVIEWS: &str =
    "SELECT REVIEW_ID, MOVIE_ID, RATING, REVIEW_TEXT FROM REVIEW WHERE USER_ID = $1";

pub const ALL_MOVIES: &str = "SELECT MOVIE_ID, TITLE, DIRECTOR_ID, GENRE_ID FROM MOVIE";

pub const TOP_RATED_MOVIES: &str = r#"
    SELECT m.TITLE, ROUND(AVG(r.RATING), 2)
    FROM MOVIE m
    JOIN REVIEW r ON m.MOVIE_ID = r.MOVIE_ID
    GROUP BY m.TITLE
    HAVING AVG(r.RATING) >= 4.5
"#;

pub const ALL_USERS: &str = "SELECT USER_ID, NAME, ADMIN FROM USER_TABLE";

pub const MOVIE_DETAILS: &str = "SELECT MOVIE_ID, TITLE, RELEASE_YEAR, DURATION FROM MOVIE";

pub const ALL_REVIEWS: &str =
    "SELECT REVIEW_ID, MOVIE_ID, USER_ID, RATING, REVIEW_TEXT FROM REVIEW";

pub const AVERAGE_RATINGS: &str = r#"
    SELECT m.TITLE, r.MOVIE_ID, ROUND(AVG(r.RATING), 2)
    FROM REVIEW r
    JOIN MOVIE m ON r.MOVIE_ID = m.MOVIE_ID
    GROUP BY m.TITLE, r.MOVIE_ID
"#;

pub const TOP_RATED_AVERAGES: &str = r#"
    SELECT m.TITLE, r.MOVIE_ID, ROUND(AVG(r.RATING), 2)
    FROM REVIEW r
    JOIN MOVIE m ON r.MOVIE_ID = m.MOVIE_ID
    GROUP BY m.TITLE, r.MOVIE_ID
    HAVING AVG(r.RATING) >= 4.5
"#;

pub const PING: &str = "SELECT 1";

// --- Stored procedures ---

/// `ADD_REVIEW(user_id, movie_id, rating, text)`
pub const ADD_REVIEW: &str = "ADD_REVIEW";
/// `EDIT_REVIEW(user_id, movie_id, rating, text)`
pub const EDIT_REVIEW: &str = "EDIT_REVIEW";
/// `DELETE_USER(user_id)`
pub const DELETE_USER: &str = "DELETE_USER";
/// `MODIFY_USER(user_id, name, admin)`
pub const MODIFY_USER: &str = "MODIFY_USER";
/// `DELETE_REVIEW(review_id)`
pub const DELETE_REVIEW: &str = "DELETE_REVIEW";
