use crate::error::StoreError;
use crate::queries;
use crate::store::Store;
use crate::value::{Param, Row};
use core_types::{
    AdminFlag, Credentials, LoginIdentity, Movie, MovieAverage, MovieDetails, MovieId, Review,
    ReviewId, ReviewInput, TopRatedMovie, UserAccount, UserId, UserReview, UserUpdate,
};
use std::sync::Arc;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the store. It names every query and procedure the screens use and
/// turns raw rows into typed records, but talks to the store only through
/// `Store::fetch` and `Store::call`.
#[derive(Clone)]
pub struct DbRepository {
    store: Arc<dyn Store>,
}

impl DbRepository {
    /// Creates a new `DbRepository` over a shared store.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    async fn fetch_as<T>(
        &self,
        query: &str,
        params: &[Param],
        decode: fn(&Row) -> Result<T, StoreError>,
    ) -> Result<Vec<T>, StoreError> {
        let rows = self.store.fetch(query, params).await?;
        rows.iter().map(decode).collect()
    }

    /// Looks up the user matching the credentials. `None` means no such
    /// id/password pair.
    pub async fn find_login(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<LoginIdentity>, StoreError> {
        let params = [
            Param::from(credentials.user_id),
            Param::from(credentials.password.as_str()),
        ];
        let rows = self.store.fetch(queries::LOGIN, &params).await?;
        let Some(row) = rows.first() else {
            return Ok(None);
        };
        Ok(Some(LoginIdentity {
            name: row.text(0)?.to_string(),
            admin: AdminFlag::from_stored(row.opt_text(1)?.unwrap_or_default()),
        }))
    }

    /// Fetches the reviews written by one user.
    pub async fn reviews_by_user(&self, user_id: UserId) -> Result<Vec<UserReview>, StoreError> {
        self.fetch_as(queries::USER_REVIEWS, &[user_id.into()], |row| {
            Ok(UserReview {
                review_id: ReviewId::new(row.int(0)?),
                movie_id: MovieId::new(row.int(1)?),
                rating: row.decimal(2)?,
                text: row.opt_text(3)?.unwrap_or_default().to_string(),
            })
        })
        .await
    }

    /// Fetches every movie with its director and genre references.
    pub async fn movies(&self) -> Result<Vec<Movie>, StoreError> {
        self.fetch_as(queries::ALL_MOVIES, &[], |row| {
            Ok(Movie {
                movie_id: MovieId::new(row.int(0)?),
                title: row.text(1)?.to_string(),
                director_id: row.opt_int(2)?,
                genre_id: row.opt_int(3)?,
            })
        })
        .await
    }

    /// Fetches titles averaging at least 4.5.
    pub async fn top_rated_movies(&self) -> Result<Vec<TopRatedMovie>, StoreError> {
        self.fetch_as(queries::TOP_RATED_MOVIES, &[], |row| {
            Ok(TopRatedMovie {
                title: row.text(0)?.to_string(),
                average: row.decimal(1)?,
            })
        })
        .await
    }

    /// Fetches every user account.
    pub async fn users(&self) -> Result<Vec<UserAccount>, StoreError> {
        self.fetch_as(queries::ALL_USERS, &[], |row| {
            Ok(UserAccount {
                user_id: UserId::new(row.int(0)?),
                name: row.text(1)?.to_string(),
                admin: AdminFlag::from_stored(row.opt_text(2)?.unwrap_or_default()),
            })
        })
        .await
    }

    /// Fetches every movie with its release year and duration.
    pub async fn movie_details(&self) -> Result<Vec<MovieDetails>, StoreError> {
        self.fetch_as(queries::MOVIE_DETAILS, &[], |row| {
            Ok(MovieDetails {
                movie_id: MovieId::new(row.int(0)?),
                title: row.text(1)?.to_string(),
                release_year: row.opt_int(2)?,
                duration: row.opt_int(3)?,
            })
        })
        .await
    }

    /// Fetches every review from every user.
    pub async fn reviews(&self) -> Result<Vec<Review>, StoreError> {
        self.fetch_as(queries::ALL_REVIEWS, &[], |row| {
            Ok(Review {
                review_id: ReviewId::new(row.int(0)?),
                movie_id: MovieId::new(row.int(1)?),
                user_id: UserId::new(row.int(2)?),
                rating: row.decimal(3)?,
                text: row.opt_text(4)?.unwrap_or_default().to_string(),
            })
        })
        .await
    }

    /// Fetches the average rating of every reviewed movie.
    pub async fn average_ratings(&self) -> Result<Vec<MovieAverage>, StoreError> {
        self.fetch_as(queries::AVERAGE_RATINGS, &[], decode_movie_average)
            .await
    }

    /// Like `average_ratings`, restricted to movies averaging at least 4.5.
    pub async fn top_rated_averages(&self) -> Result<Vec<MovieAverage>, StoreError> {
        self.fetch_as(queries::TOP_RATED_AVERAGES, &[], decode_movie_average)
            .await
    }

    pub async fn add_review(&self, user_id: UserId, input: &ReviewInput) -> Result<(), StoreError> {
        self.store
            .call(queries::ADD_REVIEW, &review_params(user_id, input))
            .await
    }

    pub async fn edit_review(&self, user_id: UserId, input: &ReviewInput) -> Result<(), StoreError> {
        self.store
            .call(queries::EDIT_REVIEW, &review_params(user_id, input))
            .await
    }

    pub async fn delete_user(&self, user_id: UserId) -> Result<(), StoreError> {
        self.store
            .call(queries::DELETE_USER, &[user_id.into()])
            .await
    }

    pub async fn modify_user(&self, update: &UserUpdate) -> Result<(), StoreError> {
        let params = [
            Param::from(update.user_id),
            Param::from(update.name.as_str()),
            Param::from(update.admin),
        ];
        self.store.call(queries::MODIFY_USER, &params).await
    }

    pub async fn delete_review(&self, review_id: ReviewId) -> Result<(), StoreError> {
        self.store
            .call(queries::DELETE_REVIEW, &[review_id.into()])
            .await
    }

    /// One trivial round-trip, used to verify connectivity.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.store.fetch(queries::PING, &[]).await.map(|_| ())
    }
}

fn review_params(user_id: UserId, input: &ReviewInput) -> [Param; 4] {
    [
        user_id.into(),
        input.movie_id.into(),
        input.rating.into(),
        input.text.as_str().into(),
    ]
}

fn decode_movie_average(row: &Row) -> Result<MovieAverage, StoreError> {
    Ok(MovieAverage {
        title: row.text(0)?.to_string(),
        movie_id: MovieId::new(row.int(1)?),
        average: row.decimal(2)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Invocation, ScriptedStore};
    use rust_decimal_macros::dec;

    fn repository(store: ScriptedStore) -> (DbRepository, Arc<ScriptedStore>) {
        let store = Arc::new(store);
        (DbRepository::new(store.clone()), store)
    }

    #[tokio::test]
    async fn login_binds_id_and_password_in_order() {
        let (repo, store) = repository(
            ScriptedStore::new().with_rows(queries::LOGIN, vec![crate::row!["Ann", "Y"]]),
        );
        let creds = Credentials::parse("7", "pw").unwrap();

        let identity = repo.find_login(&creds).await.unwrap().unwrap();

        assert_eq!(identity.name, "Ann");
        assert!(identity.admin.is_admin());
        assert_eq!(
            store.invocations(),
            vec![Invocation::Fetch {
                query: queries::LOGIN.to_string(),
                params: vec![Param::Int(7), Param::Text("pw".to_string())],
            }]
        );
    }

    #[tokio::test]
    async fn login_without_a_match_is_none() {
        let (repo, _) = repository(ScriptedStore::new());
        let creds = Credentials::parse("7", "wrong").unwrap();
        assert_eq!(repo.find_login(&creds).await.unwrap(), None);
    }

    #[tokio::test]
    async fn padded_admin_flags_still_count() {
        let (repo, _) = repository(
            ScriptedStore::new().with_rows(queries::LOGIN, vec![crate::row!["Bo", "Y "]]),
        );
        let creds = Credentials::parse("8", "pw").unwrap();
        let identity = repo.find_login(&creds).await.unwrap().unwrap();
        assert!(identity.admin.is_admin());
    }

    #[tokio::test]
    async fn row_count_matches_the_store() {
        let rows = vec![
            crate::row![1_i64, 10_i64, dec!(4.5), "Great"],
            crate::row![2_i64, 11_i64, 3_i64, None::<String>],
        ];
        let (repo, _) = repository(ScriptedStore::new().with_rows(queries::USER_REVIEWS, rows));

        let reviews = repo.reviews_by_user(UserId::new(1)).await.unwrap();

        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].rating, dec!(4.5));
        assert_eq!(reviews[1].rating, dec!(3));
        assert_eq!(reviews[1].text, "");
    }

    #[tokio::test]
    async fn zero_rows_is_an_empty_list() {
        let (repo, _) = repository(ScriptedStore::new());
        assert!(repo.movies().await.unwrap().is_empty());
        assert!(repo.top_rated_averages().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn movies_keep_missing_references_as_none() {
        let (repo, _) = repository(ScriptedStore::new().with_rows(
            queries::ALL_MOVIES,
            vec![crate::row![3_i64, "Heat", 2_i64, None::<i64>]],
        ));
        let movies = repo.movies().await.unwrap();
        assert_eq!(movies[0].director_id, Some(2));
        assert_eq!(movies[0].genre_id, None);
    }

    #[tokio::test]
    async fn malformed_rows_surface_as_decode_errors() {
        let (repo, _) = repository(
            ScriptedStore::new().with_rows(queries::ALL_USERS, vec![crate::row!["x", "Ann", "N"]]),
        );
        assert!(matches!(
            repo.users().await,
            Err(StoreError::Decode { index: 0, .. })
        ));
    }

    #[tokio::test]
    async fn add_review_passes_parameters_in_procedure_order() {
        let (repo, store) = repository(ScriptedStore::new());
        let input = ReviewInput::parse_new("12", "4.5", "Tense").unwrap();

        repo.add_review(UserId::new(3), &input).await.unwrap();

        assert_eq!(
            store.invocations(),
            vec![Invocation::Call {
                procedure: queries::ADD_REVIEW.to_string(),
                params: vec![
                    Param::Int(3),
                    Param::Int(12),
                    Param::Decimal(dec!(4.5)),
                    Param::Text("Tense".to_string()),
                ],
            }]
        );
    }

    #[tokio::test]
    async fn modify_user_sends_the_upper_case_flag() {
        let (repo, store) = repository(ScriptedStore::new());
        let update = UserUpdate::parse("4", "Ann", "y").unwrap();

        repo.modify_user(&update).await.unwrap();

        assert_eq!(
            store.invocations(),
            vec![Invocation::Call {
                procedure: queries::MODIFY_USER.to_string(),
                params: vec![
                    Param::Int(4),
                    Param::Text("Ann".to_string()),
                    Param::Text("Y".to_string()),
                ],
            }]
        );
    }

    #[tokio::test]
    async fn procedure_rejections_carry_the_store_message() {
        let (repo, _) = repository(
            ScriptedStore::new().with_call_error(queries::DELETE_REVIEW, "Review 99 does not exist"),
        );
        let err = repo.delete_review(ReviewId::new(99)).await.unwrap_err();
        assert_eq!(err.to_string(), "Review 99 does not exist");
    }
}
