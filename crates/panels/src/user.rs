use crate::error::PanelError;
use crate::view::TableView;
use crate::ActionOutcome;
use core_types::{ReviewInput, UserId};
use database::DbRepository;

/// The panel shown to a regular user: their own reviews, the movie list and
/// the top-rated titles, plus forms to add and edit reviews.
#[derive(Clone)]
pub struct UserPanel {
    repo: DbRepository,
    user_id: UserId,
    name: String,
}

impl UserPanel {
    pub fn new(repo: DbRepository, user_id: UserId, name: impl Into<String>) -> Self {
        Self {
            repo,
            user_id,
            name: name.into(),
        }
    }

    pub fn welcome(&self) -> String {
        format!("Welcome, {} (User)", self.name)
    }

    pub async fn my_reviews(&self) -> Result<TableView, PanelError> {
        let reviews = self.repo.reviews_by_user(self.user_id).await?;
        Ok(TableView::new("My Reviews", &reviews))
    }

    pub async fn all_movies(&self) -> Result<TableView, PanelError> {
        let movies = self.repo.movies().await?;
        Ok(TableView::new("All Movies", &movies))
    }

    pub async fn top_rated(&self) -> Result<TableView, PanelError> {
        let movies = self.repo.top_rated_movies().await?;
        Ok(TableView::new("Top Rated Movies", &movies))
    }

    pub async fn add_review(
        &self,
        movie_id: &str,
        rating: &str,
        text: &str,
    ) -> Result<ActionOutcome, PanelError> {
        let input = ReviewInput::parse_new(movie_id, rating, text)?;
        self.repo.add_review(self.user_id, &input).await?;
        tracing::info!(user_id = %self.user_id, movie_id = %input.movie_id, "Review added.");
        Ok(self.with_refreshed_reviews("Review added successfully!").await)
    }

    pub async fn edit_review(
        &self,
        movie_id: &str,
        rating: &str,
        text: &str,
    ) -> Result<ActionOutcome, PanelError> {
        let input = ReviewInput::parse_edit(movie_id, rating, text)?;
        self.repo.edit_review(self.user_id, &input).await?;
        tracing::info!(user_id = %self.user_id, movie_id = %input.movie_id, "Review updated.");
        Ok(self.with_refreshed_reviews("Review updated successfully!").await)
    }

    async fn with_refreshed_reviews(&self, message: &'static str) -> ActionOutcome {
        ActionOutcome::refreshed(message, self.my_reviews().await)
    }
}
