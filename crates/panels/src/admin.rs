use crate::error::PanelError;
use crate::view::TableView;
use crate::ActionOutcome;
use core_types::{ReviewId, UserId, UserUpdate};
use database::DbRepository;

/// The admin panel: read-only listings of every table and the average
/// ratings, plus user and review maintenance.
#[derive(Clone)]
pub struct AdminPanel {
    repo: DbRepository,
    name: String,
}

impl AdminPanel {
    pub fn new(repo: DbRepository, name: impl Into<String>) -> Self {
        Self {
            repo,
            name: name.into(),
        }
    }

    pub fn welcome(&self) -> String {
        format!("Welcome, {} (Admin)", self.name)
    }

    pub async fn users(&self) -> Result<TableView, PanelError> {
        let users = self.repo.users().await?;
        Ok(TableView::new("Users", &users))
    }

    pub async fn movies(&self) -> Result<TableView, PanelError> {
        let movies = self.repo.movie_details().await?;
        Ok(TableView::new("Movies", &movies))
    }

    pub async fn reviews(&self) -> Result<TableView, PanelError> {
        let reviews = self.repo.reviews().await?;
        Ok(TableView::new("Reviews", &reviews))
    }

    pub async fn average_ratings(&self) -> Result<TableView, PanelError> {
        let averages = self.repo.average_ratings().await?;
        Ok(TableView::new("Average Ratings", &averages))
    }

    pub async fn top_rated(&self) -> Result<TableView, PanelError> {
        let averages = self.repo.top_rated_averages().await?;
        Ok(TableView::new("Top Rated Movies", &averages))
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<ActionOutcome, PanelError> {
        let user_id = UserId::parse(user_id)?;
        self.repo.delete_user(user_id).await?;
        tracing::info!(admin = %self.name, %user_id, "User deleted.");
        Ok(ActionOutcome::refreshed("User deleted successfully!", self.users().await))
    }

    pub async fn modify_user(
        &self,
        user_id: &str,
        name: &str,
        admin: &str,
    ) -> Result<ActionOutcome, PanelError> {
        let update = UserUpdate::parse(user_id, name, admin)?;
        self.repo.modify_user(&update).await?;
        tracing::info!(admin = %self.name, user_id = %update.user_id, "User modified.");
        Ok(ActionOutcome::refreshed("User modified successfully!", self.users().await))
    }

    pub async fn delete_review(&self, review_id: &str) -> Result<ActionOutcome, PanelError> {
        let review_id = ReviewId::parse(review_id)?;
        self.repo.delete_review(review_id).await?;
        tracing::info!(admin = %self.name, %review_id, "Review deleted.");
        Ok(ActionOutcome::refreshed("Review deleted successfully!", self.reviews().await))
    }
}
