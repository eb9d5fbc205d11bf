use core_types::UserId;
use database::queries;
use database::row;
use database::testing::{Invocation, ScriptedStore};
use database::{DbRepository, Param};
use panels::UserPanel;
use rstest::rstest;
use rust_decimal_macros::dec;
use std::sync::Arc;

fn panel(store: ScriptedStore) -> (UserPanel, Arc<ScriptedStore>) {
    let store = Arc::new(store);
    let panel = UserPanel::new(DbRepository::new(store.clone()), UserId::new(3), "Bo");
    (panel, store)
}

#[tokio::test]
async fn my_reviews_are_scoped_to_the_logged_in_user() {
    let (panel, store) = panel(ScriptedStore::new().with_rows(
        queries::USER_REVIEWS,
        vec![row![1_i64, 10_i64, dec!(4.5), "Great"]],
    ));

    let view = panel.my_reviews().await.unwrap();

    assert_eq!(view.title, "My Reviews");
    assert_eq!(view.headers, vec!["Review ID", "Movie ID", "Rating", "Text"]);
    assert_eq!(view.rows, vec![vec!["1", "10", "4.5", "Great"]]);
    assert_eq!(
        store.invocations(),
        vec![Invocation::Fetch {
            query: queries::USER_REVIEWS.to_string(),
            params: vec![Param::Int(3)],
        }]
    );
}

#[tokio::test]
async fn empty_listings_render_headers_only() {
    let (panel, _) = panel(ScriptedStore::new());

    let movies = panel.all_movies().await.unwrap();
    let top = panel.top_rated().await.unwrap();

    assert!(movies.is_empty());
    assert_eq!(movies.headers, vec!["Movie ID", "Title", "Director ID", "Genre ID"]);
    assert!(top.is_empty());
    assert_eq!(top.headers, vec!["Title", "Avg Rating"]);
}

#[tokio::test]
async fn adding_a_review_refreshes_my_reviews() {
    let (panel, store) = panel(
        ScriptedStore::new()
            .with_call_success(queries::ADD_REVIEW)
            .with_rows(queries::USER_REVIEWS, vec![row![5_i64, 12_i64, dec!(4), "Tense"]]),
    );

    let outcome = panel.add_review("12", "4", "Tense").await.unwrap();

    assert_eq!(outcome.message, "Review added successfully!");
    let refreshed = outcome.refreshed.unwrap();
    assert_eq!(refreshed.rows.len(), 1);
    assert_eq!(store.called_procedures(), vec![queries::ADD_REVIEW]);
    assert_eq!(
        store.invocations()[0],
        Invocation::Call {
            procedure: queries::ADD_REVIEW.to_string(),
            params: vec![
                Param::Int(3),
                Param::Int(12),
                Param::Decimal(dec!(4)),
                Param::Text("Tense".to_string()),
            ],
        }
    );
}

#[rstest]
#[case("abc", "4", "Nice", "Movie ID must be a number!")]
#[case("12", "5.5", "Nice", "Rating must be between 0 and 5!")]
#[case("12", "-1", "Nice", "Rating must be between 0 and 5!")]
#[case("12", "good", "Nice", "Rating must be a number!")]
#[case("12", "4", "   ", "Review Text cannot be empty!")]
#[tokio::test]
async fn invalid_reviews_never_reach_the_store(
    #[case] movie_id: &str,
    #[case] rating: &str,
    #[case] text: &str,
    #[case] message: &str,
) {
    let (panel, store) = panel(ScriptedStore::new());

    let err = panel.add_review(movie_id, rating, text).await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(err.to_string(), message);
    assert!(store.is_untouched());
}

#[rstest]
#[case("12", "", "Nice", "All fields required!")]
#[case("12", "9", "Nice", "Rating must be a number between 0 and 5!")]
#[case("x", "4", "Nice", "Movie ID must be a number!")]
#[tokio::test]
async fn edit_form_checks_fields_in_screen_order(
    #[case] movie_id: &str,
    #[case] rating: &str,
    #[case] text: &str,
    #[case] message: &str,
) {
    let (panel, store) = panel(ScriptedStore::new());

    let err = panel.edit_review(movie_id, rating, text).await.unwrap_err();

    assert_eq!(err.to_string(), message);
    assert!(store.is_untouched());
}

#[tokio::test]
async fn store_rejections_are_shown_with_the_store_message() {
    let (panel, store) = panel(
        ScriptedStore::new().with_call_error(queries::EDIT_REVIEW, "Review for movie 12 does not exist"),
    );

    let err = panel.edit_review("12", "3", "Meh").await.unwrap_err();

    assert_eq!(err.to_string(), "Failed: Review for movie 12 does not exist");
    assert_eq!(store.called_procedures(), vec![queries::EDIT_REVIEW]);
    // No refresh after a failed change.
    assert_eq!(store.invocations().len(), 1);
}

#[tokio::test]
async fn a_failed_refresh_keeps_the_success_notice() {
    let (panel, _) = panel(
        ScriptedStore::new().with_fetch_error(queries::USER_REVIEWS, "relation does not exist"),
    );

    let outcome = panel.edit_review("12", "3", "Meh").await.unwrap();

    assert_eq!(outcome.message, "Review updated successfully!");
    assert_eq!(outcome.refreshed, None);
}
