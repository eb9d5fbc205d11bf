use core_types::{
    Movie, MovieAverage, MovieDetails, Review, TopRatedMovie, UserAccount, UserReview,
};

/// A listing ready for display: a title, column headers and string cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub title: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    pub fn new<T: Tabular>(title: &'static str, records: &[T]) -> Self {
        Self {
            title,
            headers: T::HEADERS.to_vec(),
            rows: records.iter().map(Tabular::cells).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A record that can be shown as one table row.
pub trait Tabular {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

fn optional(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl Tabular for UserReview {
    const HEADERS: &'static [&'static str] = &["Review ID", "Movie ID", "Rating", "Text"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.review_id.to_string(),
            self.movie_id.to_string(),
            self.rating.to_string(),
            self.text.clone(),
        ]
    }
}

impl Tabular for Movie {
    const HEADERS: &'static [&'static str] = &["Movie ID", "Title", "Director ID", "Genre ID"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.movie_id.to_string(),
            self.title.clone(),
            optional(self.director_id),
            optional(self.genre_id),
        ]
    }
}

impl Tabular for TopRatedMovie {
    const HEADERS: &'static [&'static str] = &["Title", "Avg Rating"];

    fn cells(&self) -> Vec<String> {
        vec![self.title.clone(), self.average.to_string()]
    }
}

impl Tabular for UserAccount {
    const HEADERS: &'static [&'static str] = &["User ID", "Name", "Admin"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.user_id.to_string(),
            self.name.clone(),
            self.admin.to_string(),
        ]
    }
}

impl Tabular for MovieDetails {
    const HEADERS: &'static [&'static str] = &["Movie ID", "Title", "Release Year", "Duration"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.movie_id.to_string(),
            self.title.clone(),
            optional(self.release_year),
            optional(self.duration),
        ]
    }
}

impl Tabular for Review {
    const HEADERS: &'static [&'static str] = &["Review ID", "Movie ID", "User ID", "Rating", "Text"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.review_id.to_string(),
            self.movie_id.to_string(),
            self.user_id.to_string(),
            self.rating.to_string(),
            self.text.clone(),
        ]
    }
}

impl Tabular for MovieAverage {
    const HEADERS: &'static [&'static str] = &["Title", "Movie ID", "Average Rating"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.movie_id.to_string(),
            self.average.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::MovieId;
    use rust_decimal_macros::dec;

    #[test]
    fn missing_references_render_blank() {
        let movie = Movie {
            movie_id: MovieId::new(1),
            title: "Heat".to_string(),
            director_id: None,
            genre_id: Some(4),
        };
        let view = TableView::new("All Movies", &[movie]);
        assert_eq!(view.headers, vec!["Movie ID", "Title", "Director ID", "Genre ID"]);
        assert_eq!(view.rows, vec![vec!["1", "Heat", "", "4"]]);
    }

    #[test]
    fn averages_render_as_returned() {
        let top = TopRatedMovie {
            title: "Heat".to_string(),
            average: dec!(4.75),
        };
        let view = TableView::new("Top Rated Movies", &[top]);
        assert_eq!(view.rows[0], vec!["Heat", "4.75"]);
    }
}
