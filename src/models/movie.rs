use serde::Serialize;

/// Overview text used when the source row has none.
pub const DEFAULT_OVERVIEW: &str = "No plot summary available for this title.";

/// A normalized movie entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecord {
    pub title: String,
    pub year: i32,
    /// Genre tags in the order they appeared in the source string.
    pub genres: Vec<String>,
    /// Average rating rounded to one decimal place.
    #[serde(rename = "rating")]
    pub avg_rating: f64,
    pub overview: String,
}

impl MovieRecord {
    /// Build a record from a pipe-delimited genre string and an optional overview.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        year: i32,
        genres: &str,
        avg_rating: f64,
        overview: Option<&str>,
    ) -> Self {
        Self {
            title: title.into(),
            year,
            genres: split_genres(genres),
            avg_rating: round_rating(avg_rating),
            overview: overview_or_default(overview),
        }
    }

    /// Exact, case-sensitive tag membership.
    #[must_use]
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    /// Genres joined for display, e.g. "Crime, Drama".
    #[must_use]
    pub fn genre_label(&self) -> String {
        self.genres.join(", ")
    }
}

/// Split a pipe-delimited genre string, keeping order and dropping empty tags.
#[must_use]
pub fn split_genres(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(String::from)
        .collect()
}

/// Round to one decimal place, half away from zero.
#[must_use]
pub fn round_rating(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn overview_or_default(overview: Option<&str>) -> String {
    match overview.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => DEFAULT_OVERVIEW.to_string(),
    }
}
