use std::collections::BTreeSet;

use super::movie::MovieRecord;

/// Placeholder tags some datasets use for movies without genres.
const NO_GENRE_TAGS: &[&str] = &["(no genres listed)", "no genres listed"];

/// The full in-memory collection of records currently loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    movies: Vec<MovieRecord>,
}

impl Catalog {
    #[must_use]
    pub fn new(movies: Vec<MovieRecord>) -> Self {
        Self { movies }
    }

    #[must_use]
    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Distinct genre tags, sorted, without the "no genres" placeholder.
    #[must_use]
    pub fn genres(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .movies
            .iter()
            .flat_map(|m| m.genres.iter().map(String::as_str))
            .filter(|g| !NO_GENRE_TAGS.contains(g))
            .collect();
        set.into_iter().map(String::from).collect()
    }

    /// Inclusive (min, max) release year, `None` for an empty catalog.
    #[must_use]
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let min = self.movies.iter().map(|m| m.year).min()?;
        let max = self.movies.iter().map(|m| m.year).max()?;
        Some((min, max))
    }

    /// Inclusive (min, max) average rating, `None` for an empty catalog.
    #[must_use]
    pub fn rating_span(&self) -> Option<(f64, f64)> {
        let mut ratings = self.movies.iter().map(|m| m.avg_rating);
        let first = ratings.next()?;
        Some(ratings.fold((first, first), |(lo, hi), r| (lo.min(r), hi.max(r))))
    }
}

impl From<Vec<MovieRecord>> for Catalog {
    fn from(movies: Vec<MovieRecord>) -> Self {
        Self::new(movies)
    }
}
