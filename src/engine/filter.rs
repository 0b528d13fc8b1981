use serde::Serialize;

use crate::error::{CineError, Result};
use crate::models::{Catalog, MovieRecord};

/// Lowest accepted rating threshold.
pub const MIN_RATING_FLOOR: f64 = 0.0;
/// Highest accepted rating threshold.
pub const MIN_RATING_CEILING: f64 = 10.0;

/// Genre predicate: either no constraint or membership of one tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenreChoice {
    Any,
    Tag(String),
}

impl GenreChoice {
    #[must_use]
    pub fn matches(&self, movie: &MovieRecord) -> bool {
        match self {
            Self::Any => true,
            Self::Tag(tag) => movie.has_genre(tag),
        }
    }
}

/// Inclusive release year bounds. `min > max` matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    #[must_use]
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }
}

/// User-chosen predicate parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSpec {
    pub genre: GenreChoice,
    pub min_rating: f64,
    pub years: YearRange,
}

impl FilterSpec {
    /// Build a spec, rejecting thresholds outside `[0.0, 10.0]`.
    pub fn new(genre: GenreChoice, min_rating: f64, years: YearRange) -> Result<Self> {
        if !min_rating.is_finite()
            || !(MIN_RATING_FLOOR..=MIN_RATING_CEILING).contains(&min_rating)
        {
            return Err(CineError::InvalidFilter(format!(
                "min rating must be between {MIN_RATING_FLOOR} and {MIN_RATING_CEILING}, got {min_rating}"
            )));
        }
        Ok(Self {
            genre,
            min_rating,
            years,
        })
    }

    /// A spec that every record of `catalog` satisfies.
    #[must_use]
    pub fn permissive(catalog: &Catalog) -> Self {
        let (min, max) = catalog.year_span().unwrap_or((i32::MIN, i32::MAX));
        Self {
            genre: GenreChoice::Any,
            min_rating: MIN_RATING_FLOOR,
            years: YearRange::new(min, max),
        }
    }

    #[must_use]
    pub fn matches(&self, movie: &MovieRecord) -> bool {
        movie.avg_rating >= self.min_rating
            && self.years.contains(movie.year)
            && self.genre.matches(movie)
    }
}

/// Records of `catalog` satisfying every predicate of `spec`, in catalog order.
#[must_use]
pub fn apply_filter(catalog: &Catalog, spec: &FilterSpec) -> Vec<MovieRecord> {
    catalog
        .movies()
        .iter()
        .filter(|m| spec.matches(m))
        .cloned()
        .collect()
}
