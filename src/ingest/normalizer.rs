//! Dataset normalization: item table + ratings table -> `MovieRecord`s.
//!
//! The ratings table is streamed into per-item totals, then the item table is
//! inner-joined against those totals. Rows that cannot be parsed, or that end
//! up without a year or a rating, are counted and skipped.

use std::collections::HashMap;
use std::io::Read;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CineError, Result};
use crate::models::MovieRecord;

/// One row of the item table (`movies.csv`).
#[derive(Debug, Clone, Deserialize)]
pub struct ItemRow {
    #[serde(rename = "movieId")]
    pub movie_id: i64,
    pub title: String,
    #[serde(default)]
    pub genres: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub year: Option<i32>,
    #[serde(default)]
    pub overview: Option<String>,
}

/// One row of the ratings table (`ratings.csv`).
#[derive(Debug, Clone, Deserialize)]
pub struct RatingRow {
    #[serde(rename = "movieId")]
    pub movie_id: i64,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub rating: Option<f64>,
}

/// Counters describing what happened to the raw rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    pub items_read: usize,
    pub ratings_read: usize,
    pub kept: usize,
    /// Item rows that could not be parsed at all.
    pub malformed_items: usize,
    /// Rating rows with an unparseable id or rating.
    pub malformed_ratings: usize,
    pub missing_year: usize,
    /// Items with no ratings (dropped by the inner join).
    pub missing_rating: usize,
}

/// Pulls a four digit year out of titles like "Toy Story (1995)".
#[derive(Debug, Clone)]
pub struct YearExtractor {
    pattern: Regex,
}

impl YearExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"\((\d{4})\)").expect("year pattern must compile"),
        }
    }

    #[must_use]
    pub fn extract(&self, title: &str) -> Option<i32> {
        self.pattern
            .captures(title)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }
}

impl Default for YearExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Running per-item rating totals.
#[derive(Debug, Clone, Default)]
pub struct RatingAccumulator {
    totals: HashMap<i64, (f64, u32)>,
}

impl RatingAccumulator {
    pub fn add(&mut self, movie_id: i64, rating: f64) {
        let entry = self.totals.entry(movie_id).or_insert((0.0, 0));
        entry.0 += rating;
        entry.1 += 1;
    }

    /// Mean rating for an item, `None` if it was never rated.
    #[must_use]
    pub fn average(&self, movie_id: i64) -> Option<f64> {
        self.totals
            .get(&movie_id)
            .filter(|(_, count)| *count > 0)
            .map(|(sum, count)| sum / f64::from(*count))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Normalize the two dataset tables into records.
///
/// `rating_scale` multiplies each average before rounding (1.0 keeps the
/// dataset's native scale).
pub fn normalize_tables<I: Read, R: Read>(
    items: I,
    ratings: R,
    rating_scale: f64,
) -> Result<(Vec<MovieRecord>, NormalizeReport)> {
    let mut report = NormalizeReport::default();
    let accumulator = accumulate_ratings(ratings, &mut report)?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(items);
    require_columns(&mut reader, "movies.csv", &["movieId", "title"])?;

    let years = YearExtractor::new();
    let mut movies = Vec::new();

    for row in reader.deserialize::<ItemRow>() {
        report.items_read += 1;
        let Ok(row) = row else {
            report.malformed_items += 1;
            continue;
        };

        let Some(year) = row.year.or_else(|| years.extract(&row.title)) else {
            report.missing_year += 1;
            continue;
        };

        let Some(avg) = accumulator.average(row.movie_id) else {
            report.missing_rating += 1;
            continue;
        };

        movies.push(MovieRecord::new(
            row.title,
            year,
            &row.genres,
            avg * rating_scale,
            row.overview.as_deref(),
        ));
    }

    report.kept = movies.len();
    tracing::debug!(?report, "normalized dataset tables");
    Ok((movies, report))
}

fn accumulate_ratings<R: Read>(
    ratings: R,
    report: &mut NormalizeReport,
) -> Result<RatingAccumulator> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(ratings);
    require_columns(&mut reader, "ratings.csv", &["movieId", "rating"])?;

    let mut accumulator = RatingAccumulator::default();
    for row in reader.deserialize::<RatingRow>() {
        report.ratings_read += 1;
        match row {
            Ok(RatingRow {
                movie_id,
                rating: Some(rating),
            }) if rating.is_finite() => accumulator.add(movie_id, rating),
            _ => report.malformed_ratings += 1,
        }
    }
    Ok(accumulator)
}

fn require_columns<R: Read>(
    reader: &mut csv::Reader<R>,
    table: &str,
    columns: &[&str],
) -> Result<()> {
    let headers = reader.headers()?;
    for column in columns {
        if !headers.iter().any(|h| h == *column) {
            return Err(CineError::MissingColumn {
                table: table.to_string(),
                column: (*column).to_string(),
            });
        }
    }
    Ok(())
}
