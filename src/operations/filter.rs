//! Filter flags -> `FilterSpec`, and the filter listing.

use serde::Serialize;

use super::genres::resolve_genre;
use crate::config::FilterSettings;
use crate::engine::{apply_filter, FilterSpec, YearRange};
use crate::error::Result;
use crate::models::{Catalog, MovieRecord};

/// Filter values as typed by the user; anything left out gets a default.
#[derive(Debug, Clone, Default)]
pub struct FilterArgs {
    pub genre: Option<String>,
    pub min_rating: Option<f64>,
    pub from_year: Option<i32>,
    pub to_year: Option<i32>,
}

/// Result of listing the filtered catalog.
#[derive(Debug, Clone, Serialize)]
pub struct FilterResult {
    pub filter: FilterSpec,
    /// Number of records matching the filter.
    pub found: usize,
    /// Number of records included below (after the limit).
    pub shown: usize,
    pub movies: Vec<MovieRecord>,
}

/// Resolve user flags against the catalog and configured defaults.
///
/// Default years run from `max(default_start_year, oldest year)` to the
/// newest year in the catalog.
pub fn build_filter_spec(
    catalog: &Catalog,
    args: &FilterArgs,
    defaults: &FilterSettings,
) -> Result<FilterSpec> {
    let genre = resolve_genre(catalog, args.genre.as_deref())?;
    let min_rating = args.min_rating.unwrap_or(defaults.min_rating);

    let start = defaults.default_start_year;
    let (oldest, newest) = catalog.year_span().unwrap_or((start, start));
    let years = YearRange::new(
        args.from_year.unwrap_or_else(|| start.max(oldest)),
        args.to_year.unwrap_or(newest),
    );

    FilterSpec::new(genre, min_rating, years)
}

/// Apply `spec` and keep at most `limit` records in the listing.
#[must_use]
pub fn run_filter(catalog: &Catalog, spec: &FilterSpec, limit: usize) -> FilterResult {
    let mut movies = apply_filter(catalog, spec);
    let found = movies.len();
    movies.truncate(limit);

    FilterResult {
        filter: spec.clone(),
        found,
        shown: movies.len(),
        movies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GenreChoice;
    use crate::ingest::sample_catalog;

    #[test]
    fn defaults_follow_settings_and_catalog() {
        let catalog = sample_catalog();
        let spec =
            build_filter_spec(&catalog, &FilterArgs::default(), &FilterSettings::default())
                .unwrap();
        assert_eq!(spec.genre, GenreChoice::Any);
        assert!((spec.min_rating - 7.0).abs() < f64::EPSILON);
        assert_eq!(spec.years, YearRange::new(1980, 2022));
    }

    #[test]
    fn start_year_never_below_oldest_movie() {
        let catalog = sample_catalog();
        let settings = FilterSettings {
            min_rating: 0.0,
            default_start_year: 1900,
        };
        let spec = build_filter_spec(&catalog, &FilterArgs::default(), &settings).unwrap();
        assert_eq!(spec.years.min, 1972);
    }

    #[test]
    fn explicit_flags_override_defaults() {
        let catalog = sample_catalog();
        let args = FilterArgs {
            genre: Some("crime".into()),
            min_rating: Some(9.0),
            from_year: Some(1970),
            to_year: Some(1980),
        };
        let spec = build_filter_spec(&catalog, &args, &FilterSettings::default()).unwrap();
        let result = run_filter(&catalog, &spec, 10);
        assert_eq!(result.found, 1);
        assert_eq!(result.movies[0].title, "The Godfather");
    }

    #[test]
    fn limit_truncates_listing_not_count() {
        let catalog = sample_catalog();
        let spec = FilterSpec::permissive(&catalog);
        let result = run_filter(&catalog, &spec, 3);
        assert_eq!(result.found, catalog.len());
        assert_eq!(result.shown, 3);
        assert_eq!(result.movies.len(), 3);
    }

    #[test]
    fn out_of_range_rating_is_rejected() {
        let catalog = sample_catalog();
        let args = FilterArgs {
            min_rating: Some(11.0),
            ..FilterArgs::default()
        };
        assert!(build_filter_spec(&catalog, &args, &FilterSettings::default()).is_err());
    }
}
