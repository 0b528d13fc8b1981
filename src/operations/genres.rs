use serde::Serialize;

use crate::engine::GenreChoice;
use crate::error::{CineError, Result};
use crate::models::Catalog;

/// Distinct genres available in the loaded catalog.
#[derive(Debug, Clone, Serialize)]
pub struct GenresResult {
    pub count: usize,
    pub genres: Vec<String>,
}

#[must_use]
pub fn list_genres(catalog: &Catalog) -> GenresResult {
    let genres = catalog.genres();
    GenresResult {
        count: genres.len(),
        genres,
    }
}

/// Map user input onto a genre of the catalog, ignoring case.
///
/// `None`, an empty string, or "any" select every genre.
pub fn resolve_genre(catalog: &Catalog, input: Option<&str>) -> Result<GenreChoice> {
    let Some(input) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(GenreChoice::Any);
    };
    if input.eq_ignore_ascii_case("any") {
        return Ok(GenreChoice::Any);
    }

    catalog
        .genres()
        .into_iter()
        .find(|g| g.eq_ignore_ascii_case(input))
        .map(GenreChoice::Tag)
        .ok_or_else(|| CineError::UnknownGenre {
            genre: input.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::sample_catalog;

    #[test]
    fn lists_sample_genres() {
        let result = list_genres(&sample_catalog());
        assert_eq!(result.count, result.genres.len());
        assert!(result.genres.contains(&"Crime".to_string()));
        assert!(result.genres.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn resolves_case_insensitively() {
        let catalog = sample_catalog();
        assert_eq!(
            resolve_genre(&catalog, Some("sci-fi")).unwrap(),
            GenreChoice::Tag("Sci-Fi".into())
        );
    }

    #[test]
    fn any_and_empty_mean_all_genres() {
        let catalog = sample_catalog();
        assert_eq!(resolve_genre(&catalog, None).unwrap(), GenreChoice::Any);
        assert_eq!(resolve_genre(&catalog, Some("ANY")).unwrap(), GenreChoice::Any);
        assert_eq!(resolve_genre(&catalog, Some("  ")).unwrap(), GenreChoice::Any);
    }

    #[test]
    fn unknown_genre_is_an_error() {
        let err = resolve_genre(&sample_catalog(), Some("Western")).unwrap_err();
        assert!(matches!(err, CineError::UnknownGenre { genre } if genre == "Western"));
    }
}
