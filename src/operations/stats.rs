use serde::Serialize;

use crate::ingest::NormalizeReport;
use crate::source::{CatalogOrigin, LoadedCatalog};

/// Summary of the loaded catalog.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResult {
    pub origin: CatalogOrigin,
    pub source: String,
    pub movies: usize,
    pub genres: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_min: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_max: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_max: Option<f64>,
    /// Row counters from normalization (dataset sources only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<NormalizeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[must_use]
pub fn catalog_stats(loaded: &LoadedCatalog) -> StatsResult {
    let catalog = &loaded.catalog;
    let years = catalog.year_span();
    let ratings = catalog.rating_span();

    StatsResult {
        origin: loaded.origin,
        source: loaded.source_name.clone(),
        movies: catalog.len(),
        genres: catalog.genres().len(),
        year_min: years.map(|(lo, _)| lo),
        year_max: years.map(|(_, hi)| hi),
        rating_min: ratings.map(|(lo, _)| lo),
        rating_max: ratings.map(|(_, hi)| hi),
        rows: loaded.report.clone(),
        warning: loaded.warning.clone(),
    }
}
