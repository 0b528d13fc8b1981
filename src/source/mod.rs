//! Catalog sources: the embedded demo set and external datasets.
//!
//! External loads never fail outward. Any error on that path is logged and
//! answered with the demo catalog plus a warning for the user.

pub mod kaggle;
pub mod local;

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::config::{Config, Credentials};
use crate::error::{CineError, Result};
use crate::ingest::{normalize_tables, sample_catalog, NormalizeReport};
use crate::models::Catalog;

pub use kaggle::KaggleSource;
pub use local::LocalDirSource;

/// Item table file name inside a dataset directory.
pub const ITEMS_FILE: &str = "movies.csv";
/// Ratings table file name inside a dataset directory.
pub const RATINGS_FILE: &str = "ratings.csv";

/// Source selection as written in config or on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Kaggle when credentials are present, demo otherwise.
    Auto,
    Demo,
    Kaggle,
    Local,
}

impl FromStr for SourceKind {
    type Err = CineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(Self::Auto),
            "demo" => Ok(Self::Demo),
            "kaggle" => Ok(Self::Kaggle),
            "local" => Ok(Self::Local),
            other => Err(CineError::Config(format!(
                "unknown source '{other}': expected auto, demo, kaggle or local"
            ))),
        }
    }
}

/// A concrete catalog source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Demo,
    Kaggle,
    Local(PathBuf),
}

impl DataSource {
    /// Pick the source from the command line, then config, then credentials.
    ///
    /// A data directory always means the local source.
    pub fn resolve(
        requested: Option<SourceKind>,
        data_dir: Option<PathBuf>,
        config: &Config,
        has_credentials: bool,
    ) -> Result<Self> {
        if let Some(dir) = data_dir {
            return Ok(Self::Local(dir));
        }

        let kind = match requested {
            Some(kind) => kind,
            None => config.settings.source.default.parse()?,
        };

        match kind {
            SourceKind::Demo => Ok(Self::Demo),
            SourceKind::Kaggle => Ok(Self::Kaggle),
            SourceKind::Local => config.local_dataset_dir().map(Self::Local).ok_or_else(|| {
                CineError::Config(
                    "local source needs --data-dir or source.local_dir in config".into(),
                )
            }),
            SourceKind::Auto if has_credentials => Ok(Self::Kaggle),
            SourceKind::Auto => Ok(Self::Demo),
        }
    }
}

/// Paths of the two dataset tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetFiles {
    pub items: PathBuf,
    pub ratings: PathBuf,
}

impl DatasetFiles {
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            items: dir.join(ITEMS_FILE),
            ratings: dir.join(RATINGS_FILE),
        }
    }

    #[must_use]
    pub fn exist(&self) -> bool {
        self.items.is_file() && self.ratings.is_file()
    }

    /// Error for the first table that is not on disk.
    pub fn ensure_exist(&self) -> Result<()> {
        for path in [&self.items, &self.ratings] {
            if !path.is_file() {
                return Err(CineError::MissingFile {
                    path: path.display().to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Something that can produce the two dataset tables on local disk.
pub trait DatasetSource {
    /// Human-readable label, also used as the memoization key.
    fn name(&self) -> String;

    /// Make the tables available and return their paths.
    fn fetch(&self) -> Result<DatasetFiles>;
}

/// Where the loaded catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogOrigin {
    Demo,
    Dataset,
}

/// A catalog plus what the user should know about how it was obtained.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub origin: CatalogOrigin,
    pub source_name: String,
    /// Non-fatal notice, set when an external load fell back to demo data.
    pub warning: Option<String>,
    pub report: Option<NormalizeReport>,
}

impl LoadedCatalog {
    #[must_use]
    pub fn demo() -> Self {
        Self {
            catalog: sample_catalog(),
            origin: CatalogOrigin::Demo,
            source_name: "demo".into(),
            warning: None,
            report: None,
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.warning.is_some()
    }
}

/// Loads catalogs and memoizes successful external loads for its lifetime.
#[derive(Debug)]
pub struct CatalogLoader {
    rating_scale: f64,
    cache: HashMap<String, (Catalog, NormalizeReport)>,
}

impl CatalogLoader {
    #[must_use]
    pub fn new(rating_scale: f64) -> Self {
        Self {
            rating_scale,
            cache: HashMap::new(),
        }
    }

    /// Load the catalog for a resolved `DataSource`.
    pub fn load(&mut self, source: &DataSource, config: &Config) -> LoadedCatalog {
        match source {
            DataSource::Demo => LoadedCatalog::demo(),
            DataSource::Kaggle => {
                let kaggle = KaggleSource::from_config(config, Credentials::from_env());
                self.load_external(&kaggle)
            }
            DataSource::Local(dir) => self.load_external(&LocalDirSource::new(dir)),
        }
    }

    /// Load from an external source, falling back to the demo catalog on error.
    pub fn load_external(&mut self, source: &dyn DatasetSource) -> LoadedCatalog {
        let name = source.name();

        if let Some((catalog, report)) = self.cache.get(&name) {
            tracing::debug!(source = %name, "using memoized dataset");
            return LoadedCatalog {
                catalog: catalog.clone(),
                origin: CatalogOrigin::Dataset,
                source_name: name,
                warning: None,
                report: Some(report.clone()),
            };
        }

        match self.read_dataset(source) {
            Ok((catalog, report)) => {
                tracing::info!(source = %name, movies = catalog.len(), "loaded dataset");
                self.cache
                    .insert(name.clone(), (catalog.clone(), report.clone()));
                LoadedCatalog {
                    catalog,
                    origin: CatalogOrigin::Dataset,
                    source_name: name,
                    warning: None,
                    report: Some(report),
                }
            }
            Err(e) => {
                tracing::warn!(source = %name, error = %e, "dataset load failed, using demo data");
                LoadedCatalog {
                    warning: Some(format!(
                        "Could not load dataset ({e}). Switched to demo data."
                    )),
                    ..LoadedCatalog::demo()
                }
            }
        }
    }

    fn read_dataset(&self, source: &dyn DatasetSource) -> Result<(Catalog, NormalizeReport)> {
        let files = source.fetch()?;
        files.ensure_exist()?;

        let items = File::open(&files.items)?;
        let ratings = File::open(&files.ratings)?;
        let (movies, report) = normalize_tables(items, ratings, self.rating_scale)?;

        if movies.is_empty() {
            return Err(CineError::Other("dataset contains no usable rows".into()));
        }
        Ok((Catalog::new(movies), report))
    }
}
