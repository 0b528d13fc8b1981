use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CineError, Result};

/// Default directory name for cinematch data.
const APP_DIR: &str = ".cinematch";
/// Config filename.
const CONFIG_FILE: &str = "config.toml";
/// Default download cache directory (relative to the app dir).
const DATASET_DIR: &str = "datasets";

/// Environment variable holding the Kaggle user name.
pub const KAGGLE_USERNAME_VAR: &str = "KAGGLE_USERNAME";
/// Environment variable holding the Kaggle API key.
pub const KAGGLE_KEY_VAR: &str = "KAGGLE_KEY";

/// Configuration resolved from the working directory.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the tool was started from.
    pub project_root: PathBuf,
    /// Path to the `.cinematch/` directory.
    pub app_dir: PathBuf,
    /// Path to the config file.
    pub config_path: PathBuf,
    /// User settings loaded from config.toml.
    pub settings: UserSettings,
}

/// User-configurable settings from .cinematch/config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub source: SourceSettings,
    pub dataset: DatasetSettings,
    pub filters: FilterSettings,
    pub output: OutputSettings,
}

/// Which catalog to load when the command line does not say.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// "auto" (Kaggle when credentials are present), "demo", "kaggle" or "local".
    pub default: String,
    /// Directory with `movies.csv` and `ratings.csv` for the "local" source.
    pub local_dir: Option<String>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            default: "auto".into(),
            local_dir: None,
        }
    }
}

/// External dataset settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetSettings {
    pub owner: String,
    pub slug: String,
    /// Download cache directory (relative to `.cinematch/` unless absolute).
    pub cache_dir: Option<String>,
    /// Multiplier applied to averaged ratings before rounding.
    pub rating_scale: f64,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            owner: "parasharmanas".into(),
            slug: "movie-recommendation-system".into(),
            cache_dir: None,
            rating_scale: 1.0,
            connect_timeout_secs: 10,
            read_timeout_secs: 300,
        }
    }
}

/// Defaults for filter flags the user leaves out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    pub min_rating: f64,
    /// Lower year bound is `max(default_start_year, oldest year in catalog)`.
    pub default_start_year: i32,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            min_rating: 7.0,
            default_start_year: 1980,
        }
    }
}

/// Output-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Output format: "minified" (default) or "pretty".
    pub format: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: "minified".into(),
        }
    }
}

/// Kaggle API credentials taken from the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("key", &"***")
            .finish()
    }
}

impl Credentials {
    /// Read both credential variables; `None` unless both are set and non-empty.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, with an injectable variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let username = lookup(KAGGLE_USERNAME_VAR).filter(|v| !v.trim().is_empty())?;
        let key = lookup(KAGGLE_KEY_VAR).filter(|v| !v.trim().is_empty())?;
        Some(Self { username, key })
    }
}

impl Config {
    /// Create config for a given working directory.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        let app_dir = project_root.join(APP_DIR);
        let config_path = app_dir.join(CONFIG_FILE);

        let settings = Self::load_settings(&config_path).unwrap_or_default();

        Self {
            project_root,
            app_dir,
            config_path,
            settings,
        }
    }

    /// Create config from the current working directory.
    pub fn from_cwd() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| CineError::Config(format!("cannot get cwd: {e}")))?;
        Ok(Self::new(cwd))
    }

    /// Load settings from config.toml if it exists and parses.
    fn load_settings(config_path: &Path) -> Option<UserSettings> {
        if !config_path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(config_path).ok()?;
        match toml::from_str(&content) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!(path = %config_path.display(), error = %e, "ignoring invalid config file");
                None
            }
        }
    }

    /// Effective download cache directory.
    #[must_use]
    pub fn dataset_cache_dir(&self) -> PathBuf {
        match &self.settings.dataset.cache_dir {
            Some(custom) => Self::resolve(&self.app_dir, custom),
            None => self.app_dir.join(DATASET_DIR),
        }
    }

    /// Configured local dataset directory, relative to the working directory.
    #[must_use]
    pub fn local_dataset_dir(&self) -> Option<PathBuf> {
        self.settings
            .source
            .local_dir
            .as_deref()
            .map(|dir| Self::resolve(&self.project_root, dir))
    }

    /// Whether JSON output should be pretty-printed.
    #[must_use]
    pub fn pretty_output(&self) -> bool {
        self.settings.output.format.eq_ignore_ascii_case("pretty")
    }

    fn resolve(base: &Path, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base.join(path)
        }
    }
}
