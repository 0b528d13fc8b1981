use std::path::{Path, PathBuf};

use super::{DatasetFiles, DatasetSource};
use crate::error::Result;

/// A directory that already holds `movies.csv` and `ratings.csv`.
#[derive(Debug, Clone)]
pub struct LocalDirSource {
    dir: PathBuf,
}

impl LocalDirSource {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl DatasetSource for LocalDirSource {
    fn name(&self) -> String {
        format!("local:{}", self.dir.display())
    }

    fn fetch(&self) -> Result<DatasetFiles> {
        let files = DatasetFiles::in_dir(&self.dir);
        files.ensure_exist()?;
        Ok(files)
    }
}
