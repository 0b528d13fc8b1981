//! Kaggle dataset download.
//!
//! The whole dataset archive is fetched once with HTTP basic auth, the two
//! tables are extracted into the cache directory, and later loads reuse the
//! extracted files.

use std::fs::{self, File};
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::{DatasetFiles, DatasetSource, ITEMS_FILE, RATINGS_FILE};
use crate::config::{Config, Credentials};
use crate::error::{CineError, Result};

/// Kaggle public API root.
pub const KAGGLE_API_BASE: &str = "https://www.kaggle.com/api/v1";
const ARCHIVE_FILE: &str = "archive.zip";

/// A Kaggle dataset identified by `owner/slug`.
#[derive(Debug, Clone)]
pub struct KaggleSource {
    owner: String,
    slug: String,
    cache_dir: PathBuf,
    credentials: Option<Credentials>,
    api_base: String,
    agent: ureq::Agent,
}

impl KaggleSource {
    pub fn new(
        owner: impl Into<String>,
        slug: impl Into<String>,
        cache_dir: impl Into<PathBuf>,
        credentials: Option<Credentials>,
    ) -> Self {
        Self {
            owner: owner.into(),
            slug: slug.into(),
            cache_dir: cache_dir.into(),
            credentials,
            api_base: KAGGLE_API_BASE.into(),
            agent: build_agent(Duration::from_secs(10), Duration::from_secs(300)),
        }
    }

    /// Build from the `[dataset]` settings.
    #[must_use]
    pub fn from_config(config: &Config, credentials: Option<Credentials>) -> Self {
        let dataset = &config.settings.dataset;
        let mut source = Self::new(
            &dataset.owner,
            &dataset.slug,
            config.dataset_cache_dir(),
            credentials,
        );
        source.agent = build_agent(
            Duration::from_secs(dataset.connect_timeout_secs),
            Duration::from_secs(dataset.read_timeout_secs),
        );
        source
    }

    /// Point the source at another API root.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Directory holding the extracted tables for this dataset.
    #[must_use]
    pub fn dataset_dir(&self) -> PathBuf {
        self.cache_dir.join(&self.owner).join(&self.slug)
    }

    #[must_use]
    pub fn download_url(&self) -> String {
        format!(
            "{}/datasets/download/{}/{}",
            self.api_base.trim_end_matches('/'),
            self.owner,
            self.slug
        )
    }

    fn download(&self, credentials: &Credentials, dest: &Path) -> Result<()> {
        let url = self.download_url();
        tracing::info!(%url, "downloading dataset archive");

        let token = STANDARD.encode(format!("{}:{}", credentials.username, credentials.key));
        let response = self
            .agent
            .get(&url)
            .set("Authorization", &format!("Basic {token}"))
            .call()?;

        let partial = dest.with_extension("part");
        let copied = File::create(&partial)
            .and_then(|mut file| std::io::copy(&mut response.into_reader(), &mut file));
        let bytes = match copied {
            Ok(bytes) => bytes,
            Err(e) => {
                let _ = fs::remove_file(&partial);
                return Err(e.into());
            }
        };
        fs::rename(&partial, dest)?;

        tracing::debug!(bytes, path = %dest.display(), "archive downloaded");
        Ok(())
    }
}

impl DatasetSource for KaggleSource {
    fn name(&self) -> String {
        format!("kaggle:{}/{}", self.owner, self.slug)
    }

    fn fetch(&self) -> Result<DatasetFiles> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(CineError::MissingCredentials)?;

        let dir = self.dataset_dir();
        let files = DatasetFiles::in_dir(&dir);
        if files.exist() {
            tracing::debug!(dir = %dir.display(), "reusing extracted dataset");
            return Ok(files);
        }

        fs::create_dir_all(&dir)?;
        let archive_path = dir.join(ARCHIVE_FILE);
        self.download(credentials, &archive_path)?;

        let extracted = File::open(&archive_path)
            .map_err(CineError::from)
            .and_then(|archive| extract_tables(archive, &dir));
        fs::remove_file(&archive_path)?;
        extracted?;

        files.ensure_exist()?;
        Ok(files)
    }
}

fn build_agent(connect: Duration, read: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(connect)
        .timeout_read(read)
        .build()
}

/// Extract `movies.csv` and `ratings.csv` from a zip archive into `dir`.
///
/// Entries are matched on their file name, wherever they sit in the archive.
/// Tables are staged as `<name>.part` and only renamed into place once every
/// entry has been read in full, so a failed extraction leaves no table behind.
pub fn extract_tables<R: Read + Seek>(reader: R, dir: &Path) -> Result<()> {
    let mut archive = zip::ZipArchive::new(reader)?;
    let mut staged = Vec::new();

    if let Err(e) = stage_tables(&mut archive, dir, &mut staged) {
        for (partial, _) in &staged {
            let _ = fs::remove_file(partial);
        }
        return Err(e);
    }
    for (partial, target) in &staged {
        fs::rename(partial, target)?;
    }
    Ok(())
}

fn stage_tables<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
    dir: &Path,
    staged: &mut Vec<(PathBuf, PathBuf)>,
) -> Result<()> {
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        let Some(target) = [ITEMS_FILE, RATINGS_FILE]
            .into_iter()
            .find(|name| entry.name().rsplit('/').next() == Some(*name))
        else {
            continue;
        };

        let partial = dir.join(format!("{target}.part"));
        staged.push((partial.clone(), dir.join(target)));
        let mut out = File::create(&partial)?;
        std::io::copy(&mut entry, &mut out)?;
        tracing::debug!(entry = entry.name(), "extracted table");
    }

    if staged.is_empty() {
        return Err(CineError::Other(format!(
            "archive has neither {ITEMS_FILE} nor {RATINGS_FILE}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::CatalogLoader;
    use std::io::{Cursor, Write};
    use std::net::TcpListener;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn creds() -> Credentials {
        Credentials {
            username: "alice".into(),
            key: "secret".into(),
        }
    }

    fn archive(entries: &[(&str, &str)]) -> Cursor<Vec<u8>> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (name, body) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        let mut cursor = writer.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    /// Serve one canned HTTP response on a local port and return its base URL.
    fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0_u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn missing_credentials_fail_before_network() {
        let tmp = TempDir::new().unwrap();
        let source = KaggleSource::new("owner", "slug", tmp.path(), None);
        assert!(matches!(
            source.fetch().unwrap_err(),
            CineError::MissingCredentials
        ));
    }

    #[test]
    fn reuses_already_extracted_tables() {
        let tmp = TempDir::new().unwrap();
        let source = KaggleSource::new("owner", "slug", tmp.path(), Some(creds()))
            .with_api_base("http://127.0.0.1:9");
        let dir = source.dataset_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(ITEMS_FILE), "movieId,title,genres\n").unwrap();
        fs::write(dir.join(RATINGS_FILE), "movieId,rating\n").unwrap();

        let files = source.fetch().unwrap();
        assert_eq!(files, DatasetFiles::in_dir(&dir));
    }

    #[test]
    fn unreachable_api_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let source = KaggleSource::new("owner", "slug", tmp.path(), Some(creds()))
            .with_api_base("http://127.0.0.1:9");
        assert!(source.fetch().is_err());
        assert!(!source.dataset_dir().join(ITEMS_FILE).exists());
    }

    #[test]
    fn download_url_and_name() {
        let source = KaggleSource::new(
            "parasharmanas",
            "movie-recommendation-system",
            "/tmp/cache",
            None,
        );
        assert_eq!(
            source.download_url(),
            "https://www.kaggle.com/api/v1/datasets/download/parasharmanas/movie-recommendation-system"
        );
        assert_eq!(source.name(), "kaggle:parasharmanas/movie-recommendation-system");
        assert_eq!(
            source.dataset_dir(),
            PathBuf::from("/tmp/cache/parasharmanas/movie-recommendation-system")
        );
    }

    #[test]
    fn extracts_nested_tables() {
        let tmp = TempDir::new().unwrap();
        let zip = archive(&[
            ("ml/movies.csv", "movieId,title,genres\n1,Heat (1995),Crime\n"),
            ("ml/ratings.csv", "movieId,rating\n1,4.0\n"),
            ("ml/tags.csv", "ignored"),
        ]);
        extract_tables(zip, tmp.path()).unwrap();

        assert!(DatasetFiles::in_dir(tmp.path()).exist());
        assert!(!tmp.path().join("tags.csv").exists());
        let items = fs::read_to_string(tmp.path().join(ITEMS_FILE)).unwrap();
        assert!(items.contains("Heat (1995)"));
    }

    #[test]
    fn archive_without_tables_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let zip = archive(&[("readme.txt", "nothing here")]);
        assert!(extract_tables(zip, tmp.path()).is_err());
    }

    #[test]
    fn garbage_archive_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = extract_tables(Cursor::new(b"not a zip".to_vec()), tmp.path()).unwrap_err();
        assert!(matches!(err, CineError::Zip(_)));
    }

    #[test]
    fn corrupt_entry_leaves_no_tables_behind() {
        let tmp = TempDir::new().unwrap();
        let mut bytes = archive(&[
            ("movies.csv", "movieId,title,genres\n1,Heat (1995),Crime\n"),
            ("ratings.csv", "movieId,rating\n1,4.0\n"),
        ])
        .into_inner();
        let pos = bytes.windows(3).position(|w| w == b"4.0").unwrap();
        bytes[pos] = b'9';

        assert!(extract_tables(Cursor::new(bytes), tmp.path()).is_err());
        assert!(!DatasetFiles::in_dir(tmp.path()).exist());
        assert!(!tmp.path().join(ITEMS_FILE).exists());
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn unauthorized_status_is_http_error_and_falls_back() {
        let tmp = TempDir::new().unwrap();
        let base = serve_once(
            "HTTP/1.1 401 Unauthorized\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        let source =
            KaggleSource::new("owner", "slug", tmp.path(), Some(creds())).with_api_base(&base);
        match source.fetch().unwrap_err() {
            CineError::Http(msg) => assert!(msg.contains("401"), "{msg}"),
            other => panic!("expected http error, got {other:?}"),
        }

        let base = serve_once(
            "HTTP/1.1 401 Unauthorized\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        let source =
            KaggleSource::new("owner", "slug", tmp.path(), Some(creds())).with_api_base(&base);
        let loaded = CatalogLoader::new(1.0).load_external(&source);
        assert!(loaded.is_fallback());
        assert!(loaded.warning.unwrap().contains("401"));
    }

    #[test]
    fn truncated_download_leaves_no_partial_archive() {
        let tmp = TempDir::new().unwrap();
        let base = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 1000\r\nConnection: close\r\n\r\nPK-short",
        );
        let source =
            KaggleSource::new("owner", "slug", tmp.path(), Some(creds())).with_api_base(&base);
        assert!(source.fetch().is_err());

        let dir = source.dataset_dir();
        assert!(!dir.join("archive.part").exists());
        assert!(!dir.join(ARCHIVE_FILE).exists());
        assert!(!DatasetFiles::in_dir(&dir).exist());
    }
}
