use thiserror::Error;

#[derive(Error, Debug)]
pub enum CineError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("http error: {0}")]
    Http(String),

    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("config error: {0}")]
    Config(String),

    #[error("missing credentials: set KAGGLE_USERNAME and KAGGLE_KEY")]
    MissingCredentials,

    #[error("file not found: {path}")]
    MissingFile { path: String },

    #[error("{table} is missing column `{column}`")]
    MissingColumn { table: String, column: String },

    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("unknown genre: {genre}")]
    UnknownGenre { genre: String },

    #[error("{0}")]
    Other(String),
}

impl From<ureq::Error> for CineError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(code, _) => Self::Http(format!("server returned status {code}")),
            ureq::Error::Transport(transport) => Self::Http(transport.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CineError>;
