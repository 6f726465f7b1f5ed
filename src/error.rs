use thiserror::Error;

#[derive(Error, Debug)]
pub enum KontoError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Source read failed: {0}")]
    SourceRead(String),

    #[error("Unknown transaction source: {0}")]
    UnknownSource(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, KontoError>;
