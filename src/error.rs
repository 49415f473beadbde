use thiserror::Error;

#[derive(Debug, Error)]
pub enum TyperError {
    #[error("word list is empty")]
    EmptyWordList,

    #[error("window size must be at least 1 word")]
    InvalidWindowSize,

    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("word list is not valid utf-8: {0}")]
    InvalidEncoding(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TyperError>;
