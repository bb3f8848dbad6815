use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("page {0} not found")]
    NotFound(u32),

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

impl From<serde_json::Error> for FrameError {
    fn from(err: serde_json::Error) -> Self {
        FrameError::InvalidInput(format!("malformed request body: {}", err))
    }
}

impl From<url::ParseError> for FrameError {
    fn from(err: url::ParseError) -> Self {
        FrameError::InvalidInput(format!("unparsable url: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
