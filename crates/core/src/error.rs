use thiserror::Error;

#[derive(Error, Debug)]
pub enum HdlscopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<tokio::task::JoinError> for HdlscopeError {
    fn from(err: tokio::task::JoinError) -> Self {
        HdlscopeError::Internal(err.to_string())
    }
}

impl From<HdlscopeError> for hdlscope_api::ApiError {
    fn from(err: HdlscopeError) -> Self {
        hdlscope_api::ApiError::Internal(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HdlscopeError>;
