use std::io;

use thiserror::Error;

/// Failure taxonomy for pass generation.
///
/// `Validation` is the only caller error; everything else is fatal to
/// the single request that triggered it and is never retried.
#[derive(Debug, Error)]
pub enum PassError {
    #[error("{0}")]
    Validation(String),
    #[error("signing failed: {0}")]
    Signing(#[from] openssl::error::ErrorStack),
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("invalid archive member path: {0}")]
    MemberPath(String),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("random source unavailable: {0}")]
    Random(String),
}

impl PassError {
    pub fn validation(msg: impl Into<String>) -> Self {
        PassError::Validation(msg.into())
    }

    /// True when the failure is the caller's fault and maps to a
    /// 4xx-class response.
    pub fn is_validation(&self) -> bool {
        matches!(self, PassError::Validation(_))
    }
}
