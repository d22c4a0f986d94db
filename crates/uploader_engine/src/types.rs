use std::fmt;

use bytes::Bytes;
use thiserror::Error;

pub type UploadId = u64;

/// One blob handed to the storage service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    UploadCompleted {
        upload_id: UploadId,
        result: Result<String, UploadError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct UploadError {
    pub kind: FailureKind,
    pub message: String,
}

impl UploadError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    NoFiles,
    Unauthorized,
    HttpStatus(u16),
    Timeout,
    InvalidResponse,
    EngineStopped,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::NoFiles => write!(f, "no files to upload"),
            FailureKind::Unauthorized => write!(f, "unauthorized"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::InvalidResponse => write!(f, "invalid response"),
            FailureKind::EngineStopped => write!(f, "upload engine stopped"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
