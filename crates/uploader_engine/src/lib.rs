//! Uploader engine: storage client, configuration and effect execution.
mod client;
mod config;
mod engine;
mod types;

pub use client::{ClientSettings, StorageClient, Web3StorageClient, DEFAULT_ENDPOINT};
pub use config::{
    ConfigError, UploaderConfig, ENDPOINT_VAR, GATEWAY_VAR, LEGACY_TOKEN_VAR, TIMEOUT_VAR,
    TOKEN_VAR,
};
pub use engine::{EngineHandle, UploadQueue};
pub use types::{EngineEvent, FailureKind, UploadError, UploadFile, UploadId};
