use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::{FailureKind, UploadError, UploadFile};

/// Public web3.storage API.
pub const DEFAULT_ENDPOINT: &str = "https://api.web3.storage";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: String,
    pub token: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ClientSettings {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: token.into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
        }
    }
}

/// Content-addressable storage collaborator.
#[async_trait::async_trait]
pub trait StorageClient: Send + Sync {
    /// Stores the files and returns the content identifier of the upload.
    async fn put(&self, files: &[UploadFile]) -> Result<String, UploadError>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    cid: String,
}

#[derive(Debug, Clone)]
pub struct Web3StorageClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl Web3StorageClient {
    pub fn new(settings: ClientSettings) -> Result<Self, UploadError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| UploadError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn upload_url(&self) -> String {
        format!("{}/upload", self.settings.endpoint.trim_end_matches('/'))
    }
}

#[async_trait::async_trait]
impl StorageClient for Web3StorageClient {
    async fn put(&self, files: &[UploadFile]) -> Result<String, UploadError> {
        if files.is_empty() {
            return Err(UploadError::new(FailureKind::NoFiles, "nothing to upload"));
        }

        let mut form = Form::new();
        let mut total_bytes = 0_usize;
        for file in files {
            total_bytes += file.bytes.len();
            let part = Part::bytes(file.bytes.to_vec()).file_name(file.name.clone());
            form = form.part("file", part);
        }

        let url = self.upload_url();
        engine_info!(
            "Uploading {} file(s), {} bytes, to {}",
            files.len(),
            total_bytes,
            url
        );

        let response = self
            .client
            .post(url.as_str())
            .bearer_auth(&self.settings.token)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            engine_warn!("Storage service rejected credentials: {}", status);
            return Err(UploadError::new(FailureKind::Unauthorized, status.to_string()));
        }
        if !status.is_success() {
            return Err(UploadError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = response.text().await.map_err(map_reqwest_error)?;
        engine_debug!("Upload response body: {}", body);
        let parsed: UploadResponse = serde_json::from_str(&body)
            .map_err(|err| UploadError::new(FailureKind::InvalidResponse, err.to_string()))?;

        let cid = parsed.cid.trim();
        if cid.is_empty() {
            return Err(UploadError::new(
                FailureKind::InvalidResponse,
                "empty content identifier",
            ));
        }
        if cid.chars().any(char::is_control) {
            return Err(UploadError::new(
                FailureKind::InvalidResponse,
                "content identifier contains control characters",
            ));
        }
        Ok(cid.to_string())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> UploadError {
    if err.is_timeout() {
        return UploadError::new(FailureKind::Timeout, err.to_string());
    }
    UploadError::new(FailureKind::Network, err.to_string())
}
