use crate::{GatewayLink, UploadStatus};

pub const SUBMIT_LABEL_IDLE: &str = "Upload";
pub const SUBMIT_LABEL_BUSY: &str = "Uploading...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub status: UploadStatus,
    pub file_name: Option<String>,
    pub file_size: Option<u64>,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub link: Option<GatewayLink>,
    pub error: Option<String>,
    pub dirty: bool,
}
