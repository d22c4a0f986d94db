use bytes::Bytes;

use crate::view_model::{AppViewModel, SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE};
use crate::{GatewayHost, GatewayLink};

pub type UploadId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    Idle,
    InProgress,
    Complete,
    Failed,
}

/// A picked file: name plus contents. Cloning shares the underlying buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    bytes: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    gateway: GatewayHost,
    file: Option<SelectedFile>,
    status: UploadStatus,
    result: Option<GatewayLink>,
    error: Option<String>,
    in_flight: Option<UploadId>,
    next_upload_id: UploadId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_gateway(GatewayHost::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gateway(gateway: GatewayHost) -> Self {
        Self {
            gateway,
            file: None,
            status: UploadStatus::Idle,
            result: None,
            error: None,
            in_flight: None,
            next_upload_id: 1,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let busy = self.status == UploadStatus::InProgress;
        AppViewModel {
            status: self.status,
            file_name: self.file.as_ref().map(|file| file.name().to_string()),
            file_size: self.file.as_ref().map(SelectedFile::size),
            submit_enabled: !busy,
            submit_label: if busy {
                SUBMIT_LABEL_BUSY
            } else {
                SUBMIT_LABEL_IDLE
            },
            link: self.result.clone(),
            error: self.error.clone(),
            dirty: self.dirty,
        }
    }

    pub fn status(&self) -> UploadStatus {
        self.status
    }

    pub fn gateway(&self) -> &GatewayHost {
        &self.gateway
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn upload_result(&self) -> Option<&GatewayLink> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn in_flight_upload(&self) -> Option<UploadId> {
        self.in_flight
    }

    /// Returns whether the view changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn select_file(&mut self, file: Option<SelectedFile>) {
        if self.status == UploadStatus::InProgress {
            // InProgress requires a file: only a replacement is accepted, and the
            // in-flight upload keeps its own copy of the blob and its status.
            if let Some(file) = file {
                self.file = Some(file);
                self.mark_dirty();
            }
            return;
        }
        self.file = file;
        self.status = UploadStatus::Idle;
        self.result = None;
        self.error = None;
        self.mark_dirty();
    }

    /// Moves to `InProgress` and hands out the file to upload, or `None` when the
    /// submission must be ignored.
    pub(crate) fn begin_upload(&mut self) -> Option<(UploadId, SelectedFile)> {
        if self.status == UploadStatus::InProgress {
            return None;
        }
        let file = self.file.clone()?;

        let upload_id = self.next_upload_id;
        self.next_upload_id += 1;
        self.in_flight = Some(upload_id);
        self.status = UploadStatus::InProgress;
        self.result = None;
        self.error = None;
        self.mark_dirty();
        Some((upload_id, file))
    }

    pub(crate) fn apply_upload_succeeded(&mut self, upload_id: UploadId, cid: &str) {
        if !self.take_in_flight(upload_id) {
            return;
        }
        self.result = Some(self.gateway.link(cid));
        self.status = UploadStatus::Complete;
        self.mark_dirty();
    }

    pub(crate) fn apply_upload_failed(&mut self, upload_id: UploadId, message: String) {
        if !self.take_in_flight(upload_id) {
            return;
        }
        self.error = Some(message);
        self.status = UploadStatus::Failed;
        self.mark_dirty();
    }

    pub(crate) fn reset(&mut self) {
        if self.status != UploadStatus::Failed {
            return;
        }
        self.status = UploadStatus::Idle;
        self.error = None;
        self.mark_dirty();
    }

    fn take_in_flight(&mut self, upload_id: UploadId) -> bool {
        if self.in_flight == Some(upload_id) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }
}
