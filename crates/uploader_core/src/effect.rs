use crate::{SelectedFile, UploadId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Hand the selected file to the storage collaborator.
    StartUpload { upload_id: UploadId, file: SelectedFile },
}
