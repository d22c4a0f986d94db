#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked files. Only the first one is considered; an empty pick clears the selection.
    FilesPicked(Vec<crate::SelectedFile>),
    /// User submitted the upload form.
    SubmitClicked,
    /// Storage collaborator returned a content identifier.
    UploadSucceeded {
        upload_id: crate::UploadId,
        cid: String,
    },
    /// Storage collaborator failed.
    UploadFailed {
        upload_id: crate::UploadId,
        message: String,
    },
    /// User dismissed a failed upload.
    ResetClicked,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
