//! Uploader core: pure upload state machine and view-model helpers.
mod effect;
mod gateway;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use gateway::{GatewayHost, GatewayLink, InvalidGatewayHost, DEFAULT_GATEWAY_HOST};
pub use msg::Msg;
pub use state::{AppState, SelectedFile, UploadId, UploadStatus};
pub use update::update;
pub use view_model::{AppViewModel, SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE};
