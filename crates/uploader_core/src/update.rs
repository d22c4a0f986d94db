use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesPicked(files) => {
            // Pickers may allow several files; only the first is considered.
            state.select_file(files.into_iter().next());
            Vec::new()
        }
        Msg::SubmitClicked => match state.begin_upload() {
            Some((upload_id, file)) => vec![Effect::StartUpload { upload_id, file }],
            None => Vec::new(),
        },
        Msg::UploadSucceeded { upload_id, cid } => {
            state.apply_upload_succeeded(upload_id, &cid);
            Vec::new()
        }
        Msg::UploadFailed { upload_id, message } => {
            state.apply_upload_failed(upload_id, message);
            Vec::new()
        }
        Msg::ResetClicked => {
            state.reset();
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
