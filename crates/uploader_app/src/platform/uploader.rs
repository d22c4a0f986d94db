use std::io::{self, Write};
use std::sync::mpsc;

use engine_logging::{engine_debug, engine_error};
use uploader_core::{update, AppState, AppViewModel, Msg, UploadStatus};
use uploader_engine::FailureKind;

use super::effects::EffectRunner;
use super::input::Input;
use super::ui::render::Screen;

/// The uploader component: core state plus the runner executing its effects.
pub struct Uploader {
    state: AppState,
    effects: EffectRunner,
}

impl Uploader {
    pub fn new(state: AppState, effects: EffectRunner) -> Self {
        Self { state, effects }
    }

    pub fn status(&self) -> UploadStatus {
        self.state.status()
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// Applies a message, runs its effects, and returns the view if it changed.
    pub fn dispatch(&mut self, msg: Msg) -> Option<AppViewModel> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.effects.enqueue(effects);
        let view = state.view();
        let was_dirty = state.consume_dirty();
        self.state = state;
        was_dirty.then_some(view)
    }

    pub fn dispatch_and_show<W: Write>(
        &mut self,
        msg: Msg,
        screen: &mut Screen<W>,
    ) -> io::Result<()> {
        match self.dispatch(msg) {
            Some(view) => screen.show(&view),
            None => Ok(()),
        }
    }

    /// Feeds engine completions until no upload is in flight.
    ///
    /// If every input sender is gone the in-flight upload is reported as failed.
    pub fn run_until_settled<W: Write>(
        &mut self,
        inputs: &mpsc::Receiver<Input>,
        screen: &mut Screen<W>,
    ) -> io::Result<()> {
        while let Some(upload_id) = self.state.in_flight_upload() {
            let msg = match inputs.recv() {
                Ok(Input::Msg(msg)) => msg,
                Ok(other) => {
                    engine_debug!("Ignoring {:?} while upload {} in flight", other, upload_id);
                    continue;
                }
                Err(_) => {
                    engine_error!("Input channel closed while upload {} in flight", upload_id);
                    Msg::UploadFailed {
                        upload_id,
                        message: FailureKind::EngineStopped.to_string(),
                    }
                }
            };
            self.dispatch_and_show(msg, screen)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use uploader_core::SelectedFile;
    use uploader_engine::{EngineHandle, StorageClient, UploadError, UploadFile};

    use super::*;

    struct StubClient {
        calls: AtomicUsize,
        outcome: Result<String, UploadError>,
    }

    #[async_trait::async_trait]
    impl StorageClient for StubClient {
        async fn put(&self, _files: &[UploadFile]) -> Result<String, UploadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    fn uploader_with(
        outcome: Result<String, UploadError>,
    ) -> (Uploader, mpsc::Receiver<Input>, Arc<StubClient>) {
        let (uploader, input_tx, input_rx, client) = uploader_with_sender(outcome);
        drop(input_tx);
        (uploader, input_rx, client)
    }

    fn uploader_with_sender(
        outcome: Result<String, UploadError>,
    ) -> (
        Uploader,
        mpsc::Sender<Input>,
        mpsc::Receiver<Input>,
        Arc<StubClient>,
    ) {
        let client = Arc::new(StubClient {
            calls: AtomicUsize::new(0),
            outcome,
        });
        let (input_tx, input_rx) = mpsc::channel();
        let effects =
            EffectRunner::new(EngineHandle::with_client(client.clone()), input_tx.clone());
        (Uploader::new(AppState::new(), effects), input_tx, input_rx, client)
    }

    fn pick(uploader: &mut Uploader) {
        let file = SelectedFile::new("report.pdf", b"%PDF".to_vec());
        assert!(uploader.dispatch(Msg::FilesPicked(vec![file])).is_some());
    }

    #[test]
    fn double_submit_reaches_collaborator_once() {
        let (mut uploader, inputs, client) = uploader_with(Ok("bafy123".to_string()));
        let mut screen = Screen::new(Vec::new(), false);
        pick(&mut uploader);

        assert!(uploader.dispatch(Msg::SubmitClicked).is_some());
        assert!(uploader.dispatch(Msg::SubmitClicked).is_none());
        uploader.run_until_settled(&inputs, &mut screen).unwrap();

        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
        assert_eq!(uploader.status(), UploadStatus::Complete);
        let view = uploader.view();
        assert_eq!(
            view.link.as_ref().map(|link| link.as_str()),
            Some("https://dweb.link/ipfs/bafy123")
        );
        let output = String::from_utf8(screen.into_inner()).unwrap();
        assert!(output.contains("https://dweb.link/ipfs/bafy123"));
    }

    #[test]
    fn submit_without_file_never_calls_collaborator() {
        let (mut uploader, _inputs, client) = uploader_with(Ok("bafy123".to_string()));

        assert!(uploader.dispatch(Msg::SubmitClicked).is_none());

        assert_eq!(uploader.status(), UploadStatus::Idle);
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn failure_is_shown_and_reset_returns_to_idle() {
        let failure = UploadError {
            kind: FailureKind::Unauthorized,
            message: "401 Unauthorized".to_string(),
        };
        let (mut uploader, inputs, _client) = uploader_with(Err(failure));
        let mut screen = Screen::new(Vec::new(), false);
        pick(&mut uploader);

        uploader
            .dispatch_and_show(Msg::SubmitClicked, &mut screen)
            .unwrap();
        uploader.run_until_settled(&inputs, &mut screen).unwrap();

        assert_eq!(uploader.status(), UploadStatus::Failed);
        let output = String::from_utf8(screen.into_inner()).unwrap();
        assert!(output.contains("Upload failed: unauthorized: 401 Unauthorized"));

        uploader.dispatch(Msg::ResetClicked);
        assert_eq!(uploader.status(), UploadStatus::Idle);
        assert!(uploader.view().error.is_none());
    }

    #[test]
    fn user_inputs_during_upload_do_not_stop_settling() {
        engine_logging::initialize_for_tests();
        let (mut uploader, input_tx, inputs, _client) =
            uploader_with_sender(Ok("bafy123".to_string()));
        pick(&mut uploader);
        input_tx.send(Input::Status).unwrap();
        input_tx.send(Input::Help).unwrap();
        input_tx
            .send(Input::Error("unknown command".to_string()))
            .unwrap();

        uploader.dispatch(Msg::SubmitClicked);
        uploader
            .run_until_settled(&inputs, &mut Screen::new(io::sink(), false))
            .unwrap();

        assert_eq!(uploader.status(), UploadStatus::Complete);
    }

    #[test]
    fn closed_inputs_fail_the_in_flight_upload() {
        let (mut uploader, inputs, _client) = uploader_with(Ok("bafy123".to_string()));
        pick(&mut uploader);
        drop(inputs);
        let (dead_tx, dead_rx) = mpsc::channel::<Input>();
        drop(dead_tx);

        uploader.dispatch(Msg::SubmitClicked);
        uploader
            .run_until_settled(&dead_rx, &mut Screen::new(io::sink(), false))
            .unwrap();

        assert_eq!(uploader.status(), UploadStatus::Failed);
        assert_eq!(
            uploader.view().error.as_deref(),
            Some("upload engine stopped")
        );
    }
}
