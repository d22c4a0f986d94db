use std::sync::{mpsc, Arc};
use std::thread;

use engine_logging::{engine_error, engine_info, engine_warn};

use crate::client::{ClientSettings, StorageClient, Web3StorageClient};
use crate::{EngineEvent, FailureKind, UploadError, UploadFile, UploadId};

enum EngineCommand {
    Upload { upload_id: UploadId, file: UploadFile },
}

/// Command side of the engine. Cheap to clone; never blocks.
#[derive(Clone)]
pub struct UploadQueue {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl UploadQueue {
    pub fn upload(&self, upload_id: UploadId, file: UploadFile) {
        if self
            .cmd_tx
            .send(EngineCommand::Upload { upload_id, file })
            .is_err()
        {
            engine_warn!("Upload engine is gone; upload {} dropped", upload_id);
        }
    }
}

/// Runs uploads on a background runtime and reports completions over a channel.
///
/// The event receiver has a single owner; use [`EngineHandle::split`] to hand it to
/// another thread.
pub struct EngineHandle {
    queue: UploadQueue,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, UploadError> {
        let client = Web3StorageClient::new(settings)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    pub fn with_client(client: Arc<dyn StorageClient>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    engine_error!("Failed to start upload runtime: {}", err);
                    fail_all(cmd_rx, event_tx, err.to_string());
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), command, event_tx).await;
                });
            }
            engine_info!("Upload engine command channel closed");
        });

        Self {
            queue: UploadQueue { cmd_tx },
            event_rx,
        }
    }

    pub fn upload(&self, upload_id: UploadId, file: UploadFile) {
        self.queue.upload(upload_id, file);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event. `None` once the engine thread has stopped.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    /// Separates the command side from the event receiver.
    pub fn split(self) -> (UploadQueue, mpsc::Receiver<EngineEvent>) {
        (self.queue, self.event_rx)
    }
}

async fn handle_command(
    client: &dyn StorageClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Upload { upload_id, file } => {
            let result = client.put(std::slice::from_ref(&file)).await;
            match &result {
                Ok(cid) => engine_info!("Upload {} stored as {}", upload_id, cid),
                Err(err) => engine_warn!("Upload {} failed: {}", upload_id, err),
            }
            let _ = event_tx.send(EngineEvent::UploadCompleted { upload_id, result });
        }
    }
}

fn fail_all(
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    reason: String,
) {
    while let Ok(EngineCommand::Upload { upload_id, .. }) = cmd_rx.recv() {
        let result = Err(UploadError::new(FailureKind::EngineStopped, reason.clone()));
        let _ = event_tx.send(EngineEvent::UploadCompleted { upload_id, result });
    }
}
