use std::sync::mpsc;
use std::thread;

use engine_logging::{engine_info, engine_warn};
use uploader_core::{Effect, Msg};
use uploader_engine::{EngineEvent, EngineHandle, UploadFile, UploadQueue};

use super::input::Input;

pub struct EffectRunner {
    queue: UploadQueue,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, input_tx: mpsc::Sender<Input>) -> Self {
        let (queue, events) = engine.split();
        spawn_event_loop(events, input_tx);
        Self { queue }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartUpload { upload_id, file } => {
                    engine_info!(
                        "StartUpload upload_id={} name={} size={}",
                        upload_id,
                        file.name(),
                        file.size()
                    );
                    self.queue.upload(
                        upload_id,
                        UploadFile {
                            name: file.name().to_string(),
                            bytes: file.bytes().clone(),
                        },
                    );
                }
            }
        }
    }
}

fn spawn_event_loop(events: mpsc::Receiver<EngineEvent>, input_tx: mpsc::Sender<Input>) {
    thread::spawn(move || {
        while let Ok(event) = events.recv() {
            if input_tx.send(Input::Msg(map_event(event))).is_err() {
                return;
            }
        }
        engine_warn!("Upload engine stopped delivering events");
    });
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::UploadCompleted {
            upload_id,
            result: Ok(cid),
        } => Msg::UploadSucceeded { upload_id, cid },
        EngineEvent::UploadCompleted {
            upload_id,
            result: Err(err),
        } => Msg::UploadFailed {
            upload_id,
            message: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uploader_engine::{FailureKind, UploadError};

    #[test]
    fn completions_map_to_messages() {
        assert_eq!(
            map_event(EngineEvent::UploadCompleted {
                upload_id: 3,
                result: Ok("bafy123".to_string()),
            }),
            Msg::UploadSucceeded {
                upload_id: 3,
                cid: "bafy123".to_string(),
            }
        );
        assert_eq!(
            map_event(EngineEvent::UploadCompleted {
                upload_id: 4,
                result: Err(UploadError {
                    kind: FailureKind::HttpStatus(500),
                    message: "500 Internal Server Error".to_string(),
                }),
            }),
            Msg::UploadFailed {
                upload_id: 4,
                message: "http status 500: 500 Internal Server Error".to_string(),
            }
        );
    }
}
