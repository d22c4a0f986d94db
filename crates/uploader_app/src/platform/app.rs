use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::mpsc;

use anyhow::{bail, Context};
use engine_logging::{engine_info, engine_warn};
use uploader_core::{AppState, GatewayHost, Msg, UploadStatus};
use uploader_engine::{EngineHandle, UploaderConfig};

use super::cli;
use super::effects::EffectRunner;
use super::input::{spawn_stdin_reader, Input};
use super::logging;
use super::picker::pick_files;
use super::ui::commands::HELP;
use super::ui::render::Screen;
use super::uploader::Uploader;

pub fn run_app() -> anyhow::Result<()> {
    let args = cli::parse_args()?;
    if args.help {
        print!("{}", cli::USAGE);
        return Ok(());
    }
    logging::initialize(args.log);

    let config = UploaderConfig::from_env().context("loading configuration")?;
    let gateway_raw = args.gateway.as_deref().unwrap_or(&config.gateway_host);
    let gateway = GatewayHost::parse(gateway_raw).context("invalid gateway host")?;
    engine_info!(
        "Starting uploader endpoint={} gateway={}",
        config.endpoint,
        gateway
    );

    let engine = EngineHandle::new(config.client_settings())?;
    let (input_tx, input_rx) = mpsc::channel();
    let effects = EffectRunner::new(engine, input_tx.clone());
    let mut uploader = Uploader::new(AppState::with_gateway(gateway), effects);

    let stdout = io::stdout();
    let hyperlinks = stdout.is_terminal();
    let mut screen = Screen::new(stdout.lock(), hyperlinks);

    match args.file {
        Some(path) => {
            drop(input_tx);
            run_once(&mut uploader, &input_rx, &path, &mut screen)
        }
        None => {
            spawn_stdin_reader(input_tx);
            run_interactive(&mut uploader, &input_rx, &mut screen)
        }
    }
}

fn run_once<W: Write>(
    uploader: &mut Uploader,
    inputs: &mpsc::Receiver<Input>,
    path: &Path,
    screen: &mut Screen<W>,
) -> anyhow::Result<()> {
    let files = pick_files(&[path.to_path_buf()])?;
    uploader.dispatch_and_show(Msg::FilesPicked(files), screen)?;
    uploader.dispatch_and_show(Msg::SubmitClicked, screen)?;
    uploader.run_until_settled(inputs, screen)?;

    match uploader.status() {
        UploadStatus::Failed => {
            let view = uploader.view();
            bail!(
                "upload of {} failed: {}",
                path.display(),
                view.error.as_deref().unwrap_or("unknown error")
            )
        }
        _ => Ok(()),
    }
}

fn run_interactive<W: Write>(
    uploader: &mut Uploader,
    inputs: &mpsc::Receiver<Input>,
    screen: &mut Screen<W>,
) -> anyhow::Result<()> {
    screen.say(HELP)?;
    screen.show(&uploader.view())?;

    while let Ok(input) = inputs.recv() {
        match input {
            Input::Msg(msg) => uploader.dispatch_and_show(msg, screen)?,
            Input::Status => screen.show(&uploader.view())?,
            Input::Help => screen.say(HELP)?,
            Input::Error(message) => screen.say(&format!("error: {message}"))?,
            Input::Quit => break,
        }
    }

    if uploader.status() == UploadStatus::InProgress {
        engine_warn!("Exiting with an upload still in flight");
    }
    Ok(())
}
