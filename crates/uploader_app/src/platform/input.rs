use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use engine_logging::engine_warn;
use uploader_core::Msg;

use super::picker::pick_files;
use super::ui::commands::{parse_command, Command};

/// Everything the main loop reacts to: user commands and engine completions.
#[derive(Debug)]
pub enum Input {
    Msg(Msg),
    Status,
    Help,
    Error(String),
    Quit,
}

/// Turns a command into input for the main loop. `select` reads the picked file here,
/// off the main thread.
fn command_input(command: Command) -> Input {
    match command {
        Command::Select(paths) => match pick_files(&paths) {
            Ok(files) => Input::Msg(Msg::FilesPicked(files)),
            Err(err) => Input::Error(format!("{err:#}")),
        },
        Command::Upload => Input::Msg(Msg::SubmitClicked),
        Command::Reset => Input::Msg(Msg::ResetClicked),
        Command::Status => Input::Status,
        Command::Help => Input::Help,
        Command::Quit => Input::Quit,
    }
}

/// Reads commands from stdin on a background thread. Sends `Quit` on end of input.
pub fn spawn_stdin_reader(input_tx: mpsc::Sender<Input>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    engine_warn!("Failed to read stdin: {}", err);
                    break;
                }
            };
            let input = match parse_command(&line) {
                Ok(Some(command)) => command_input(command),
                Ok(None) => continue,
                Err(message) => Input::Error(message),
            };
            let quit = matches!(input, Input::Quit);
            if input_tx.send(input).is_err() || quit {
                return;
            }
        }
        let _ = input_tx.send(Input::Quit);
    });
}
