use std::path::PathBuf;

pub const HELP: &str = "\
Commands:
  select <path>...  pick a file (only the first path is used; no path clears the selection)
  upload            upload the selected file
  reset             dismiss a failed upload
  status            show the current state
  help              show this help
  quit              exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(Vec<PathBuf>),
    Upload,
    Reset,
    Status,
    Help,
    Quit,
}

/// Parses one line of interactive input. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "select" | "pick" => Command::Select(words.map(PathBuf::from).collect()),
        "upload" | "submit" => Command::Upload,
        "reset" => Command::Reset,
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command {other:?}; type `help`")),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands() {
        assert_eq!(parse_command("upload"), Ok(Some(Command::Upload)));
        assert_eq!(parse_command("  RESET "), Ok(Some(Command::Reset)));
        assert_eq!(parse_command("quit"), Ok(Some(Command::Quit)));
        assert_eq!(
            parse_command("select a.txt b.txt"),
            Ok(Some(Command::Select(vec![
                PathBuf::from("a.txt"),
                PathBuf::from("b.txt")
            ])))
        );
        assert_eq!(parse_command("select"), Ok(Some(Command::Select(Vec::new()))));
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(parse_command("   "), Ok(None));
        assert!(parse_command("dance").is_err());
    }
}
