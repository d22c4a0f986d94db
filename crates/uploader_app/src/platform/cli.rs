use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::bail;

use super::logging::LogDestination;

pub const USAGE: &str = "\
Upload a file to IPFS through web3.storage and print its gateway link.

Usage: uploader_app [OPTIONS] [FILE]

Options:
  --gateway <HOST>  Gateway host for links (default: $IPFS_GATEWAY_HOST or dweb.link)
  --log <DEST>      Log destination: file, terminal or both (default: file)
  -h, --help        Print this help

Without FILE, commands are read from stdin; type `help` to list them.
The API token is read from $WEB3_STORAGE_API_KEY (a .env file is honoured).
";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CliArgs {
    pub file: Option<PathBuf>,
    pub gateway: Option<String>,
    pub log: LogDestination,
    pub help: bool,
}

pub fn parse_args() -> anyhow::Result<CliArgs> {
    parse_args_from(std::env::args_os().skip(1).collect())
}

pub fn parse_args_from(raw: Vec<OsString>) -> anyhow::Result<CliArgs> {
    let mut args = pico_args::Arguments::from_vec(raw);

    let help = args.contains(["-h", "--help"]);
    let gateway: Option<String> = args.opt_value_from_str("--gateway")?;
    let log: Option<LogDestination> = args.opt_value_from_str("--log")?;

    let mut rest = args.finish().into_iter();
    let file = match rest.next() {
        Some(arg) if arg.to_string_lossy().starts_with('-') => {
            bail!("unknown option: {}", arg.to_string_lossy())
        }
        other => other.map(PathBuf::from),
    };
    if let Some(extra) = rest.next() {
        bail!(
            "unexpected argument: {} (only one file can be uploaded)",
            extra.to_string_lossy()
        );
    }

    Ok(CliArgs {
        file,
        gateway,
        log: log.unwrap_or_default(),
        help,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<CliArgs> {
        parse_args_from(args.iter().map(OsString::from).collect())
    }

    #[test]
    fn no_arguments_means_interactive_defaults() {
        assert_eq!(parse(&[]).unwrap(), CliArgs::default());
    }

    #[test]
    fn file_and_options_are_parsed() {
        let args = parse(&["--gateway", "w3s.link", "photo.png", "--log", "both"]).unwrap();

        assert_eq!(args.file, Some(PathBuf::from("photo.png")));
        assert_eq!(args.gateway.as_deref(), Some("w3s.link"));
        assert_eq!(args.log, LogDestination::Both);
        assert!(!args.help);
    }

    #[test]
    fn help_flag_is_detected() {
        assert!(parse(&["-h"]).unwrap().help);
        assert!(parse(&["--help"]).unwrap().help);
    }

    #[test]
    fn rejects_unknown_options_and_extra_files() {
        assert!(parse(&["--verbose"]).is_err());
        assert!(parse(&["a.txt", "b.txt"]).is_err());
        assert!(parse(&["--log", "syslog"]).is_err());
    }
}
