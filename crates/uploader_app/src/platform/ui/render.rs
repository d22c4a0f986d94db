use std::io::{self, Write};

use uploader_core::{AppViewModel, UploadStatus};

/// Turns the view model into output lines.
pub fn render(view: &AppViewModel, hyperlinks: bool) -> Vec<String> {
    let mut lines = Vec::new();

    match (&view.file_name, view.file_size) {
        (Some(name), Some(size)) => lines.push(format!("File: {name} ({size} bytes)")),
        (Some(name), None) => lines.push(format!("File: {name}")),
        _ => lines.push("No file selected".to_string()),
    }

    match view.status {
        UploadStatus::Idle | UploadStatus::InProgress => {
            let state = if view.submit_enabled {
                ""
            } else {
                " (disabled)"
            };
            lines.push(format!("[{}]{}", view.submit_label, state));
        }
        UploadStatus::Complete => {
            lines.push("File uploaded to IPFS:".to_string());
            if let Some(link) = &view.link {
                lines.push(display_link(link.as_str(), hyperlinks));
            }
        }
        UploadStatus::Failed => {
            let error = view.error.as_deref().unwrap_or("unknown error");
            lines.push(format!("Upload failed: {error}"));
            lines.push("Type `upload` to retry or `reset` to dismiss.".to_string());
        }
    }

    lines
}

/// Control characters are escaped and never wrapped in a hyperlink.
fn display_link(url: &str, hyperlinks: bool) -> String {
    if url.chars().any(char::is_control) {
        return url
            .chars()
            .map(|c| {
                if c.is_control() {
                    c.escape_default().to_string()
                } else {
                    c.to_string()
                }
            })
            .collect();
    }
    if hyperlinks {
        hyperlink(url)
    } else {
        url.to_string()
    }
}

/// OSC 8 terminal hyperlink; supporting terminals open it in the browser.
fn hyperlink(url: &str) -> String {
    format!("\x1b]8;;{url}\x1b\\{url}\x1b]8;;\x1b\\")
}

/// Output sink for rendered views.
pub struct Screen<W: Write> {
    out: W,
    hyperlinks: bool,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W, hyperlinks: bool) -> Self {
        Self { out, hyperlinks }
    }

    pub fn show(&mut self, view: &AppViewModel) -> io::Result<()> {
        for line in render(view, self.hyperlinks) {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}
