use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use engine_logging::{engine_debug, engine_info};
use uploader_core::SelectedFile;

/// Reads the picked files. Only the first path is read; the rest are ignored.
pub fn pick_files(paths: &[PathBuf]) -> anyhow::Result<Vec<SelectedFile>> {
    let Some(path) = paths.first() else {
        engine_debug!("Empty pick; selection cleared");
        return Ok(Vec::new());
    };
    if paths.len() > 1 {
        engine_info!(
            "{} files picked; only {} is considered",
            paths.len(),
            path.display()
        );
    }

    let bytes = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    engine_info!("Picked {} ({} bytes)", name, bytes.len());

    Ok(vec![SelectedFile::new(name, bytes)])
}
