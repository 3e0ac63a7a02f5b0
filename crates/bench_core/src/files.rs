//! Atomic text file output shared by config, chapter and script writers.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Write `content` to `path` atomically.
///
/// The content goes to a sibling temp file first, which is then renamed
/// over the destination, so readers never see a half-written file.
/// Parent directories are created as needed.
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = temp_path_for(path);

    {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    fs::rename(&temp_path, path)?;

    tracing::debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// `settings.toml` -> `settings.toml.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
