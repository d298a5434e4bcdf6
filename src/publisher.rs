// Snapshot publication: pretty JSON, written via a unique temp file + rename.

use crate::models::Snapshot;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("serializing snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Directory the temp file is created in; same as `dest` so the rename stays
/// on one filesystem.
fn parent_dir(dest: &Path) -> &Path {
    match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// Serializes `snapshot` with two-space indentation.
pub fn to_json(snapshot: &Snapshot) -> Result<Vec<u8>, PublishError> {
    let mut bytes = serde_json::to_vec_pretty(snapshot)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Replaces `dest` with the serialized snapshot. Readers see either the old
/// document or the new one, never a partial write. Each call writes its own
/// randomly named sibling, so overlapping runs never share a temp file.
#[instrument(skip(snapshot), fields(path = %dest.display()))]
pub fn publish(snapshot: &Snapshot, dest: &Path) -> Result<(), PublishError> {
    let bytes = to_json(snapshot)?;
    let dir = parent_dir(dest);
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| PublishError::Io { path, source }
    };

    // Dropped (and removed) on any early return.
    let mut tmp = tempfile::Builder::new()
        .prefix(".sysmon-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(io_err(dir))?;
    tmp.write_all(&bytes).map_err(io_err(tmp.path()))?;
    tmp.as_file().sync_all().map_err(io_err(tmp.path()))?;

    tmp.persist(dest).map_err(|e| PublishError::Io {
        path: dest.to_path_buf(),
        source: e.error,
    })?;

    debug!(bytes = bytes.len(), "Snapshot written");
    Ok(())
}
