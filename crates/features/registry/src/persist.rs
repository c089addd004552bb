use crate::error::{RegistryError, RegistryErrorExt};
use rally_domain::RosterSnapshot;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Reads a roster snapshot written by [`save_snapshot`].
///
/// A missing file is an empty roster with no window override.
///
/// # Errors
/// * [`RegistryError::Io`] if the file exists but cannot be read.
/// * [`RegistryError::Serde`] if the content is not a valid snapshot.
pub async fn load_snapshot(path: impl AsRef<Path>) -> Result<RosterSnapshot, RegistryError> {
    let path = path.as_ref();

    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "No roster file yet, starting empty");
            return Ok(RosterSnapshot::default());
        },
        Err(err) => {
            return Err(RegistryError::Io {
                source: err,
                context: Some(format!("Failed to read {}", path.display()).into()),
            });
        },
    };

    let snapshot: RosterSnapshot = serde_json::from_slice(&bytes)
        .context(format!("Malformed roster file {}", path.display()))?;
    debug!(path = %path.display(), registrants = snapshot.len(), "Roster loaded");
    Ok(snapshot)
}

/// Writes `snapshot` as pretty JSON, atomically.
///
/// The data goes to a temporary sibling file that is synced to disk and then renamed over
/// `path`, so readers see either the previous roster or the new one. Missing parent
/// directories are created.
///
/// # Errors
/// * [`RegistryError::Internal`] if `path` has no file name.
/// * [`RegistryError::Io`] if any file system step fails.
/// * [`RegistryError::Serde`] if the snapshot cannot be serialized.
pub async fn save_snapshot(
    path: impl AsRef<Path>,
    snapshot: &RosterSnapshot,
) -> Result<(), RegistryError> {
    let path = path.as_ref();
    let temp = temp_path(path)?;
    let data = serde_json::to_vec_pretty(snapshot).context("Failed to encode roster")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .context(format!("Failed to create {}", parent.display()))?;
    }

    let written = match write_synced(&temp, &data).await {
        Ok(()) => fs::rename(&temp, path)
            .await
            .context(format!("Swap failed: {} -> {}", temp.display(), path.display())),
        Err(err) => Err(err),
    };
    if let Err(err) = written {
        discard(&temp).await;
        return Err(err);
    }

    debug!(path = %path.display(), registrants = snapshot.len(), "Roster saved");
    Ok(())
}

async fn write_synced(temp: &Path, data: &[u8]) -> Result<(), RegistryError> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(temp)
        .await
        .context(format!("Temp creation failed: {}", temp.display()))?;
    file.write_all(data).await.context("Write failed")?;
    file.sync_all().await.context("Sync failed")?;
    Ok(())
}

async fn discard(temp: &Path) {
    match fs::remove_file(temp).await {
        Ok(()) => {},
        Err(err) if err.kind() == ErrorKind::NotFound => {},
        Err(err) => {
            warn!(path = %temp.display(), error = %err, "Failed to remove temporary roster");
        },
    }
}

fn temp_path(target: &Path) -> Result<PathBuf, RegistryError> {
    let file_name = target
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| RegistryError::from(format!("Invalid roster path: {}", target.display())))?;
    let counter = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);

    Ok(target.with_file_name(format!("{file_name}.rallytmp.{}.{counter}", std::process::id())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_file_sits_next_to_target() {
        let temp = temp_path(Path::new("data/roster.json")).unwrap();

        assert_eq!(temp.parent(), Some(Path::new("data")));
        let name = temp.file_name().and_then(|n| n.to_str()).unwrap();
        assert!(name.starts_with("roster.json.rallytmp."));
    }

    #[test]
    fn path_without_file_name_is_rejected() {
        let err = temp_path(Path::new("/")).unwrap_err();
        assert!(matches!(err, RegistryError::Internal { .. }));
    }
}
