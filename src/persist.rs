use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::PersistError;

/// Writes scans below `root`.
///
/// Bytes go to a hidden `.<name>.part` sibling first and are renamed into place once flushed,
/// so the final name never shows a half written file. Afterwards the file is checked again on
/// disk; an empty or short file is reported as a validation failure and removed.
#[derive(Debug, Clone)]
pub struct Persister {
    root: PathBuf,
}

impl Persister {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Persister { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stores `bytes` at `relative` below the root and returns the validated size on disk.
    pub async fn persist(&self, relative: &Path, bytes: &[u8]) -> Result<u64, PersistError> {
        let target = self.root.join(relative);

        // Another worker may be creating the same month directory; create_dir_all tolerates that.
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }

        let staging = staging_path(&target);
        if let Err(e) = write_fully(&staging, bytes).await {
            discard(&staging).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&staging, &target).await {
            discard(&staging).await;
            return Err(e.into());
        }

        validate(&target, bytes.len() as u64).await
    }
}

async fn write_fully(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

async fn validate(target: &Path, expected: u64) -> Result<u64, PersistError> {
    let length = match fs::metadata(target).await {
        Ok(metadata) if metadata.is_file() => metadata.len(),
        Ok(_) => return Err(PersistError::Validation("not a regular file".to_string())),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(PersistError::Validation("file is missing after write".to_string()))
        }
        Err(e) => return Err(e.into()),
    };

    if length == 0 {
        discard(target).await;
        return Err(PersistError::Validation("file is empty".to_string()));
    }
    if length != expected {
        discard(target).await;
        return Err(PersistError::Validation(format!("file holds {length} bytes, expected {expected}")));
    }

    Ok(length)
}

async fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        if e.kind() != ErrorKind::NotFound {
            tracing::debug!(path = %path.display(), error = %e, "could not remove file");
        }
    }
}

fn staging_path(target: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(target.file_name().unwrap_or_default());
    name.push(".part");
    target.with_file_name(name)
}
