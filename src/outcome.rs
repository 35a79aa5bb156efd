use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use http::StatusCode;
use indicatif::HumanBytes;
use serde::Serialize;

use crate::error::{FetchError, PersistError};

/// Terminal result of one address. Paths are relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Success { path: PathBuf, bytes: u64 },
    HttpError { path: PathBuf, status: u16 },
    ValidationError { path: PathBuf, reason: String },
    IoError { path: PathBuf, reason: String },
}

impl Outcome {
    pub(crate) fn from_fetch(path: PathBuf, error: FetchError) -> Self {
        match error {
            FetchError::Http { status } => Outcome::HttpError { path, status: status.as_u16() },
            transport @ FetchError::Transport(_) => Outcome::IoError { path, reason: transport.to_string() },
        }
    }

    pub(crate) fn from_persist(path: PathBuf, error: PersistError) -> Self {
        match error {
            PersistError::Validation(reason) => Outcome::ValidationError { path, reason },
            PersistError::FileSystem(e) => Outcome::IoError { path, reason: e.to_string() },
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Outcome::Success { path, .. }
            | Outcome::HttpError { path, .. }
            | Outcome::ValidationError { path, .. }
            | Outcome::IoError { path, .. } => path,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

/// The single report line for an outcome.
impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Success { path, bytes } => {
                write!(f, "File {} downloaded successfully, {} saved", path.display(), HumanBytes(*bytes))
            }
            Outcome::HttpError { path, status } => {
                let reason = StatusCode::from_u16(*status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown");
                write!(f, "Error downloading file {}: {status} - {reason}", path.display())
            }
            Outcome::ValidationError { path, reason } => {
                write!(f, "Error validating file {}: {reason}", path.display())
            }
            Outcome::IoError { path, reason } => write!(f, "Error downloading file {}: {reason}", path.display()),
        }
    }
}
