use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal, run-level failures. Anything that goes wrong with a single scan is reported as an
/// [`crate::outcome::Outcome`] instead and never surfaces here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid base url `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("concurrency limit must be at least 1")]
    ZeroConcurrency,
    #[error("could not build http client: {0}")]
    HttpClient(#[source] reqwest::Error),
    #[error("invalid progress template: {0}")]
    ProgressTemplate(#[from] indicatif::style::TemplateError),
    #[error("could not write report: {0}")]
    Report(#[from] std::io::Error),
    #[error("could not serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a retrieval did not produce a body.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{} - {}", .status.as_u16(), .status.canonical_reason().unwrap_or("Unknown"))]
    Http { status: StatusCode },
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
}

/// Why a fetched body did not end up as a valid file on disk.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("{0}")]
    FileSystem(#[from] std::io::Error),
    #[error("{0}")]
    Validation(String),
}
