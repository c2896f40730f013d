use thiserror::Error;

/// Failure inside one source adapter. Never crosses the adapter boundary:
/// [`SourceAdapter::fetch`](crate::sources::SourceAdapter::fetch) logs it and
/// returns an empty batch.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("missing credentials: {0}")]
    MissingCredentials(&'static str),

    #[error("rate limited by {0}")]
    RateLimited(&'static str),

    #[error("{source_name} returned status {status}")]
    Status {
        source_name: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("malformed response from {source_name}: {message}")]
    Malformed {
        source_name: &'static str,
        message: String,
    },

    #[error("subprocess error: {0}")]
    Subprocess(String),
}

/// The only error a pipeline run surfaces: the store could not be opened or
/// initialized.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("record store unavailable: {0}")]
    Store(#[from] oslab_db::DbError),
}
