use std::time::Duration;

/// Failure to obtain one entity's roster. Always recovered by the loader.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("no roster file mapped for entity `{0}`")]
    UnknownEntity(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered {status} for {url}")]
    Status { status: u16, url: String },

    #[error("could not read roster: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed roster csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}
