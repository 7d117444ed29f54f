use scrapedesk_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// Rejected locally before any request is made.
    #[error("Please enter a valid URL (got '{0}')")]
    InvalidScrapeUrl(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
