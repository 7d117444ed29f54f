// Store requests issued by the views, and their execution against a RecordStore

use crate::validate::ScrapeUrl;
use futures::future::join_all;
use scrapedesk_store::{Company, CompanyId, RecordStore, StoreError};
use tracing::{debug, info, warn};

/// Work a view asks the store to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreRequest {
    /// Refetch the whole collection.
    Refresh,
    /// Trigger a scrape, then refresh.
    Scrape(ScrapeUrl),
    /// Delete every id, then refresh.
    Delete { ids: Vec<CompanyId> },
    /// Load one record for the detail view.
    Fetch { id: CompanyId },
}

/// What caused a collection refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshCause {
    Requested,
    Scraped { url: String },
    Deleted(DeleteSummary),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteSummary {
    pub requested: usize,
    pub failed: usize,
}

#[derive(Debug)]
pub enum StoreResponse {
    Refreshed {
        cause: RefreshCause,
        result: Result<Vec<Company>, StoreError>,
    },
    Fetched {
        id: CompanyId,
        result: Result<Company, StoreError>,
    },
    /// The scrape POST failed; no refresh was issued.
    ScrapeFailed { url: String, error: StoreError },
}

/// The single refetch every mutation ends with.
pub async fn refresh<S: RecordStore>(store: &S) -> Result<Vec<Company>, StoreError> {
    store.list().await
}

/// Issue one delete per id concurrently and wait for all of them.
///
/// Individual failures are logged and counted, never retried.
pub async fn delete_all<S: RecordStore>(store: &S, ids: &[CompanyId]) -> DeleteSummary {
    let results = join_all(ids.iter().map(|id| store.delete(id))).await;

    let mut failed = 0;
    for (id, result) in ids.iter().zip(results) {
        if let Err(e) = result {
            warn!("Failed to delete company {}: {}", id, e);
            failed += 1;
        }
    }

    info!(
        "Deleted {} of {} companies",
        ids.len() - failed,
        ids.len()
    );
    DeleteSummary {
        requested: ids.len(),
        failed,
    }
}

pub async fn execute<S: RecordStore>(store: &S, request: StoreRequest) -> StoreResponse {
    debug!("Executing {:?}", request);
    match request {
        StoreRequest::Refresh => StoreResponse::Refreshed {
            cause: RefreshCause::Requested,
            result: refresh(store).await,
        },
        StoreRequest::Scrape(url) => match store.scrape(url.as_str()).await {
            Ok(()) => StoreResponse::Refreshed {
                cause: RefreshCause::Scraped {
                    url: url.to_string(),
                },
                result: refresh(store).await,
            },
            Err(error) => {
                warn!("Scrape of {} failed: {}", url, error);
                StoreResponse::ScrapeFailed {
                    url: url.to_string(),
                    error,
                }
            }
        },
        StoreRequest::Delete { ids } => {
            let summary = if ids.is_empty() {
                DeleteSummary::default()
            } else {
                delete_all(store, &ids).await
            };
            StoreResponse::Refreshed {
                cause: RefreshCause::Deleted(summary),
                result: refresh(store).await,
            }
        }
        StoreRequest::Fetch { id } => {
            let result = store.get(&id).await;
            StoreResponse::Fetched { id, result }
        }
    }
}
