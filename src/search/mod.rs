pub mod query;
pub mod youtube;

use thiserror::Error;

use crate::models::video::VideoResult;

/// Fixed cap on rendered results per submission.
pub const SEARCH_RESULT_LIMIT: u32 = 5;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Request(reqwest::Error),
    #[error("search response could not be decoded: {0}")]
    Decode(reqwest::Error),
}

/// Narrow seam over the external video-search capability. One call, no
/// retries; callers degrade a failure to an empty result list.
pub trait VideoSearch: Send + Sync {
    fn search(&self, query: &str, limit: u32) -> Result<Vec<VideoResult>, SearchError>;
}
