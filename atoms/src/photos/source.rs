use async_trait::async_trait;

use super::model::{FetchError, PhotoRecord};
use crate::query::FilterState;

/// The one effectful step of the gallery pipeline: fetch a page of photos
/// for a filter. Implemented over HTTP in shared, stubbed in tests.
#[async_trait]
pub trait PhotoSource: Send + Sync {
    async fn fetch_page(&self, filter: &FilterState) -> Result<Vec<PhotoRecord>, FetchError>;
}
