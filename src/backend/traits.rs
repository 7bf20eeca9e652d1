use crate::backend::types::{ListingPage, PageRequest};
use crate::filters::FilterState;
use crate::models::PropertyRecord;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for hosted property backends
/// This keeps the listing feed and comparison view independent of the wire API
#[async_trait]
pub trait PropertyBackend: Send + Sync {
    /// List properties matching a filter, one page at a time
    async fn list_properties(&self, filter: &FilterState, page: PageRequest)
        -> Result<ListingPage>;

    /// Fetch the full record for one property; `Ok(None)` when the id is unknown
    async fn get_property(&self, id: &str) -> Result<Option<PropertyRecord>>;

    /// Get the name of the backend
    fn backend_name(&self) -> &'static str;
}
