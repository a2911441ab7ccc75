use crate::models::RawPropertyPayload;
use anyhow::Result;
use async_trait::async_trait;

/// Where raw property responses come from: saved JSON today, the
/// backend's list and detail endpoints once a client implements this.
#[async_trait]
pub trait PayloadSource: Send + Sync {
    /// Every property row in the response, untouched
    async fn fetch(&self) -> Result<Vec<RawPropertyPayload>>;

    /// Short label recorded in the reconciliation report
    fn source_name(&self) -> &'static str;
}
