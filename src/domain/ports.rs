use crate::domain::model::InfoResponse;
use crate::utils::error::Result;
use async_trait::async_trait;

// Lookup collaborator contract: `ServiceUnavailable` on any underlying
// fault, `NotFound` when the result set is empty.
#[async_trait]
pub trait InfoStore: Send + Sync {
    async fn get_info(&self, id: &str) -> Result<InfoResponse>;
}
