use crate::domain::model::{Application, IngressPolicy, PolicyList, Space};
use crate::domain::warnings::Reported;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Name and GUID lookups against the platform's application directory.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn resolve_application(&self, name: &str, space_guid: &str) -> Reported<Application>;
    async fn list_applications(&self, space_guid: &str) -> Reported<Vec<Application>>;
    async fn resolve_space(&self, name: &str, org_guid: &str) -> Reported<Space>;
}

/// Raw, GUID-keyed access to the policy service.
#[async_trait]
pub trait PolicyClient: Send + Sync {
    async fn create_policies(&self, policies: PolicyList) -> Result<()>;
    /// An empty `app_guids` lists every policy visible to the caller.
    async fn list_policies(&self, app_guids: &[String]) -> Result<PolicyList>;
    async fn remove_policies(&self, policies: Vec<IngressPolicy>) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn networking_endpoint(&self) -> &str;
    fn access_token(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> u64;
}
