use crate::adapters::http::ApiTransport;
use crate::domain::model::{IngressPolicy, PolicyList};
use crate::domain::ports::PolicyClient;
use crate::domain::warnings::Warnings;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Method;

const POLICIES_PATH: &str = "/networking/v1/external/policies";
const DELETE_POLICIES_PATH: &str = "/networking/v1/external/policies/delete";

/// Client for the policy service's external v1 API.
#[derive(Debug, Clone)]
pub struct HttpPolicyClient {
    transport: ApiTransport,
}

impl HttpPolicyClient {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    fn log_warnings(warnings: Warnings) {
        for warning in &warnings {
            tracing::warn!("Policy service warning: {}", warning);
        }
    }
}

#[async_trait]
impl PolicyClient for HttpPolicyClient {
    async fn create_policies(&self, policies: PolicyList) -> Result<()> {
        let url = self.transport.url(POLICIES_PATH);
        let request = self.transport.request(Method::POST, &url).json(&policies);
        let (_, warnings) = self.transport.send(request, &url).await?;
        Self::log_warnings(warnings);
        Ok(())
    }

    async fn list_policies(&self, app_guids: &[String]) -> Result<PolicyList> {
        let url = self.transport.url(POLICIES_PATH);
        let mut request = self.transport.request(Method::GET, &url);
        if !app_guids.is_empty() {
            request = request.query(&[("id", app_guids.join(","))]);
        }

        let mut warnings = Warnings::new();
        let policies: PolicyList = self.transport.send_json(request, &url, &mut warnings).await?;
        Self::log_warnings(warnings);

        tracing::debug!(
            "Fetched {} ingress and {} egress policies",
            policies.policies.len(),
            policies.egress_policies.len()
        );
        Ok(policies)
    }

    async fn remove_policies(&self, policies: Vec<IngressPolicy>) -> Result<()> {
        let url = self.transport.url(DELETE_POLICIES_PATH);
        let request = self
            .transport
            .request(Method::POST, &url)
            .json(&PolicyList::ingress(policies));
        let (_, warnings) = self.transport.send(request, &url).await?;
        Self::log_warnings(warnings);
        Ok(())
    }
}
