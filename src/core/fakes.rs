use crate::domain::model::{Application, IngressPolicy, PolicyList, Space};
use crate::domain::ports::{Directory, PolicyClient};
use crate::domain::warnings::{Reported, Warnings};
use crate::utils::error::{PolicyError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

pub fn app(guid: &str, name: &str, space_guid: &str) -> Application {
    Application {
        guid: guid.to_string(),
        name: name.to_string(),
        space_guid: space_guid.to_string(),
    }
}

/// Every call emits one warning naming what it looked up.
#[derive(Clone, Default)]
pub struct FakeDirectory {
    apps: Vec<Application>,
    spaces: Vec<Space>,
}

impl FakeDirectory {
    pub fn new(apps: Vec<Application>) -> Self {
        Self {
            apps,
            spaces: Vec::new(),
        }
    }

    pub fn with_space(mut self, guid: &str, name: &str, organization_guid: &str) -> Self {
        self.spaces.push(Space {
            guid: guid.to_string(),
            name: name.to_string(),
            organization_guid: organization_guid.to_string(),
        });
        self
    }
}

#[async_trait]
impl Directory for FakeDirectory {
    async fn resolve_application(&self, name: &str, space_guid: &str) -> Reported<Application> {
        let warnings = Warnings::from(vec![format!("resolve-{}-warning", name)]);
        let found = self
            .apps
            .iter()
            .find(|app| app.name == name && app.space_guid == space_guid)
            .cloned()
            .ok_or_else(|| PolicyError::ApplicationNotFound {
                name: name.to_string(),
            });
        Reported::new(found, warnings)
    }

    async fn list_applications(&self, space_guid: &str) -> Reported<Vec<Application>> {
        let apps = self
            .apps
            .iter()
            .filter(|app| app.space_guid == space_guid)
            .cloned()
            .collect();
        Reported::ok(
            apps,
            Warnings::from(vec![format!("list-{}-warning", space_guid)]),
        )
    }

    async fn resolve_space(&self, name: &str, org_guid: &str) -> Reported<Space> {
        let warnings = Warnings::from(vec![format!("space-{}-warning", name)]);
        let found = self
            .spaces
            .iter()
            .find(|space| space.name == name && space.organization_guid == org_guid)
            .cloned()
            .ok_or_else(|| PolicyError::SpaceNotFound {
                name: name.to_string(),
            });
        Reported::new(found, warnings)
    }
}

#[derive(Default)]
struct Calls {
    created: Vec<PolicyList>,
    listed: Vec<Vec<String>>,
    removed: Vec<Vec<IngressPolicy>>,
}

/// Serves a fixed policy set and records every call.
#[derive(Clone, Default)]
pub struct FakePolicyClient {
    policies: PolicyList,
    fail: bool,
    fail_writes: bool,
    calls: Arc<Mutex<Calls>>,
}

impl FakePolicyClient {
    pub fn with_policies(policies: PolicyList) -> Self {
        Self {
            policies,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Lists normally but rejects create and remove calls.
    pub fn rejecting_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub async fn created(&self) -> Vec<PolicyList> {
        self.calls.lock().await.created.clone()
    }

    pub async fn listed(&self) -> Vec<Vec<String>> {
        self.calls.lock().await.listed.clone()
    }

    pub async fn removed(&self) -> Vec<Vec<IngressPolicy>> {
        self.calls.lock().await.removed.clone()
    }

    fn unavailable(&self) -> Result<()> {
        self.check(self.fail)
    }

    fn writes_unavailable(&self) -> Result<()> {
        self.check(self.fail || self.fail_writes)
    }

    fn check(&self, fail: bool) -> Result<()> {
        if fail {
            return Err(PolicyError::UnexpectedResponse {
                url: "http://policy-server/networking/v1/external/policies".to_string(),
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PolicyClient for FakePolicyClient {
    async fn create_policies(&self, policies: PolicyList) -> Result<()> {
        self.writes_unavailable()?;
        self.calls.lock().await.created.push(policies);
        Ok(())
    }

    async fn list_policies(&self, app_guids: &[String]) -> Result<PolicyList> {
        self.unavailable()?;
        self.calls.lock().await.listed.push(app_guids.to_vec());
        Ok(self.policies.clone())
    }

    async fn remove_policies(&self, policies: Vec<IngressPolicy>) -> Result<()> {
        self.writes_unavailable()?;
        self.calls.lock().await.removed.push(policies);
        Ok(())
    }
}
