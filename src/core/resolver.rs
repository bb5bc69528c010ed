use crate::domain::model::{
    Application, Destination, DomainPolicy, EgressPolicy, IngressPolicy, IpRange, PolicyList,
    Ports, SourceType, Space,
};
use crate::domain::ports::{Directory, PolicyClient};
use crate::domain::warnings::{Reported, Warnings};
use crate::utils::error::{PolicyError, Result};
use std::collections::HashMap;

/// Where a new policy sends traffic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddDestination {
    App(String),
    IpRange(IpRange),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddPolicyRequest {
    pub source_app: String,
    /// Only carried on egress policies; `None` lets the service apply its default.
    pub source_type: Option<SourceType>,
    pub destination: AddDestination,
    pub protocol: String,
    pub ports: Ports,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovePolicyRequest {
    pub source_app: String,
    pub destination_app: String,
    pub protocol: String,
    pub ports: Ports,
}

/// Translates name-addressed policy requests into the GUID-addressed records
/// of the policy service, and back.
pub struct PolicyResolver<D: Directory, P: PolicyClient> {
    directory: D,
    client: P,
}

impl<D: Directory, P: PolicyClient> PolicyResolver<D, P> {
    pub fn new(directory: D, client: P) -> Self {
        Self { directory, client }
    }

    pub async fn add_policy(&self, space_guid: &str, request: &AddPolicyRequest) -> Reported<()> {
        let mut warnings = Warnings::new();
        let result = self.add_policy_inner(space_guid, request, &mut warnings).await;
        Reported::new(result, warnings)
    }

    pub async fn list_policies_by_space(&self, space_guid: &str) -> Reported<Vec<DomainPolicy>> {
        let mut warnings = Warnings::new();
        let result = self.list_by_space_inner(space_guid, &mut warnings).await;
        Reported::new(result, warnings)
    }

    pub async fn list_policies_by_space_and_app(
        &self,
        space_guid: &str,
        app_name: &str,
    ) -> Reported<Vec<DomainPolicy>> {
        let mut warnings = Warnings::new();
        let result = self
            .list_by_space_and_app_inner(space_guid, app_name, &mut warnings)
            .await;
        Reported::new(result, warnings)
    }

    pub async fn remove_policy(
        &self,
        space_guid: &str,
        request: &RemovePolicyRequest,
    ) -> Reported<()> {
        let mut warnings = Warnings::new();
        let result = self.remove_policy_inner(space_guid, request, &mut warnings).await;
        Reported::new(result, warnings)
    }

    pub async fn space_by_name_and_org(&self, space_name: &str, org_guid: &str) -> Reported<Space> {
        self.directory.resolve_space(space_name, org_guid).await
    }

    async fn add_policy_inner(
        &self,
        space_guid: &str,
        request: &AddPolicyRequest,
        warnings: &mut Warnings,
    ) -> Result<()> {
        let source = warnings.absorb(
            self.directory
                .resolve_application(&request.source_app, space_guid)
                .await,
        )?;

        let policies = match &request.destination {
            AddDestination::App(destination_app) => {
                let destination = warnings.absorb(
                    self.directory
                        .resolve_application(destination_app, space_guid)
                        .await,
                )?;
                PolicyList::ingress(vec![IngressPolicy::new(
                    &source.guid,
                    &destination.guid,
                    &request.protocol,
                    request.ports,
                )])
            }
            AddDestination::IpRange(ips) => PolicyList::egress(vec![EgressPolicy::new(
                &source.guid,
                request.source_type,
                ips.clone(),
                &request.protocol,
                request.ports,
            )]),
        };

        tracing::debug!(
            source = %source.guid,
            ingress = policies.policies.len(),
            egress = policies.egress_policies.len(),
            "Creating network policy"
        );
        self.client.create_policies(policies).await
    }

    async fn list_by_space_inner(
        &self,
        space_guid: &str,
        warnings: &mut Warnings,
    ) -> Result<Vec<DomainPolicy>> {
        let applications = warnings.absorb(self.directory.list_applications(space_guid).await)?;
        let policy_list = self.client.list_policies(&[]).await?;

        let names = name_by_guid(&applications);
        let ingress = policy_list
            .policies
            .iter()
            .filter_map(|policy| translate_ingress(&names, policy));
        let egress = policy_list
            .egress_policies
            .iter()
            .filter_map(|policy| translate_egress(&names, policy));
        let policies: Vec<DomainPolicy> = ingress.chain(egress).collect();

        tracing::debug!(
            space = space_guid,
            fetched = policy_list.policies.len() + policy_list.egress_policies.len(),
            translated = policies.len(),
            "Listed network policies"
        );
        Ok(policies)
    }

    async fn list_by_space_and_app_inner(
        &self,
        space_guid: &str,
        app_name: &str,
        warnings: &mut Warnings,
    ) -> Result<Vec<DomainPolicy>> {
        let applications = warnings.absorb(self.directory.list_applications(space_guid).await)?;
        let names = name_by_guid(&applications);

        let source = warnings.absorb(
            self.directory
                .resolve_application(app_name, space_guid)
                .await,
        )?;
        let policy_list = self
            .client
            .list_policies(std::slice::from_ref(&source.guid))
            .await?;

        Ok(policy_list
            .policies
            .iter()
            .filter(|policy| policy.source.id == source.guid)
            .filter_map(|policy| translate_ingress(&names, policy))
            .collect())
    }

    async fn remove_policy_inner(
        &self,
        space_guid: &str,
        request: &RemovePolicyRequest,
        warnings: &mut Warnings,
    ) -> Result<()> {
        let source = warnings.absorb(
            self.directory
                .resolve_application(&request.source_app, space_guid)
                .await,
        )?;
        let destination = warnings.absorb(
            self.directory
                .resolve_application(&request.destination_app, space_guid)
                .await,
        )?;

        let target = IngressPolicy::new(
            &source.guid,
            &destination.guid,
            &request.protocol,
            request.ports,
        );

        let existing = self
            .client
            .list_policies(std::slice::from_ref(&source.guid))
            .await?;

        if existing.policies.iter().any(|policy| *policy == target) {
            self.client.remove_policies(vec![target]).await
        } else {
            tracing::debug!(source = %source.guid, destination = %destination.guid, "No matching policy to remove");
            Err(PolicyError::PolicyNotExist)
        }
    }
}

fn name_by_guid(applications: &[Application]) -> HashMap<&str, &str> {
    applications
        .iter()
        .map(|app| (app.guid.as_str(), app.name.as_str()))
        .collect()
}

fn translate_ingress(names: &HashMap<&str, &str>, policy: &IngressPolicy) -> Option<DomainPolicy> {
    let source_name = names.get(policy.source.id.as_str())?;
    let destination_name = names.get(policy.destination.id.as_str())?;
    Some(DomainPolicy {
        source_name: source_name.to_string(),
        source_type: Some(SourceType::App),
        destination: Destination::App {
            name: destination_name.to_string(),
        },
        protocol: policy.destination.protocol.clone(),
        start_port: policy.destination.ports.start,
        end_port: policy.destination.ports.end,
    })
}

// Only the first IP range and port range of an egress policy are shown.
fn translate_egress(names: &HashMap<&str, &str>, policy: &EgressPolicy) -> Option<DomainPolicy> {
    let source_name = names.get(policy.source.id.as_str())?;
    let ips = policy.destination.ips.first().cloned().unwrap_or_default();
    let ports = policy.destination.ports.first().copied().unwrap_or_default();
    Some(DomainPolicy {
        source_name: source_name.to_string(),
        source_type: policy.source.source_type,
        destination: Destination::Ip {
            start: ips.start,
            end: ips.end,
        },
        protocol: policy.destination.protocol.clone(),
        start_port: ports.start,
        end_port: ports.end,
    })
}
