use crate::core::resolver::{AddDestination, AddPolicyRequest, PolicyResolver, RemovePolicyRequest};
use crate::domain::model::{DomainPolicy, IpRange, Ports, SourceType, Target};
use crate::domain::ports::{Directory, PolicyClient};
use crate::domain::warnings::{Reported, Warnings};
use crate::utils::error::{PolicyError, Result};

pub const DEFAULT_PROTOCOL: &str = "tcp";
pub const DEFAULT_PORT: u16 = 8080;

/// Which policies a listing request asks for, decided once from the
/// `--source`/`--type` flag pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListSelection {
    CurrentSpace,
    App(String),
    NamedSpace(String),
}

impl ListSelection {
    pub fn from_flags(source: &str, source_type: &str) -> Result<Self> {
        let source_type = match source_type {
            "" => None,
            other => Some(other.parse::<SourceType>()?),
        };

        match (source, source_type) {
            ("", None) => Ok(ListSelection::CurrentSpace),
            ("", Some(_)) => Err(PolicyError::MissingSourceArgument),
            (name, None) | (name, Some(SourceType::App)) => Ok(ListSelection::App(name.to_string())),
            (name, Some(SourceType::Space)) => Ok(ListSelection::NamedSpace(name.to_string())),
        }
    }

    /// Resolves the selection to a concrete scope. Only `NamedSpace` calls out
    /// to the directory.
    pub async fn scope<D: Directory, P: PolicyClient>(
        &self,
        resolver: &PolicyResolver<D, P>,
        target: &Target,
    ) -> Reported<ListScope> {
        match self {
            ListSelection::CurrentSpace => Reported::ok(
                ListScope::Space {
                    guid: target.space_guid.clone(),
                    name: target.space_name.clone(),
                },
                Warnings::new(),
            ),
            ListSelection::App(name) => Reported::ok(
                ListScope::App {
                    space_guid: target.space_guid.clone(),
                    name: name.clone(),
                },
                Warnings::new(),
            ),
            ListSelection::NamedSpace(name) => {
                let (result, warnings) = resolver
                    .space_by_name_and_org(name, &target.org_guid)
                    .await
                    .into_parts();
                let scope = result.map(|space| ListScope::Space {
                    guid: space.guid,
                    name: name.clone(),
                });
                Reported::new(scope, warnings)
            }
        }
    }
}

/// A listing scope with every name already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListScope {
    Space { guid: String, name: String },
    App { space_guid: String, name: String },
}

impl ListScope {
    pub fn flavor(&self, target: &Target) -> String {
        match self {
            ListScope::App { name, .. } => format!(
                "Listing network policies of app {} in org {} / space {} as {}...",
                name, target.org_name, target.space_name, target.user_name
            ),
            ListScope::Space { name, .. } => format!(
                "Listing network policies in org {} / space {} as {}...",
                target.org_name, name, target.user_name
            ),
        }
    }

    pub async fn list<D: Directory, P: PolicyClient>(
        &self,
        resolver: &PolicyResolver<D, P>,
    ) -> Reported<Vec<DomainPolicy>> {
        match self {
            ListScope::Space { guid, .. } => resolver.list_policies_by_space(guid).await,
            ListScope::App { space_guid, name } => {
                resolver
                    .list_policies_by_space_and_app(space_guid, name)
                    .await
            }
        }
    }
}

/// Flags of `add-network-policy` before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddPolicyArgs {
    pub source_app: String,
    pub source_type: Option<SourceType>,
    pub destination_app: Option<String>,
    pub destination_ips: Option<IpRange>,
    pub protocol: Option<String>,
    pub port: Option<Ports>,
}

impl AddPolicyArgs {
    pub fn into_request(self) -> Result<AddPolicyRequest> {
        let destination_app = self.destination_app.filter(|name| !name.is_empty());
        let destination = match (destination_app, self.destination_ips) {
            (Some(_), Some(_)) => return Err(PolicyError::DestinationConflict),
            (None, None) => return Err(PolicyError::DestinationMissing),
            (Some(name), None) => AddDestination::App(name),
            (None, Some(ips)) => AddDestination::IpRange(ips),
        };

        let (protocol, ports) = match (self.protocol, self.port) {
            (Some(protocol), Some(ports)) => (protocol, ports),
            (None, None) => (DEFAULT_PROTOCOL.to_string(), Ports::single(DEFAULT_PORT)),
            _ => return Err(PolicyError::ProtocolOrPortNotProvided),
        };

        Ok(AddPolicyRequest {
            source_app: self.source_app,
            source_type: self.source_type,
            destination,
            protocol,
            ports,
        })
    }
}

/// Flags of `remove-network-policy`; every field is required by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovePolicyArgs {
    pub source_app: String,
    pub destination_app: String,
    pub protocol: String,
    pub port: Ports,
}

impl From<RemovePolicyArgs> for RemovePolicyRequest {
    fn from(args: RemovePolicyArgs) -> Self {
        RemovePolicyRequest {
            source_app: args.source_app,
            destination_app: args.destination_app,
            protocol: args.protocol,
            ports: args.port,
        }
    }
}
