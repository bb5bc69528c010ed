use crate::utils::error::PolicyError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub guid: String,
    pub name: String,
    pub space_guid: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Space {
    pub guid: String,
    pub name: String,
    pub organization_guid: String,
}

/// The org, space and user a command runs against.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Target {
    pub org_name: String,
    pub org_guid: String,
    pub space_name: String,
    pub space_guid: String,
    pub user_name: String,
}

impl Target {
    pub fn check(&self) -> Result<(), PolicyError> {
        if self.org_guid.is_empty() {
            return Err(PolicyError::NoOrgTargeted);
        }
        if self.space_guid.is_empty() {
            return Err(PolicyError::NoSpaceTargeted);
        }
        Ok(())
    }
}

/// Who an egress policy applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    App,
    Space,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::App => "app",
            SourceType::Space => "space",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "app" => Ok(SourceType::App),
            "space" => Ok(SourceType::Space),
            other => Err(PolicyError::UnknownSourceType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ports {
    pub start: u16,
    pub end: u16,
}

impl Ports {
    pub fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    pub fn single(port: u16) -> Self {
        Self::new(port, port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IpRange {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySource {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDestination {
    pub id: String,
    pub protocol: String,
    pub ports: Ports,
}

/// App-to-app ("C2C") policy as the policy service stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngressPolicy {
    pub source: PolicySource,
    pub destination: PolicyDestination,
}

impl IngressPolicy {
    pub fn new(source_guid: &str, destination_guid: &str, protocol: &str, ports: Ports) -> Self {
        Self {
            source: PolicySource {
                id: source_guid.to_string(),
            },
            destination: PolicyDestination {
                id: destination_guid.to_string(),
                protocol: protocol.to_string(),
                ports,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EgressPolicySource {
    pub id: String,
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_source_type"
    )]
    pub source_type: Option<SourceType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EgressPolicyDestination {
    #[serde(default)]
    pub ips: Vec<IpRange>,
    pub protocol: String,
    #[serde(default)]
    pub ports: Vec<Ports>,
}

/// App- or space-to-IP-range policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EgressPolicy {
    pub source: EgressPolicySource,
    pub destination: EgressPolicyDestination,
}

impl EgressPolicy {
    pub fn new(
        source_guid: &str,
        source_type: Option<SourceType>,
        ips: IpRange,
        protocol: &str,
        ports: Ports,
    ) -> Self {
        Self {
            source: EgressPolicySource {
                id: source_guid.to_string(),
                source_type,
            },
            destination: EgressPolicyDestination {
                ips: vec![ips],
                protocol: protocol.to_string(),
                ports: vec![ports],
            },
        }
    }
}

/// Wire envelope used by the policy service for both reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PolicyList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_policies: Option<usize>,
    #[serde(default)]
    pub policies: Vec<IngressPolicy>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub egress_policies: Vec<EgressPolicy>,
}

impl PolicyList {
    pub fn ingress(policies: Vec<IngressPolicy>) -> Self {
        Self {
            policies,
            ..Self::default()
        }
    }

    pub fn egress(egress_policies: Vec<EgressPolicy>) -> Self {
        Self {
            egress_policies,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationType {
    App,
    Ip,
}

impl DestinationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DestinationType::App => "app",
            DestinationType::Ip => "ip",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    App { name: String },
    Ip { start: String, end: String },
}

/// A policy with every GUID translated to a name in the listed space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainPolicy {
    pub source_name: String,
    pub source_type: Option<SourceType>,
    pub destination: Destination,
    pub protocol: String,
    pub start_port: u16,
    pub end_port: u16,
}

impl DomainPolicy {
    pub fn destination_type(&self) -> DestinationType {
        match self.destination {
            Destination::App { .. } => DestinationType::App,
            Destination::Ip { .. } => DestinationType::Ip,
        }
    }
}

fn deserialize_source_type<'de, D>(deserializer: D) -> Result<Option<SourceType>, D::Error>
where
    D: Deserializer<'de>,
{
    // Types this client does not model read as unset so one odd record
    // cannot fail the whole listing.
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(|value| value.parse().ok()))
}
