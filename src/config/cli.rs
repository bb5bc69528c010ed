use crate::commands::{AddNetworkPolicyCommand, NetworkPoliciesCommand, RemoveNetworkPolicyCommand, Ui};
use crate::config::flags::parse_protocol;
use crate::core::dispatch::{AddPolicyArgs, RemovePolicyArgs};
use crate::core::resolver::PolicyResolver;
use crate::domain::model::{IpRange, Ports, SourceType, Target};
use crate::domain::ports::{Directory, PolicyClient};
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::io::Write;

#[derive(Debug, Parser)]
#[command(name = "netpol")]
#[command(about = "Manage app-to-app and app-to-IP network policies")]
pub struct CliConfig {
    /// Path to the TOML file holding endpoints, token and target
    #[arg(short, long, global = true, default_value = "netpol.toml")]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON regardless of the config file
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List direct network traffic policies
    NetworkPolicies {
        /// Source to filter results by
        #[arg(long, default_value = "")]
        source: String,

        /// Type of the source filter; either app or space; default: app
        #[arg(long = "type", default_value = "")]
        source_type: String,
    },

    /// Allow direct traffic from one app to another app or to an IP range
    AddNetworkPolicy {
        /// Name of the app the traffic originates from
        source_app: String,

        /// Name of the app to connect to
        #[arg(long)]
        destination_app: Option<String>,

        /// IP address or range to connect to, e.g. 10.0.0.1 or 10.0.0.1-10.0.0.9
        #[arg(long)]
        destination_ips: Option<IpRange>,

        /// Protocol to connect with: tcp, udp, icmp or all
        #[arg(long, value_parser = parse_protocol)]
        protocol: Option<String>,

        /// Port or range of ports, e.g. 8080 or 8080-8090
        #[arg(long)]
        port: Option<Ports>,

        /// Apply an IP policy to the source app only or to its whole space
        #[arg(long)]
        source_type: Option<SourceType>,
    },

    /// Remove a network policy between two apps
    RemoveNetworkPolicy {
        /// Name of the app the traffic originates from
        source_app: String,

        /// Name of the app traffic was allowed to
        #[arg(long)]
        destination_app: String,

        /// Protocol of the policy: tcp, udp, icmp or all
        #[arg(long, value_parser = parse_protocol)]
        protocol: String,

        /// Port or range of ports of the policy
        #[arg(long)]
        port: Ports,
    },
}

impl Command {
    pub async fn execute<D, P, O, E>(
        self,
        resolver: &PolicyResolver<D, P>,
        target: &Target,
        ui: &mut Ui<O, E>,
    ) -> Result<()>
    where
        D: Directory,
        P: PolicyClient,
        O: Write,
        E: Write,
    {
        match self {
            Command::NetworkPolicies {
                source,
                source_type,
            } => {
                NetworkPoliciesCommand {
                    source,
                    source_type,
                }
                .execute(resolver, target, ui)
                .await
            }
            Command::AddNetworkPolicy {
                source_app,
                destination_app,
                destination_ips,
                protocol,
                port,
                source_type,
            } => {
                let args = AddPolicyArgs {
                    source_app,
                    source_type,
                    destination_app,
                    destination_ips,
                    protocol,
                    port,
                };
                AddNetworkPolicyCommand { args }
                    .execute(resolver, target, ui)
                    .await
            }
            Command::RemoveNetworkPolicy {
                source_app,
                destination_app,
                protocol,
                port,
            } => {
                let args = RemovePolicyArgs {
                    source_app,
                    destination_app,
                    protocol,
                    port,
                };
                RemoveNetworkPolicyCommand { args }
                    .execute(resolver, target, ui)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_network_policy() {
        let cli = CliConfig::try_parse_from([
            "netpol",
            "add-network-policy",
            "some-app",
            "--destination-ips",
            "1.2.3.4-1.2.3.5",
            "--protocol",
            "UDP",
            "--port",
            "53",
            "--source-type",
            "space",
        ])
        .unwrap();

        match cli.command {
            Command::AddNetworkPolicy {
                source_app,
                destination_ips,
                protocol,
                port,
                source_type,
                destination_app,
            } => {
                assert_eq!(source_app, "some-app");
                assert_eq!(destination_app, None);
                assert_eq!(destination_ips.unwrap().end, "1.2.3.5");
                assert_eq!(protocol.as_deref(), Some("udp"));
                assert_eq!(port, Some(Ports::single(53)));
                assert_eq!(source_type, Some(SourceType::Space));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_network_policies_defaults() {
        let cli = CliConfig::try_parse_from(["netpol", "network-policies", "-c", "other.toml"]).unwrap();
        assert_eq!(cli.config, "other.toml");
        assert!(matches!(
            cli.command,
            Command::NetworkPolicies { ref source, ref source_type } if source.is_empty() && source_type.is_empty()
        ));
    }

    #[test]
    fn test_parse_rejects_bad_flags() {
        assert!(CliConfig::try_parse_from([
            "netpol",
            "add-network-policy",
            "app",
            "--destination-ips",
            "x.y.z.1",
        ])
        .is_err());

        // remove needs every flag
        assert!(CliConfig::try_parse_from([
            "netpol",
            "remove-network-policy",
            "app",
            "--destination-app",
            "other",
        ])
        .is_err());
    }
}
