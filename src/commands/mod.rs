//! The three network-policy commands and their terminal output.

pub mod add_network_policy;
pub mod network_policies;
pub mod remove_network_policy;
pub mod ui;

pub use add_network_policy::AddNetworkPolicyCommand;
pub use network_policies::NetworkPoliciesCommand;
pub use remove_network_policy::RemoveNetworkPolicyCommand;
pub use ui::Ui;
