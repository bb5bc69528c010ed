// Adapters layer: HTTP implementations of the directory and policy-service ports.

pub mod directory;
pub mod http;
pub mod policy_client;

pub use directory::HttpDirectory;
pub use http::ApiTransport;
pub use policy_client::HttpPolicyClient;
