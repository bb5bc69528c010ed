pub mod adapters;
pub mod commands;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{ApiTransport, HttpDirectory, HttpPolicyClient};
pub use config::NetpolConfig;
pub use core::resolver::PolicyResolver;
pub use utils::error::{PolicyError, Result};
