use thiserror::Error;

#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("App '{name}' not found")]
    ApplicationNotFound { name: String },

    #[error("Space '{name}' not found")]
    SpaceNotFound { name: String },

    #[error("Policy does not exist")]
    PolicyNotExist,

    #[error("cannot specify both --destination-ips and --destination-app at the same time")]
    DestinationConflict,

    #[error("must specify either --destination-ips or --destination-app")]
    DestinationMissing,

    #[error("--protocol and --port flags must be specified together")]
    ProtocolOrPortNotProvided,

    #[error("unknown source type: {0}")]
    UnknownSourceType(String),

    #[error("missing source argument")]
    MissingSourceArgument,

    #[error("invalid ip range format: {0}")]
    InvalidIpRangeFormat(String),

    #[error("invalid ip address: {0}")]
    InvalidIpAddress(String),

    #[error("invalid port range: {0}")]
    InvalidPortRange(String),

    #[error("invalid protocol: {0}")]
    InvalidProtocol(String),

    #[error("No org targeted, set target.org_name and target.org_guid in the config file")]
    NoOrgTargeted,

    #[error("No space targeted, set target.space_name and target.space_guid in the config file")]
    NoSpaceTargeted,

    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response from {url}: {status} {body}")]
    UnexpectedResponse {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    Config { field: String, message: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    Validation,
    Remote,
    Config,
}

impl PolicyError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PolicyError::ApplicationNotFound { .. }
            | PolicyError::SpaceNotFound { .. }
            | PolicyError::PolicyNotExist => ErrorCategory::NotFound,

            PolicyError::DestinationConflict
            | PolicyError::DestinationMissing
            | PolicyError::ProtocolOrPortNotProvided
            | PolicyError::UnknownSourceType(_)
            | PolicyError::MissingSourceArgument
            | PolicyError::InvalidIpRangeFormat(_)
            | PolicyError::InvalidIpAddress(_)
            | PolicyError::InvalidPortRange(_)
            | PolicyError::InvalidProtocol(_)
            | PolicyError::NoOrgTargeted
            | PolicyError::NoSpaceTargeted => ErrorCategory::Validation,

            PolicyError::Http(_)
            | PolicyError::UnexpectedResponse { .. }
            | PolicyError::Serialization(_) => ErrorCategory::Remote,

            PolicyError::Io(_)
            | PolicyError::Config { .. }
            | PolicyError::InvalidConfigValue { .. } => ErrorCategory::Config,
        }
    }

    pub fn config(field: &str, message: impl Into<String>) -> Self {
        PolicyError::Config {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PolicyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            PolicyError::UnknownSourceType("foo".to_string()).to_string(),
            "unknown source type: foo"
        );
        assert_eq!(
            PolicyError::MissingSourceArgument.to_string(),
            "missing source argument"
        );
    }

    #[test]
    fn test_categories() {
        assert_eq!(PolicyError::PolicyNotExist.category(), ErrorCategory::NotFound);
        assert_eq!(
            PolicyError::ApplicationNotFound {
                name: "app".to_string()
            }
            .category(),
            ErrorCategory::NotFound
        );
        assert_eq!(
            PolicyError::DestinationConflict.category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            PolicyError::UnexpectedResponse {
                url: "http://localhost".to_string(),
                status: 500,
                body: String::new(),
            }
            .category(),
            ErrorCategory::Remote
        );
    }
}
