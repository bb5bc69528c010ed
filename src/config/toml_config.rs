use crate::domain::model::Target;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PolicyError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetpolConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub target: TargetConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub endpoint: String,
    /// Defaults to `endpoint` when the policy service sits behind the same router.
    pub networking_endpoint: Option<String>,
    pub access_token: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub skip_ssl_validation: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default)]
    pub org_name: String,
    #[serde(default)]
    pub org_guid: String,
    #[serde(default)]
    pub space_name: String,
    #[serde(default)]
    pub space_guid: String,
    #[serde(default)]
    pub user: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

impl NetpolConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| PolicyError::config("toml_parsing", format!("TOML parsing error: {}", e)))
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| PolicyError::config("env_substitution", e.to_string()))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn target(&self) -> Target {
        Target {
            org_name: self.target.org_name.clone(),
            org_guid: self.target.org_guid.clone(),
            space_name: self.target.space_name.clone(),
            space_guid: self.target.space_guid.clone(),
            user_name: self.target.user.clone(),
        }
    }

    pub fn skip_ssl_validation(&self) -> bool {
        self.api.skip_ssl_validation.unwrap_or(false)
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging.as_ref().map(|l| l.format).unwrap_or_default()
    }
}

impl ConfigProvider for NetpolConfig {
    fn api_endpoint(&self) -> &str {
        &self.api.endpoint
    }

    fn networking_endpoint(&self) -> &str {
        self.api
            .networking_endpoint
            .as_deref()
            .unwrap_or(&self.api.endpoint)
    }

    fn access_token(&self) -> Option<&str> {
        self.api.access_token.as_deref().filter(|t| !t.is_empty())
    }

    fn timeout_seconds(&self) -> u64 {
        self.api.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

impl Validate for NetpolConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api.endpoint", &self.api.endpoint)?;
        if let Some(networking) = &self.api.networking_endpoint {
            validation::validate_url("api.networking_endpoint", networking)?;
        }
        if let Some(token) = &self.api.access_token {
            validation::validate_non_empty_string("api.access_token", token)?;
        }
        if let Some(timeout) = self.api.timeout_seconds {
            validation::validate_range("api.timeout_seconds", timeout, 1, 600)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[api]
endpoint = "https://api.example.com"
access_token = "secret"

[target]
org_name = "some-org"
org_guid = "org-guid"
space_name = "some-space"
space_guid = "space-guid"
user = "some-user"
"#;

    #[test]
    fn test_parse_basic_config() {
        let config = NetpolConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.api_endpoint(), "https://api.example.com");
        assert_eq!(config.networking_endpoint(), "https://api.example.com");
        assert_eq!(config.access_token(), Some("secret"));
        assert_eq!(config.timeout_seconds(), 30);
        assert_eq!(config.log_format(), LogFormat::Compact);

        let target = config.target();
        assert_eq!(target.space_guid, "space-guid");
        assert_eq!(target.user_name, "some-user");
        assert!(target.check().is_ok());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("NETPOL_TEST_TOKEN", "from-env");

        let config = NetpolConfig::from_toml_str(
            r#"
[api]
endpoint = "https://api.example.com"
networking_endpoint = "https://net.example.com"
access_token = "${NETPOL_TEST_TOKEN}"

[logging]
format = "json"
"#,
        )
        .unwrap();

        assert_eq!(config.access_token(), Some("from-env"));
        assert_eq!(config.networking_endpoint(), "https://net.example.com");
        assert_eq!(config.log_format(), LogFormat::Json);

        std::env::remove_var("NETPOL_TEST_TOKEN");
    }

    #[test]
    fn test_missing_target_is_reported() {
        let config = NetpolConfig::from_toml_str(
            r#"
[api]
endpoint = "https://api.example.com"
"#,
        )
        .unwrap();

        assert!(matches!(config.target().check(), Err(PolicyError::NoOrgTargeted)));
    }

    #[test]
    fn test_config_validation() {
        let config = NetpolConfig::from_toml_str(
            r#"
[api]
endpoint = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = NetpolConfig::from_toml_str(
            r#"
[api]
endpoint = "https://api.example.com"
timeout_seconds = 0
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        assert!(NetpolConfig::from_toml_str("[api]\nendpoint = ").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = NetpolConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.target().org_name, "some-org");
    }
}
