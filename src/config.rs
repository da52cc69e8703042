//! Configuration loading via `ortho-config`.

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

/// Fleet management service configuration derived from environment
/// variables, configuration files, and CLI flags.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(prefix = "CVAAS")]
pub struct FleetConfig {
    /// Base URL of the fleet management service. This value is required.
    pub service_url: String,
    /// API token presented as the bearer credential. This value is required.
    pub api_token: String,
}

/// Metadata for a configuration field, used to generate actionable error
/// messages.
struct FieldMetadata {
    description: &'static str,
    env_var: &'static str,
    toml_key: &'static str,
}

impl FleetConfig {
    fn require_field(value: &str, metadata: &FieldMetadata) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::MissingField(format!(
                "missing {}: set {} or add {} to [fleet] in cloudeos.toml",
                metadata.description, metadata.env_var, metadata.toml_key
            )));
        }
        Ok(())
    }

    /// Loads configuration using the `ortho-config` derive. Values merge
    /// defaults, configuration files, environment variables, and CLI flags
    /// in that order of precedence.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the loader fails to merge
    /// sources.
    pub fn load_from_sources() -> Result<Self, ConfigError> {
        Self::load().map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Loads configuration without attempting to parse CLI arguments.
    /// Values still merge defaults, configuration files, and environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([std::ffi::OsString::from("cloudeos")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Performs semantic validation on required fields. Error messages
    /// include guidance on how to provide missing values via environment
    /// variables or configuration files.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when a required field is
    /// empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::require_field(
            &self.service_url,
            &FieldMetadata {
                description: "fleet service URL",
                env_var: "CVAAS_SERVICE_URL",
                toml_key: "service_url",
            },
        )?;
        Self::require_field(
            &self.api_token,
            &FieldMetadata {
                description: "fleet API token",
                env_var: "CVAAS_API_TOKEN",
                toml_key: "api_token",
            },
        )?;
        Ok(())
    }
}

/// Errors raised during configuration loading and validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Indicates a required configuration field is empty or missing.
    #[error("missing configuration field: {0}")]
    MissingField(String),
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
}

impl From<ortho_config::OrthoError> for ConfigError {
    fn from(value: ortho_config::OrthoError) -> Self {
        Self::Parse(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{ConfigError, FleetConfig};

    #[rstest]
    #[case("", "token", "CVAAS_SERVICE_URL")]
    #[case("https://fleet.example.com", "  ", "CVAAS_API_TOKEN")]
    fn validate_rejects_blank_required_fields(
        #[case] service_url: &str,
        #[case] api_token: &str,
        #[case] expected_hint: &str,
    ) {
        let config = FleetConfig {
            service_url: service_url.to_owned(),
            api_token: api_token.to_owned(),
        };
        let err = config.validate().expect_err("expected missing field");
        let ConfigError::MissingField(ref message) = err else {
            panic!("expected MissingField, got: {err}");
        };
        assert!(message.contains(expected_hint), "message: {message}");
    }

    #[rstest]
    fn validate_accepts_complete_configuration() {
        let config = FleetConfig {
            service_url: String::from("https://fleet.example.com"),
            api_token: String::from("token"),
        };
        assert!(config.validate().is_ok());
    }
}
