// Validation policy configuration

use crate::{ConfigError, DEFAULT_MAX_YEARS_AHEAD, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a failed Luhn checksum is treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumPolicy {
    /// Reject with `FailedChecksum`
    #[default]
    Enforce,
    /// Accept the number and log a warning
    Advisory,
}

/// Product-level knobs for the form validator.
///
/// Loaded from TOML; missing keys keep their defaults.
///
/// ```
/// use payform_validation::{ChecksumPolicy, ValidationPolicy};
///
/// let policy = ValidationPolicy::from_toml_str(r#"
///     checksum = "advisory"
///     max_years_ahead = 10
/// "#).unwrap();
///
/// assert_eq!(policy.checksum, ChecksumPolicy::Advisory);
/// assert_eq!(policy.max_years_ahead, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationPolicy {
    pub checksum: ChecksumPolicy,
    pub max_years_ahead: u32,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            checksum: ChecksumPolicy::Enforce,
            max_years_ahead: DEFAULT_MAX_YEARS_AHEAD,
        }
    }
}

impl ValidationPolicy {
    /// Parse and check a policy from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let policy: Self = toml::from_str(content)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Load a policy from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Set the checksum policy
    pub fn with_checksum(mut self, checksum: ChecksumPolicy) -> Self {
        self.checksum = checksum;
        self
    }

    /// Set the expiration horizon
    pub fn with_max_years_ahead(mut self, years: u32) -> Self {
        self.max_years_ahead = years;
        self
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if !(1..=50).contains(&self.max_years_ahead) {
            return Err(ConfigError::ValidationError(format!(
                "max_years_ahead must be between 1 and 50, got {}",
                self.max_years_ahead
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let policy = ValidationPolicy::default();
        assert_eq!(policy.checksum, ChecksumPolicy::Enforce);
        assert_eq!(policy.max_years_ahead, 15);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let policy = ValidationPolicy::from_toml_str("").unwrap();
        assert_eq!(policy, ValidationPolicy::default());
    }

    #[test]
    fn test_out_of_range_horizon() {
        let result = ValidationPolicy::from_toml_str("max_years_ahead = 0");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = ValidationPolicy::from_toml_str("luhn = false");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_unknown_checksum_policy() {
        let result = ValidationPolicy::from_toml_str(r#"checksum = "sometimes""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = ValidationPolicy::from_file("/nonexistent/payform-policy.toml");
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_builder() {
        let policy = ValidationPolicy::default()
            .with_checksum(ChecksumPolicy::Advisory)
            .with_max_years_ahead(20);
        assert_eq!(policy.checksum, ChecksumPolicy::Advisory);
        assert_eq!(policy.max_years_ahead, 20);
    }
}
