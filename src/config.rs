//!
//! Gate configuration.

use std::path::Path;

use crate::error::ConfigError;

/// Storage key the session record lives under.
pub const DEFAULT_STORAGE_KEY: &str = "veterinaryUser";

/// Selector of the logout controls in the shared navigation markup.
pub const DEFAULT_LOGOUT_SELECTOR: &str = ".btn-logout";

/// Settings for a [`Gate`](crate::access::Gate).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    pub storage_key: String,
    pub logout_selector: String,
    /// bcrypt work factor for newly hashed passwords.
    pub bcrypt_cost: u32,
}

impl Default for GateConfig {
    fn default() -> Self {
        GateConfig {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            logout_selector: DEFAULT_LOGOUT_SELECTOR.to_string(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl GateConfig {
    /// Parses a JSON document. Missing fields take their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: GateConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage_key must not be empty".into()));
        }
        if self.logout_selector.trim().is_empty() {
            return Err(ConfigError::Invalid("logout_selector must not be empty".into()));
        }
        // bcrypt accepts work factors 4..=31.
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::Invalid(format!(
                "bcrypt_cost must be between 4 and 31, got {}",
                self.bcrypt_cost
            )));
        }
        Ok(())
    }
}
