//! # Registry Configuration
//!
//! Loaded once at startup from TOML. Nothing here is consulted on the hot path:
//! the values only decide how much memory each store reserves up-front and
//! where the registry's identifier space begins.
//!
//! ```toml
//! initial_capacity = 4096
//! first_entity_id = 1
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ecs::EntityId;
use crate::error::{EcsError, EcsResult};

/// Tunables for a [`crate::Registry`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Pool and index capacity reserved for every store the registry creates.
    pub initial_capacity: usize,
    /// First identifier handed out by the registry's own generator.
    pub first_entity_id: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            first_entity_id: 1,
        }
    }
}

impl RegistryConfig {
    /// Parses a configuration from a TOML string and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ConfigParse`] for malformed TOML and
    /// [`EcsError::InvalidConfig`] if validation fails.
    pub fn from_toml_str(source: &str) -> EcsResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ConfigRead`] if the file cannot be read, otherwise
    /// the same errors as [`RegistryConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> EcsResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| EcsError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks that the configuration can be applied.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidConfig`] if `first_entity_id` is the
    /// reserved undefined identifier.
    pub fn validate(&self) -> EcsResult<()> {
        if self.first_entity_id == EntityId::UNDEFINED.raw() {
            return Err(EcsError::InvalidConfig(
                "first_entity_id must be non-zero (0 is reserved for undefined)".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.initial_capacity, 0);
        assert_eq!(config.first_entity_id, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = RegistryConfig::from_toml_str("initial_capacity = 128").unwrap();
        assert_eq!(config.initial_capacity, 128);
        assert_eq!(config.first_entity_id, 1);
    }

    #[test]
    fn test_zero_first_id_rejected() {
        let err = RegistryConfig::from_toml_str("first_entity_id = 0").unwrap_err();
        assert!(matches!(err, EcsError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = RegistryConfig::from_toml_str("initial_capacity = \"lots\"").unwrap_err();
        assert!(matches!(err, EcsError::ConfigParse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = RegistryConfig::load("/nonexistent/tessera/registry.toml").unwrap_err();
        assert!(matches!(err, EcsError::ConfigRead { .. }));
    }
}
