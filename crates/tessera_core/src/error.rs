//! # Core Error Types
//!
//! Errors surfaced by the registry and its configuration layer.
//!
//! Absence of a component is NOT an error on the hot path: accessors return
//! `Option` and filter pipelines treat a missing component as a non-match.
//! These variants only cover the opt-in fallible accessor and configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::ecs::EntityId;

/// Errors that can occur in the entity/component store.
#[derive(Error, Debug)]
pub enum EcsError {
    /// The entity does not hold a component of the requested type.
    #[error("entity {entity} has no component of type {component}")]
    MissingComponent {
        /// Entity that was looked up.
        entity: EntityId,
        /// Type name of the requested component.
        component: &'static str,
    },

    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::RegistryConfig`].
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The configuration parsed but holds an unusable value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for fallible store operations.
pub type EcsResult<T> = Result<T, EcsError>;
