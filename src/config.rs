// Copyright 2025 Cowboy AI, LLC.

//! Runtime configuration for identifier minting

use crate::errors::{DomainError, DomainResult};
use oxrdf::NamedNode;
use serde::{Deserialize, Serialize};

/// Environment variable holding the API base IRI
pub const API_CORE_BASE_VAR: &str = "API_CORE_BASE";

/// Core configuration shared by all commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Base IRI every project identifier is minted under; must end with `/`
    pub api_core_base: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            api_core_base: "http://localhost/".to_string(),
        }
    }
}

impl CoreConfig {
    /// Create a configuration with an explicit base IRI
    pub fn new(api_core_base: impl Into<String>) -> Self {
        Self {
            api_core_base: api_core_base.into(),
        }
    }

    /// Read the configuration from the process environment, falling back to defaults
    pub fn from_env() -> DomainResult<Self> {
        let config = match std::env::var(API_CORE_BASE_VAR) {
            Ok(base) => Self::new(base),
            Err(_) => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the base is an absolute IRI ending with a slash
    pub fn validate(&self) -> DomainResult<()> {
        NamedNode::new(self.api_core_base.as_str())?;
        if !self.api_core_base.ends_with('/') {
            return Err(DomainError::ValidationError(format!(
                "{API_CORE_BASE_VAR} must end with '/': {}",
                self.api_core_base
            )));
        }
        Ok(())
    }
}
