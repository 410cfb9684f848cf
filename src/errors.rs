// Copyright 2025 Cowboy AI, LLC.

//! Error types for domain operations

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    /// A referenced resource could not be resolved in the store
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        /// Type of entity that wasn't found
        entity_type: String,
        /// IRI that was looked up
        id: String,
    },

    /// Business rule violation
    #[error("Business rule violation: {rule}")]
    BusinessRuleViolation {
        /// Description of the violated rule
        rule: String,
    },

    /// Project structure contradicts itself (e.g. two dimension metadata collections)
    #[error("Inconsistent project state: {0}")]
    InconsistentState(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A resource with the same identifier already exists
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// The backing graph store rejected an operation
    #[error("Store error: {0}")]
    StoreError(String),

    /// External service error
    #[error("External service error: {service} - {message}")]
    ExternalServiceError {
        /// Name of the external service
        service: String,
        /// Error message from the service
        message: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

impl From<oxrdf::IriParseError> for DomainError {
    fn from(err: oxrdf::IriParseError) -> Self {
        DomainError::ValidationError(format!("invalid IRI: {err}"))
    }
}

impl DomainError {
    /// Create a not-found error for an entity type and identifier
    pub fn not_found(entity_type: impl Into<String>, id: impl ToString) -> Self {
        DomainError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Create a business rule violation
    pub fn rule(rule: impl Into<String>) -> Self {
        DomainError::BusinessRuleViolation { rule: rule.into() }
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }

    /// Check if this is a business rule violation
    pub fn is_business_rule_violation(&self) -> bool {
        matches!(self, DomainError::BusinessRuleViolation { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            DomainError::ValidationError(_) | DomainError::BusinessRuleViolation { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = DomainError::not_found("Table", "http://example.com/table");
        assert_eq!(
            err.to_string(),
            "Entity not found: Table with id http://example.com/table"
        );

        let err = DomainError::rule("year is already mapped");
        assert_eq!(
            err.to_string(),
            "Business rule violation: year is already mapped"
        );

        let err = DomainError::InconsistentState("two collections".to_string());
        assert_eq!(err.to_string(), "Inconsistent project state: two collections");

        let err = DomainError::ExternalServiceError {
            service: "media-storage".to_string(),
            message: "timeout".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "External service error: media-storage - timeout"
        );
    }

    #[test]
    fn test_helper_method_exclusivity() {
        let not_found = DomainError::not_found("Job", "job-1");
        assert!(not_found.is_not_found());
        assert!(!not_found.is_validation_error());
        assert!(!not_found.is_business_rule_violation());

        let rule = DomainError::rule("duplicate");
        assert!(!rule.is_not_found());
        assert!(rule.is_validation_error());
        assert!(rule.is_business_rule_violation());

        let validation = DomainError::ValidationError("blank name".to_string());
        assert!(validation.is_validation_error());
        assert!(!validation.is_business_rule_violation());
    }

    #[test]
    fn test_iri_parse_error_conversion() {
        let err: DomainError = oxrdf::NamedNode::new("not an iri").unwrap_err().into();
        match err {
            DomainError::ValidationError(msg) => assert!(msg.starts_with("invalid IRI")),
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn test_serde_json_conversion() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{ invalid json }").unwrap_err();
        let domain_err: DomainError = serde_err.into();
        assert!(matches!(domain_err, DomainError::SerializationError(msg) if !msg.is_empty()));
    }
}
