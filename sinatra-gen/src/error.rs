//! Error types for model derivation and code generation
//!
//! This module contains error types used across the pipeline and both binaries.

/// Error type for model derivation and code generation
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Code generation failed
    #[error("code generation error: {0}")]
    CodeGenError(String),

    /// Failed to parse a GraphQL schema document
    #[error("parse error: {0}")]
    Parse(String),

    /// A field references a type that is not defined in the schema
    #[error("type `{type_name}` referenced by `{model}.{field}` is not defined in the schema")]
    UndefinedType {
        /// Model owning the field
        model: String,
        /// Field name
        field: String,
        /// Referenced type name
        type_name: String,
    },

    /// A database relationship points to a model missing from the catalog
    #[error("relationship `{model}.{field}` points to unknown model `{target}`")]
    UnknownRelationship {
        /// Model owning the relationship
        model: String,
        /// Field carrying the relationship
        field: String,
        /// Target model name
        target: String,
    },

    /// Invalid configuration
    #[error("config error: {0}")]
    Config(String),

    /// Filesystem failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML deserialization failure
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<String> for GeneratorError {
    fn from(s: String) -> Self {
        GeneratorError::CodeGenError(s)
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, GeneratorError>;
