//! Error types for schema registration and relation validation

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchemaError>;

#[derive(Error, Debug)]
pub enum SchemaError {
    /// Relation type token is not registered.
    #[error("unknown relation type: {0}")]
    UnknownRelationType(String),

    /// Entity type token is not registered.
    #[error("unknown entity type: {0}")]
    UnknownEntityType(String),

    /// A sequence of relation targets was empty.
    #[error("relation {0} requires at least one target")]
    EmptyTargets(String),

    /// The process-wide schema was queried before installation.
    #[error("schema has not been installed")]
    SchemaNotInstalled,

    /// A process-wide schema is already installed.
    #[error("schema is already installed")]
    AlreadyInstalled,

    #[error("duplicate entity type: {0}")]
    DuplicateEntityType(String),

    #[error("duplicate relation type: {0}")]
    DuplicateRelationType(String),

    #[error("entity type {type_name} has unknown parent {parent}")]
    UnknownParentType { type_name: String, parent: String },

    #[error("inheritance cycle detected involving type: {0}")]
    InheritanceCycle(String),

    /// A rule endpoint names a token that is not a registered entity type.
    #[error("relation {relation} references unknown type {token}")]
    UnknownTypeInRule { relation: String, token: String },

    /// An `AnyOf` endpoint with no members can never match.
    #[error("relation {0} has an empty endpoint set")]
    EmptyEndpoint(String),

    #[error("relation {0} has no consistency rules")]
    RelationWithoutRules(String),

    #[error("unknown attribute owner: {0}")]
    UnknownAttributeOwner(String),

    /// Same attribute name declared with a different kind or multiplicity.
    #[error("attribute {name} conflicts with an earlier definition on {owner}")]
    ConflictingAttribute { name: String, owner: String },

    /// An environment variable is set but not valid unicode.
    #[error("environment variable {0} is not valid unicode")]
    InvalidEnvVar(String),

    /// I/O error while reading a configuration document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error while parsing a configuration document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A blocking validation task panicked or was cancelled.
    #[error("validation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl SchemaError {
    /// True for errors raised by the validator on unresolvable input tokens.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            SchemaError::UnknownRelationType(_) | SchemaError::UnknownEntityType(_)
        )
    }
}
