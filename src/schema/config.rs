//! Schema configuration documents
//!
//! Extension modules and deployments can register extra entity types,
//! relation types and attributes through a JSON document:
//!
//! ```json
//! {
//!   "entityTypes": [{ "name": "Channel", "parents": ["Stix-Domain-Object"] }],
//!   "relationTypes": [{
//!     "name": "belongs-to",
//!     "family": "core",
//!     "rules": [{ "from": { "type": "Channel" }, "to": { "category": "Identity" } }]
//!   }],
//!   "attributes": [{ "owner": "Channel", "definitions": [{ "name": "channel_types", "kind": "string", "multiple": true }] }]
//! }
//! ```

use std::env::{self, VarError};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, SchemaError};

use super::{AttributeDefinition, EntityTypeDef, RelationTypeDef};

/// Environment variable naming an extension document to load at startup
pub const SCHEMA_FILE_ENV: &str = "CTI_SCHEMA_FILE";

/// Attributes declared on one owner token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeBlock {
    pub owner: String,
    #[serde(default)]
    pub definitions: Vec<AttributeDefinition>,
}

/// Registrations read from a configuration document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaConfig {
    #[serde(default)]
    pub entity_types: Vec<EntityTypeDef>,
    #[serde(default)]
    pub relation_types: Vec<RelationTypeDef>,
    #[serde(default)]
    pub attributes: Vec<AttributeBlock>,
}

impl SchemaConfig {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a configuration document from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading schema configuration");
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load the document named by `CTI_SCHEMA_FILE`, if the variable is set
    ///
    /// Relative paths are resolved against the current directory.
    pub fn from_env() -> Result<Option<Self>> {
        Self::from_var(env::var(SCHEMA_FILE_ENV))
    }

    fn from_var(value: std::result::Result<String, VarError>) -> Result<Option<Self>> {
        match value {
            Ok(path) if path.trim().is_empty() => Ok(None),
            Ok(path) => {
                let path = resolve_path(path.trim());
                warn!(path = %path.display(), "Extending schema from {}", SCHEMA_FILE_ENV);
                Self::load(path).map(Some)
            }
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => {
                Err(SchemaError::InvalidEnvVar(SCHEMA_FILE_ENV.to_string()))
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entity_types.is_empty() && self.relation_types.is_empty() && self.attributes.is_empty()
    }
}

fn resolve_path(path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        return path;
    }
    env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(path)
}
