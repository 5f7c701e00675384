//! Entity descriptors consulted by the validator

use serde::{Deserialize, Serialize};

/// One endpoint of a candidate relation.
///
/// Real platform entities carry many more fields; only the type is consulted
/// when checking relation consistency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub entity_type: String,
}

impl EntityRef {
    /// Create a new entity descriptor
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
        }
    }
}

impl From<&str> for EntityRef {
    fn from(entity_type: &str) -> Self {
        Self::new(entity_type)
    }
}

impl From<String> for EntityRef {
    fn from(entity_type: String) -> Self {
        Self { entity_type }
    }
}
