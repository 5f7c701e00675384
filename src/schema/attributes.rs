//! Attribute definitions attached to entity and relation types

use serde::{Deserialize, Serialize};

/// Storage kind of an attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    String,
    Date,
    Numeric,
    Boolean,
    Json,
}

impl AttributeKind {
    /// Date, numeric and boolean values share the same indexing path
    pub fn is_date_numeric_or_boolean(self) -> bool {
        matches!(
            self,
            AttributeKind::Date | AttributeKind::Numeric | AttributeKind::Boolean
        )
    }
}

/// Attribute definition within a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    pub name: String,
    pub kind: AttributeKind,
    /// Whether the attribute holds a list of values.
    #[serde(default)]
    pub multiple: bool,
    #[serde(default)]
    pub mandatory: bool,
    /// Whether the value is overwritten when an existing entity is upserted.
    #[serde(default)]
    pub upsert: bool,
}

impl AttributeDefinition {
    pub fn new(name: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            multiple: false,
            mandatory: false,
            upsert: false,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, AttributeKind::String)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, AttributeKind::Date)
    }

    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, AttributeKind::Numeric)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, AttributeKind::Boolean)
    }

    pub fn json(name: impl Into<String>) -> Self {
        Self::new(name, AttributeKind::Json)
    }

    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub fn upsert(mut self) -> Self {
        self.upsert = true;
        self
    }

    /// Two definitions of one name may differ in flags but not in shape.
    pub(crate) fn same_shape(&self, other: &AttributeDefinition) -> bool {
        self.kind == other.kind && self.multiple == other.multiple
    }
}
