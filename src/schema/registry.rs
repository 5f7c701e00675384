//! The schema registry - immutable lookup of types, categories, rules and attributes

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};

use super::{AttributeDefinition, ConsistencyRule};

/// Family a relation type belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationFamily {
    /// Reference relations (created-by, object, object-marking...).
    Meta,
    /// STIX core relationships (uses, indicates, targets...).
    Core,
    /// Relations between cyber observables (obs_content, obs_resolves-to...).
    CyberObservable,
}

impl RelationFamily {
    pub const ALL: [RelationFamily; 3] = [
        RelationFamily::Meta,
        RelationFamily::Core,
        RelationFamily::CyberObservable,
    ];

    /// Abstract token naming the whole family
    pub fn abstract_token(self) -> &'static str {
        match self {
            RelationFamily::Meta => "stix-meta-relationship",
            RelationFamily::Core => "stix-core-relationship",
            RelationFamily::CyberObservable => "stix-cyber-observable-relationship",
        }
    }

    pub fn from_abstract_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.abstract_token() == token)
    }
}

/// Entity type definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityTypeDef {
    pub name: String,
    /// Direct parent categories, in declaration order.
    #[serde(default)]
    pub parents: Vec<String>,
    /// Abstract types only serve as categories for concrete types.
    #[serde(rename = "abstract", default)]
    pub is_abstract: bool,
}

impl EntityTypeDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parents: Vec::new(),
            is_abstract: false,
        }
    }
}

/// Relation type definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationTypeDef {
    pub name: String,
    pub family: RelationFamily,
    pub rules: Vec<ConsistencyRule>,
}

impl RelationTypeDef {
    pub fn new(name: impl Into<String>, family: RelationFamily) -> Self {
        Self {
            name: name.into(),
            family,
            rules: Vec::new(),
        }
    }

    /// Check whether any rule permits the (from, to) pair
    pub fn permits(
        &self,
        from_type: &str,
        from_categories: &BTreeSet<String>,
        to_type: &str,
        to_categories: &BTreeSet<String>,
    ) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.permits(from_type, from_categories, to_type, to_categories))
    }
}

/// Immutable schema. Built once by [`SchemaBuilder`](super::SchemaBuilder).
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    entity_types: HashMap<String, EntityTypeDef>,
    /// Token itself followed by all transitive parents, nearest first.
    lineage: HashMap<String, Vec<String>>,
    /// Same content as `lineage`, as a set.
    categories: HashMap<String, BTreeSet<String>>,
    /// Sorted so enumeration is deterministic.
    relation_types: BTreeMap<String, RelationTypeDef>,
    /// Attributes declared directly on an owner token.
    attributes: HashMap<String, Vec<AttributeDefinition>>,
    /// First definition seen for each attribute name.
    attribute_index: HashMap<String, AttributeDefinition>,
}

impl SchemaRegistry {
    pub(crate) fn new(
        entity_types: HashMap<String, EntityTypeDef>,
        lineage: HashMap<String, Vec<String>>,
        relation_types: BTreeMap<String, RelationTypeDef>,
        attributes: HashMap<String, Vec<AttributeDefinition>>,
        attribute_index: HashMap<String, AttributeDefinition>,
    ) -> Self {
        let categories = lineage
            .iter()
            .map(|(token, line)| (token.clone(), line.iter().cloned().collect()))
            .collect();
        Self {
            entity_types,
            lineage,
            categories,
            relation_types,
            attributes,
            attribute_index,
        }
    }

    // ==================== Entity Types ====================

    pub fn entity_type(&self, token: &str) -> Option<&EntityTypeDef> {
        self.entity_types.get(token)
    }

    pub fn has_entity_type(&self, token: &str) -> bool {
        self.entity_types.contains_key(token)
    }

    pub fn entity_types(&self) -> impl Iterator<Item = &EntityTypeDef> {
        self.entity_types.values()
    }

    pub fn entity_type_count(&self) -> usize {
        self.entity_types.len()
    }

    /// Resolve a type token to every category it belongs to, itself included
    pub fn categories_of(&self, token: &str) -> Result<&BTreeSet<String>> {
        self.categories
            .get(token)
            .ok_or_else(|| SchemaError::UnknownEntityType(token.to_string()))
    }

    /// Token followed by its ancestors, nearest first
    pub fn lineage_of(&self, token: &str) -> Result<&[String]> {
        self.lineage
            .get(token)
            .map(Vec::as_slice)
            .ok_or_else(|| SchemaError::UnknownEntityType(token.to_string()))
    }

    /// Check if `token` is `category` or belongs to it
    pub fn is_subtype(&self, token: &str, category: &str) -> bool {
        self.categories
            .get(token)
            .map(|set| set.contains(category))
            .unwrap_or(false)
    }

    /// Concrete (non-abstract) members of a category, sorted
    pub fn concrete_members(&self, category: &str) -> Vec<&str> {
        let mut members: Vec<&str> = self
            .entity_types
            .values()
            .filter(|def| !def.is_abstract && self.is_subtype(&def.name, category))
            .map(|def| def.name.as_str())
            .collect();
        members.sort_unstable();
        members
    }

    // ==================== Relation Types ====================

    pub fn relation_type(&self, token: &str) -> Option<&RelationTypeDef> {
        self.relation_types.get(token)
    }

    /// Resolve a relation token, failing loudly if it is not registered
    pub fn resolve_relation(&self, token: &str) -> Result<&RelationTypeDef> {
        self.relation_types
            .get(token)
            .ok_or_else(|| SchemaError::UnknownRelationType(token.to_string()))
    }

    pub fn has_relation_type(&self, token: &str) -> bool {
        self.relation_types.contains_key(token)
    }

    /// Relation types in name order
    pub fn relation_types(&self) -> impl Iterator<Item = &RelationTypeDef> {
        self.relation_types.values()
    }

    pub fn relation_type_count(&self) -> usize {
        self.relation_types.len()
    }

    /// Family of a relation type or of a family's abstract token
    pub fn relation_family(&self, token: &str) -> Option<RelationFamily> {
        self.relation_types
            .get(token)
            .map(|def| def.family)
            .or_else(|| RelationFamily::from_abstract_token(token))
    }

    pub fn is_stix_core_relationship(&self, token: &str) -> bool {
        self.relation_family(token) == Some(RelationFamily::Core)
    }

    pub fn is_stix_meta_relationship(&self, token: &str) -> bool {
        self.relation_family(token) == Some(RelationFamily::Meta)
    }

    pub fn is_stix_cyber_observable_relationship(&self, token: &str) -> bool {
        self.relation_family(token) == Some(RelationFamily::CyberObservable)
    }

    /// Registered relation types of one family, in name order
    pub fn relation_types_of(&self, family: RelationFamily) -> Vec<&str> {
        self.relation_types
            .values()
            .filter(|def| def.family == family)
            .map(|def| def.name.as_str())
            .collect()
    }

    // ==================== Attributes ====================

    /// Owner tokens whose attributes `owner` inherits, itself first
    fn attribute_owners<'a>(&'a self, owner: &'a str) -> Result<Vec<&'a str>> {
        if let Some(line) = self.lineage.get(owner) {
            return Ok(line.iter().map(String::as_str).collect());
        }
        if let Some(def) = self.relation_types.get(owner) {
            return Ok(vec![def.name.as_str(), def.family.abstract_token()]);
        }
        if RelationFamily::from_abstract_token(owner).is_some() {
            return Ok(vec![owner]);
        }
        Err(SchemaError::UnknownAttributeOwner(owner.to_string()))
    }

    /// Attributes of an entity or relation type, own and inherited
    ///
    /// A name declared at several levels is reported once, nearest first.
    pub fn get_attributes(&self, owner: &str) -> Result<Vec<&AttributeDefinition>> {
        let mut seen = HashSet::new();
        let mut result = Vec::new();
        for token in self.attribute_owners(owner)? {
            for attr in self.attributes.get(token).into_iter().flatten() {
                if seen.insert(attr.name.as_str()) {
                    result.push(attr);
                }
            }
        }
        Ok(result)
    }

    pub fn get_attribute(&self, owner: &str, name: &str) -> Result<Option<&AttributeDefinition>> {
        Ok(self
            .get_attributes(owner)?
            .into_iter()
            .find(|attr| attr.name == name))
    }

    pub fn get_upsert_attribute_names(&self, owner: &str) -> Result<Vec<&str>> {
        Ok(self
            .get_attributes(owner)?
            .into_iter()
            .filter(|attr| attr.upsert)
            .map(|attr| attr.name.as_str())
            .collect())
    }

    pub fn get_mandatory_attribute_names(&self, owner: &str) -> Result<Vec<&str>> {
        Ok(self
            .get_attributes(owner)?
            .into_iter()
            .filter(|attr| attr.mandatory)
            .map(|attr| attr.name.as_str())
            .collect())
    }

    pub fn is_json_attribute(&self, name: &str) -> bool {
        self.attribute_index
            .get(name)
            .map(|attr| attr.kind == super::AttributeKind::Json)
            .unwrap_or(false)
    }

    pub fn is_date_numeric_or_boolean_attribute(&self, name: &str) -> bool {
        self.attribute_index
            .get(name)
            .map(|attr| attr.kind.is_date_numeric_or_boolean())
            .unwrap_or(false)
    }

    pub fn is_multiple_attribute(&self, name: &str) -> bool {
        self.attribute_index
            .get(name)
            .map(|attr| attr.multiple)
            .unwrap_or(false)
    }
}
