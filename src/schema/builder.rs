//! SchemaBuilder for constructing an immutable SchemaRegistry.
//!
//! Registrations may arrive in any order (catalog, modules, configuration
//! documents); references between them are resolved and checked in `build`.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use tracing::{debug, info};

use crate::error::{Result, SchemaError};

use super::config::SchemaConfig;
use super::{
    AttributeDefinition, ConsistencyRule, Endpoint, EntityTypeDef, RelationFamily,
    RelationTypeDef, SchemaRegistry,
};

/// Builder for constructing an immutable SchemaRegistry.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    entity_types: HashMap<String, EntityTypeDef>,
    /// Registration order, kept for deterministic error reporting.
    entity_order: Vec<String>,
    relation_types: BTreeMap<String, RelationTypeDef>,
    /// (owner, definitions) in registration order.
    attributes: Vec<(String, Vec<AttributeDefinition>)>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity type definition.
    pub fn add_entity_type(&mut self, name: impl Into<String>) -> EntityTypeBuilder<'_> {
        EntityTypeBuilder {
            builder: self,
            def: EntityTypeDef::new(name),
        }
    }

    /// Add a relation type definition.
    pub fn add_relation_type(
        &mut self,
        name: impl Into<String>,
        family: RelationFamily,
    ) -> RelationTypeBuilder<'_> {
        RelationTypeBuilder {
            builder: self,
            def: RelationTypeDef::new(name, family),
        }
    }

    /// Declare attributes on an entity type, relation type or relation family token.
    pub fn add_attributes(
        &mut self,
        owner: impl Into<String>,
        definitions: impl IntoIterator<Item = AttributeDefinition>,
    ) -> &mut Self {
        self.attributes
            .push((owner.into(), definitions.into_iter().collect()));
        self
    }

    pub fn has_entity_type(&self, name: &str) -> bool {
        self.entity_types.contains_key(name)
    }

    pub fn has_relation_type(&self, name: &str) -> bool {
        self.relation_types.contains_key(name)
    }

    fn insert_entity_type(&mut self, def: EntityTypeDef) -> Result<()> {
        if self.entity_types.contains_key(&def.name) {
            return Err(SchemaError::DuplicateEntityType(def.name));
        }
        self.entity_order.push(def.name.clone());
        self.entity_types.insert(def.name.clone(), def);
        Ok(())
    }

    fn insert_relation_type(&mut self, def: RelationTypeDef) -> Result<()> {
        if self.relation_types.contains_key(&def.name) {
            return Err(SchemaError::DuplicateRelationType(def.name));
        }
        self.relation_types.insert(def.name.clone(), def);
        Ok(())
    }

    /// Register everything a configuration document declares.
    pub fn apply_config(&mut self, config: SchemaConfig) -> Result<&mut Self> {
        debug!(
            entity_types = config.entity_types.len(),
            relation_types = config.relation_types.len(),
            "Applying schema configuration"
        );
        for def in config.entity_types {
            self.insert_entity_type(def)?;
        }
        for def in config.relation_types {
            self.insert_relation_type(def)?;
        }
        for block in config.attributes {
            self.add_attributes(block.owner, block.definitions);
        }
        Ok(self)
    }

    /// Build the immutable SchemaRegistry.
    pub fn build(self) -> Result<SchemaRegistry> {
        // Parents must exist
        for name in &self.entity_order {
            let def = &self.entity_types[name];
            for parent in &def.parents {
                if !self.entity_types.contains_key(parent) {
                    return Err(SchemaError::UnknownParentType {
                        type_name: def.name.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }

        self.check_acyclic()?;

        let lineage: HashMap<String, Vec<String>> = self
            .entity_types
            .keys()
            .map(|name| (name.clone(), self.compute_lineage(name)))
            .collect();

        for def in self.relation_types.values() {
            if def.rules.is_empty() {
                return Err(SchemaError::RelationWithoutRules(def.name.clone()));
            }
            for rule in &def.rules {
                self.check_endpoint(&def.name, &rule.from)?;
                self.check_endpoint(&def.name, &rule.to)?;
            }
        }

        let mut attributes: HashMap<String, Vec<AttributeDefinition>> = HashMap::new();
        let mut attribute_index: HashMap<String, AttributeDefinition> = HashMap::new();
        for (owner, definitions) in self.attributes {
            let known = self.entity_types.contains_key(&owner)
                || self.relation_types.contains_key(&owner)
                || RelationFamily::from_abstract_token(&owner).is_some();
            if !known {
                return Err(SchemaError::UnknownAttributeOwner(owner));
            }
            for attr in definitions {
                match attribute_index.get(&attr.name) {
                    Some(existing) if !existing.same_shape(&attr) => {
                        return Err(SchemaError::ConflictingAttribute {
                            name: attr.name,
                            owner,
                        });
                    }
                    Some(_) => {}
                    None => {
                        attribute_index.insert(attr.name.clone(), attr.clone());
                    }
                }
                attributes.entry(owner.clone()).or_default().push(attr);
            }
        }

        info!(
            entity_types = self.entity_types.len(),
            relation_types = self.relation_types.len(),
            attributes = attribute_index.len(),
            "Schema registry built"
        );

        Ok(SchemaRegistry::new(
            self.entity_types,
            lineage,
            self.relation_types,
            attributes,
            attribute_index,
        ))
    }

    fn check_endpoint(&self, relation: &str, endpoint: &Endpoint) -> Result<()> {
        if endpoint.has_empty_set() {
            return Err(SchemaError::EmptyEndpoint(relation.to_string()));
        }
        for token in endpoint.tokens() {
            if !self.entity_types.contains_key(token) {
                return Err(SchemaError::UnknownTypeInRule {
                    relation: relation.to_string(),
                    token: token.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Depth-first walk over parent links; a back edge is a cycle.
    fn check_acyclic(&self) -> Result<()> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Visiting,
            Done,
        }

        fn visit<'a>(
            name: &'a str,
            types: &'a HashMap<String, EntityTypeDef>,
            marks: &mut HashMap<&'a str, Mark>,
        ) -> Result<()> {
            match marks.get(name) {
                Some(Mark::Done) => return Ok(()),
                Some(Mark::Visiting) => {
                    return Err(SchemaError::InheritanceCycle(name.to_string()))
                }
                None => {}
            }
            marks.insert(name, Mark::Visiting);
            for parent in &types[name].parents {
                visit(parent, types, marks)?;
            }
            marks.insert(name, Mark::Done);
            Ok(())
        }

        let mut marks = HashMap::new();
        for name in &self.entity_order {
            visit(name, &self.entity_types, &mut marks)?;
        }
        Ok(())
    }

    /// Breadth-first over parents: the token, then nearest ancestors first.
    fn compute_lineage(&self, name: &str) -> Vec<String> {
        let mut line = Vec::new();
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([name]);
        while let Some(current) = queue.pop_front() {
            if !seen.insert(current) {
                continue;
            }
            line.push(current.to_string());
            if let Some(def) = self.entity_types.get(current) {
                queue.extend(def.parents.iter().map(String::as_str));
            }
        }
        line
    }
}

/// Builder for an entity type definition.
pub struct EntityTypeBuilder<'a> {
    builder: &'a mut SchemaBuilder,
    def: EntityTypeDef,
}

impl<'a> EntityTypeBuilder<'a> {
    /// Add a parent category by name.
    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.def.parents.push(parent.into());
        self
    }

    pub fn parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.def.parents.extend(parents.into_iter().map(Into::into));
        self
    }

    /// Mark as abstract.
    pub fn abstract_type(mut self) -> Self {
        self.def.is_abstract = true;
        self
    }

    /// Finish building this type.
    pub fn done(self) -> Result<()> {
        self.builder.insert_entity_type(self.def)
    }
}

/// Builder for a relation type definition.
pub struct RelationTypeBuilder<'a> {
    builder: &'a mut SchemaBuilder,
    def: RelationTypeDef,
}

impl<'a> RelationTypeBuilder<'a> {
    /// Permit relations from `from` to `to`.
    pub fn rule(mut self, from: Endpoint, to: Endpoint) -> Self {
        self.def.rules.push(ConsistencyRule::new(from, to));
        self
    }

    /// Finish building this relation type.
    pub fn done(self) -> Result<()> {
        self.builder.insert_relation_type(self.def)
    }
}
