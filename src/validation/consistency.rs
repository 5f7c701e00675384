//! Relation consistency checks against a schema registry

use std::collections::BTreeSet;

use rayon::prelude::*;
use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::schema::SchemaRegistry;
use crate::types::{EntityRef, RelationCandidate, RelationTarget};

/// Batches larger than this are checked on the rayon pool
pub const PARALLEL_CHECK_THRESHOLD: usize = 256;

/// Evaluates candidate relations against an immutable registry
#[derive(Debug, Clone, Copy)]
pub struct ConsistencyChecker<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> ConsistencyChecker<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a SchemaRegistry {
        self.registry
    }

    /// Resolve every target before evaluating any, so an unknown type is
    /// reported even when an earlier target is already rejected.
    fn resolve_targets<'t>(
        &self,
        relation_type: &str,
        to: &'t RelationTarget,
    ) -> Result<Vec<(&'t str, &'a BTreeSet<String>)>> {
        if to.is_empty() {
            return Err(SchemaError::EmptyTargets(relation_type.to_string()));
        }
        to.entities()
            .iter()
            .map(|target| {
                self.registry
                    .categories_of(&target.entity_type)
                    .map(|categories| (target.entity_type.as_str(), categories))
            })
            .collect()
    }

    /// Check whether `relation_type` may connect `from` to every target in `to`
    ///
    /// Unknown relation or entity types are errors; a registered but
    /// disallowed combination is `Ok(false)`.
    pub fn check(&self, relation_type: &str, from: &EntityRef, to: &RelationTarget) -> Result<bool> {
        let relation = self.registry.resolve_relation(relation_type)?;
        let from_categories = self.registry.categories_of(&from.entity_type)?;
        let targets = self.resolve_targets(relation_type, to)?;

        let consistent = targets.iter().all(|(to_type, to_categories)| {
            relation.permits(&from.entity_type, from_categories, to_type, to_categories)
        });

        debug!(
            relation = relation_type,
            from = %from.entity_type,
            targets = targets.len(),
            consistent,
            "Relation consistency checked"
        );
        Ok(consistent)
    }

    /// Single (from, to) pair by type token
    pub fn check_types(&self, relation_type: &str, from_type: &str, to_type: &str) -> Result<bool> {
        self.check(
            relation_type,
            &EntityRef::new(from_type),
            &RelationTarget::Single(EntityRef::new(to_type)),
        )
    }

    pub fn check_candidate(&self, candidate: &RelationCandidate) -> Result<bool> {
        self.check(&candidate.relation_type, &candidate.from, &candidate.to)
    }

    /// Check many candidates; results keep the input order
    pub fn check_batch(&self, candidates: &[RelationCandidate]) -> Vec<Result<bool>> {
        if candidates.len() > PARALLEL_CHECK_THRESHOLD {
            candidates
                .par_iter()
                .map(|candidate| self.check_candidate(candidate))
                .collect()
        } else {
            candidates
                .iter()
                .map(|candidate| self.check_candidate(candidate))
                .collect()
        }
    }

    /// Targets the relation does not permit from `from`, in input order
    ///
    /// Empty when the relation is consistent. Lets callers name the
    /// offending containees in validation messages.
    pub fn rejected_targets<'t>(
        &self,
        relation_type: &str,
        from: &EntityRef,
        to: &'t RelationTarget,
    ) -> Result<Vec<&'t EntityRef>> {
        let relation = self.registry.resolve_relation(relation_type)?;
        let from_categories = self.registry.categories_of(&from.entity_type)?;
        let targets = self.resolve_targets(relation_type, to)?;

        Ok(to
            .entities()
            .iter()
            .zip(targets)
            .filter(|(_, (to_type, to_categories))| {
                !relation.permits(&from.entity_type, from_categories, to_type, to_categories)
            })
            .map(|(entity, _)| entity)
            .collect())
    }

    /// Every registered relation type permitted from `from_type` to `to_type`,
    /// in name order
    pub fn allowed_relation_types(&self, from_type: &str, to_type: &str) -> Result<Vec<&'a str>> {
        let from_categories = self.registry.categories_of(from_type)?;
        let to_categories = self.registry.categories_of(to_type)?;
        Ok(self
            .registry
            .relation_types()
            .filter(|def| def.permits(from_type, from_categories, to_type, to_categories))
            .map(|def| def.name.as_str())
            .collect())
    }
}
