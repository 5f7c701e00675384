//! Relation candidates submitted for validation

use serde::{Deserialize, Serialize};

use super::EntityRef;

/// Target side of a candidate relation: one entity or an ordered sequence
///
/// A sequence is used by reference-style relations (`object`,
/// `object-marking`) whose targets may be of several disjoint types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationTarget {
    Single(EntityRef),
    Many(Vec<EntityRef>),
}

impl RelationTarget {
    /// Build a sequence target from type tokens
    pub fn many<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RelationTarget::Many(types.into_iter().map(EntityRef::new).collect())
    }

    /// Target entities in order
    pub fn entities(&self) -> &[EntityRef] {
        match self {
            RelationTarget::Single(entity) => std::slice::from_ref(entity),
            RelationTarget::Many(entities) => entities,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entities().is_empty()
    }
}

impl From<EntityRef> for RelationTarget {
    fn from(entity: EntityRef) -> Self {
        RelationTarget::Single(entity)
    }
}

impl From<&EntityRef> for RelationTarget {
    fn from(entity: &EntityRef) -> Self {
        RelationTarget::Single(entity.clone())
    }
}

impl From<Vec<EntityRef>> for RelationTarget {
    fn from(entities: Vec<EntityRef>) -> Self {
        RelationTarget::Many(entities)
    }
}

impl From<&str> for RelationTarget {
    fn from(entity_type: &str) -> Self {
        RelationTarget::Single(EntityRef::new(entity_type))
    }
}

/// A proposed edge, as handed over by the write path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationCandidate {
    #[serde(rename = "relationType")]
    pub relation_type: String,
    pub from: EntityRef,
    pub to: RelationTarget,
}

impl RelationCandidate {
    /// Create a new relation candidate
    pub fn new(
        relation_type: impl Into<String>,
        from: impl Into<EntityRef>,
        to: impl Into<RelationTarget>,
    ) -> Self {
        Self {
            relation_type: relation_type.into(),
            from: from.into(),
            to: to.into(),
        }
    }
}
