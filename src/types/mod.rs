//! Data types exchanged with the validator
//!
//! Entity descriptors, relation candidates and the opaque request context.

mod context;
mod entity;
mod relation;

pub use context::{AuthUser, RequestContext};
pub use entity::EntityRef;
pub use relation::{RelationCandidate, RelationTarget};
