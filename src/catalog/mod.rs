//! Built-in platform catalog
//!
//! STIX 2.1 domain objects, cyber observables and meta objects, the
//! platform's internal objects, their category hierarchy, the relation rule
//! tables and the attribute definitions. Extension modules register on top.

pub mod attributes;
pub mod entities;
pub mod modules;
pub mod relations;

use tracing::debug;

use crate::error::Result;
use crate::schema::{SchemaBuilder, SchemaRegistry};

pub use entities::*;
pub use modules::{
    builtin_modules, CaseModule, ChannelModule, SchemaModule, ENTITY_TYPE_CHANNEL,
    ENTITY_TYPE_CONTAINER_CASE_INCIDENT, ENTITY_TYPE_CONTAINER_FEEDBACK,
};
pub use relations::*;

/// Builder preloaded with the catalog and the built-in modules
///
/// Callers may register more types before calling `build`.
pub fn default_builder() -> Result<SchemaBuilder> {
    let mut builder = SchemaBuilder::new();
    entities::register_entity_types(&mut builder)?;
    relations::register_relation_types(&mut builder)?;
    attributes::register_attributes(&mut builder)?;
    for module in builtin_modules() {
        debug!(module = module.name(), "Registering schema module");
        module.register(&mut builder)?;
    }
    Ok(builder)
}

/// The built-in catalog, frozen
pub fn default_schema() -> Result<SchemaRegistry> {
    default_builder()?.build()
}
