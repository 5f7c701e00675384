//! Schema registry for entity types, relation types and attributes
//!
//! The registry is assembled once through [`SchemaBuilder`], frozen into a
//! [`SchemaRegistry`] and installed process-wide with [`install`]. After
//! installation it is never mutated; every query is a read of immutable data.

mod attributes;
mod builder;
mod config;
mod endpoint;
mod registry;

use std::sync::OnceLock;

use tracing::info;

use crate::catalog;
use crate::error::{Result, SchemaError};

pub use attributes::{AttributeDefinition, AttributeKind};
pub use builder::{EntityTypeBuilder, RelationTypeBuilder, SchemaBuilder};
pub use config::{AttributeBlock, SchemaConfig, SCHEMA_FILE_ENV};
pub use endpoint::{ConsistencyRule, Endpoint};
pub use registry::{EntityTypeDef, RelationFamily, RelationTypeDef, SchemaRegistry};

/// Process-wide schema (installed once at startup)
static SCHEMA: OnceLock<SchemaRegistry> = OnceLock::new();

/// Install the process-wide schema. Fails if one is already installed.
pub fn install(registry: SchemaRegistry) -> Result<&'static SchemaRegistry> {
    let entity_types = registry.entity_type_count();
    let relation_types = registry.relation_type_count();
    SCHEMA
        .set(registry)
        .map_err(|_| SchemaError::AlreadyInstalled)?;
    info!(entity_types, relation_types, "Schema installed");
    installed()
}

/// Get the installed schema
pub fn installed() -> Result<&'static SchemaRegistry> {
    SCHEMA.get().ok_or(SchemaError::SchemaNotInstalled)
}

/// Check whether a schema has been installed
pub fn is_installed() -> bool {
    SCHEMA.get().is_some()
}

/// Build the platform schema: built-in catalog plus the optional
/// `CTI_SCHEMA_FILE` extension document.
pub fn load_schema() -> Result<SchemaRegistry> {
    let mut builder = catalog::default_builder()?;
    if let Some(config) = SchemaConfig::from_env()? {
        builder.apply_config(config)?;
    }
    builder.build()
}

/// Return the installed schema, installing [`load_schema`]'s result first
/// if nothing is installed yet.
pub fn init_default_schema() -> Result<&'static SchemaRegistry> {
    if let Some(registry) = SCHEMA.get() {
        return Ok(registry);
    }
    let registry = load_schema()?;
    match install(registry) {
        // Lost a race with a concurrent initializer; theirs is equivalent.
        Err(SchemaError::AlreadyInstalled) => installed(),
        other => other,
    }
}
