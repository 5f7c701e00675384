//! Extension modules registered on top of the STIX catalog
//!
//! A module adds its own entity types, relation rules and attributes through
//! the same builder as the core catalog, before the schema is frozen.

use crate::error::Result;
use crate::schema::{AttributeDefinition as Attr, SchemaBuilder};

use super::entities::{ABSTRACT_STIX_DOMAIN_OBJECT, ENTITY_TYPE_CONTAINER};

pub const ENTITY_TYPE_CHANNEL: &str = "Channel";
pub const ENTITY_TYPE_CONTAINER_FEEDBACK: &str = "Feedback";
pub const ENTITY_TYPE_CONTAINER_CASE_INCIDENT: &str = "Case-Incident";

/// A self-contained schema extension
pub trait SchemaModule: Send + Sync {
    fn name(&self) -> &str;

    fn register(&self, builder: &mut SchemaBuilder) -> Result<()>;
}

/// Communication channels (forums, messaging groups...)
pub struct ChannelModule;

impl SchemaModule for ChannelModule {
    fn name(&self) -> &str {
        "channel"
    }

    fn register(&self, builder: &mut SchemaBuilder) -> Result<()> {
        builder
            .add_entity_type(ENTITY_TYPE_CHANNEL)
            .parent(ABSTRACT_STIX_DOMAIN_OBJECT)
            .done()?;
        builder.add_attributes(
            ENTITY_TYPE_CHANNEL,
            [
                Attr::string("name").mandatory().upsert(),
                Attr::string("description").upsert(),
                Attr::string("channel_types").multiple().upsert(),
            ],
        );
        Ok(())
    }
}

/// Case management containers (feedback, incident response)
pub struct CaseModule;

impl SchemaModule for CaseModule {
    fn name(&self) -> &str {
        "case"
    }

    fn register(&self, builder: &mut SchemaBuilder) -> Result<()> {
        for token in [ENTITY_TYPE_CONTAINER_FEEDBACK, ENTITY_TYPE_CONTAINER_CASE_INCIDENT] {
            builder
                .add_entity_type(token)
                .parent(ENTITY_TYPE_CONTAINER)
                .done()?;
        }
        builder.add_attributes(
            ENTITY_TYPE_CONTAINER_FEEDBACK,
            [
                Attr::string("name").mandatory().upsert(),
                Attr::string("description").upsert(),
                Attr::numeric("rating"),
            ],
        );
        builder.add_attributes(
            ENTITY_TYPE_CONTAINER_CASE_INCIDENT,
            [
                Attr::string("name").mandatory().upsert(),
                Attr::string("description").upsert(),
                Attr::string("severity").upsert(),
                Attr::string("priority").upsert(),
                Attr::string("response_types").multiple().upsert(),
            ],
        );
        Ok(())
    }
}

/// Modules shipped with the platform, in registration order
pub fn builtin_modules() -> Vec<Box<dyn SchemaModule>> {
    vec![Box::new(ChannelModule), Box::new(CaseModule)]
}
