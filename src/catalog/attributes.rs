//! Attribute definitions of the built-in catalog

use crate::error::Result;
use crate::schema::{AttributeDefinition as Attr, RelationFamily, SchemaBuilder};

use super::entities::*;

fn name() -> Attr {
    Attr::string("name").mandatory().upsert()
}

fn description() -> Attr {
    Attr::string("description").upsert()
}

fn aliases() -> Attr {
    Attr::string("aliases").multiple().upsert()
}

pub(crate) fn register_attributes(builder: &mut SchemaBuilder) -> Result<()> {
    builder.add_attributes(
        ABSTRACT_BASIC_OBJECT,
        [
            Attr::string("internal_id").mandatory(),
            Attr::string("standard_id").mandatory(),
            Attr::string("entity_type").mandatory(),
            Attr::string("parent_types").multiple(),
            Attr::date("created_at"),
            Attr::date("updated_at"),
        ],
    );
    builder.add_attributes(
        ABSTRACT_STIX_OBJECT,
        [
            Attr::string("x_opencti_stix_ids").multiple().upsert(),
            Attr::string("spec_version"),
            Attr::boolean("revoked").upsert(),
            Attr::numeric("confidence").upsert(),
            Attr::string("lang").upsert(),
            Attr::date("created"),
            Attr::date("modified"),
        ],
    );
    builder.add_attributes(
        ABSTRACT_STIX_DOMAIN_OBJECT,
        [Attr::json("x_opencti_graph_data")],
    );
    builder.add_attributes(
        ABSTRACT_STIX_CYBER_OBSERVABLE,
        [
            Attr::numeric("x_opencti_score").upsert(),
            Attr::string("x_opencti_description").upsert(),
        ],
    );
    builder.add_attributes(ENTITY_HASHED_OBSERVABLE, [Attr::json("hashes").upsert()]);

    // Domain objects
    builder.add_attributes(
        ENTITY_TYPE_CONTAINER_REPORT,
        [
            name(),
            description(),
            Attr::string("content"),
            Attr::string("report_types").multiple().upsert(),
            Attr::date("published").mandatory().upsert(),
        ],
    );
    builder.add_attributes(
        ENTITY_TYPE_CONTAINER_NOTE,
        [
            Attr::string("attribute_abstract"),
            Attr::string("content").mandatory(),
            Attr::string("note_types").multiple(),
        ],
    );
    builder.add_attributes(
        ENTITY_TYPE_CONTAINER_OPINION,
        [
            Attr::string("opinion").mandatory(),
            Attr::string("explanation"),
        ],
    );
    builder.add_attributes(
        ENTITY_TYPE_CONTAINER_OBSERVED_DATA,
        [
            Attr::date("first_observed").mandatory(),
            Attr::date("last_observed").mandatory(),
            Attr::numeric("number_observed"),
        ],
    );
    builder.add_attributes(
        ENTITY_TYPE_CAMPAIGN,
        [
            name(),
            description(),
            aliases(),
            Attr::date("first_seen").upsert(),
            Attr::date("last_seen").upsert(),
            Attr::string("objective").upsert(),
        ],
    );
    builder.add_attributes(
        ENTITY_TYPE_MALWARE,
        [
            name(),
            description(),
            aliases(),
            Attr::boolean("is_family"),
            Attr::string("malware_types").multiple().upsert(),
            Attr::date("first_seen").upsert(),
            Attr::date("last_seen").upsert(),
        ],
    );
    builder.add_attributes(
        ENTITY_TYPE_INDICATOR,
        [
            name(),
            description(),
            Attr::string("pattern").mandatory(),
            Attr::string("pattern_type").mandatory(),
            Attr::date("valid_from").upsert(),
            Attr::date("valid_until").upsert(),
            Attr::numeric("x_opencti_score").upsert(),
            Attr::string("x_opencti_main_observable_type"),
        ],
    );
    for token in [
        ENTITY_TYPE_ATTACK_PATTERN,
        ENTITY_TYPE_COURSE_OF_ACTION,
        ENTITY_TYPE_DATA_COMPONENT,
        ENTITY_TYPE_INCIDENT,
        ENTITY_TYPE_INFRASTRUCTURE,
        ENTITY_TYPE_INTRUSION_SET,
        ENTITY_TYPE_THREAT_ACTOR,
        ENTITY_TYPE_TOOL,
        ENTITY_TYPE_VULNERABILITY,
        ENTITY_TYPE_CONTAINER_GROUPING,
    ] {
        builder.add_attributes(token, [name(), description()]);
    }
    builder.add_attributes(
        ENTITY_TYPE_IDENTITY,
        [
            name(),
            description(),
            Attr::string("contact_information"),
            Attr::string("identity_class"),
            Attr::string("x_opencti_aliases").multiple().upsert(),
        ],
    );
    builder.add_attributes(
        ENTITY_TYPE_LOCATION,
        [
            name(),
            description(),
            Attr::numeric("latitude"),
            Attr::numeric("longitude"),
            Attr::string("x_opencti_location_type"),
        ],
    );

    // Observables
    builder.add_attributes(
        ENTITY_HASHED_OBSERVABLE_STIX_FILE,
        [
            Attr::string("name").upsert(),
            Attr::numeric("size"),
            Attr::string("mime_type"),
        ],
    );
    builder.add_attributes(
        ENTITY_HASHED_OBSERVABLE_ARTIFACT,
        [
            Attr::string("payload_bin"),
            Attr::string("url"),
            Attr::string("mime_type"),
        ],
    );
    for token in [
        ENTITY_DOMAIN_NAME,
        ENTITY_EMAIL_ADDR,
        ENTITY_IPV4_ADDR,
        ENTITY_IPV6_ADDR,
        ENTITY_MAC_ADDR,
        ENTITY_URL,
    ] {
        builder.add_attributes(token, [Attr::string("value").mandatory()]);
    }

    // Meta objects
    builder.add_attributes(
        ENTITY_TYPE_LABEL,
        [Attr::string("value").mandatory(), Attr::string("color")],
    );
    builder.add_attributes(
        ENTITY_TYPE_MARKING_DEFINITION,
        [
            Attr::string("definition_type").mandatory(),
            Attr::string("definition").mandatory(),
            Attr::numeric("x_opencti_order"),
            Attr::string("x_opencti_color"),
        ],
    );
    builder.add_attributes(
        ENTITY_TYPE_KILL_CHAIN_PHASE,
        [
            Attr::string("kill_chain_name").mandatory(),
            Attr::string("phase_name").mandatory(),
            Attr::numeric("x_opencti_order"),
        ],
    );
    builder.add_attributes(
        ENTITY_TYPE_EXTERNAL_REFERENCE,
        [
            Attr::string("source_name").mandatory(),
            Attr::string("description"),
            Attr::string("url"),
            Attr::string("external_id"),
        ],
    );

    // Internal objects
    builder.add_attributes(
        ENTITY_TYPE_USER,
        [
            Attr::string("name").mandatory(),
            Attr::string("user_email").mandatory(),
            Attr::json("bookmarks").multiple(),
        ],
    );
    builder.add_attributes(
        ENTITY_TYPE_ENTITY_SETTING,
        [
            Attr::string("target_type").mandatory(),
            Attr::boolean("platform_hidden_type"),
            Attr::boolean("enforce_reference"),
            Attr::boolean("platform_entity_files_ref"),
            Attr::json("attributes_configuration"),
        ],
    );
    builder.add_attributes(
        ENTITY_TYPE_STATUS,
        [
            Attr::string("template_id").mandatory(),
            Attr::numeric("attribute_order").mandatory(),
        ],
    );
    builder.add_attributes(ENTITY_TYPE_SETTINGS, [Attr::string("platform_title")]);

    // Relationships
    builder.add_attributes(
        RelationFamily::Core.abstract_token(),
        [
            Attr::string("relationship_type").mandatory(),
            description(),
            Attr::date("start_time").upsert(),
            Attr::date("stop_time").upsert(),
            Attr::numeric("confidence").upsert(),
        ],
    );
    Ok(())
}
