//! Relation type tokens and their consistency rules

use crate::error::Result;
use crate::schema::{Endpoint, RelationFamily, SchemaBuilder};

use super::entities::*;

// Meta (reference) relations
pub const RELATION_CREATED_BY: &str = "created-by";
pub const RELATION_OBJECT_MARKING: &str = "object-marking";
pub const RELATION_OBJECT: &str = "object";
pub const RELATION_OBJECT_LABEL: &str = "object-label";
pub const RELATION_EXTERNAL_REFERENCE: &str = "external-reference";
pub const RELATION_KILL_CHAIN_PHASE: &str = "kill-chain-phase";

// Cyber observable relations
pub const RELATION_CONTENT: &str = "obs_content";
pub const RELATION_CONTAINS: &str = "obs_contains";
pub const RELATION_PARENT_DIRECTORY: &str = "obs_parent-directory";
pub const RELATION_RESOLVES_TO: &str = "obs_resolves-to";
pub const RELATION_OBS_BELONGS_TO: &str = "obs_belongs-to";
pub const RELATION_SRC: &str = "obs_src";
pub const RELATION_DST: &str = "obs_dst";
pub const RELATION_IMAGE: &str = "obs_image";
pub const RELATION_CREATOR_USER: &str = "obs_creator-user";

// Core relationships
pub const RELATION_ATTRIBUTED_TO: &str = "attributed-to";
pub const RELATION_BASED_ON: &str = "based-on";
pub const RELATION_BELONGS_TO: &str = "belongs-to";
pub const RELATION_COMMUNICATES_WITH: &str = "communicates-with";
pub const RELATION_DERIVED_FROM: &str = "derived-from";
pub const RELATION_DETECTS: &str = "detects";
pub const RELATION_DUPLICATE_OF: &str = "duplicate-of";
pub const RELATION_EXPLOITS: &str = "exploits";
pub const RELATION_HAS: &str = "has";
pub const RELATION_HOSTS: &str = "hosts";
pub const RELATION_INDICATES: &str = "indicates";
pub const RELATION_LOCATED_AT: &str = "located-at";
pub const RELATION_MITIGATES: &str = "mitigates";
pub const RELATION_PART_OF: &str = "part-of";
pub const RELATION_RELATED_TO: &str = "related-to";
pub const RELATION_TARGETS: &str = "targets";
pub const RELATION_USES: &str = "uses";

/// Types that may be derived from, or duplicate, another object of the same type
const SELF_REFERENCING_TYPES: &[&str] = &[
    ENTITY_TYPE_ATTACK_PATTERN,
    ENTITY_TYPE_CAMPAIGN,
    ENTITY_TYPE_COURSE_OF_ACTION,
    ENTITY_TYPE_INCIDENT,
    ENTITY_TYPE_INDICATOR,
    ENTITY_TYPE_INFRASTRUCTURE,
    ENTITY_TYPE_INTRUSION_SET,
    ENTITY_TYPE_MALWARE,
    ENTITY_TYPE_THREAT_ACTOR,
    ENTITY_TYPE_TOOL,
    ENTITY_TYPE_VULNERABILITY,
];

/// Capabilities an adversary can use
const USABLE_TYPES: &[&str] = &[
    ENTITY_TYPE_ATTACK_PATTERN,
    ENTITY_TYPE_MALWARE,
    ENTITY_TYPE_TOOL,
    ENTITY_TYPE_INFRASTRUCTURE,
];

const THREAT_TYPES: &[&str] = &[
    ENTITY_TYPE_ATTACK_PATTERN,
    ENTITY_TYPE_CAMPAIGN,
    ENTITY_TYPE_INCIDENT,
    ENTITY_TYPE_INTRUSION_SET,
    ENTITY_TYPE_MALWARE,
    ENTITY_TYPE_THREAT_ACTOR,
    ENTITY_TYPE_TOOL,
];

const NETWORK_ADDRESS_TYPES: &[&str] = &[
    ENTITY_IPV4_ADDR,
    ENTITY_IPV6_ADDR,
    ENTITY_MAC_ADDR,
    ENTITY_DOMAIN_NAME,
];

fn types(tokens: &[&str]) -> Endpoint {
    Endpoint::types(tokens.iter().copied())
}

fn of_type(token: &str) -> Endpoint {
    Endpoint::of_type(token)
}

fn category(token: &str) -> Endpoint {
    Endpoint::category(token)
}

pub(crate) fn register_relation_types(builder: &mut SchemaBuilder) -> Result<()> {
    register_meta(builder)?;
    register_cyber_observable(builder)?;
    register_core(builder)?;
    Ok(())
}

fn register_meta(builder: &mut SchemaBuilder) -> Result<()> {
    use RelationFamily::Meta;

    builder
        .add_relation_type(RELATION_CREATED_BY, Meta)
        .rule(category(ABSTRACT_STIX_CORE_OBJECT), category(ENTITY_TYPE_IDENTITY))
        .done()?;
    builder
        .add_relation_type(RELATION_OBJECT_MARKING, Meta)
        .rule(
            category(ABSTRACT_STIX_CORE_OBJECT),
            of_type(ENTITY_TYPE_MARKING_DEFINITION),
        )
        .done()?;
    builder
        .add_relation_type(RELATION_OBJECT_LABEL, Meta)
        .rule(category(ABSTRACT_STIX_CORE_OBJECT), of_type(ENTITY_TYPE_LABEL))
        .done()?;
    builder
        .add_relation_type(RELATION_EXTERNAL_REFERENCE, Meta)
        .rule(
            category(ABSTRACT_STIX_CORE_OBJECT),
            of_type(ENTITY_TYPE_EXTERNAL_REFERENCE),
        )
        .done()?;
    builder
        .add_relation_type(RELATION_KILL_CHAIN_PHASE, Meta)
        .rule(
            types(&[
                ENTITY_TYPE_ATTACK_PATTERN,
                ENTITY_TYPE_INDICATOR,
                ENTITY_TYPE_INFRASTRUCTURE,
                ENTITY_TYPE_MALWARE,
                ENTITY_TYPE_TOOL,
            ]),
            of_type(ENTITY_TYPE_KILL_CHAIN_PHASE),
        )
        .done()?;
    // Containers reference domain objects and observables, nothing else
    builder
        .add_relation_type(RELATION_OBJECT, Meta)
        .rule(
            category(ENTITY_TYPE_CONTAINER),
            Endpoint::categories([ABSTRACT_STIX_DOMAIN_OBJECT, ABSTRACT_STIX_CYBER_OBSERVABLE]),
        )
        .done()?;
    Ok(())
}

fn register_cyber_observable(builder: &mut SchemaBuilder) -> Result<()> {
    use RelationFamily::CyberObservable;

    builder
        .add_relation_type(RELATION_CONTENT, CyberObservable)
        .rule(
            category(ENTITY_HASHED_OBSERVABLE),
            of_type(ENTITY_HASHED_OBSERVABLE_ARTIFACT),
        )
        .done()?;
    builder
        .add_relation_type(RELATION_CONTAINS, CyberObservable)
        .rule(
            of_type(ENTITY_DIRECTORY),
            types(&[ENTITY_HASHED_OBSERVABLE_STIX_FILE, ENTITY_DIRECTORY]),
        )
        .done()?;
    builder
        .add_relation_type(RELATION_PARENT_DIRECTORY, CyberObservable)
        .rule(
            of_type(ENTITY_HASHED_OBSERVABLE_STIX_FILE),
            of_type(ENTITY_DIRECTORY),
        )
        .done()?;
    builder
        .add_relation_type(RELATION_RESOLVES_TO, CyberObservable)
        .rule(
            of_type(ENTITY_DOMAIN_NAME),
            types(&[ENTITY_IPV4_ADDR, ENTITY_IPV6_ADDR, ENTITY_DOMAIN_NAME]),
        )
        .rule(
            types(&[ENTITY_IPV4_ADDR, ENTITY_IPV6_ADDR]),
            of_type(ENTITY_MAC_ADDR),
        )
        .done()?;
    builder
        .add_relation_type(RELATION_OBS_BELONGS_TO, CyberObservable)
        .rule(
            types(&[ENTITY_IPV4_ADDR, ENTITY_IPV6_ADDR]),
            of_type(ENTITY_AUTONOMOUS_SYSTEM),
        )
        .done()?;
    for relation in [RELATION_SRC, RELATION_DST] {
        builder
            .add_relation_type(relation, CyberObservable)
            .rule(of_type(ENTITY_NETWORK_TRAFFIC), types(NETWORK_ADDRESS_TYPES))
            .done()?;
    }
    builder
        .add_relation_type(RELATION_IMAGE, CyberObservable)
        .rule(
            of_type(ENTITY_PROCESS),
            of_type(ENTITY_HASHED_OBSERVABLE_STIX_FILE),
        )
        .done()?;
    builder
        .add_relation_type(RELATION_CREATOR_USER, CyberObservable)
        .rule(of_type(ENTITY_PROCESS), of_type(ENTITY_USER_ACCOUNT))
        .done()?;
    Ok(())
}

fn register_core(builder: &mut SchemaBuilder) -> Result<()> {
    use RelationFamily::Core;

    builder
        .add_relation_type(RELATION_USES, Core)
        .rule(
            types(&[
                ENTITY_TYPE_CAMPAIGN,
                ENTITY_TYPE_INCIDENT,
                ENTITY_TYPE_INTRUSION_SET,
                ENTITY_TYPE_MALWARE,
                ENTITY_TYPE_THREAT_ACTOR,
            ]),
            types(USABLE_TYPES),
        )
        .rule(
            of_type(ENTITY_TYPE_TOOL),
            types(&[ENTITY_TYPE_ATTACK_PATTERN, ENTITY_TYPE_INFRASTRUCTURE]),
        )
        .rule(
            of_type(ENTITY_TYPE_INFRASTRUCTURE),
            of_type(ENTITY_TYPE_INFRASTRUCTURE),
        )
        .done()?;
    builder
        .add_relation_type(RELATION_INDICATES, Core)
        .rule(
            of_type(ENTITY_TYPE_INDICATOR),
            Endpoint::AnyOf(vec![
                types(THREAT_TYPES),
                of_type(ENTITY_TYPE_INFRASTRUCTURE),
            ]),
        )
        .done()?;
    builder
        .add_relation_type(RELATION_TARGETS, Core)
        .rule(
            types(THREAT_TYPES),
            Endpoint::AnyOf(vec![
                category(ENTITY_TYPE_IDENTITY),
                category(ENTITY_TYPE_LOCATION),
                of_type(ENTITY_TYPE_VULNERABILITY),
            ]),
        )
        .done()?;
    builder
        .add_relation_type(RELATION_MITIGATES, Core)
        .rule(
            of_type(ENTITY_TYPE_COURSE_OF_ACTION),
            types(&[
                ENTITY_TYPE_ATTACK_PATTERN,
                ENTITY_TYPE_INDICATOR,
                ENTITY_TYPE_MALWARE,
                ENTITY_TYPE_TOOL,
                ENTITY_TYPE_VULNERABILITY,
            ]),
        )
        .done()?;
    builder
        .add_relation_type(RELATION_ATTRIBUTED_TO, Core)
        .rule(
            of_type(ENTITY_TYPE_CAMPAIGN),
            types(&[ENTITY_TYPE_INTRUSION_SET, ENTITY_TYPE_THREAT_ACTOR]),
        )
        .rule(
            of_type(ENTITY_TYPE_INTRUSION_SET),
            of_type(ENTITY_TYPE_THREAT_ACTOR),
        )
        .rule(
            of_type(ENTITY_TYPE_INCIDENT),
            types(&[
                ENTITY_TYPE_CAMPAIGN,
                ENTITY_TYPE_INTRUSION_SET,
                ENTITY_TYPE_THREAT_ACTOR,
            ]),
        )
        .rule(
            of_type(ENTITY_TYPE_THREAT_ACTOR),
            category(ENTITY_TYPE_IDENTITY),
        )
        .done()?;
    builder
        .add_relation_type(RELATION_LOCATED_AT, Core)
        .rule(
            Endpoint::AnyOf(vec![
                category(ENTITY_TYPE_IDENTITY),
                category(ENTITY_TYPE_LOCATION),
                types(&[
                    ENTITY_TYPE_CAMPAIGN,
                    ENTITY_TYPE_INCIDENT,
                    ENTITY_TYPE_INFRASTRUCTURE,
                    ENTITY_TYPE_INTRUSION_SET,
                    ENTITY_TYPE_THREAT_ACTOR,
                ]),
                types(&[ENTITY_IPV4_ADDR, ENTITY_IPV6_ADDR]),
            ]),
            category(ENTITY_TYPE_LOCATION),
        )
        .done()?;
    builder
        .add_relation_type(RELATION_PART_OF, Core)
        .rule(
            of_type(ENTITY_TYPE_IDENTITY_ORGANIZATION),
            types(&[
                ENTITY_TYPE_IDENTITY_ORGANIZATION,
                ENTITY_TYPE_IDENTITY_SECTOR,
            ]),
        )
        .rule(
            of_type(ENTITY_TYPE_IDENTITY_SECTOR),
            of_type(ENTITY_TYPE_IDENTITY_SECTOR),
        )
        .rule(
            types(&[ENTITY_TYPE_IDENTITY_INDIVIDUAL, ENTITY_TYPE_IDENTITY_SYSTEM]),
            of_type(ENTITY_TYPE_IDENTITY_ORGANIZATION),
        )
        .done()?;
    builder
        .add_relation_type(RELATION_BASED_ON, Core)
        .rule(
            of_type(ENTITY_TYPE_INDICATOR),
            Endpoint::AnyOf(vec![
                category(ABSTRACT_STIX_CYBER_OBSERVABLE),
                of_type(ENTITY_TYPE_CONTAINER_OBSERVED_DATA),
            ]),
        )
        .done()?;
    builder
        .add_relation_type(RELATION_COMMUNICATES_WITH, Core)
        .rule(
            types(&[ENTITY_TYPE_INFRASTRUCTURE, ENTITY_TYPE_MALWARE]),
            types(&[
                ENTITY_TYPE_INFRASTRUCTURE,
                ENTITY_IPV4_ADDR,
                ENTITY_IPV6_ADDR,
                ENTITY_DOMAIN_NAME,
                ENTITY_URL,
            ]),
        )
        .done()?;
    builder
        .add_relation_type(RELATION_HAS, Core)
        .rule(
            types(&[ENTITY_TYPE_INFRASTRUCTURE, ENTITY_TYPE_IDENTITY_SYSTEM]),
            of_type(ENTITY_TYPE_VULNERABILITY),
        )
        .done()?;
    builder
        .add_relation_type(RELATION_HOSTS, Core)
        .rule(
            of_type(ENTITY_TYPE_INFRASTRUCTURE),
            types(&[ENTITY_TYPE_MALWARE, ENTITY_TYPE_TOOL]),
        )
        .done()?;
    builder
        .add_relation_type(RELATION_EXPLOITS, Core)
        .rule(of_type(ENTITY_TYPE_MALWARE), of_type(ENTITY_TYPE_VULNERABILITY))
        .done()?;
    builder
        .add_relation_type(RELATION_DETECTS, Core)
        .rule(
            of_type(ENTITY_TYPE_DATA_COMPONENT),
            of_type(ENTITY_TYPE_ATTACK_PATTERN),
        )
        .done()?;
    builder
        .add_relation_type(RELATION_BELONGS_TO, Core)
        .rule(
            category(ABSTRACT_STIX_CYBER_OBSERVABLE),
            Endpoint::AnyOf(vec![
                category(ENTITY_TYPE_IDENTITY),
                types(&[ENTITY_TYPE_INTRUSION_SET, ENTITY_TYPE_THREAT_ACTOR]),
            ]),
        )
        .done()?;
    builder
        .add_relation_type(RELATION_RELATED_TO, Core)
        .rule(
            category(ABSTRACT_STIX_CORE_OBJECT),
            category(ABSTRACT_STIX_CORE_OBJECT),
        )
        .done()?;

    // Same type on both ends only
    for relation in [RELATION_DERIVED_FROM, RELATION_DUPLICATE_OF] {
        let mut rel = builder.add_relation_type(relation, Core);
        for &token in SELF_REFERENCING_TYPES {
            rel = rel.rule(of_type(token), of_type(token));
        }
        rel.done()?;
    }
    Ok(())
}
