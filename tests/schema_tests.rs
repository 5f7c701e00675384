//! Integration tests for the schema registry, attributes and extension config

use std::io::Write;

use cti_schema::catalog::{self, *};
use cti_schema::schema::{self, AttributeKind, Endpoint, RelationFamily};
use cti_schema::{ConsistencyChecker, SchemaConfig, SchemaError};

const NARRATIVE_MODULE: &str = r#"{
    "entityTypes": [
        { "name": "Narrative", "parents": ["Stix-Domain-Object"] }
    ],
    "relationTypes": [{
        "name": "amplifies",
        "family": "core",
        "rules": [
            { "from": { "type": "Channel" }, "to": { "type": "Narrative" } },
            { "from": { "category": "Identity" }, "to": { "anyOf": [{ "type": "Narrative" }, { "type": "Channel" }] } }
        ]
    }],
    "attributes": [
        { "owner": "Narrative", "definitions": [
            { "name": "narrative_types", "kind": "string", "multiple": true, "upsert": true }
        ] }
    ]
}"#;

#[test]
fn test_report_upsert_attributes() {
    let registry = schema::init_default_schema().unwrap();
    let upsert = registry
        .get_upsert_attribute_names(ENTITY_TYPE_CONTAINER_REPORT)
        .unwrap();
    assert_eq!(&upsert[..4], &["name", "description", "report_types", "published"]);
    assert!(upsert.contains(&"revoked"));
    assert!(upsert.contains(&"x_opencti_stix_ids"));
    assert!(!upsert.contains(&"content"));

    // Every upsert attribute must also be a known attribute of the type
    let all: Vec<&str> = registry
        .get_attributes(ENTITY_TYPE_CONTAINER_REPORT)
        .unwrap()
        .into_iter()
        .map(|attr| attr.name.as_str())
        .collect();
    assert!(upsert.iter().all(|name| all.contains(name)));
}

#[test]
fn test_report_mandatory_attributes() {
    let registry = schema::init_default_schema().unwrap();
    let mandatory = registry
        .get_mandatory_attribute_names(ENTITY_TYPE_CONTAINER_REPORT)
        .unwrap();
    for name in ["name", "published", "internal_id", "standard_id", "entity_type"] {
        assert!(mandatory.contains(&name), "{} should be mandatory", name);
    }
    assert!(!mandatory.contains(&"description"));
    assert!(matches!(
        registry.get_mandatory_attribute_names("Dragon"),
        Err(SchemaError::UnknownAttributeOwner(_))
    ));
}

#[test]
fn test_type_lookups() {
    let registry = schema::init_default_schema().unwrap();
    let identity = registry.entity_type(ENTITY_TYPE_IDENTITY).unwrap();
    assert!(identity.is_abstract);
    let organization = registry
        .entity_type(ENTITY_TYPE_IDENTITY_ORGANIZATION)
        .unwrap();
    assert!(!organization.is_abstract);
    assert_eq!(organization.parents, vec![ENTITY_TYPE_IDENTITY]);
    assert!(registry.entity_type("Dragon").is_none());

    assert!(registry.has_entity_type(ENTITY_TYPE_CHANNEL));
    assert!(!registry.has_entity_type(RELATION_USES));
    assert!(registry.has_relation_type(RELATION_USES));
    assert!(!registry.has_relation_type("stix-core-relationship"));
    assert!(!registry.has_relation_type(ENTITY_TYPE_MALWARE));
}

#[test]
fn test_attribute_kind_queries() {
    let registry = schema::init_default_schema().unwrap();
    assert!(registry.is_json_attribute("bookmarks"));
    assert!(!registry.is_json_attribute("name"));
    assert!(registry.is_date_numeric_or_boolean_attribute("revoked"));
    assert!(registry.is_date_numeric_or_boolean_attribute("attribute_order"));
    assert!(registry.is_date_numeric_or_boolean_attribute("start_time"));
    assert!(registry.is_date_numeric_or_boolean_attribute("platform_hidden_type"));
    assert!(!registry.is_date_numeric_or_boolean_attribute("name"));
    assert!(registry.is_multiple_attribute("channel_types"));
    assert!(!registry.is_multiple_attribute("description"));
    assert!(!registry.is_multiple_attribute("platform_hidden_type"));
    assert!(!registry.is_json_attribute("revoked"));
    assert!(!registry.is_multiple_attribute("no_such_attribute"));
}

#[test]
fn test_relation_attributes_come_from_family() {
    let registry = schema::init_default_schema().unwrap();
    let start = registry
        .get_attribute(RELATION_USES, "start_time")
        .unwrap()
        .unwrap();
    assert_eq!(start.kind, AttributeKind::Date);
    assert!(matches!(
        registry.get_attributes("Dragon"),
        Err(SchemaError::UnknownAttributeOwner(_))
    ));
}

#[test]
fn test_stix_core_relationship() {
    let registry = schema::init_default_schema().unwrap();
    assert!(!registry.is_stix_core_relationship(ENTITY_TYPE_CONTAINER_REPORT));
    assert!(registry.is_stix_core_relationship("stix-core-relationship"));
    assert!(registry.is_stix_core_relationship(RELATION_DETECTS));
    assert!(!registry.is_stix_core_relationship("detects-false"));
    assert!(registry.is_stix_meta_relationship(RELATION_OBJECT));
    assert!(registry.is_stix_cyber_observable_relationship(RELATION_CONTENT));
    assert!(!registry.is_stix_cyber_observable_relationship(RELATION_USES));
}

#[test]
fn test_extension_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(NARRATIVE_MODULE.as_bytes()).unwrap();
    let config = SchemaConfig::load(file.path()).unwrap();

    let mut builder = catalog::default_builder().unwrap();
    builder.apply_config(config).unwrap();
    let registry = builder.build().unwrap();

    assert_eq!(registry.relation_family("amplifies"), Some(RelationFamily::Core));
    assert!(registry.is_multiple_attribute("narrative_types"));

    let checker = ConsistencyChecker::new(&registry);
    assert!(checker
        .check_types("amplifies", ENTITY_TYPE_CHANNEL, "Narrative")
        .unwrap());
    assert!(checker
        .check_types("amplifies", ENTITY_TYPE_IDENTITY_INDIVIDUAL, ENTITY_TYPE_CHANNEL)
        .unwrap());
    assert!(!checker
        .check_types("amplifies", "Narrative", ENTITY_TYPE_CHANNEL)
        .unwrap());
    // Catalog rules still hold; related-to covers every core object
    assert!(checker
        .check_types(RELATION_RELATED_TO, "Narrative", ENTITY_TYPE_MALWARE)
        .unwrap());
}

#[test]
fn test_extension_rejects_duplicate_relation() {
    let config = SchemaConfig::from_json(
        r#"{ "relationTypes": [{ "name": "uses", "family": "core",
            "rules": [{ "from": { "type": "Tool" }, "to": { "type": "Tool" } }] }] }"#,
    )
    .unwrap();
    let mut builder = catalog::default_builder().unwrap();
    let result = builder.apply_config(config).map(|_| ());
    assert!(matches!(result, Err(SchemaError::DuplicateRelationType(_))));
}

#[test]
fn test_extension_rejects_unknown_rule_token() {
    let config = SchemaConfig::from_json(
        r#"{ "relationTypes": [{ "name": "haunts", "family": "core",
            "rules": [{ "from": { "type": "Ghost" }, "to": { "category": "Identity" } }] }] }"#,
    )
    .unwrap();
    let mut builder = catalog::default_builder().unwrap();
    builder.apply_config(config).unwrap();
    assert!(matches!(
        builder.build(),
        Err(SchemaError::UnknownTypeInRule { .. })
    ));
}

#[test]
fn test_install_is_once() {
    let installed = schema::init_default_schema().unwrap();
    assert!(schema::is_installed());
    let again = schema::init_default_schema().unwrap();
    assert!(std::ptr::eq(installed, again));

    let other = catalog::default_schema().unwrap();
    assert!(matches!(
        schema::install(other),
        Err(SchemaError::AlreadyInstalled)
    ));
}

#[test]
fn test_endpoint_json_shapes() {
    let endpoint: Endpoint = serde_json::from_str(r#"{ "anyOf": [{ "type": "Tool" }, { "category": "Identity" }] }"#).unwrap();
    assert_eq!(
        endpoint,
        Endpoint::AnyOf(vec![Endpoint::of_type("Tool"), Endpoint::category("Identity")])
    );
}
