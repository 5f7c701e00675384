//! Entity type tokens and their category hierarchy

use crate::error::Result;
use crate::schema::SchemaBuilder;

// Abstract categories
pub const ABSTRACT_BASIC_OBJECT: &str = "Basic-Object";
pub const ABSTRACT_STIX_OBJECT: &str = "Stix-Object";
pub const ABSTRACT_STIX_CORE_OBJECT: &str = "Stix-Core-Object";
pub const ABSTRACT_STIX_DOMAIN_OBJECT: &str = "Stix-Domain-Object";
pub const ABSTRACT_STIX_CYBER_OBSERVABLE: &str = "Stix-Cyber-Observable";
pub const ABSTRACT_STIX_META_OBJECT: &str = "Stix-Meta-Object";
pub const ABSTRACT_INTERNAL_OBJECT: &str = "Internal-Object";
pub const ENTITY_TYPE_IDENTITY: &str = "Identity";
pub const ENTITY_TYPE_LOCATION: &str = "Location";
pub const ENTITY_TYPE_CONTAINER: &str = "Container";
pub const ENTITY_HASHED_OBSERVABLE: &str = "Hashed-Observable";

// Domain objects
pub const ENTITY_TYPE_ATTACK_PATTERN: &str = "Attack-Pattern";
pub const ENTITY_TYPE_CAMPAIGN: &str = "Campaign";
pub const ENTITY_TYPE_COURSE_OF_ACTION: &str = "Course-Of-Action";
pub const ENTITY_TYPE_DATA_COMPONENT: &str = "Data-Component";
pub const ENTITY_TYPE_INCIDENT: &str = "Incident";
pub const ENTITY_TYPE_INDICATOR: &str = "Indicator";
pub const ENTITY_TYPE_INFRASTRUCTURE: &str = "Infrastructure";
pub const ENTITY_TYPE_INTRUSION_SET: &str = "Intrusion-Set";
pub const ENTITY_TYPE_MALWARE: &str = "Malware";
pub const ENTITY_TYPE_THREAT_ACTOR: &str = "Threat-Actor";
pub const ENTITY_TYPE_TOOL: &str = "Tool";
pub const ENTITY_TYPE_VULNERABILITY: &str = "Vulnerability";
pub const ENTITY_TYPE_CONTAINER_GROUPING: &str = "Grouping";
pub const ENTITY_TYPE_CONTAINER_NOTE: &str = "Note";
pub const ENTITY_TYPE_CONTAINER_OBSERVED_DATA: &str = "Observed-Data";
pub const ENTITY_TYPE_CONTAINER_OPINION: &str = "Opinion";
pub const ENTITY_TYPE_CONTAINER_REPORT: &str = "Report";
pub const ENTITY_TYPE_IDENTITY_INDIVIDUAL: &str = "Individual";
pub const ENTITY_TYPE_IDENTITY_ORGANIZATION: &str = "Organization";
pub const ENTITY_TYPE_IDENTITY_SECTOR: &str = "Sector";
pub const ENTITY_TYPE_IDENTITY_SYSTEM: &str = "System";
pub const ENTITY_TYPE_LOCATION_CITY: &str = "City";
pub const ENTITY_TYPE_LOCATION_COUNTRY: &str = "Country";
pub const ENTITY_TYPE_LOCATION_REGION: &str = "Region";
pub const ENTITY_TYPE_LOCATION_POSITION: &str = "Position";

// Cyber observables
pub const ENTITY_HASHED_OBSERVABLE_ARTIFACT: &str = "Artifact";
pub const ENTITY_HASHED_OBSERVABLE_STIX_FILE: &str = "StixFile";
pub const ENTITY_HASHED_OBSERVABLE_X509_CERTIFICATE: &str = "X509-Certificate";
pub const ENTITY_AUTONOMOUS_SYSTEM: &str = "Autonomous-System";
pub const ENTITY_DIRECTORY: &str = "Directory";
pub const ENTITY_DOMAIN_NAME: &str = "Domain-Name";
pub const ENTITY_EMAIL_ADDR: &str = "Email-Addr";
pub const ENTITY_IPV4_ADDR: &str = "IPv4-Addr";
pub const ENTITY_IPV6_ADDR: &str = "IPv6-Addr";
pub const ENTITY_MAC_ADDR: &str = "Mac-Addr";
pub const ENTITY_MUTEX: &str = "Mutex";
pub const ENTITY_NETWORK_TRAFFIC: &str = "Network-Traffic";
pub const ENTITY_PROCESS: &str = "Process";
pub const ENTITY_SOFTWARE: &str = "Software";
pub const ENTITY_URL: &str = "Url";
pub const ENTITY_USER_ACCOUNT: &str = "User-Account";

// Meta objects
pub const ENTITY_TYPE_LABEL: &str = "Label";
pub const ENTITY_TYPE_MARKING_DEFINITION: &str = "Marking-Definition";
pub const ENTITY_TYPE_EXTERNAL_REFERENCE: &str = "External-Reference";
pub const ENTITY_TYPE_KILL_CHAIN_PHASE: &str = "Kill-Chain-Phase";

// Internal objects
pub const ENTITY_TYPE_SETTINGS: &str = "Settings";
pub const ENTITY_TYPE_USER: &str = "User";
pub const ENTITY_TYPE_ENTITY_SETTING: &str = "Entity-Setting";
pub const ENTITY_TYPE_STATUS: &str = "Status";

/// (token, parents, abstract). Parents are listed nearest-first.
pub const ENTITY_HIERARCHY: &[(&str, &[&str], bool)] = &[
    (ABSTRACT_BASIC_OBJECT, &[], true),
    (ABSTRACT_STIX_OBJECT, &[ABSTRACT_BASIC_OBJECT], true),
    (ABSTRACT_STIX_CORE_OBJECT, &[ABSTRACT_STIX_OBJECT], true),
    (ABSTRACT_STIX_DOMAIN_OBJECT, &[ABSTRACT_STIX_CORE_OBJECT], true),
    (ABSTRACT_STIX_CYBER_OBSERVABLE, &[ABSTRACT_STIX_CORE_OBJECT], true),
    (ABSTRACT_STIX_META_OBJECT, &[ABSTRACT_STIX_OBJECT], true),
    (ABSTRACT_INTERNAL_OBJECT, &[ABSTRACT_BASIC_OBJECT], true),
    (ENTITY_TYPE_IDENTITY, &[ABSTRACT_STIX_DOMAIN_OBJECT], true),
    (ENTITY_TYPE_LOCATION, &[ABSTRACT_STIX_DOMAIN_OBJECT], true),
    (ENTITY_TYPE_CONTAINER, &[ABSTRACT_STIX_DOMAIN_OBJECT], true),
    (ENTITY_HASHED_OBSERVABLE, &[ABSTRACT_STIX_CYBER_OBSERVABLE], true),
    // Domain objects
    (ENTITY_TYPE_ATTACK_PATTERN, &[ABSTRACT_STIX_DOMAIN_OBJECT], false),
    (ENTITY_TYPE_CAMPAIGN, &[ABSTRACT_STIX_DOMAIN_OBJECT], false),
    (ENTITY_TYPE_COURSE_OF_ACTION, &[ABSTRACT_STIX_DOMAIN_OBJECT], false),
    (ENTITY_TYPE_DATA_COMPONENT, &[ABSTRACT_STIX_DOMAIN_OBJECT], false),
    (ENTITY_TYPE_INCIDENT, &[ABSTRACT_STIX_DOMAIN_OBJECT], false),
    (ENTITY_TYPE_INDICATOR, &[ABSTRACT_STIX_DOMAIN_OBJECT], false),
    (ENTITY_TYPE_INFRASTRUCTURE, &[ABSTRACT_STIX_DOMAIN_OBJECT], false),
    (ENTITY_TYPE_INTRUSION_SET, &[ABSTRACT_STIX_DOMAIN_OBJECT], false),
    (ENTITY_TYPE_MALWARE, &[ABSTRACT_STIX_DOMAIN_OBJECT], false),
    (ENTITY_TYPE_THREAT_ACTOR, &[ABSTRACT_STIX_DOMAIN_OBJECT], false),
    (ENTITY_TYPE_TOOL, &[ABSTRACT_STIX_DOMAIN_OBJECT], false),
    (ENTITY_TYPE_VULNERABILITY, &[ABSTRACT_STIX_DOMAIN_OBJECT], false),
    (ENTITY_TYPE_CONTAINER_GROUPING, &[ENTITY_TYPE_CONTAINER], false),
    (ENTITY_TYPE_CONTAINER_NOTE, &[ENTITY_TYPE_CONTAINER], false),
    (ENTITY_TYPE_CONTAINER_OBSERVED_DATA, &[ENTITY_TYPE_CONTAINER], false),
    (ENTITY_TYPE_CONTAINER_OPINION, &[ENTITY_TYPE_CONTAINER], false),
    (ENTITY_TYPE_CONTAINER_REPORT, &[ENTITY_TYPE_CONTAINER], false),
    (ENTITY_TYPE_IDENTITY_INDIVIDUAL, &[ENTITY_TYPE_IDENTITY], false),
    (ENTITY_TYPE_IDENTITY_ORGANIZATION, &[ENTITY_TYPE_IDENTITY], false),
    (ENTITY_TYPE_IDENTITY_SECTOR, &[ENTITY_TYPE_IDENTITY], false),
    (ENTITY_TYPE_IDENTITY_SYSTEM, &[ENTITY_TYPE_IDENTITY], false),
    (ENTITY_TYPE_LOCATION_CITY, &[ENTITY_TYPE_LOCATION], false),
    (ENTITY_TYPE_LOCATION_COUNTRY, &[ENTITY_TYPE_LOCATION], false),
    (ENTITY_TYPE_LOCATION_REGION, &[ENTITY_TYPE_LOCATION], false),
    (ENTITY_TYPE_LOCATION_POSITION, &[ENTITY_TYPE_LOCATION], false),
    // Cyber observables
    (ENTITY_HASHED_OBSERVABLE_ARTIFACT, &[ENTITY_HASHED_OBSERVABLE], false),
    (ENTITY_HASHED_OBSERVABLE_STIX_FILE, &[ENTITY_HASHED_OBSERVABLE], false),
    (ENTITY_HASHED_OBSERVABLE_X509_CERTIFICATE, &[ENTITY_HASHED_OBSERVABLE], false),
    (ENTITY_AUTONOMOUS_SYSTEM, &[ABSTRACT_STIX_CYBER_OBSERVABLE], false),
    (ENTITY_DIRECTORY, &[ABSTRACT_STIX_CYBER_OBSERVABLE], false),
    (ENTITY_DOMAIN_NAME, &[ABSTRACT_STIX_CYBER_OBSERVABLE], false),
    (ENTITY_EMAIL_ADDR, &[ABSTRACT_STIX_CYBER_OBSERVABLE], false),
    (ENTITY_IPV4_ADDR, &[ABSTRACT_STIX_CYBER_OBSERVABLE], false),
    (ENTITY_IPV6_ADDR, &[ABSTRACT_STIX_CYBER_OBSERVABLE], false),
    (ENTITY_MAC_ADDR, &[ABSTRACT_STIX_CYBER_OBSERVABLE], false),
    (ENTITY_MUTEX, &[ABSTRACT_STIX_CYBER_OBSERVABLE], false),
    (ENTITY_NETWORK_TRAFFIC, &[ABSTRACT_STIX_CYBER_OBSERVABLE], false),
    (ENTITY_PROCESS, &[ABSTRACT_STIX_CYBER_OBSERVABLE], false),
    (ENTITY_SOFTWARE, &[ABSTRACT_STIX_CYBER_OBSERVABLE], false),
    (ENTITY_URL, &[ABSTRACT_STIX_CYBER_OBSERVABLE], false),
    (ENTITY_USER_ACCOUNT, &[ABSTRACT_STIX_CYBER_OBSERVABLE], false),
    // Meta objects
    (ENTITY_TYPE_LABEL, &[ABSTRACT_STIX_META_OBJECT], false),
    (ENTITY_TYPE_MARKING_DEFINITION, &[ABSTRACT_STIX_META_OBJECT], false),
    (ENTITY_TYPE_EXTERNAL_REFERENCE, &[ABSTRACT_STIX_META_OBJECT], false),
    (ENTITY_TYPE_KILL_CHAIN_PHASE, &[ABSTRACT_STIX_META_OBJECT], false),
    // Internal objects
    (ENTITY_TYPE_SETTINGS, &[ABSTRACT_INTERNAL_OBJECT], false),
    (ENTITY_TYPE_USER, &[ABSTRACT_INTERNAL_OBJECT], false),
    (ENTITY_TYPE_ENTITY_SETTING, &[ABSTRACT_INTERNAL_OBJECT], false),
    (ENTITY_TYPE_STATUS, &[ABSTRACT_INTERNAL_OBJECT], false),
];

pub(crate) fn register_entity_types(builder: &mut SchemaBuilder) -> Result<()> {
    for &(name, parents, is_abstract) in ENTITY_HIERARCHY {
        let mut entity = builder.add_entity_type(name).parents(parents.iter().copied());
        if is_abstract {
            entity = entity.abstract_type();
        }
        entity.done()?;
    }
    Ok(())
}
