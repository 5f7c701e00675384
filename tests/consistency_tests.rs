//! Integration tests for relation consistency validation

use std::thread;

use cti_schema::catalog::*;
use cti_schema::schema;
use cti_schema::validation::PARALLEL_CHECK_THRESHOLD;
use cti_schema::{
    check_all, is_relation_consistent, AuthUser, ConsistencyChecker, EntityRef, RelationCandidate,
    RelationTarget, RequestContext, SchemaError,
};
use futures::future::join_all;

fn setup() -> (RequestContext, AuthUser) {
    cti_schema::utils::init_logging();
    schema::init_default_schema().unwrap();
    (RequestContext::new("test"), AuthUser::system())
}

async fn consistent(relation: &str, from: &str, to: impl Into<RelationTarget>) -> bool {
    let (context, user) = setup();
    is_relation_consistent(&context, &user, relation, &EntityRef::new(from), to)
        .await
        .unwrap()
}

const CONTAINED: [&str; 4] = [
    ENTITY_TYPE_MALWARE,
    ENTITY_TYPE_CONTAINER_NOTE,
    ENTITY_TYPE_INCIDENT,
    ENTITY_TYPE_CONTAINER_OBSERVED_DATA,
];

#[tokio::test]
async fn test_created_by() {
    assert!(
        consistent(
            RELATION_CREATED_BY,
            ENTITY_HASHED_OBSERVABLE_STIX_FILE,
            ENTITY_TYPE_IDENTITY_ORGANIZATION
        )
        .await
    );
    assert!(
        !consistent(
            RELATION_CREATED_BY,
            ENTITY_HASHED_OBSERVABLE_STIX_FILE,
            ENTITY_HASHED_OBSERVABLE_STIX_FILE
        )
        .await
    );
    assert!(
        !consistent(
            RELATION_CREATED_BY,
            ENTITY_TYPE_COURSE_OF_ACTION,
            ENTITY_TYPE_CAMPAIGN
        )
        .await
    );
}

#[tokio::test]
async fn test_meta_references() {
    assert!(
        !consistent(
            RELATION_OBJECT_MARKING,
            ENTITY_TYPE_CONTAINER_OPINION,
            ENTITY_TYPE_MALWARE
        )
        .await
    );
    assert!(
        consistent(
            RELATION_OBJECT_MARKING,
            ENTITY_TYPE_CONTAINER_NOTE,
            ENTITY_TYPE_MARKING_DEFINITION
        )
        .await
    );
    assert!(consistent(RELATION_OBJECT_LABEL, ENTITY_TYPE_MALWARE, ENTITY_TYPE_LABEL).await);
    assert!(
        !consistent(
            RELATION_EXTERNAL_REFERENCE,
            ENTITY_HASHED_OBSERVABLE_STIX_FILE,
            ENTITY_TYPE_IDENTITY_ORGANIZATION
        )
        .await
    );
    assert!(
        !consistent(
            RELATION_KILL_CHAIN_PHASE,
            ENTITY_HASHED_OBSERVABLE_STIX_FILE,
            ENTITY_HASHED_OBSERVABLE_ARTIFACT
        )
        .await
    );
}

#[tokio::test]
async fn test_object_sequence() {
    assert!(
        consistent(
            RELATION_OBJECT,
            ENTITY_TYPE_CONTAINER_OPINION,
            RelationTarget::many(CONTAINED)
        )
        .await
    );
    assert!(
        !consistent(
            RELATION_OBJECT,
            ENTITY_HASHED_OBSERVABLE_STIX_FILE,
            RelationTarget::many(CONTAINED)
        )
        .await
    );
}

#[tokio::test]
async fn test_single_element_sequence_matches_single_target() {
    for to in [ENTITY_TYPE_MALWARE, ENTITY_TYPE_LABEL] {
        let single = consistent(RELATION_OBJECT, ENTITY_TYPE_CONTAINER_REPORT, to).await;
        let sequence = consistent(
            RELATION_OBJECT,
            ENTITY_TYPE_CONTAINER_REPORT,
            RelationTarget::many([to]),
        )
        .await;
        assert_eq!(single, sequence);
    }
}

#[tokio::test]
async fn test_observable_relations() {
    assert!(
        consistent(
            RELATION_CONTENT,
            ENTITY_HASHED_OBSERVABLE_STIX_FILE,
            ENTITY_HASHED_OBSERVABLE_ARTIFACT
        )
        .await
    );
    assert!(
        !consistent(
            RELATION_CONTENT,
            ENTITY_SOFTWARE,
            ENTITY_HASHED_OBSERVABLE_STIX_FILE
        )
        .await
    );
    assert!(
        !consistent(
            RELATION_CONTENT,
            ENTITY_TYPE_CONTAINER_OBSERVED_DATA,
            ENTITY_HASHED_OBSERVABLE_STIX_FILE
        )
        .await
    );
}

#[tokio::test]
async fn test_core_relations() {
    let cases = [
        (RELATION_USES, ENTITY_TYPE_CAMPAIGN, ENTITY_TYPE_ATTACK_PATTERN, true),
        (RELATION_USES, ENTITY_TYPE_CAMPAIGN, ENTITY_TYPE_MALWARE, true),
        (RELATION_USES, ENTITY_TYPE_INDICATOR, ENTITY_TYPE_MALWARE, false),
        (RELATION_USES, ENTITY_TYPE_CAMPAIGN, ENTITY_TYPE_VULNERABILITY, false),
        (RELATION_INDICATES, ENTITY_TYPE_INDICATOR, ENTITY_TYPE_MALWARE, true),
        (RELATION_RELATED_TO, ENTITY_TYPE_TOOL, ENTITY_TYPE_VULNERABILITY, true),
        (RELATION_DETECTS, ENTITY_TYPE_DATA_COMPONENT, ENTITY_TYPE_ATTACK_PATTERN, true),
        (
            RELATION_PART_OF,
            ENTITY_TYPE_IDENTITY_ORGANIZATION,
            ENTITY_TYPE_IDENTITY_SECTOR,
            true,
        ),
        (RELATION_BELONGS_TO, ENTITY_TYPE_CHANNEL, ENTITY_TYPE_IDENTITY_ORGANIZATION, false),
        (
            RELATION_BELONGS_TO,
            ENTITY_IPV4_ADDR,
            ENTITY_TYPE_IDENTITY_ORGANIZATION,
            true,
        ),
    ];
    for (relation, from, to, expected) in cases {
        assert_eq!(
            consistent(relation, from, to).await,
            expected,
            "{} {} -> {}",
            relation,
            from,
            to
        );
    }
}

#[tokio::test]
async fn test_self_reference() {
    assert!(consistent(RELATION_DERIVED_FROM, ENTITY_TYPE_INDICATOR, ENTITY_TYPE_INDICATOR).await);
    assert!(
        !consistent(
            RELATION_DERIVED_FROM,
            ENTITY_TYPE_TOOL,
            ENTITY_TYPE_VULNERABILITY
        )
        .await
    );
    // Abstract category tokens are registered but never match an exact-type rule
    assert!(!consistent(RELATION_PART_OF, ENTITY_TYPE_IDENTITY, ENTITY_TYPE_IDENTITY).await);
}

#[tokio::test]
async fn test_errors() {
    let (context, user) = setup();
    let from = EntityRef::new(ENTITY_TYPE_MALWARE);

    let result = is_relation_consistent(&context, &user, "teleports-to", &from, ENTITY_TYPE_TOOL).await;
    assert!(matches!(result, Err(SchemaError::UnknownRelationType(_))));

    let result = is_relation_consistent(&context, &user, RELATION_USES, &from, "Dragon").await;
    assert!(matches!(result, Err(SchemaError::UnknownEntityType(_))));

    let result = is_relation_consistent(
        &context,
        &user,
        RELATION_OBJECT,
        &EntityRef::new(ENTITY_TYPE_CONTAINER_REPORT),
        RelationTarget::Many(vec![]),
    )
    .await;
    assert!(matches!(result, Err(SchemaError::EmptyTargets(_))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_checks_agree() {
    setup();
    let handles: Vec<_> = (0..64)
        .map(|i| {
            tokio::spawn(async move {
                let context = RequestContext::new("test").with_request_id(format!("req-{}", i));
                let user = AuthUser::new(format!("user-{}", i), "analyst");
                is_relation_consistent(
                    &context,
                    &user,
                    RELATION_OBJECT,
                    &EntityRef::new(ENTITY_TYPE_CONTAINER_OPINION),
                    RelationTarget::many(CONTAINED),
                )
                .await
            })
        })
        .collect();
    for result in join_all(handles).await {
        assert!(result.unwrap().unwrap());
    }
}

#[test]
fn test_concurrent_threads() {
    let registry = schema::init_default_schema().unwrap();
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let checker = ConsistencyChecker::new(registry);
                let from = if i % 2 == 0 {
                    ENTITY_TYPE_CONTAINER_OPINION
                } else {
                    ENTITY_HASHED_OBSERVABLE_STIX_FILE
                };
                let to = RelationTarget::many(CONTAINED);
                (0..100)
                    .map(|_| checker.check(RELATION_OBJECT, &from.into(), &to).unwrap())
                    .all(|consistent| consistent == (i % 2 == 0))
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[tokio::test]
async fn test_abstract_tokens_match_category_rules_only() {
    // Category endpoints include the category itself
    assert!(
        consistent(
            RELATION_CREATED_BY,
            ABSTRACT_STIX_CORE_OBJECT,
            ENTITY_TYPE_IDENTITY
        )
        .await
    );
    assert!(
        consistent(
            RELATION_OBJECT,
            ENTITY_TYPE_CONTAINER,
            ABSTRACT_STIX_DOMAIN_OBJECT
        )
        .await
    );
    // Exact-type endpoints never match an abstract token
    assert!(!consistent(RELATION_PART_OF, ENTITY_TYPE_IDENTITY, ENTITY_TYPE_IDENTITY).await);
    // A broader ancestor is not a member of a narrower category
    assert!(!consistent(RELATION_RELATED_TO, ABSTRACT_BASIC_OBJECT, ENTITY_TYPE_MALWARE).await);
}

#[tokio::test]
async fn test_check_all_small_batch() {
    let (context, user) = setup();
    let candidates = vec![
        RelationCandidate::new(RELATION_USES, ENTITY_TYPE_CAMPAIGN, ENTITY_TYPE_MALWARE),
        RelationCandidate::new(RELATION_USES, ENTITY_TYPE_CAMPAIGN, ENTITY_TYPE_VULNERABILITY),
        RelationCandidate::new(RELATION_USES, "Dragon", ENTITY_TYPE_MALWARE),
    ];
    let results = check_all(&context, &user, candidates).await.unwrap();
    assert!(matches!(results[0], Ok(true)));
    assert!(matches!(results[1], Ok(false)));
    assert!(matches!(results[2], Err(SchemaError::UnknownEntityType(_))));
}

#[tokio::test]
async fn test_check_all_large_batch() {
    let (context, user) = setup();
    let candidates: Vec<RelationCandidate> = (0..PARALLEL_CHECK_THRESHOLD + 10)
        .map(|i| {
            if i % 2 == 0 {
                RelationCandidate::new(RELATION_INDICATES, ENTITY_TYPE_INDICATOR, ENTITY_TYPE_MALWARE)
            } else {
                RelationCandidate::new(RELATION_INDICATES, ENTITY_TYPE_MALWARE, ENTITY_TYPE_INDICATOR)
            }
        })
        .collect();
    let results = check_all(&context, &user, candidates).await.unwrap();
    assert_eq!(results.len(), PARALLEL_CHECK_THRESHOLD + 10);
    for (i, result) in results.into_iter().enumerate() {
        assert_eq!(result.unwrap(), i % 2 == 0);
    }
}

#[test]
fn test_candidate_from_json() {
    let candidate: RelationCandidate = serde_json::from_str(
        r#"{
            "relationType": "object",
            "from": { "entity_type": "Report" },
            "to": [{ "entity_type": "Malware" }, { "entity_type": "IPv4-Addr" }]
        }"#,
    )
    .unwrap();
    assert_eq!(candidate.to.entities().len(), 2);

    let registry = schema::init_default_schema().unwrap();
    let checker = ConsistencyChecker::new(registry);
    assert!(checker.check_candidate(&candidate).unwrap());
}
