//! Relation consistency validation
//!
//! [`ConsistencyChecker`] evaluates candidates against any registry it is
//! handed. The async entry points below read the process-wide schema and are
//! what the platform's write paths call before persisting an edge.

mod consistency;

use futures::future::join_all;
use tracing::debug;

use crate::error::Result;
use crate::schema;
use crate::types::{AuthUser, EntityRef, RelationCandidate, RelationTarget, RequestContext};

pub use consistency::{ConsistencyChecker, PARALLEL_CHECK_THRESHOLD};

/// Decide whether `relation_type` may connect `from` to `to` under the
/// installed schema.
///
/// `to` is either one entity or a sequence; a sequence is consistent only if
/// every element is. Returns `Ok(false)` for a registered but disallowed
/// combination and an error for unknown tokens, an empty sequence, or when no
/// schema is installed. The context and user are only attached to log events.
pub async fn is_relation_consistent(
    context: &RequestContext,
    user: &AuthUser,
    relation_type: &str,
    from: &EntityRef,
    to: impl Into<RelationTarget>,
) -> Result<bool> {
    let registry = schema::installed()?;
    let to = to.into();
    debug!(
        source = %context.source,
        request_id = context.request_id.as_deref().unwrap_or("-"),
        user = %user.id,
        relation = relation_type,
        "Checking relation consistency"
    );
    ConsistencyChecker::new(registry).check(relation_type, from, &to)
}

/// Check a batch of candidates under the installed schema, one result per
/// candidate in input order.
///
/// Small batches are awaited concurrently; large ones run on the rayon pool
/// inside a blocking task so the async runtime is not stalled.
pub async fn check_all(
    context: &RequestContext,
    user: &AuthUser,
    candidates: Vec<RelationCandidate>,
) -> Result<Vec<Result<bool>>> {
    let registry = schema::installed()?;
    debug!(
        source = %context.source,
        user = %user.id,
        candidates = candidates.len(),
        "Checking relation batch"
    );

    if candidates.len() > PARALLEL_CHECK_THRESHOLD {
        let results = tokio::task::spawn_blocking(move || {
            ConsistencyChecker::new(registry).check_batch(&candidates)
        })
        .await?;
        return Ok(results);
    }

    let checks = candidates.iter().map(|candidate| {
        is_relation_consistent(
            context,
            user,
            &candidate.relation_type,
            &candidate.from,
            candidate.to.clone(),
        )
    });
    Ok(join_all(checks).await)
}
