//! CTI Schema
//!
//! Typed entity/relation schema and relation consistency validation for a
//! threat-intelligence knowledge graph built on STIX 2.1.
//!
//! # Features
//!
//! - **Category hierarchy**: every entity type resolves to itself plus all of
//!   its transitive parents (`Organization` is also an `Identity`)
//! - **Rule tables**: each relation type carries (from, to) endpoint rules
//!   matched by exact type, by category, or by a union of both
//! - **Sequences**: reference relations check a whole target list at once,
//!   all or nothing
//! - **Attributes**: per-type attribute definitions with kind, multiplicity
//!   and upsert queries
//! - **Install once**: the schema is frozen at startup and read lock-free
//!   from any thread
//!
//! # Modules
//!
//! - `types`: Entity descriptors, relation candidates, request context
//! - `schema`: Registry, builder, endpoint rules, JSON extension config
//! - `catalog`: Built-in STIX and platform types, relation rules, modules
//! - `validation`: Consistency checker and async entry points
//! - `utils`: Logging setup
//!
//! # Example
//!
//! ```no_run
//! use cti_schema::{is_relation_consistent, schema, AuthUser, EntityRef, RequestContext};
//!
//! # async fn run() -> cti_schema::Result<()> {
//! schema::init_default_schema()?;
//! let context = RequestContext::new("api");
//! let ok = is_relation_consistent(
//!     &context,
//!     &AuthUser::system(),
//!     "uses",
//!     &EntityRef::new("Campaign"),
//!     EntityRef::new("Malware"),
//! )
//! .await?;
//! assert!(ok);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod error;
pub mod schema;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export commonly used items at crate root
pub use error::{Result, SchemaError};
pub use schema::{SchemaBuilder, SchemaConfig, SchemaRegistry};
pub use types::{AuthUser, EntityRef, RelationCandidate, RelationTarget, RequestContext};
pub use validation::{check_all, is_relation_consistent, ConsistencyChecker};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
