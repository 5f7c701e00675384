//! Request context passed through to validation calls

use serde::{Deserialize, Serialize};

/// Opaque per-request context supplied by the calling write path
///
/// The validator never inspects it beyond attaching it to log events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestContext {
    /// Free-form label for the originating component (api, worker, import...)
    #[serde(default)]
    pub source: String,
    #[serde(rename = "requestId", default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl RequestContext {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

const SYSTEM_USER: &str = "system";

fn system_name() -> String {
    SYSTEM_USER.to_string()
}

fn is_system_name(name: &str) -> bool {
    name.is_empty() || name == SYSTEM_USER
}

/// Authenticated user on whose behalf the relation is proposed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default = "system_name", skip_serializing_if = "is_system_name")]
    pub name: String,
}

impl AuthUser {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Platform system user used by internal write paths
    pub fn system() -> Self {
        Self {
            id: SYSTEM_USER.to_string(),
            name: system_name(),
        }
    }
}

impl Default for AuthUser {
    fn default() -> Self {
        Self::system()
    }
}
