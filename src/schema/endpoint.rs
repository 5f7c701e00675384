//! Rule endpoints and consistency rules

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One side of a consistency rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Endpoint {
    /// Exactly this entity type.
    Type(String),
    /// Any entity type belonging to this category (the category included).
    Category(String),
    /// Any of the listed endpoints.
    AnyOf(Vec<Endpoint>),
}

impl Endpoint {
    pub fn of_type(token: impl Into<String>) -> Self {
        Endpoint::Type(token.into())
    }

    pub fn category(token: impl Into<String>) -> Self {
        Endpoint::Category(token.into())
    }

    /// Union of concrete types
    pub fn types<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Endpoint::AnyOf(tokens.into_iter().map(|t| Endpoint::Type(t.into())).collect())
    }

    /// Union of categories
    pub fn categories<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Endpoint::AnyOf(
            tokens
                .into_iter()
                .map(|t| Endpoint::Category(t.into()))
                .collect(),
        )
    }

    /// Check an entity type, given its resolved category set.
    pub fn matches(&self, entity_type: &str, categories: &BTreeSet<String>) -> bool {
        match self {
            Endpoint::Type(token) => token == entity_type,
            Endpoint::Category(token) => categories.contains(token),
            Endpoint::AnyOf(members) => members.iter().any(|m| m.matches(entity_type, categories)),
        }
    }

    /// Every type token mentioned by this endpoint
    pub fn tokens(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_tokens(&mut out);
        out
    }

    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Endpoint::Type(token) | Endpoint::Category(token) => out.push(token),
            Endpoint::AnyOf(members) => {
                for member in members {
                    member.collect_tokens(out);
                }
            }
        }
    }

    /// True if this endpoint, or any nested set, has no members
    pub fn has_empty_set(&self) -> bool {
        match self {
            Endpoint::AnyOf(members) => {
                members.is_empty() || members.iter().any(Endpoint::has_empty_set)
            }
            _ => false,
        }
    }
}

/// A permitted (from, to) pairing for a relation type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyRule {
    pub from: Endpoint,
    pub to: Endpoint,
}

impl ConsistencyRule {
    pub fn new(from: Endpoint, to: Endpoint) -> Self {
        Self { from, to }
    }

    pub fn permits(
        &self,
        from_type: &str,
        from_categories: &BTreeSet<String>,
        to_type: &str,
        to_categories: &BTreeSet<String>,
    ) -> bool {
        self.from.matches(from_type, from_categories) && self.to.matches(to_type, to_categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cats(tokens: &[&str]) -> BTreeSet<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_type_endpoint_is_exact() {
        let organization = cats(&["Organization", "Identity"]);
        assert!(Endpoint::of_type("Organization").matches("Organization", &organization));
        // An abstract token is a category, not a concrete match
        let identity = cats(&["Identity"]);
        assert!(!Endpoint::of_type("Organization").matches("Identity", &identity));
    }

    #[test]
    fn test_category_endpoint_uses_membership() {
        let organization = cats(&["Organization", "Identity"]);
        assert!(Endpoint::category("Identity").matches("Organization", &organization));
        assert!(!Endpoint::category("Location").matches("Organization", &organization));
    }

    #[test]
    fn test_any_of_endpoint() {
        let endpoint = Endpoint::AnyOf(vec![
            Endpoint::category("Container"),
            Endpoint::of_type("Malware"),
        ]);
        assert!(endpoint.matches("Malware", &cats(&["Malware"])));
        assert!(endpoint.matches("Note", &cats(&["Note", "Container"])));
        assert!(!endpoint.matches("Tool", &cats(&["Tool"])));
        assert_eq!(endpoint.tokens(), vec!["Container", "Malware"]);
    }

    #[test]
    fn test_empty_set_detection() {
        assert!(Endpoint::AnyOf(vec![]).has_empty_set());
        assert!(Endpoint::AnyOf(vec![Endpoint::AnyOf(vec![])]).has_empty_set());
        assert!(!Endpoint::types(["Malware"]).has_empty_set());
    }

    #[test]
    fn test_endpoint_json_shape() {
        let endpoint: Endpoint =
            serde_json::from_str(r#"{"anyOf": [{"type": "Malware"}, {"category": "Identity"}]}"#)
                .unwrap();
        assert_eq!(
            endpoint,
            Endpoint::AnyOf(vec![Endpoint::of_type("Malware"), Endpoint::category("Identity")])
        );
    }
}
