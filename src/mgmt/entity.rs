//! Entity type resolution
//!
//! Maps a user-supplied type name (short alias like `link`, or a fully
//! qualified management type) to the qualified entity type string the router
//! expects, together with its default attribute list.

use crate::mgmt::catalog::{self, Attribute};

/// Base namespace of the Qpid Dispatch management schema.
const BASE_NAMESPACE: &str = "org.apache.qpid.dispatch";

/// Short names that live under the router sub-namespace.
const ROUTER_TYPES: &[&str] = &["link", "address"];

/// A resolved management entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityType {
    pub qualified_name: String,
    pub default_attributes: Vec<Attribute>,
}

/// Qualify a type name under the management namespace.
///
/// `link` and `address` sit under the router sub-namespace; everything else
/// goes directly under the base namespace. This two-tier scheme must be
/// reproduced byte-exactly for wire compatibility.
pub fn qualify(name: &str) -> String {
    if ROUTER_TYPES.contains(&name) {
        format!("{BASE_NAMESPACE}.router.{name}")
    } else {
        format!("{BASE_NAMESPACE}.{name}")
    }
}

/// Resolve a user-supplied type name to an [`EntityType`].
///
/// A known short alias (or its qualified name) yields the built-in entity
/// with its catalog defaults. Unknown names are accepted and forwarded to the
/// server verbatim, qualified but with no default attributes.
pub fn resolve(user_type_name: &str) -> EntityType {
    for short in ROUTER_TYPES {
        let qualified = qualify(short);
        if user_type_name == *short || user_type_name == qualified {
            return EntityType {
                qualified_name: qualified,
                default_attributes: catalog::default_attributes(short),
            };
        }
    }
    EntityType {
        qualified_name: qualify(user_type_name),
        default_attributes: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_link_short_name() {
        let entity = resolve("link");
        assert_eq!(entity.qualified_name, "org.apache.qpid.dispatch.router.link");
        assert_eq!(entity.default_attributes.len(), 17);
    }

    #[test]
    fn test_resolve_address_short_name() {
        let entity = resolve("address");
        assert_eq!(
            entity.qualified_name,
            "org.apache.qpid.dispatch.router.address"
        );
        assert_eq!(entity.default_attributes.len(), 8);
    }

    #[test]
    fn test_resolve_qualified_name_matches_short_name() {
        assert_eq!(resolve("org.apache.qpid.dispatch.router.link"), resolve("link"));
    }

    #[test]
    fn test_resolve_unknown_qualifies_under_base_namespace() {
        let entity = resolve("connection");
        assert_eq!(entity.qualified_name, "org.apache.qpid.dispatch.connection");
        assert!(entity.default_attributes.is_empty());
    }
}
