//! Query construction
//!
//! Turns a resolved entity type and an optional user attribute list into the
//! management request payload. Pure transformations; nothing here touches the
//! wire.

use crate::mgmt::catalog::{self, Attribute};
use crate::mgmt::entity::EntityType;

/// The management operation this tool issues.
pub const OPERATION_QUERY: &str = "QUERY";

/// Ordered attribute selection for one query.
///
/// Fixes both the outgoing request's attribute list and the column order of
/// the rendered table, so order is preserved end to end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSelection(pub Vec<Attribute>);

impl AttributeSelection {
    /// Canonical names in selection order, as sent on the wire.
    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|a| a.name.clone()).collect()
    }

    /// Display alias for a canonical name, falling back to the name itself
    /// when the selection has no entry for it.
    pub fn display_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.0
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.display_name())
            .unwrap_or(name)
    }
}

/// A fully assembled management query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub operation: &'static str,
    pub entity_type: String,
    pub attribute_names: Vec<String>,
}

/// Build the attribute selection for a query.
///
/// A non-empty comma-separated list is resolved token by token against the
/// entity's catalog, preserving input order; duplicates and unknown names are
/// both allowed. Without a user list the entity's defaults are used (which
/// may be empty for entity types the client has no catalog for).
pub fn select(user_csv: Option<&str>, entity: &EntityType) -> AttributeSelection {
    match user_csv {
        Some(csv) if !csv.is_empty() => AttributeSelection(
            csv.split(',')
                .map(|token| catalog::resolve(token, &entity.default_attributes))
                .collect(),
        ),
        _ => AttributeSelection(entity.default_attributes.clone()),
    }
}

/// Package an entity and selection into the request payload. Zero attributes
/// is a legal, if degenerate, request; the server decides what it returns.
pub fn build_request(entity: &EntityType, selection: &AttributeSelection) -> QueryRequest {
    QueryRequest {
        operation: OPERATION_QUERY,
        entity_type: entity.qualified_name.clone(),
        attribute_names: selection.names(),
    }
}
