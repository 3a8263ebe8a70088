//! Built-in attribute catalogs
//!
//! Each entity short name maps to an ordered list of (canonical name, display
//! alias) pairs. The order doubles as the default column order when the user
//! gives no `--attributes` list. Aliases exist only for rendered output; the
//! wire request always carries canonical names.

/// A single queryable attribute: canonical name plus optional display alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub alias: Option<String>,
}

impl Attribute {
    pub fn new(name: &str, alias: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            alias: alias.map(str::to_string),
        }
    }

    /// A synthetic attribute for a name not present in any catalog.
    pub fn passthrough(name: &str) -> Self {
        Self {
            name: name.to_string(),
            alias: None,
        }
    }

    /// The name shown in table headers: the alias when one exists.
    pub fn display_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

const LINK_ATTRIBUTES: &[(&str, Option<&str>)] = &[
    ("linkType", Some("type")),
    ("linkDir", Some("dir")),
    ("connectionId", Some("conn")),
    ("identity", Some("id")),
    ("peer", None),
    ("owningAddr", Some("addr")),
    ("capacity", Some("cpcty")),
    ("linkName", Some("name")),
    ("undeliveredCount", Some("undel")),
    ("unsettledCount", Some("unsett")),
    ("deliveryCount", Some("del")),
    ("acceptedCount", Some("acc")),
    ("releasedCount", Some("rel")),
    ("modifiedCount", Some("mod")),
    ("rejectedCount", Some("rej")),
    ("presettledCount", Some("presett")),
    ("droppedPresettledCount", Some("psdrop")),
];

const ADDRESS_ATTRIBUTES: &[(&str, Option<&str>)] = &[
    ("key", Some("addr")),
    ("distribution", Some("distrib")),
    ("priority", Some("pri")),
    ("subscriberCount", Some("local")),
    ("remoteCount", Some("remote")),
    ("deliveriesEgress", Some("out")),
    ("deliveriesIngress", Some("in")),
    ("deliveriesTransit", Some("thru")),
];

/// Raw catalog table for an entity short name, if one is built in.
fn table(short_name: &str) -> Option<&'static [(&'static str, Option<&'static str>)]> {
    match short_name {
        "link" => Some(LINK_ATTRIBUTES),
        "address" => Some(ADDRESS_ATTRIBUTES),
        _ => None,
    }
}

/// Default attribute list for an entity short name, in catalog order.
/// Unknown entity types have no defaults.
pub fn default_attributes(short_name: &str) -> Vec<Attribute> {
    table(short_name)
        .map(|t| t.iter().map(|(n, a)| Attribute::new(n, *a)).collect())
        .unwrap_or_default()
}

/// Resolve a user-supplied token against a catalog.
///
/// Matches the canonical name or the alias exactly; either way the catalog
/// entry is returned, so querying by alias still puts the canonical name on
/// the wire. Unknown tokens pass through as alias-less attributes rather than
/// being rejected, which keeps attributes the client has no table for
/// queryable.
pub fn resolve(token: &str, catalog: &[Attribute]) -> Attribute {
    catalog
        .iter()
        .find(|a| a.name == token || a.alias.as_deref() == Some(token))
        .cloned()
        .unwrap_or_else(|| Attribute::passthrough(token))
}
