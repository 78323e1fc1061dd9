//! Wire types shared across the hub transport and its consumers
//!
//! Server documents carry more keys than we consume; structs that are written
//! back (custom fields) keep the unknown keys in a flattened map so an update
//! round-trips the document intact.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A `rel`/`href` pair from a resource's `_meta.links`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    pub rel: String,
    pub href: String,
}

/// The `_meta` block attached to server resources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceMeta {
    pub href: String,
    #[serde(default)]
    pub links: Vec<ResourceLink>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, Value>,
}

impl ResourceMeta {
    /// Look up a link by rel
    pub fn link(&self, rel: &str) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.rel == rel)
            .map(|l| l.href.as_str())
    }
}

/// Opaque handle to a server-side project-version resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteObjectRef {
    pub project: String,
    pub version: String,
    /// The version resource URL
    pub href: String,
    /// Where the version's custom field instances live
    pub custom_fields_href: String,
}

/// A custom field instance attached to a project-version
///
/// `label` and `values` are what reconciliation works with; everything else
/// the server sent stays in `rest` and is written back verbatim on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteField {
    pub label: String,
    #[serde(default)]
    pub values: Vec<Value>,
    #[serde(rename = "_meta")]
    pub meta: ResourceMeta,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, Value>,
}

impl RemoteField {
    /// The update endpoint for this field instance
    pub fn location(&self) -> &str {
        &self.meta.href
    }
}

/// A custom field definition to provision on the server
///
/// This is the shape of one entry in a definitions file; the session turns it
/// into the server's creation payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Object type the field attaches to, e.g. "Project Version"
    pub object: String,
    pub label: String,
    pub description: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub initial_options: Vec<Value>,
}
