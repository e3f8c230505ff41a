//! Mapping document: the root of a parsed grammar description
#![allow(clippy::must_use_candidate)] // Builder/constructor API intentionally omits pervasive #[must_use].
#![allow(clippy::return_self_not_must_use)] // Fluent builder methods return Self for ergonomics.

use crate::delimiters::Delimiters;
use crate::node::SegmentGroup;

/// Identification of the described message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    /// Message name (e.g. `ORDERS`)
    pub name: String,

    /// Message version (e.g. `D96A`)
    pub version: String,

    /// Target namespace URI of the message
    pub namespace: Option<String>,
}

/// A parsed mapping document
#[derive(Debug, Clone)]
pub struct MappingDocument {
    pub description: Description,

    pub delimiters: Delimiters,

    /// Locator of the grammar source this document was parsed from
    pub src: Option<String>,

    /// Root segment group of the message
    pub root: Option<SegmentGroup>,
}

impl Description {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            namespace: None,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

impl MappingDocument {
    /// Create a root-less document with default delimiters
    pub fn new(description: Description) -> Self {
        Self {
            description,
            delimiters: Delimiters::default(),
            src: None,
            root: None,
        }
    }

    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }

    pub fn with_src(mut self, src: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self
    }

    pub fn with_root(mut self, root: SegmentGroup) -> Self {
        self.root = Some(root);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Field, Segment};

    #[test]
    fn test_document_creation() {
        let doc = MappingDocument::new(Description::new("ORDERS", "D96A"));

        assert_eq!(doc.description.name, "ORDERS");
        assert_eq!(doc.description.version, "D96A");
        assert!(doc.description.namespace.is_none());
        assert_eq!(doc.delimiters, Delimiters::default());
        assert!(doc.src.is_none());
        assert!(doc.root.is_none());
    }

    #[test]
    fn test_document_with_root_and_source() {
        let root = SegmentGroup::new("ORDERS").with_child(
            Segment::new("BGM", "BGM")
                .unwrap()
                .with_child(Field::new("documentName")),
        );
        let doc = MappingDocument::new(
            Description::new("ORDERS", "D96A").with_namespace("urn:orders"),
        )
        .with_src("file:/grammars/orders.xml")
        .with_delimiters(Delimiters::new("'", ":", "+"))
        .with_root(root);

        assert_eq!(doc.description.namespace.as_deref(), Some("urn:orders"));
        assert_eq!(doc.src.as_deref(), Some("file:/grammars/orders.xml"));
        assert_eq!(doc.root.as_ref().map(|r| r.children.len()), Some(1));
        assert_eq!(doc.delimiters.field, "+");
    }
}
