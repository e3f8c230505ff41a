//! Annotation maps and the annotation propagation primitive
//!
//! Every descriptor carries a list of [`AnnotationMap`]s, one per source.
//! Domain metadata lives under [`SMOOKS_SOURCE`] and is written only through
//! [`annotate`], which never stores blank values. XML binding hints live under
//! [`EXTENDED_METADATA_SOURCE`] and are written through [`set_extended`].
//!
//! The key strings below are consumed verbatim by downstream serializers and
//! code generators. Do not rename them, including the `delimeters.*`
//! spelling.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Source of the domain annotation map
pub const SMOOKS_SOURCE: &str = "smooks-mapping-data";

/// Source of the XML binding annotation map
pub const EXTENDED_METADATA_SOURCE: &str = "http:///org/eclipse/emf/ecore/util/ExtendedMetaData";

/// Namespace marker binding a feature to the package target namespace
pub const TARGET_NAMESPACE: &str = "##targetNamespace";

/// Keys of the domain annotation map
pub mod keys {
    /// Type-kind marker, one of the [`super::kinds`] values
    pub const TYPE: &str = "type";
    pub const SEGCODE: &str = "segcode";
    pub const SEGCODE_PATTERN: &str = "segcodePattern";
    pub const TRUNCABLE: &str = "truncable";
    pub const IGNORE_UNMAPPED_FIELDS: &str = "ignoreUnmappedFields";
    pub const DESCRIPTION: &str = "description";
    pub const DOCUMENTATION: &str = "documentation";
    pub const MIN_OCCURS: &str = "minOccurs";
    pub const MAX_OCCURS: &str = "maxOccurs";
    pub const DATATYPE: &str = "datatype";
    pub const MIN_LENGTH: &str = "minLength";
    pub const MAX_LENGTH: &str = "maxLength";
    pub const REQUIRED: &str = "required";

    // Package level
    pub const SRC: &str = "src";
    pub const DESCRIPTION_NAME: &str = "description.name";
    pub const DESCRIPTION_VERSION: &str = "description.version";
    pub const DELIMITER_SEGMENT: &str = "delimeters.segment";
    pub const DELIMITER_COMPONENT: &str = "delimeters.component";
    pub const DELIMITER_FIELD: &str = "delimeters.field";
    pub const DELIMITER_FIELD_REPEAT: &str = "delimeters.fieldRepeat";
    pub const DELIMITER_ESCAPE: &str = "delimeters.escape";
    pub const DELIMITER_IGNORE_CRLF: &str = "delimeters.ignoreCLRF";
}

/// Values of the [`keys::TYPE`] marker
pub mod kinds {
    pub const SEGMENT: &str = "segment";
    pub const SEGMENT_GROUP: &str = "segmentGroup";
    pub const FIELD: &str = "field";
    pub const COMPONENT: &str = "component";
}

/// Keys of the XML binding annotation map
pub mod extended {
    pub const NAME: &str = "name";
    pub const KIND: &str = "kind";
    pub const NAMESPACE: &str = "namespace";

    /// [`KIND`] value for element features
    pub const ELEMENT_FEATURE: &str = "element";
}

/// Ordered key/value details scoped to one annotation source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationMap {
    source: String,
    details: IndexMap<String, String>,
}

/// All annotation maps of one descriptor, at most one per source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Annotations(Vec<AnnotationMap>);

/// Implemented by every descriptor that can carry annotations
pub trait Annotated {
    fn annotations(&self) -> &Annotations;

    fn annotations_mut(&mut self) -> &mut Annotations;

    /// Look up a detail of the given source
    fn annotation(&self, source: &str, key: &str) -> Option<&str> {
        self.annotations().source(source)?.get(key)
    }

    /// Look up a domain annotation
    fn smooks(&self, key: &str) -> Option<&str> {
        self.annotation(SMOOKS_SOURCE, key)
    }

    /// Look up an XML binding hint
    fn extended(&self, key: &str) -> Option<&str> {
        self.annotation(EXTENDED_METADATA_SOURCE, key)
    }
}

impl AnnotationMap {
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            details: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.details.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.details.contains_key(key)
    }

    /// Details in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.details.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.details.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    fn insert(&mut self, key: &str, value: &str) {
        self.details.insert(key.to_string(), value.to_string());
    }
}

impl Annotations {
    /// Map for the given source, if one was ever created
    #[must_use]
    pub fn source(&self, source: &str) -> Option<&AnnotationMap> {
        self.0.iter().find(|map| map.source == source)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnnotationMap> {
        self.0.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn source_or_insert(&mut self, source: &str) -> &mut AnnotationMap {
        let position = match self.0.iter().position(|map| map.source == source) {
            Some(position) => position,
            None => {
                self.0.push(AnnotationMap::new(source));
                self.0.len() - 1
            }
        };
        &mut self.0[position]
    }
}

/// Attach a domain annotation to `element`.
///
/// Absent, empty and whitespace-only values are ignored, and in that case no
/// annotation map is created. An existing value under the same key is
/// replaced.
pub fn annotate<A>(element: &mut A, key: &str, value: Option<&str>)
where
    A: Annotated + ?Sized,
{
    let Some(value) = value else {
        return;
    };
    if value.trim().is_empty() {
        return;
    }
    element
        .annotations_mut()
        .source_or_insert(SMOOKS_SOURCE)
        .insert(key, value);
}

/// Set an XML binding hint on `element`.
///
/// Unlike [`annotate`] empty values are stored: the document root is bound
/// to the empty element name.
pub fn set_extended<A>(element: &mut A, key: &str, value: &str)
where
    A: Annotated + ?Sized,
{
    element
        .annotations_mut()
        .source_or_insert(EXTENDED_METADATA_SOURCE)
        .insert(key, value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Element {
        annotations: Annotations,
    }

    impl Annotated for Element {
        fn annotations(&self) -> &Annotations {
            &self.annotations
        }

        fn annotations_mut(&mut self) -> &mut Annotations {
            &mut self.annotations
        }
    }

    #[test]
    fn test_annotate_stores_value() {
        let mut element = Element::default();
        annotate(&mut element, keys::SEGCODE, Some("NAD"));

        assert_eq!(element.smooks(keys::SEGCODE), Some("NAD"));
        assert_eq!(element.annotations.iter().count(), 1);
    }

    #[test]
    fn test_blank_values_create_no_container() {
        let mut element = Element::default();
        annotate(&mut element, keys::DESCRIPTION, None);
        annotate(&mut element, keys::DESCRIPTION, Some(""));
        annotate(&mut element, keys::DESCRIPTION, Some("  \t\n"));

        assert!(element.annotations.is_empty());
        assert!(element.annotations.source(SMOOKS_SOURCE).is_none());
    }

    #[test]
    fn test_blank_value_keeps_previous_value() {
        let mut element = Element::default();
        annotate(&mut element, keys::DOCUMENTATION, Some("Name and address"));
        annotate(&mut element, keys::DOCUMENTATION, Some(" "));

        assert_eq!(element.smooks(keys::DOCUMENTATION), Some("Name and address"));
    }

    #[test]
    fn test_annotations_keep_insertion_order() {
        let mut element = Element::default();
        annotate(&mut element, keys::TRUNCABLE, Some("false"));
        annotate(&mut element, keys::REQUIRED, Some("true"));
        annotate(&mut element, keys::TYPE, Some(kinds::FIELD));
        annotate(&mut element, keys::REQUIRED, Some("false"));

        let map = element.annotations.source(SMOOKS_SOURCE).unwrap();
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["truncable", "required", "type"]);
        assert_eq!(map.get(keys::REQUIRED), Some("false"));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_extended_metadata_is_a_separate_source() {
        let mut element = Element::default();
        set_extended(&mut element, extended::NAME, "");
        set_extended(&mut element, extended::NAMESPACE, TARGET_NAMESPACE);

        assert_eq!(element.extended(extended::NAME), Some(""));
        assert_eq!(element.extended(extended::NAMESPACE), Some("##targetNamespace"));
        assert!(element.smooks(extended::NAME).is_none());
        assert!(element.annotations.source(SMOOKS_SOURCE).is_none());
    }
}
