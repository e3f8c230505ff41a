//! Package, class and feature descriptors
#![allow(clippy::must_use_candidate)] // Accessors are clear at call sites without #[must_use].

use crate::annotation::{Annotated, Annotations};
use serde::{Deserialize, Serialize};
use std::fmt;

/// XML Schema namespace of the primitive classifiers
pub const XML_TYPE_NAMESPACE: &str = "http://www.eclipse.org/emf/2003/XMLType";

/// Index of a class inside its package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId(usize);

/// Primitive classifier of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    /// Text
    String,

    /// 64-bit signed integer
    Long,

    /// Arbitrary precision decimal
    Decimal,

    /// Floating point number
    Float,
}

/// How the XML content of a class is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentKind {
    /// Child elements only, no text
    ElementOnly,

    /// Elements interleaved with text (document roots)
    Mixed,
}

/// Upper bound of a structural feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpperBound {
    Bounded(u32),
    Unbounded,
}

/// A package of classes sharing one namespace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageDescriptor {
    pub name: String,
    pub ns_prefix: String,
    pub ns_uri: Option<String>,
    pub annotations: Annotations,
    classes: Vec<ClassDescriptor>,
    root: Option<ClassId>,
    document_root: Option<ClassId>,
}

/// A class with an ordered list of features
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDescriptor {
    pub name: String,
    pub content_kind: ContentKind,
    pub annotations: Annotations,
    features: Vec<Feature>,
}

/// A structural feature of a class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Feature {
    Reference(ReferenceDescriptor),
    Attribute(AttributeDescriptor),
}

/// A reference to another class of the same package
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceDescriptor {
    pub name: String,
    pub target: ClassId,

    /// Whether the referencing instance owns the target instance
    pub containment: bool,

    pub lower_bound: u32,
    pub upper_bound: UpperBound,
    pub annotations: Annotations,
}

/// A single-valued attribute of primitive type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    pub name: String,
    pub lower_bound: u32,
    pub data_type: PrimitiveType,
    pub annotations: Annotations,
}

impl ClassId {
    /// Position of the class in [`PackageDescriptor::classes`]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl PrimitiveType {
    /// Name of the classifier in the XML type namespace
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::String => "string",
            PrimitiveType::Long => "long",
            PrimitiveType::Decimal => "decimal",
            PrimitiveType::Float => "float",
        }
    }

    pub fn namespace(self) -> &'static str {
        XML_TYPE_NAMESPACE
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ContentKind {
    /// Value of the XML binding `kind` hint
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::ElementOnly => "elementOnly",
            ContentKind::Mixed => "mixed",
        }
    }
}

impl UpperBound {
    pub fn is_unbounded(self) -> bool {
        matches!(self, UpperBound::Unbounded)
    }
}

impl fmt::Display for UpperBound {
    /// Unbounded is rendered as `-1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpperBound::Bounded(max) => write!(f, "{max}"),
            UpperBound::Unbounded => f.write_str("-1"),
        }
    }
}

impl PackageDescriptor {
    /// Create an empty package whose prefix equals its name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            ns_prefix: name.clone(),
            name,
            ns_uri: None,
            annotations: Annotations::default(),
            classes: Vec::new(),
            root: None,
            document_root: None,
        }
    }

    /// Add a class and return its id
    pub fn add_class(&mut self, class: ClassDescriptor) -> ClassId {
        self.classes.push(class);
        ClassId(self.classes.len() - 1)
    }

    pub fn class(&self, id: ClassId) -> Option<&ClassDescriptor> {
        self.classes.get(id.0)
    }

    pub fn class_mut(&mut self, id: ClassId) -> Option<&mut ClassDescriptor> {
        self.classes.get_mut(id.0)
    }

    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.classes.iter().position(|c| c.name == name).map(ClassId)
    }

    pub fn class_by_name(&self, name: &str) -> Option<&ClassDescriptor> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// Classes in insertion order with their ids
    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &ClassDescriptor)> {
        self.classes.iter().enumerate().map(|(i, c)| (ClassId(i), c))
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Mark the class wrapped by the document root
    pub fn set_root(&mut self, id: ClassId) {
        self.root = Some(id);
    }

    pub fn set_document_root(&mut self, id: ClassId) {
        self.document_root = Some(id);
    }

    pub fn root_id(&self) -> Option<ClassId> {
        self.root
    }

    pub fn document_root_id(&self) -> Option<ClassId> {
        self.document_root
    }

    pub fn root(&self) -> Option<&ClassDescriptor> {
        self.root.and_then(|id| self.class(id))
    }

    pub fn document_root(&self) -> Option<&ClassDescriptor> {
        self.document_root.and_then(|id| self.class(id))
    }
}

impl ClassDescriptor {
    pub fn new(name: impl Into<String>, content_kind: ContentKind) -> Self {
        Self {
            name: name.into(),
            content_kind,
            annotations: Annotations::default(),
            features: Vec::new(),
        }
    }

    /// Append a feature
    pub fn add_feature(&mut self, feature: impl Into<Feature>) {
        self.features.push(feature.into());
    }

    pub fn feature(&self, name: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.name() == name)
    }

    pub fn has_feature(&self, name: &str) -> bool {
        self.feature(name).is_some()
    }

    /// Features in declaration order
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn references(&self) -> impl Iterator<Item = &ReferenceDescriptor> {
        self.features.iter().filter_map(Feature::as_reference)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &AttributeDescriptor> {
        self.features.iter().filter_map(Feature::as_attribute)
    }
}

impl Feature {
    pub fn name(&self) -> &str {
        match self {
            Feature::Reference(reference) => &reference.name,
            Feature::Attribute(attribute) => &attribute.name,
        }
    }

    pub fn lower_bound(&self) -> u32 {
        match self {
            Feature::Reference(reference) => reference.lower_bound,
            Feature::Attribute(attribute) => attribute.lower_bound,
        }
    }

    pub fn upper_bound(&self) -> UpperBound {
        match self {
            Feature::Reference(reference) => reference.upper_bound,
            Feature::Attribute(attribute) => attribute.upper_bound(),
        }
    }

    pub fn as_reference(&self) -> Option<&ReferenceDescriptor> {
        match self {
            Feature::Reference(reference) => Some(reference),
            Feature::Attribute(_) => None,
        }
    }

    pub fn as_attribute(&self) -> Option<&AttributeDescriptor> {
        match self {
            Feature::Attribute(attribute) => Some(attribute),
            Feature::Reference(_) => None,
        }
    }
}

impl ReferenceDescriptor {
    /// Create a containment reference
    pub fn containment(
        name: impl Into<String>,
        target: ClassId,
        lower_bound: u32,
        upper_bound: UpperBound,
    ) -> Self {
        Self {
            name: name.into(),
            target,
            containment: true,
            lower_bound,
            upper_bound,
            annotations: Annotations::default(),
        }
    }
}

impl AttributeDescriptor {
    pub fn new(name: impl Into<String>, lower_bound: u32, data_type: PrimitiveType) -> Self {
        Self {
            name: name.into(),
            lower_bound,
            data_type,
            annotations: Annotations::default(),
        }
    }

    /// Attributes are always single valued
    pub fn upper_bound(&self) -> UpperBound {
        UpperBound::Bounded(1)
    }
}

impl From<ReferenceDescriptor> for Feature {
    fn from(reference: ReferenceDescriptor) -> Self {
        Feature::Reference(reference)
    }
}

impl From<AttributeDescriptor> for Feature {
    fn from(attribute: AttributeDescriptor) -> Self {
        Feature::Attribute(attribute)
    }
}

macro_rules! impl_annotated {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Annotated for $ty {
                fn annotations(&self) -> &Annotations {
                    &self.annotations
                }

                fn annotations_mut(&mut self) -> &mut Annotations {
                    &mut self.annotations
                }
            }
        )*
    };
}

impl_annotated!(
    PackageDescriptor,
    ClassDescriptor,
    ReferenceDescriptor,
    AttributeDescriptor,
);

impl Annotated for Feature {
    fn annotations(&self) -> &Annotations {
        match self {
            Feature::Reference(reference) => &reference.annotations,
            Feature::Attribute(attribute) => &attribute.annotations,
        }
    }

    fn annotations_mut(&mut self) -> &mut Annotations {
        match self {
            Feature::Reference(reference) => &mut reference.annotations,
            Feature::Attribute(attribute) => &mut attribute.annotations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{annotate, keys};

    fn sample_package() -> PackageDescriptor {
        let mut package = PackageDescriptor::new("orders");
        let mut header = ClassDescriptor::new("Header", ContentKind::ElementOnly);
        header.add_feature(AttributeDescriptor::new("number", 1, PrimitiveType::String));
        let header_id = package.add_class(header);

        let mut root = ClassDescriptor::new("Orders", ContentKind::ElementOnly);
        root.add_feature(ReferenceDescriptor::containment(
            "header",
            header_id,
            1,
            UpperBound::Bounded(1),
        ));
        root.add_feature(AttributeDescriptor::new("note", 0, PrimitiveType::String));
        let root_id = package.add_class(root);
        package.set_root(root_id);
        package
    }

    #[test]
    fn test_package_prefix_defaults_to_name() {
        let package = PackageDescriptor::new("orders");
        assert_eq!(package.ns_prefix, "orders");
        assert!(package.ns_uri.is_none());
        assert_eq!(package.class_count(), 0);
    }

    #[test]
    fn test_class_lookup() {
        let package = sample_package();

        assert_eq!(package.class_count(), 2);
        assert_eq!(package.class_id("Orders").map(ClassId::index), Some(1));
        assert_eq!(package.root().map(|c| c.name.as_str()), Some("Orders"));
        assert!(package.document_root().is_none());
        assert!(package.class_by_name("Missing").is_none());
    }

    #[test]
    fn test_features_keep_order_and_kind() {
        let package = sample_package();
        let root = package.root().unwrap();

        let names: Vec<&str> = root.features().iter().map(Feature::name).collect();
        assert_eq!(names, vec!["header", "note"]);
        assert_eq!(root.references().count(), 1);
        assert_eq!(root.attributes().count(), 1);

        let header = root.feature("header").and_then(Feature::as_reference).unwrap();
        assert!(header.containment);
        assert_eq!(package.class(header.target).unwrap().name, "Header");
    }

    #[test]
    fn test_attribute_upper_bound_is_one() {
        let attribute = AttributeDescriptor::new("value", 0, PrimitiveType::Decimal);
        assert_eq!(attribute.upper_bound(), UpperBound::Bounded(1));

        let feature = Feature::from(attribute);
        assert_eq!(feature.lower_bound(), 0);
        assert_eq!(feature.upper_bound(), UpperBound::Bounded(1));
    }

    #[test]
    fn test_upper_bound_display() {
        assert_eq!(UpperBound::Unbounded.to_string(), "-1");
        assert_eq!(UpperBound::Bounded(9).to_string(), "9");
        assert!(UpperBound::Unbounded.is_unbounded());
    }

    #[test]
    fn test_primitive_type_names() {
        assert_eq!(PrimitiveType::String.name(), "string");
        assert_eq!(PrimitiveType::Long.name(), "long");
        assert_eq!(PrimitiveType::Decimal.name(), "decimal");
        assert_eq!(PrimitiveType::Float.to_string(), "float");
        assert_eq!(PrimitiveType::Float.namespace(), XML_TYPE_NAMESPACE);
    }

    #[test]
    fn test_feature_annotations_delegate() {
        let mut feature = Feature::from(AttributeDescriptor::new("code", 1, PrimitiveType::String));
        annotate(&mut feature, keys::REQUIRED, Some("true"));

        assert_eq!(feature.smooks(keys::REQUIRED), Some("true"));
        let attribute = feature.as_attribute().unwrap();
        assert_eq!(attribute.smooks(keys::REQUIRED), Some("true"));
    }

    #[test]
    fn test_package_serializes_annotations_in_order() {
        let mut package = sample_package();
        annotate(&mut package, keys::DELIMITER_SEGMENT, Some("'"));
        annotate(&mut package, keys::DELIMITER_FIELD, Some("+"));

        let json = serde_json::to_string(&package).unwrap();
        let segment = json.find("delimeters.segment").unwrap();
        let field = json.find("delimeters.field").unwrap();
        assert!(segment < field);
        assert!(json.contains("\"source\":\"smooks-mapping-data\""));
    }
}
