//! Node types for the mapping tree
#![allow(clippy::must_use_candidate)] // Builder/constructor API intentionally omits pervasive #[must_use].
#![allow(clippy::return_self_not_must_use)] // Fluent builder methods return Self for ergonomics.

use crate::{Error, Result};
use regex::Regex;
use std::fmt;

/// A child of a segment group.
#[derive(Debug, Clone)]
pub enum MappingNode {
    /// Nested segment group
    Group(SegmentGroup),

    /// Segment carrying a wire-level code
    Segment(Segment),

    /// Simple or composite field
    Field(Field),
}

/// Upper occurrence bound of a group or segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaxOccurs {
    /// At most this many occurrences
    Bounded(u32),

    /// Any number of occurrences
    Unbounded,
}

/// A structural grammar node holding an ordered list of children
#[derive(Debug, Clone)]
pub struct SegmentGroup {
    /// Grammar tag (XML element name of the node)
    pub tag: String,

    /// Free-form documentation
    pub documentation: Option<String>,

    /// Minimum number of occurrences
    pub min_occurs: u32,

    /// Maximum number of occurrences
    pub max_occurs: MaxOccurs,

    /// Children in source order
    pub children: Vec<MappingNode>,
}

/// A segment: a group that is matched on the wire by its segment code
#[derive(Debug, Clone)]
pub struct Segment {
    /// Tag, documentation, bounds and children shared with plain groups
    pub group: SegmentGroup,

    /// Segment code (e.g. `NAD`)
    pub segcode: String,

    /// Pattern matching the start of a segment with this code
    pub segcode_pattern: Regex,

    /// Whether trailing empty fields may be omitted
    pub truncatable: bool,

    /// Whether fields beyond the declared ones are tolerated
    pub ignore_unmapped_fields: bool,

    /// Human readable description of the segment
    pub description: Option<String>,
}

/// Attributes shared by fields and components
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueNode {
    /// Grammar data type identifier (e.g. `String`, `Decimal`)
    pub data_type: Option<String>,

    /// Abstract value type used for the metamodel (`string`, `integer`, `decimal`, `float`)
    pub type_class: Option<String>,

    /// Minimum value length
    pub min_length: Option<u32>,

    /// Maximum value length
    pub max_length: Option<u32>,

    /// Free-form documentation
    pub documentation: Option<String>,
}

/// A field; composite when it has components
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub tag: String,
    pub required: bool,
    pub truncatable: bool,

    /// Name of the type definition this field was declared against
    pub type_ref: Option<String>,

    pub value: ValueNode,

    /// Components in source order, empty for simple fields
    pub components: Vec<Component>,
}

/// A component of a composite field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub tag: String,
    pub required: bool,
    pub truncatable: bool,
    pub value: ValueNode,

    /// Nested sub-components; the converter rejects non-empty lists
    pub sub_components: Vec<Component>,
}

impl MappingNode {
    /// Grammar tag of the node
    pub fn tag(&self) -> &str {
        match self {
            MappingNode::Group(group) => &group.tag,
            MappingNode::Segment(segment) => &segment.group.tag,
            MappingNode::Field(field) => &field.tag,
        }
    }
}

impl MaxOccurs {
    /// Returns true for the unbounded sentinel
    pub fn is_unbounded(&self) -> bool {
        matches!(self, MaxOccurs::Unbounded)
    }
}

impl Default for MaxOccurs {
    fn default() -> Self {
        MaxOccurs::Bounded(1)
    }
}

impl fmt::Display for MaxOccurs {
    /// Unbounded is rendered as `-1`, the value grammar tooling uses for it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxOccurs::Bounded(max) => write!(f, "{max}"),
            MaxOccurs::Unbounded => f.write_str("-1"),
        }
    }
}

impl SegmentGroup {
    /// Create a group occurring exactly once
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            documentation: None,
            min_occurs: 1,
            max_occurs: MaxOccurs::default(),
            children: Vec::new(),
        }
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    pub fn with_occurs(mut self, min_occurs: u32, max_occurs: MaxOccurs) -> Self {
        self.min_occurs = min_occurs;
        self.max_occurs = max_occurs;
        self
    }

    pub fn with_child(mut self, child: impl Into<MappingNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Add a child node
    pub fn add_child(&mut self, child: impl Into<MappingNode>) -> &mut Self {
        self.children.push(child.into());
        self
    }

    /// Segment code identifying this group on the wire: the code of the
    /// first segment reached depth-first through the children.
    pub fn segcode(&self) -> Option<&str> {
        self.children.iter().find_map(|child| match child {
            MappingNode::Segment(segment) => Some(segment.segcode.as_str()),
            MappingNode::Group(group) => group.segcode(),
            MappingNode::Field(_) => None,
        })
    }
}

impl Segment {
    /// Create a segment whose pattern matches its code at the start of input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if the derived pattern fails to compile.
    pub fn new(tag: impl Into<String>, segcode: impl Into<String>) -> Result<Self> {
        let segcode = segcode.into();
        let pattern = if segcode.is_empty() {
            "^$".to_string()
        } else {
            format!("^{}", regex::escape(&segcode))
        };
        let segcode_pattern = Regex::new(&pattern).map_err(|source| Error::InvalidPattern {
            segcode: segcode.clone(),
            source,
        })?;

        Ok(Self {
            group: SegmentGroup::new(tag),
            segcode,
            segcode_pattern,
            truncatable: false,
            ignore_unmapped_fields: false,
            description: None,
        })
    }

    /// Replace the matching pattern
    pub fn with_pattern(mut self, segcode_pattern: Regex) -> Self {
        self.segcode_pattern = segcode_pattern;
        self
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.group.documentation = Some(documentation.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_occurs(mut self, min_occurs: u32, max_occurs: MaxOccurs) -> Self {
        self.group.min_occurs = min_occurs;
        self.group.max_occurs = max_occurs;
        self
    }

    pub fn truncatable(mut self, truncatable: bool) -> Self {
        self.truncatable = truncatable;
        self
    }

    pub fn ignore_unmapped_fields(mut self, ignore: bool) -> Self {
        self.ignore_unmapped_fields = ignore;
        self
    }

    pub fn with_child(mut self, child: impl Into<MappingNode>) -> Self {
        self.group.children.push(child.into());
        self
    }

    /// Grammar tag of the segment
    pub fn tag(&self) -> &str {
        &self.group.tag
    }
}

impl ValueNode {
    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    pub fn with_type_class(mut self, type_class: impl Into<String>) -> Self {
        self.type_class = Some(type_class.into());
        self
    }

    pub fn with_lengths(mut self, min_length: u32, max_length: u32) -> Self {
        self.min_length = Some(min_length);
        self.max_length = Some(max_length);
        self
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }
}

impl Field {
    /// Create an optional simple field
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            required: false,
            truncatable: false,
            type_ref: None,
            value: ValueNode::default(),
            components: Vec::new(),
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn truncatable(mut self, truncatable: bool) -> Self {
        self.truncatable = truncatable;
        self
    }

    pub fn with_type_ref(mut self, type_ref: impl Into<String>) -> Self {
        self.type_ref = Some(type_ref.into());
        self
    }

    pub fn with_value(mut self, value: ValueNode) -> Self {
        self.value = value;
        self
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    /// Whether the field decomposes into components
    pub fn is_composite(&self) -> bool {
        !self.components.is_empty()
    }
}

impl Component {
    /// Create an optional component
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            required: false,
            truncatable: false,
            value: ValueNode::default(),
            sub_components: Vec::new(),
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn truncatable(mut self, truncatable: bool) -> Self {
        self.truncatable = truncatable;
        self
    }

    pub fn with_value(mut self, value: ValueNode) -> Self {
        self.value = value;
        self
    }

    pub fn with_sub_component(mut self, sub_component: Component) -> Self {
        self.sub_components.push(sub_component);
        self
    }
}

impl From<SegmentGroup> for MappingNode {
    fn from(group: SegmentGroup) -> Self {
        MappingNode::Group(group)
    }
}

impl From<Segment> for MappingNode {
    fn from(segment: Segment) -> Self {
        MappingNode::Segment(segment)
    }
}

impl From<Field> for MappingNode {
    fn from(field: Field) -> Self {
        MappingNode::Field(field)
    }
}
