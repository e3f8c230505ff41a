//! Conversion of segment groups and segments
//!
//! Every group or segment becomes a class whose features mirror the node's
//! children in source order; in the parent class the node is represented by a
//! containment reference carrying the node's occurrence bounds.

use crate::field::{bind_element, check_components, field_to_attribute, field_to_reference, flag};
use crate::naming::normalize;
use crate::registry::ClassRegistry;
use crate::Result;
use edi_mapmodel::{MappingNode, MaxOccurs, Segment, SegmentGroup};
use edi_metamodel::annotation::{extended, keys, kinds};
use edi_metamodel::{
    ClassDescriptor, ClassId, ContentKind, Feature, ReferenceDescriptor, UpperBound, annotate,
    set_extended,
};
use tracing::{debug, trace};

/// Convert a segment group and, recursively, its children into classes.
///
/// A group whose class name is already registered for a group reuses that
/// class unchanged; its children are still checked so that an invalid
/// component fails the conversion wherever it occurs.
///
/// # Errors
///
/// Propagates the first conversion error found in the subtree. The classes
/// registered before the failure stay in the package, which must then be
/// discarded.
pub fn segment_group_to_class(
    group: &SegmentGroup,
    classes: &mut ClassRegistry<'_>,
) -> Result<ClassId> {
    let name = normalize(&group.tag, true);
    if let Some(id) = classes.resolve(&name, kinds::SEGMENT_GROUP)? {
        check_children(group)?;
        return Ok(id);
    }

    let id = classes.register(structural_class(name, group));
    populate(id, group, classes)?;
    Ok(id)
}

/// Convert a segment and, recursively, its children into classes.
///
/// # Errors
///
/// Same as [`segment_group_to_class`].
pub fn segment_to_class(segment: &Segment, classes: &mut ClassRegistry<'_>) -> Result<ClassId> {
    let name = normalize(segment.tag(), true);
    if let Some(id) = classes.resolve(&name, kinds::SEGMENT)? {
        check_children(&segment.group)?;
        return Ok(id);
    }

    let mut class = structural_class(name, &segment.group);
    annotate(&mut class, keys::SEGCODE, Some(segment.segcode.as_str()));
    annotate(
        &mut class,
        keys::SEGCODE_PATTERN,
        Some(segment.segcode_pattern.as_str()),
    );
    annotate(&mut class, keys::TRUNCABLE, Some(flag(segment.truncatable)));
    annotate(
        &mut class,
        keys::IGNORE_UNMAPPED_FIELDS,
        Some(flag(segment.ignore_unmapped_fields)),
    );
    annotate(&mut class, keys::DESCRIPTION, segment.description.as_deref());
    annotate(&mut class, keys::TYPE, Some(kinds::SEGMENT));

    let id = classes.register(class);
    populate(id, &segment.group, classes)?;
    Ok(id)
}

/// Containment reference from a parent class to a group class.
#[must_use]
pub fn segment_group_reference(group: &SegmentGroup, target: ClassId) -> ReferenceDescriptor {
    let mut reference = ReferenceDescriptor::containment(
        normalize(&group.tag, false),
        target,
        group.min_occurs,
        upper_bound(group.max_occurs),
    );
    bind_element(&mut reference, &group.tag);
    annotate(
        &mut reference,
        keys::MIN_OCCURS,
        Some(group.min_occurs.to_string().as_str()),
    );
    annotate(
        &mut reference,
        keys::MAX_OCCURS,
        Some(group.max_occurs.to_string().as_str()),
    );
    annotate(&mut reference, keys::TYPE, Some(kinds::SEGMENT_GROUP));
    annotate(&mut reference, keys::SEGCODE, group.segcode());
    reference
}

/// Containment reference from a parent class to a segment class.
///
/// The reference is named after the segment code; when the normalized tag
/// ends in a digit that digit is appended, so `NAD` and `NAD2` occurrences
/// in one group stay distinct. A segment without code keeps the tag name.
#[must_use]
pub fn segment_reference(segment: &Segment, target: ClassId) -> ReferenceDescriptor {
    let mut reference = segment_group_reference(&segment.group, target);
    annotate(&mut reference, keys::TYPE, Some(kinds::SEGMENT));
    annotate(&mut reference, keys::SEGCODE, Some(segment.segcode.as_str()));

    if !segment.segcode.is_empty() {
        let mut name = segment.segcode.clone();
        if let Some(digit) = reference.name.chars().last().filter(char::is_ascii_digit) {
            name.push(digit);
        }
        reference.name = name;
    }
    reference
}

fn structural_class(name: String, group: &SegmentGroup) -> ClassDescriptor {
    let mut class = ClassDescriptor::new(name.clone(), ContentKind::ElementOnly);
    annotate(&mut class, keys::DOCUMENTATION, group.documentation.as_deref());
    set_extended(&mut class, extended::NAME, &name);
    set_extended(&mut class, extended::KIND, ContentKind::ElementOnly.as_str());
    class
}

fn populate(id: ClassId, group: &SegmentGroup, classes: &mut ClassRegistry<'_>) -> Result<()> {
    for child in &group.children {
        let feature: Feature = match child {
            MappingNode::Group(nested) => {
                let target = segment_group_to_class(nested, classes)?;
                segment_group_reference(nested, target).into()
            }
            MappingNode::Segment(segment) => {
                let target = segment_to_class(segment, classes)?;
                segment_reference(segment, target).into()
            }
            MappingNode::Field(field) if field.is_composite() => {
                field_to_reference(field, classes)?.into()
            }
            MappingNode::Field(field) => field_to_attribute(field)?.into(),
        };
        trace!(feature = %feature.name(), parent = %id, "Converted child node");
        classes.add_feature(id, feature);
    }
    debug!(class = %group.tag, children = group.children.len(), "Populated class");
    Ok(())
}

/// Run every component below a reused node through the leaf conversion
fn check_children(group: &SegmentGroup) -> Result<()> {
    for child in &group.children {
        match child {
            MappingNode::Group(nested) => check_children(nested)?,
            MappingNode::Segment(segment) => check_children(&segment.group)?,
            MappingNode::Field(field) => check_components(field)?,
        }
    }
    Ok(())
}

fn upper_bound(max_occurs: MaxOccurs) -> UpperBound {
    match max_occurs {
        MaxOccurs::Bounded(max) => UpperBound::Bounded(max),
        MaxOccurs::Unbounded => UpperBound::Unbounded,
    }
}
