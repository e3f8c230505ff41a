//! Conversion of fields and components
//!
//! Simple fields and components become attributes. Composite fields become
//! a containment reference to a synthesized class holding one attribute per
//! component; synthesized classes are shared through the [`ClassRegistry`].

use crate::naming::normalize;
use crate::registry::ClassRegistry;
use crate::types::map_type;
use crate::{Error, Result};
use edi_mapmodel::{Component, Field, ValueNode};
use edi_metamodel::annotation::{TARGET_NAMESPACE, extended, keys, kinds};
use edi_metamodel::{
    Annotated, AttributeDescriptor, ClassDescriptor, ClassId, ContentKind, PrimitiveType,
    ReferenceDescriptor, UpperBound, annotate, set_extended,
};
use tracing::{debug, trace};

/// Convert a component into an attribute.
///
/// # Errors
///
/// Returns [`Error::UnsupportedStructure`] if the component has
/// sub-components and [`Error::UnsupportedType`] if its value type is not
/// supported.
pub fn component_to_attribute(component: &Component) -> Result<AttributeDescriptor> {
    if !component.sub_components.is_empty() {
        return Err(Error::unsupported_structure(&component.tag));
    }

    let data_type = map_type(component.value.type_class.as_deref())?;
    let mut attribute = AttributeDescriptor::new(
        normalize(&component.tag, false),
        lower_bound(component.required),
        data_type,
    );
    annotate(&mut attribute, keys::TRUNCABLE, Some(flag(component.truncatable)));
    annotate(&mut attribute, keys::REQUIRED, Some(flag(component.required)));
    annotate(&mut attribute, keys::TYPE, Some(kinds::COMPONENT));
    annotate_value_node(&mut attribute, &component.value);
    annotate(
        &mut attribute,
        keys::DOCUMENTATION,
        component.value.documentation.as_deref(),
    );
    bind_element(&mut attribute, &component.tag);

    trace!(attribute = %attribute.name, "Converted component");
    Ok(attribute)
}

/// Convert a simple field into a text attribute.
///
/// # Errors
///
/// Returns [`Error::InvalidConversion`] if the field has components; those
/// go through [`field_to_reference`].
pub fn field_to_attribute(field: &Field) -> Result<AttributeDescriptor> {
    if field.is_composite() {
        return Err(Error::invalid_conversion(&field.tag));
    }

    let mut attribute = AttributeDescriptor::new(
        normalize(&field.tag, false),
        lower_bound(field.required),
        PrimitiveType::String,
    );
    bind_element(&mut attribute, &field.tag);
    annotate_field(&mut attribute, field);

    trace!(attribute = %attribute.name, "Converted simple field");
    Ok(attribute)
}

/// Convert a composite field into a containment reference to its class.
///
/// The class is looked up by [`composite_class_name`] and created on first
/// encounter only; later fields with the same name reference it unchanged
/// once their own components have converted.
///
/// # Errors
///
/// Propagates component conversion errors and class name conflicts. A class
/// is registered only after all of its components converted.
pub fn field_to_reference(field: &Field, classes: &mut ClassRegistry<'_>) -> Result<ReferenceDescriptor> {
    let class_name = composite_class_name(field);

    let target = match classes.resolve(&class_name, kinds::FIELD)? {
        Some(id) => {
            check_components(field)?;
            debug!(class = %class_name, field = %field.tag, "Sharing composite field class");
            id
        }
        None => classes.register(composite_class(field, class_name)?),
    };

    Ok(composite_reference(field, target))
}

/// Convert every component of a field without keeping the result.
pub(crate) fn check_components(field: &Field) -> Result<()> {
    for component in &field.components {
        component_to_attribute(component)?;
    }
    Ok(())
}

/// Name of the class synthesized for a composite field.
///
/// The type reference is appended so that equal tags declared against
/// different types get different classes.
#[must_use]
pub fn composite_class_name(field: &Field) -> String {
    let mut name = normalize(&field.tag, true);
    if let Some(type_ref) = &field.type_ref {
        name.push('_');
        name.push_str(type_ref);
    }
    name
}

fn composite_class(field: &Field, name: String) -> Result<ClassDescriptor> {
    let mut class = ClassDescriptor::new(name.clone(), ContentKind::ElementOnly);
    annotate(&mut class, keys::DOCUMENTATION, field.value.documentation.as_deref());
    set_extended(&mut class, extended::NAME, &name);
    set_extended(&mut class, extended::KIND, ContentKind::ElementOnly.as_str());
    annotate(&mut class, keys::TYPE, Some(kinds::FIELD));
    annotate_value_node(&mut class, &field.value);

    for component in &field.components {
        let attribute = component_to_attribute(component)?;
        if !class.has_feature(&attribute.name) {
            class.add_feature(attribute);
        }
    }
    Ok(class)
}

fn composite_reference(field: &Field, target: ClassId) -> ReferenceDescriptor {
    let mut reference = ReferenceDescriptor::containment(
        normalize(&field.tag, false),
        target,
        lower_bound(field.required),
        UpperBound::Bounded(1),
    );
    annotate_field(&mut reference, field);
    annotate(&mut reference, keys::DOCUMENTATION, field.value.documentation.as_deref());
    bind_element(&mut reference, &field.tag);
    reference
}

fn lower_bound(required: bool) -> u32 {
    u32::from(required)
}

/// String form of a flag annotation
pub(crate) fn flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

fn annotate_field<A: Annotated>(element: &mut A, field: &Field) {
    annotate(element, keys::TRUNCABLE, Some(flag(field.truncatable)));
    annotate(element, keys::REQUIRED, Some(flag(field.required)));
    annotate(element, keys::TYPE, Some(kinds::FIELD));
    annotate_value_node(element, &field.value);
}

fn annotate_value_node<A: Annotated>(element: &mut A, value: &ValueNode) {
    annotate(element, keys::DATATYPE, value.data_type.as_deref());
    annotate(
        element,
        keys::MAX_LENGTH,
        value.max_length.map(|l| l.to_string()).as_deref(),
    );
    annotate(
        element,
        keys::MIN_LENGTH,
        value.min_length.map(|l| l.to_string()).as_deref(),
    );
}

/// Bind a feature to the element named after the raw grammar tag in the
/// package target namespace.
pub(crate) fn bind_element<A: Annotated>(element: &mut A, tag: &str) {
    set_extended(element, extended::NAME, tag);
    set_extended(element, extended::KIND, extended::ELEMENT_FEATURE);
    set_extended(element, extended::NAMESPACE, TARGET_NAMESPACE);
}
