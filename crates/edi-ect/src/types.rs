//! Mapping of abstract value types to primitive classifiers

use crate::{Error, Result};
use edi_metamodel::PrimitiveType;

/// Value type used when a node declares none
pub const DEFAULT_TYPE_CLASS: &str = "string";

/// Supported value types, checked in order by exact match
const TYPE_TABLE: [(&str, PrimitiveType); 4] = [
    ("string", PrimitiveType::String),
    ("integer", PrimitiveType::Long),
    ("decimal", PrimitiveType::Decimal),
    ("float", PrimitiveType::Float),
];

/// Resolve the primitive classifier for a declared value type.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] for any value type outside the table.
pub fn map_type(type_class: Option<&str>) -> Result<PrimitiveType> {
    let requested = type_class.unwrap_or(DEFAULT_TYPE_CLASS);
    TYPE_TABLE
        .iter()
        .find(|(name, _)| *name == requested)
        .map(|(_, primitive)| *primitive)
        .ok_or_else(|| Error::unsupported_type(requested))
}
