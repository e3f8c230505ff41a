#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # edi-ect
//!
//! Conversion of EDI mapping models into metamodel packages.
//!
//! [`MetamodelConverter`] walks a [`MappingDocument`](edi_mapmodel::MappingDocument)
//! once and produces a [`PackageDescriptor`](edi_metamodel::PackageDescriptor):
//! segment groups and segments become classes, composite fields become
//! shared synthesized classes, simple fields and components become
//! attributes. Domain details travel as annotations so the mapping model
//! can be reconstructed from the package.
//!
//! ```
//! use edi_ect::build_package;
//! use edi_mapmodel::{Description, MappingDocument, Segment, SegmentGroup};
//!
//! let root = SegmentGroup::new("Orders")
//!     .with_child(Segment::new("beginningOfMessage", "BGM").unwrap());
//! let doc = MappingDocument::new(Description::new("Orders", "D96A")).with_root(root);
//!
//! let package = build_package(&doc).unwrap();
//! assert_eq!(package.name, "orders");
//! assert_eq!(package.document_root().unwrap().features().len(), 1);
//! ```

pub mod archive;
pub mod assembler;
pub mod config;
pub mod field;
pub mod naming;
pub mod registry;
pub mod structure;
pub mod types;

pub use archive::{Archive, ArchiveSink};
pub use assembler::{DOCUMENT_ROOT, MetamodelConverter, build_package};
pub use config::{ConverterConfig, NameConflictPolicy};
pub use field::{component_to_attribute, field_to_attribute, field_to_reference};
pub use naming::normalize;
pub use registry::ClassRegistry;
pub use structure::{segment_group_reference, segment_group_to_class, segment_reference, segment_to_class};
pub use types::map_type;

use thiserror::Error;

/// Errors that can occur during conversion
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported structure: component '{tag}' has sub-components")]
    UnsupportedStructure { tag: String },

    #[error("Invalid conversion: '{tag}' has components, convert it to a reference instead")]
    InvalidConversion { tag: String },

    #[error("Unsupported type: {requested}")]
    UnsupportedType { requested: String },

    #[error("Class name '{name}' is registered as {existing}, requested as {requested}")]
    ClassNameConflict {
        name: String,
        existing: String,
        requested: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid archive entry path: '{path}'")]
    InvalidEntryPath { path: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn unsupported_structure(tag: impl Into<String>) -> Self {
        Self::UnsupportedStructure { tag: tag.into() }
    }

    pub fn invalid_conversion(tag: impl Into<String>) -> Self {
        Self::InvalidConversion { tag: tag.into() }
    }

    /// Build an unsupported-type error with the offending type identifier.
    pub fn unsupported_type(requested: impl Into<String>) -> Self {
        Self::UnsupportedType {
            requested: requested.into(),
        }
    }

    pub fn class_name_conflict(
        name: impl Into<String>,
        existing: impl Into<String>,
        requested: impl Into<String>,
    ) -> Self {
        Self::ClassNameConflict {
            name: name.into(),
            existing: existing.into(),
            requested: requested.into(),
        }
    }

    pub fn invalid_entry_path(path: impl Into<String>) -> Self {
        Self::InvalidEntryPath { path: path.into() }
    }
}

/// Crate-local result type for conversions.
pub type Result<T> = std::result::Result<T, Error>;
