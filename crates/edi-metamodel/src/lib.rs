#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # edi-metamodel
//!
//! Generic, introspectable object model produced from EDI mapping models.
//!
//! A [`PackageDescriptor`] owns its classes; references point at classes by
//! [`ClassId`], so a class shared by several references exists once. Domain
//! semantics that the generic model cannot express are kept as string
//! annotations (see [`annotation`]).

/// Annotation maps, vocabulary and the annotation primitive.
pub mod annotation;
/// Package, class, reference and attribute descriptors.
pub mod descriptor;
/// Cursor-based navigation and visitors over finished packages.
pub mod traversal;

pub use annotation::{Annotated, AnnotationMap, Annotations, annotate, set_extended};
pub use descriptor::{
    AttributeDescriptor, ClassDescriptor, ClassId, ContentKind, Feature, PackageDescriptor,
    PrimitiveType, ReferenceDescriptor, UpperBound,
};
pub use traversal::{Cursor, Visitor, walk};

use thiserror::Error;

/// Errors that can occur when navigating a package
#[derive(Error, Debug)]
pub enum Error {
    #[error("Class not found: {class}")]
    ClassNotFound { class: String },

    #[error("Feature not found at path: {path}")]
    FeatureNotFound { path: String },

    #[error("Feature at path '{path}' is not a reference")]
    NotAReference { path: String },

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },
}

impl Error {
    /// Build a class-not-found error for a class id or name.
    pub fn class_not_found(class: impl Into<String>) -> Self {
        Self::ClassNotFound {
            class: class.into(),
        }
    }

    /// Build a feature-not-found error with path context.
    pub fn feature_not_found(path: impl Into<String>) -> Self {
        Self::FeatureNotFound { path: path.into() }
    }

    pub fn not_a_reference(path: impl Into<String>) -> Self {
        Self::NotAReference { path: path.into() }
    }

    /// Build an invalid-path error with input path and reason.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Crate-local result type for metamodel navigation.
pub type Result<T> = std::result::Result<T, Error>;
