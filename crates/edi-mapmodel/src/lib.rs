#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # edi-mapmodel
//!
//! In-memory mapping tree describing an EDI message grammar.
//!
//! A [`MappingDocument`] is produced by an external grammar parser and is
//! consumed read-only by the metamodel converter. Nodes form a closed sum
//! type ([`MappingNode`]) so every consumer matches on all node kinds.

/// Document container, description and source locator.
pub mod document;
/// Separator characters declared by the grammar.
pub mod delimiters;
/// Segment groups, segments, fields and components.
pub mod node;

pub use delimiters::Delimiters;
pub use document::{Description, MappingDocument};
pub use node::{Component, Field, MappingNode, MaxOccurs, Segment, SegmentGroup, ValueNode};

use thiserror::Error;

/// Errors that can occur while building a mapping tree
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid segment code pattern for '{segcode}': {source}")]
    InvalidPattern {
        segcode: String,
        #[source]
        source: regex::Error,
    },
}

/// Crate-local result type for mapping tree construction.
pub type Result<T> = std::result::Result<T, Error>;
