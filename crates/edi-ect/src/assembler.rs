//! Document assembler: mapping document to package descriptor

use crate::config::ConverterConfig;
use crate::field::{bind_element, flag};
use crate::registry::{ClassRegistry, class_kind};
use crate::structure::segment_group_to_class;
use crate::{Error, Result};
use edi_mapmodel::MappingDocument;
use edi_metamodel::annotation::{extended, keys};
use edi_metamodel::{
    Annotated, ClassDescriptor, ClassId, ContentKind, PackageDescriptor, ReferenceDescriptor,
    UpperBound, annotate, set_extended,
};
use tracing::{debug, info};

/// Name of the synthesized class wrapping the message root
pub const DOCUMENT_ROOT: &str = "DocumentRoot";

/// Kind reported when a message class already holds [`DOCUMENT_ROOT`]
const DOCUMENT_ROOT_KIND: &str = "documentRoot";

/// Converts mapping documents into metamodel packages
#[derive(Debug, Clone, Default)]
pub struct MetamodelConverter {
    config: ConverterConfig,
}

impl MetamodelConverter {
    /// Create a converter with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with specific configuration
    #[must_use]
    pub fn with_config(config: ConverterConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Build the package for a mapping document.
    ///
    /// Each call uses its own class table, so a converter can be shared
    /// between threads converting different documents.
    ///
    /// # Errors
    ///
    /// Returns the first conversion error of the message tree, and
    /// [`Error::ClassNameConflict`] when a message class is already named
    /// [`DOCUMENT_ROOT`] whatever the name conflict policy. No package is
    /// returned in either case.
    pub fn convert(&self, doc: &MappingDocument) -> Result<PackageDescriptor> {
        let mut package = package_for(doc);

        let root = match &doc.root {
            Some(group) => {
                let mut classes =
                    ClassRegistry::with_policy(&mut package, self.config.name_conflict);
                Some(segment_group_to_class(group, &mut classes)?)
            }
            None => {
                debug!(package = %package.name, "Mapping document has no root group");
                None
            }
        };

        if let Some(existing) = package.class_by_name(DOCUMENT_ROOT) {
            return Err(Error::class_name_conflict(
                DOCUMENT_ROOT,
                class_kind(existing),
                DOCUMENT_ROOT_KIND,
            ));
        }

        let document_root = create_document_root(&package, root);
        let document_root = package.add_class(document_root);
        package.set_document_root(document_root);
        if let Some(root) = root {
            package.set_root(root);
        }

        info!(
            package = %package.name,
            classes = package.class_count(),
            "Assembled metamodel package"
        );
        Ok(package)
    }
}

/// Build the package for a mapping document with default configuration.
///
/// # Errors
///
/// See [`MetamodelConverter::convert`].
pub fn build_package(doc: &MappingDocument) -> Result<PackageDescriptor> {
    MetamodelConverter::new().convert(doc)
}

/// Empty package carrying the document-level annotations
fn package_for(doc: &MappingDocument) -> PackageDescriptor {
    let mut package = PackageDescriptor::new(doc.description.name.to_lowercase());
    package.ns_uri.clone_from(&doc.description.namespace);

    let delimiters = &doc.delimiters;
    annotate(&mut package, keys::SRC, doc.src.as_deref());
    annotate(&mut package, keys::DESCRIPTION_NAME, Some(doc.description.name.as_str()));
    annotate(
        &mut package,
        keys::DESCRIPTION_VERSION,
        Some(doc.description.version.as_str()),
    );
    annotate(&mut package, keys::DELIMITER_SEGMENT, Some(delimiters.segment.as_str()));
    annotate(&mut package, keys::DELIMITER_COMPONENT, Some(delimiters.component.as_str()));
    annotate(&mut package, keys::DELIMITER_FIELD, Some(delimiters.field.as_str()));
    annotate(
        &mut package,
        keys::DELIMITER_FIELD_REPEAT,
        Some(delimiters.field_repeat.as_str()),
    );
    annotate(&mut package, keys::DELIMITER_ESCAPE, Some(delimiters.escape.as_str()));
    annotate(
        &mut package,
        keys::DELIMITER_IGNORE_CRLF,
        Some(flag(delimiters.ignore_crlf)),
    );
    package
}

/// Synthesize the document root class.
///
/// With a root class, the document root holds one optional containment
/// reference to it, named after the element the root class is bound to.
fn create_document_root(package: &PackageDescriptor, root: Option<ClassId>) -> ClassDescriptor {
    let mut document_root = ClassDescriptor::new(DOCUMENT_ROOT, ContentKind::Mixed);
    set_extended(&mut document_root, extended::NAME, "");
    set_extended(&mut document_root, extended::KIND, ContentKind::Mixed.as_str());

    if let Some((id, class)) = root.and_then(|id| package.class(id).map(|class| (id, class))) {
        let name = class
            .extended(extended::NAME)
            .unwrap_or(&class.name)
            .to_string();
        let mut reference =
            ReferenceDescriptor::containment(name.clone(), id, 0, UpperBound::Bounded(1));
        bind_element(&mut reference, &name);
        document_root.add_feature(reference);
    }
    document_root
}
