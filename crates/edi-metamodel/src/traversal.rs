//! Traversal and cursor APIs for navigating a finished package

use crate::descriptor::{AttributeDescriptor, ClassDescriptor, ClassId, Feature, PackageDescriptor};
use crate::{Error, Result};
use std::collections::HashSet;
use tracing::trace;

/// A cursor positioned on one class of a package
pub struct Cursor<'a> {
    package: &'a PackageDescriptor,
    id: ClassId,
    class: &'a ClassDescriptor,

    /// Reference names followed to reach the class (for error reporting)
    path: Vec<String>,
}

/// Trait for visiting the classes reachable from the document root
pub trait Visitor {
    /// Visit a class; `path` holds the reference names leading to it
    fn visit(&mut self, id: ClassId, class: &ClassDescriptor, path: &[String]);

    /// Called before the references of a class are followed
    fn enter(&mut self, _class: &ClassDescriptor, _path: &[String]) {}

    /// Called after the references of a class were followed
    fn leave(&mut self, _class: &ClassDescriptor, _path: &[String]) {}

    /// Returns true if traversal should continue
    fn should_continue(&self) -> bool {
        true
    }
}

impl<'a> Cursor<'a> {
    /// Create a cursor on the given class
    pub fn new(package: &'a PackageDescriptor, id: ClassId) -> Result<Self> {
        let class = package
            .class(id)
            .ok_or_else(|| Error::class_not_found(id.to_string()))?;
        Ok(Self {
            package,
            id,
            class,
            path: vec![class.name.clone()],
        })
    }

    /// Create a cursor on the document root of the package
    pub fn document_root(package: &'a PackageDescriptor) -> Result<Self> {
        let id = package
            .document_root_id()
            .ok_or_else(|| Error::class_not_found("DocumentRoot"))?;
        Self::new(package, id)
    }

    #[must_use]
    pub fn class(&self) -> &'a ClassDescriptor {
        self.class
    }

    #[must_use]
    pub fn id(&self) -> ClassId {
        self.id
    }

    #[must_use]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Follow the reference with the given name
    pub fn child(&self, name: &str) -> Result<Cursor<'a>> {
        let path = format!("{}/{}", self.path.join("/"), name);
        match self.class.feature(name) {
            Some(Feature::Reference(reference)) => {
                let class = self
                    .package
                    .class(reference.target)
                    .ok_or_else(|| Error::class_not_found(reference.target.to_string()))?;
                let mut new_path = self.path.clone();
                new_path.push(name.to_string());
                Ok(Cursor {
                    package: self.package,
                    id: reference.target,
                    class,
                    path: new_path,
                })
            }
            Some(Feature::Attribute(_)) => Err(Error::not_a_reference(path)),
            None => Err(Error::feature_not_found(path)),
        }
    }

    /// Get an attribute of the current class
    pub fn attribute(&self, name: &str) -> Result<&'a AttributeDescriptor> {
        match self.class.feature(name) {
            Some(Feature::Attribute(attribute)) => Ok(attribute),
            _ => Err(Error::feature_not_found(format!(
                "{}/{}",
                self.path.join("/"),
                name
            ))),
        }
    }

    /// Navigate using a path of reference names (e.g. "orders/segmentGroup2/NAD2")
    pub fn navigate(&self, path: &str) -> Result<Cursor<'a>> {
        if path.trim().is_empty() {
            return Err(Error::invalid_path(path, "path is empty"));
        }

        let mut cursor = Cursor {
            package: self.package,
            id: self.id,
            class: self.class,
            path: self.path.clone(),
        };
        for segment in path.split('/') {
            if segment.is_empty() {
                continue;
            }
            cursor = cursor.child(segment)?;
        }
        Ok(cursor)
    }
}

/// Walk every class reachable from the document root through containment
/// references. Classes shared by several references are visited once.
pub fn walk<V: Visitor>(package: &PackageDescriptor, visitor: &mut V) {
    let Some(start) = package.document_root_id() else {
        return;
    };
    let mut visited = HashSet::new();
    walk_recursive(package, start, visitor, &mut vec![], &mut visited);
}

fn walk_recursive<V: Visitor>(
    package: &PackageDescriptor,
    id: ClassId,
    visitor: &mut V,
    path: &mut Vec<String>,
    visited: &mut HashSet<ClassId>,
) {
    if !visitor.should_continue() || !visited.insert(id) {
        return;
    }
    let Some(class) = package.class(id) else {
        trace!(class = %id, "Skipping dangling class reference");
        return;
    };

    visitor.visit(id, class, path);

    let mut references = class.references().filter(|r| r.containment).peekable();
    if references.peek().is_some() {
        visitor.enter(class, path);
        for reference in references {
            path.push(reference.name.clone());
            walk_recursive(package, reference.target, visitor, path, visited);
            path.pop();
        }
        visitor.leave(class, path);
    }
}
