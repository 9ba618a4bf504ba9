//! # Dependency Graphs
//!
//! Resolving a dependency graph happens elsewhere; this module only consumes the result. A
//! [DependencyNode] tree is walked with a [DependencyVisitor], for example to flatten it into a
//! class path with a [PreorderNodeListGenerator].
//!
mod logger;
mod preorder;

pub use logger::*;
pub use preorder::*;

use crate::model::{Artifact, Exclusion};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    artifact: Artifact,
    scope: String,
    optional: bool,
    exclusions: Vec<Exclusion>,
}

impl Dependency {
    pub fn new(artifact: Artifact, scope: impl Into<String>) -> Self {
        Self {
            artifact,
            scope: scope.into(),
            optional: false,
            exclusions: vec![],
        }
    }

    pub fn with_optional(self, optional: bool) -> Self {
        Self { optional, ..self }
    }

    pub fn with_exclusions(self, exclusions: Vec<Exclusion>) -> Self {
        Self { exclusions, ..self }
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn exclusions(&self) -> &[Exclusion] {
        &self.exclusions
    }

    /// Whether `artifact` is left out of this dependency's transitive dependencies.
    pub fn excludes(&self, artifact: &Artifact) -> bool {
        self.exclusions.iter().any(|e| e.matches(artifact))
    }
}

/// A node in a resolved dependency graph. The root of a graph usually carries no dependency.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode {
    dependency: Option<Dependency>,
    children: Vec<DependencyNode>,
    premanaged_version: Option<String>,
    premanaged_scope: Option<String>,
}

impl DependencyNode {
    pub fn new(dependency: Option<Dependency>) -> Self {
        Self {
            dependency,
            ..Default::default()
        }
    }

    pub fn root() -> Self {
        Self::default()
    }

    pub fn with_children(self, children: Vec<DependencyNode>) -> Self {
        Self { children, ..self }
    }

    /// Record the version this node had before dependency management changed it.
    pub fn with_premanaged_version(self, version: impl Into<String>) -> Self {
        Self {
            premanaged_version: Some(version.into()),
            ..self
        }
    }

    /// Record the scope this node had before dependency management changed it.
    pub fn with_premanaged_scope(self, scope: impl Into<String>) -> Self {
        Self {
            premanaged_scope: Some(scope.into()),
            ..self
        }
    }

    pub fn dependency(&self) -> Option<&Dependency> {
        self.dependency.as_ref()
    }

    pub fn children(&self) -> &[DependencyNode] {
        &self.children
    }

    pub fn premanaged_version(&self) -> Option<&str> {
        self.premanaged_version.as_deref()
    }

    pub fn premanaged_scope(&self) -> Option<&str> {
        self.premanaged_scope.as_deref()
    }

    /// Walk this node and everything below it.
    ///
    /// Children are only visited if entering the node returned `true`, and the walk over the
    /// children stops at the first one that returns `false`. The return value says whether the
    /// walk over this node's siblings should continue.
    ///
    pub fn accept<'a, V>(&'a self, visitor: &mut V) -> bool
    where
        V: DependencyVisitor<'a> + ?Sized,
    {
        if visitor.visit_enter(self) {
            for child in &self.children {
                if !child.accept(visitor) {
                    break;
                }
            }
        }
        visitor.visit_leave(self)
    }
}

pub trait DependencyVisitor<'a> {
    fn visit_enter(&mut self, node: &'a DependencyNode) -> bool;

    fn visit_leave(&mut self, node: &'a DependencyNode) -> bool;
}
