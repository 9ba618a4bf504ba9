use super::*;
use std::path::{Path, PathBuf};

#[cfg(windows)]
const PATH_SEPARATOR: &str = ";";

#[cfg(not(windows))]
const PATH_SEPARATOR: &str = ":";

/// Collects every node that carries a dependency, parents before their children.
#[derive(Default, Debug)]
pub struct PreorderNodeListGenerator<'a> {
    nodes: Vec<&'a DependencyNode>,
}

impl<'a> PreorderNodeListGenerator<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[&'a DependencyNode] {
        &self.nodes
    }

    pub fn dependencies(&self, include_unresolved: bool) -> Vec<&'a Dependency> {
        self.nodes
            .iter()
            .filter_map(|node| node.dependency())
            .filter(|dep| include_unresolved || dep.artifact().file().is_some())
            .collect()
    }

    /// The artifacts of the collected nodes. Artifacts that were never resolved to a file are
    /// only included when asked for.
    pub fn artifacts(&self, include_unresolved: bool) -> Vec<&'a Artifact> {
        self.dependencies(include_unresolved)
            .into_iter()
            .map(|dep| dep.artifact())
            .collect()
    }

    pub fn files(&self) -> Vec<&'a Path> {
        self.artifacts(false)
            .into_iter()
            .filter_map(|artifact| artifact.file())
            .collect()
    }

    /// The files of every resolved artifact, made absolute and joined with the platform's path
    /// separator.
    pub fn class_path(&self) -> String {
        self.files()
            .into_iter()
            .map(|file| absolute(file).display().to_string())
            .collect::<Vec<String>>()
            .join(PATH_SEPARATOR)
    }
}

impl<'a> DependencyVisitor<'a> for PreorderNodeListGenerator<'a> {
    fn visit_enter(&mut self, node: &'a DependencyNode) -> bool {
        if node.dependency().is_some() {
            self.nodes.push(node);
        }
        true
    }

    fn visit_leave(&mut self, _node: &'a DependencyNode) -> bool {
        true
    }
}

fn absolute(file: &Path) -> PathBuf {
    if file.is_absolute() {
        return file.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(file),
        Err(_) => file.to_path_buf(),
    }
}
