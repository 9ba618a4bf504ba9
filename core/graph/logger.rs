use super::*;
use tracing::debug;

const INDENT: &str = "   ";

/// Prints a resolved dependency graph as an indented tree, one dependency per line, at debug
/// level.
#[derive(Default, Debug)]
pub struct DependencyGraphLogger {
    lines: Vec<String>,
    depth: usize,
}

impl DependencyGraphLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log the whole graph under `root` and return the lines that were logged.
    pub fn log(root: &DependencyNode) -> Vec<String> {
        let mut logger = Self::new();
        root.accept(&mut logger);
        logger.lines
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn describe(node: &DependencyNode, dependency: &Dependency) -> String {
        let mut line = format!("{}:{}", dependency.artifact(), dependency.scope());
        if let Some(scope) = node.premanaged_scope() {
            line.push_str(&format!(" (scope managed from {})", scope));
        }
        if let Some(version) = node.premanaged_version() {
            line.push_str(&format!(" (version managed from {})", version));
        }
        if dependency.is_optional() {
            line.push_str(" (optional)");
        }
        line
    }
}

impl<'a> DependencyVisitor<'a> for DependencyGraphLogger {
    fn visit_enter(&mut self, node: &'a DependencyNode) -> bool {
        if self.depth == 0 {
            self.lines.push("Resolved Dependency Graph:".to_string());
        }
        if let Some(dependency) = node.dependency() {
            self.lines.push(format!(
                "{}{}",
                INDENT.repeat(self.depth),
                Self::describe(node, dependency)
            ));
        }
        self.depth += 1;
        true
    }

    fn visit_leave(&mut self, _node: &'a DependencyNode) -> bool {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            for line in &self.lines {
                debug!("{}", line);
            }
        }
        true
    }
}
