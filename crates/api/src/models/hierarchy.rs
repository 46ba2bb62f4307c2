use super::symbol::SymbolKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A node of the module instantiation forest.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ModuleNode {
    /// `name` for roots, `instance (module)` for instantiated children.
    pub label: String,
    pub module_name: String,
    /// Set on child nodes only.
    pub instance_name: Option<String>,
    pub path: PathBuf,
    pub kind: SymbolKind,
    /// The module already appears on the path from the root; not expanded.
    pub recursive: bool,
    pub children: Vec<ModuleNode>,
}

impl ModuleNode {
    pub fn is_expandable(&self) -> bool {
        !self.recursive && !self.children.is_empty()
    }

    /// Depth-first walk, parents before children.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a ModuleNode, usize)) {
        fn go<'a>(node: &'a ModuleNode, depth: usize, visit: &mut dyn FnMut(&'a ModuleNode, usize)) {
            visit(node, depth);
            for child in &node.children {
                go(child, depth + 1, visit);
            }
        }
        go(self, 0, visit);
    }
}
