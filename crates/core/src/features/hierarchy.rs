//! Module instantiation forest.
//!
//! Instantiation sites are recomputed from file text rather than taken
//! from the stored reference edges, because the tree also needs the module
//! that syntactically contains each site.

use crate::parser::{enclosing_container, find_instances};
use crate::runtime::HdlscopeEngine;
use crate::store::IndexStore;
use hdlscope_api::{ModuleNode, Symbol, SymbolKind};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// First declaration seen for a design-unit name.
#[derive(Debug, Clone)]
struct ModuleInfo {
    name: String,
    kind: SymbolKind,
    path: PathBuf,
}

/// Instantiation graph: node = design unit, edge = instance name.
struct InstanceGraph {
    graph: DiGraph<ModuleInfo, String>,
    by_name: HashMap<String, NodeIndex>,
}

impl InstanceGraph {
    fn collect_modules(store: &IndexStore) -> Self {
        let mut graph = DiGraph::new();
        let mut by_name = HashMap::new();
        for symbol in store.symbols().filter(|s| s.kind.is_design_unit()) {
            if by_name.contains_key(&symbol.name) {
                continue;
            }
            let idx = graph.add_node(ModuleInfo {
                name: symbol.name.clone(),
                kind: symbol.kind.clone(),
                path: symbol.path.clone(),
            });
            by_name.insert(symbol.name.clone(), idx);
        }
        Self { graph, by_name }
    }

    /// Returns `false` for a repeated `(instance, module)` under `parent`.
    fn add_instance(&mut self, parent: NodeIndex, child: NodeIndex, instance: &str) -> bool {
        let duplicate = self
            .graph
            .edges_directed(parent, Direction::Outgoing)
            .any(|e| e.target() == child && e.weight() == instance);
        if duplicate {
            return false;
        }
        self.graph.add_edge(parent, child, instance.to_string());
        true
    }

    fn collect_instances(&mut self, store: &IndexStore, texts: &HashMap<PathBuf, String>) {
        for (path, entry) in store.files() {
            let parents: Vec<&Symbol> = entry
                .symbols
                .iter()
                .filter(|s| s.kind == SymbolKind::Module)
                .collect();
            if parents.is_empty() {
                continue;
            }
            let Some(text) = texts.get(path) else {
                continue;
            };

            for site in find_instances(text) {
                let Some(&child) = self.by_name.get(&site.module_name) else {
                    continue;
                };
                let Some(parent) =
                    enclosing_container(&entry.symbols, site.position, |s| s.kind == SymbolKind::Module)
                else {
                    continue;
                };
                let Some(&parent_idx) = self.by_name.get(&parent.name) else {
                    continue;
                };
                let instance = site.instance_name.as_deref().unwrap_or(&site.module_name);
                self.add_instance(parent_idx, child, instance);
            }
        }
    }

    fn is_root(&self, idx: NodeIndex) -> bool {
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .next()
            .is_none()
    }

    fn node(&self, idx: NodeIndex, instance: Option<&str>, path: &mut HashSet<NodeIndex>) -> ModuleNode {
        let info = &self.graph[idx];
        let label = match instance {
            Some(inst) => format!("{} ({})", inst, info.name),
            None => info.name.clone(),
        };
        let mut node = ModuleNode {
            label,
            module_name: info.name.clone(),
            instance_name: instance.map(str::to_string),
            path: info.path.clone(),
            kind: info.kind.clone(),
            recursive: false,
            children: Vec::new(),
        };

        if !path.insert(idx) {
            node.recursive = true;
            return node;
        }

        // Edges come back newest first; restore source order.
        let mut edges: Vec<_> = self.graph.edges_directed(idx, Direction::Outgoing).collect();
        edges.sort_by_key(|e| e.id());
        node.children = edges
            .into_iter()
            .map(|e| self.node(e.target(), Some(e.weight()), path))
            .collect();

        path.remove(&idx);
        node
    }

    fn forest(&self) -> Vec<ModuleNode> {
        let mut roots: Vec<ModuleNode> = self
            .graph
            .node_indices()
            .filter(|&idx| self.is_root(idx))
            .map(|idx| self.node(idx, None, &mut HashSet::new()))
            .collect();
        roots.sort_by(|a, b| a.label.cmp(&b.label));
        roots
    }
}

/// Builds the forest from a store and the text of its files.
///
/// A module is a root iff no other module instantiates it.
pub fn build_forest(store: &IndexStore, texts: &HashMap<PathBuf, String>) -> Vec<ModuleNode> {
    let mut graph = InstanceGraph::collect_modules(store);
    graph.collect_instances(store, texts);
    tracing::debug!(
        "Instance graph: {} modules, {} instantiations",
        graph.graph.node_count(),
        graph.graph.edge_count()
    );
    graph.forest()
}

/// Waits for indexing, then builds the forest from the current store.
pub async fn dependency_forest(engine: &HdlscopeEngine) -> Vec<ModuleNode> {
    engine.wait_for_index().await;
    let snapshot = engine.store().await.clone();

    let mut texts = HashMap::new();
    for (path, entry) in snapshot.files() {
        if !entry.symbols.iter().any(|s| s.kind == SymbolKind::Module) {
            continue;
        }
        match tokio::fs::read(path).await {
            Ok(bytes) => {
                texts.insert(path.clone(), String::from_utf8_lossy(&bytes).into_owned());
            }
            Err(e) => tracing::error!("Error parsing instances in {}: {}", path.display(), e),
        }
    }

    build_forest(&snapshot, &texts)
}
