//! Module dependency graph.
//!
//! Edges run from a dependency to its dependents. Only imports between
//! analyzed modules become edges; standard library and unloaded imports are
//! ignored.

use std::collections::{HashMap, HashSet};

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Dfs, Reversed};
use petgraph::Direction;
use sealcheck_core::types::ModuleIndex;

use crate::types::AnalysisError;

pub struct ModuleGraph {
    /// Node weight: import path.
    graph: DiGraph<String, ()>,
    /// Position in the input slice -> node.
    nodes: Vec<NodeIndex>,
}

impl ModuleGraph {
    pub fn build(modules: &[ModuleIndex]) -> Self {
        let mut graph = DiGraph::new();
        let mut by_path: HashMap<&str, NodeIndex> = HashMap::new();
        let nodes: Vec<NodeIndex> = modules
            .iter()
            .map(|m| {
                *by_path
                    .entry(m.path.as_str())
                    .or_insert_with(|| graph.add_node(m.path.clone()))
            })
            .collect();

        for (module, &node) in modules.iter().zip(&nodes) {
            for import in &module.imports {
                if let Some(&dep) = by_path.get(import.as_str()) {
                    if dep != node && !graph.contains_edge(dep, node) {
                        graph.add_edge(dep, node, ());
                    }
                }
            }
        }
        Self { graph, nodes }
    }

    /// Group module positions into levels; every dependency of a module sits
    /// in an earlier level. Within a level, positions are in input order.
    pub fn levels(&self) -> Result<Vec<Vec<usize>>, AnalysisError> {
        let order = toposort(&self.graph, None).map_err(|cycle| {
            AnalysisError::ImportCycle(self.cycle_through(cycle.node_id()))
        })?;

        let mut level_of: HashMap<NodeIndex, usize> = HashMap::new();
        for node in order {
            let level = self
                .graph
                .neighbors_directed(node, Direction::Incoming)
                .filter_map(|dep| level_of.get(&dep))
                .map(|l| l + 1)
                .max()
                .unwrap_or(0);
            level_of.insert(node, level);
        }

        let depth = level_of.values().copied().max().map_or(0, |l| l + 1);
        let mut levels = vec![Vec::new(); depth];
        for (pos, node) in self.nodes.iter().enumerate() {
            if let Some(&level) = level_of.get(node) {
                levels[level].push(pos);
            }
        }
        Ok(levels)
    }

    /// Import paths a module may see facts from: itself and every module it
    /// depends on, directly or transitively.
    pub fn visible_modules(&self, pos: usize) -> HashSet<String> {
        let mut visible = HashSet::new();
        let Some(&start) = self.nodes.get(pos) else {
            return visible;
        };
        let reversed = Reversed(&self.graph);
        let mut dfs = Dfs::new(reversed, start);
        while let Some(node) = dfs.next(reversed) {
            visible.insert(self.graph[node].clone());
        }
        visible
    }

    fn cycle_through(&self, node: NodeIndex) -> Vec<String> {
        let component = tarjan_scc(&self.graph)
            .into_iter()
            .find(|scc| scc.contains(&node))
            .unwrap_or_else(|| vec![node]);
        let mut paths: Vec<String> = component.iter().map(|n| self.graph[*n].clone()).collect();
        paths.sort();
        paths
    }
}
