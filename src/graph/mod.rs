mod builder;
mod index;

pub use builder::{AssetGraphBuilder, GraphError};
pub use index::AssetIndex;

use crate::discovery::AssetPath;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use std::collections::{BTreeSet, HashMap};

/// Directed dependency graph between assets.
/// An edge `a -> b` means asset `a` references asset `b`.
#[derive(Debug, Default)]
pub struct AssetGraph {
    inner: DiGraph<AssetPath, ()>,

    /// Map from asset path to node index
    node_map: HashMap<AssetPath, NodeIndex>,
}

impl AssetGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset node, returning the existing node if already present
    pub fn add_asset(&mut self, path: &AssetPath) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(path) {
            return idx;
        }
        let idx = self.inner.add_node(path.clone());
        self.node_map.insert(path.clone(), idx);
        idx
    }

    /// Record that `from` depends on `to`
    pub fn add_dependency(&mut self, from: &AssetPath, to: &AssetPath) {
        let from_idx = self.add_asset(from);
        let to_idx = self.add_asset(to);
        self.inner.update_edge(from_idx, to_idx, ());
    }

    pub fn asset_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn dependency_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Direct dependencies of an asset, sorted by path
    pub fn dependencies_of(&self, path: &AssetPath) -> Vec<&AssetPath> {
        let Some(&idx) = self.node_map.get(path) else {
            return Vec::new();
        };

        let mut deps: Vec<&AssetPath> = self
            .inner
            .neighbors(idx)
            .filter_map(|n| self.inner.node_weight(n))
            .collect();
        deps.sort();
        deps
    }

    /// All assets reachable from `roots`, the roots included, sorted by path.
    /// Roots unknown to the graph are returned as-is.
    pub fn reachable_from(&self, roots: &[AssetPath]) -> Vec<AssetPath> {
        let mut reachable: BTreeSet<AssetPath> = BTreeSet::new();

        for root in roots {
            reachable.insert(root.clone());

            let Some(&start_idx) = self.node_map.get(root) else {
                continue;
            };

            let mut dfs = Dfs::new(&self.inner, start_idx);
            while let Some(node_idx) = dfs.next(&self.inner) {
                if let Some(path) = self.inner.node_weight(node_idx) {
                    reachable.insert(path.clone());
                }
            }
        }

        reachable.into_iter().collect()
    }
}
