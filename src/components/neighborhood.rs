//! Normalized result of one network fetch

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CompanyEdge, CompanyNode};
use crate::value_objects::{CompanyId, EdgeKey};

/// A company's immediate network: the company itself, its neighbors and the
/// relations between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighborhood {
    /// The company the neighborhood was fetched for
    pub root: CompanyId,
    pub nodes: Vec<CompanyNode>,
    pub edges: Vec<CompanyEdge>,
}

impl Neighborhood {
    pub fn new(root: impl Into<CompanyId>) -> Self {
        Self {
            root: root.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn with_node(mut self, node: CompanyNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_edge(mut self, edge: CompanyEdge) -> Self {
        self.edges.push(edge);
        self
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &CompanyId> {
        self.nodes.iter().map(|n| &n.id)
    }

    /// Coalesce relations sharing an unordered endpoint pair, keeping the
    /// first one seen. Returns how many raw relations were dropped.
    pub fn dedup_edges(&mut self) -> usize {
        let before = self.edges.len();
        let mut by_pair: IndexMap<EdgeKey, CompanyEdge> = IndexMap::with_capacity(before);
        for edge in self.edges.drain(..) {
            by_pair.entry(edge.key()).or_insert(edge);
        }
        self.edges = by_pair.into_values().collect();

        let dropped = before - self.edges.len();
        if dropped > 0 {
            debug!(company_id = %self.root, dropped, "coalesced parallel relations");
        }
        dropped
    }
}
