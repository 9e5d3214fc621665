//! Root-path highlighting
//!
//! Walks the ownership forest from the selected node up to the root and
//! reports the nodes and directed `"from->to"` edge keys along the way.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::components::CompanyEdge;
use crate::ownership::OwnershipIndex;
use crate::value_objects::{path_edge_key, CompanyId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootPath {
    /// Ordered from the root (when reachable) down to the selected node
    pub nodes: Vec<CompanyId>,
    /// `"from->to"` keys of consecutive path nodes
    pub edge_keys: HashSet<String>,
}

impl RootPath {
    /// Empty when highlighting is disabled, nothing is selected or the graph
    /// has no root yet
    pub fn compute(
        ownership: &OwnershipIndex,
        root: Option<&CompanyId>,
        selected: Option<&CompanyId>,
        enabled: bool,
    ) -> Self {
        let (Some(root), Some(selected), true) = (root, selected, enabled) else {
            return Self::default();
        };

        let nodes = ownership.path_to_root(selected, root);
        let edge_keys = nodes
            .windows(2)
            .map(|pair| path_edge_key(&pair[0], &pair[1]))
            .collect();

        Self { nodes, edge_keys }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains_node(&self, id: &CompanyId) -> bool {
        self.nodes.contains(id)
    }

    /// Whether `edge` joins two consecutive path nodes, in either orientation
    pub fn contains_edge(&self, edge: &CompanyEdge) -> bool {
        self.edge_keys.contains(&path_edge_key(&edge.source, &edge.target))
            || self.edge_keys.contains(&path_edge_key(&edge.target, &edge.source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> CompanyId {
        CompanyId::from(s)
    }

    fn index() -> OwnershipIndex {
        let mut index = OwnershipIndex::new();
        index.adopt(&id("A"), &[id("B"), id("C")]);
        index.adopt(&id("B"), &[id("E")]);
        index
    }

    #[test]
    fn test_path_from_selection() {
        let path = RootPath::compute(&index(), Some(&id("A")), Some(&id("E")), true);
        assert_eq!(path.nodes, vec![id("A"), id("B"), id("E")]);
        assert!(path.edge_keys.contains("A->B"));
        assert!(path.edge_keys.contains("B->E"));
        assert_eq!(path.edge_keys.len(), 2);
        assert!(path.contains_edge(&CompanyEdge::new("E", "B", "Person")));
        assert!(!path.contains_edge(&CompanyEdge::new("A", "C", "Person")));
    }

    #[test]
    fn test_disabled_or_unselected_is_empty() {
        assert!(RootPath::compute(&index(), Some(&id("A")), Some(&id("E")), false).is_empty());
        assert!(RootPath::compute(&index(), Some(&id("A")), None, true).is_empty());
        assert!(RootPath::compute(&index(), None, Some(&id("E")), true).is_empty());
    }

    #[test]
    fn test_selected_root_has_no_edges() {
        let path = RootPath::compute(&index(), Some(&id("A")), Some(&id("A")), true);
        assert_eq!(path.nodes, vec![id("A")]);
        assert!(path.edge_keys.is_empty());
    }
}
