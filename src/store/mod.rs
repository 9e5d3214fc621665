//! Graph data store
//!
//! Holds the deduplicated node and edge sets the explorer currently knows
//! about. Nodes are keyed by id, edges by their unordered endpoint pair.
//! Both maps keep insertion order so that layout and rendering iterate
//! deterministically.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::components::{CompanyEdge, CompanyNode};
use crate::value_objects::{CompanyId, DisplayType, EdgeKey, Position2D, RelationType};

/// Outcome of a subtree removal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Removal {
    pub nodes: Vec<CompanyId>,
    pub edges: Vec<CompanyEdge>,
}

/// Node and edge sets of one explorer instance
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    nodes: IndexMap<CompanyId, CompanyNode>,
    edges: IndexMap<EdgeKey, CompanyEdge>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert nodes by id. Returns the ids that were not present before.
    pub fn merge_nodes(&mut self, nodes: impl IntoIterator<Item = CompanyNode>) -> Vec<CompanyId> {
        let mut inserted = Vec::new();
        for node in nodes {
            match self.nodes.get_mut(&node.id) {
                Some(existing) => existing.merge_from(node),
                None => {
                    inserted.push(node.id.clone());
                    self.nodes.insert(node.id.clone(), node);
                }
            }
        }
        inserted
    }

    /// Upsert edges by unordered pair key. Edges referring to an unknown
    /// node are skipped. Returns the number of edges newly inserted.
    pub fn merge_edges(&mut self, edges: impl IntoIterator<Item = CompanyEdge>) -> usize {
        let mut inserted = 0;
        for edge in edges {
            if !self.nodes.contains_key(&edge.source) || !self.nodes.contains_key(&edge.target) {
                warn!(edge_id = %edge.id, "skipping edge with unknown endpoint");
                continue;
            }
            match self.edges.get_mut(&edge.key()) {
                Some(existing) => existing.merge_from(edge),
                None => {
                    self.edges.insert(edge.key(), edge);
                    inserted += 1;
                }
            }
        }
        inserted
    }

    /// Delete `removed` nodes, every edge touching one of them, and every
    /// edge touching `parent` (its links are severed on collapse).
    pub fn remove_subtree(&mut self, parent: &CompanyId, removed: &HashSet<CompanyId>) -> Removal {
        let mut removal = Removal::default();

        self.nodes.retain(|id, _| {
            if removed.contains(id) {
                removal.nodes.push(id.clone());
                false
            } else {
                true
            }
        });

        self.edges.retain(|_, edge| {
            let drop = removed.contains(&edge.source)
                || removed.contains(&edge.target)
                || edge.touches(parent);
            if drop {
                removal.edges.push(edge.clone());
            }
            !drop
        });

        debug!(
            parent = %parent,
            nodes = removal.nodes.len(),
            edges = removal.edges.len(),
            "removed subtree"
        );
        removal
    }

    pub fn node(&self, id: &CompanyId) -> Option<&CompanyNode> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &CompanyId) -> Option<&mut CompanyNode> {
        self.nodes.get_mut(id)
    }

    pub fn edge(&self, a: &CompanyId, b: &CompanyId) -> Option<&CompanyEdge> {
        self.edges.get(&EdgeKey::new(a, b))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &CompanyNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &CompanyEdge> {
        self.edges.values()
    }

    pub fn node_ids(&self) -> HashSet<CompanyId> {
        self.nodes.keys().cloned().collect()
    }

    pub fn contains_node(&self, id: &CompanyId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn count_by_relation(&self, relation: RelationType) -> usize {
        self.edges.values().filter(|e| e.relation_type == relation).count()
    }

    /// Record a placement. Returns `false` for an unknown node.
    pub fn set_position(
        &mut self,
        id: &CompanyId,
        position: Position2D,
        branch_angle: f64,
    ) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.position = Some(position);
                node.branch_angle = Some(branch_angle);
                true
            }
            None => false,
        }
    }

    /// Apply a new default density to every non-root node, except `keep`
    pub fn retype_defaults(
        &mut self,
        display_type: DisplayType,
        keep: Option<&CompanyId>,
    ) -> usize {
        let mut changed = 0;
        for node in self.nodes.values_mut() {
            if node.is_root() || Some(&node.id) == keep || node.display_type == display_type {
                continue;
            }
            node.display_type = display_type;
            changed += 1;
        }
        changed
    }

    /// Every edge has both endpoints in the node set
    pub fn is_consistent(&self) -> bool {
        self.edges
            .values()
            .all(|e| self.nodes.contains_key(&e.source) && self.nodes.contains_key(&e.target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> CompanyId {
        CompanyId::from(s)
    }

    fn star() -> GraphStore {
        let mut store = GraphStore::new();
        store.merge_nodes(vec![
            CompanyNode::new("A", "Alpha"),
            CompanyNode::new("B", "Beta"),
            CompanyNode::new("C", "Gamma"),
        ]);
        store.merge_edges(vec![
            CompanyEdge::new("A", "B", "Person"),
            CompanyEdge::new("A", "C", "Location"),
        ]);
        store
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut store = star();
        let inserted =
            store.merge_nodes(vec![CompanyNode::new("A", "Alpha"), CompanyNode::new("B", "Beta")]);
        let added = store.merge_edges(vec![CompanyEdge::new("B", "A", "Person")]);

        assert!(inserted.is_empty());
        assert_eq!(added, 0);
        assert_eq!(store.node_count(), 3);
        assert_eq!(store.edge_count(), 2);
    }

    #[test]
    fn test_merge_preserves_position() {
        let mut store = star();
        assert!(store.set_position(&id("B"), Position2D::new(400.0, 0.0), 0.0));
        store.merge_nodes(vec![CompanyNode::new("B", "Beta renamed")]);

        let b = store.node(&id("B")).unwrap();
        assert_eq!(b.position, Some(Position2D::new(400.0, 0.0)));
        assert_eq!(b.label, "Beta renamed");
    }

    #[test]
    fn test_edge_with_unknown_endpoint_is_skipped() {
        let mut store = star();
        assert_eq!(store.merge_edges(vec![CompanyEdge::new("A", "Z", "Person")]), 0);
        assert!(store.is_consistent());
    }

    #[test]
    fn test_remove_subtree_severs_parent_links() {
        let mut store = star();
        store.merge_nodes(vec![CompanyNode::new("E", "Epsilon")]);
        store.merge_edges(vec![
            CompanyEdge::new("B", "E", "Person"),
            CompanyEdge::new("C", "E", "Person"),
        ]);

        let removed: HashSet<_> = [id("E")].into_iter().collect();
        let removal = store.remove_subtree(&id("B"), &removed);

        assert_eq!(removal.nodes, vec![id("E")]);
        assert!(store.contains_node(&id("B")));
        assert!(store.edge(&id("A"), &id("B")).is_none());
        assert!(store.edge(&id("C"), &id("E")).is_none());
        assert!(store.edge(&id("A"), &id("C")).is_some());
        assert!(store.is_consistent());
    }

    #[test]
    fn test_retype_defaults_skips_root_and_kept() {
        let mut store = star();
        store.node_mut(&id("A")).unwrap().display_type = DisplayType::Root;

        let changed = store.retype_defaults(DisplayType::Minimal, Some(&id("C")));

        assert_eq!(changed, 1);
        assert_eq!(store.node(&id("A")).unwrap().display_type, DisplayType::Root);
        assert_eq!(store.node(&id("B")).unwrap().display_type, DisplayType::Minimal);
        assert_eq!(store.node(&id("C")).unwrap().display_type, DisplayType::Standard);
    }
}
