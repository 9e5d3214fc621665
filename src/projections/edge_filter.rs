//! Relationship-type filter
//!
//! Under `all` every edge is shown. Under `person` or `location` only edges of
//! that type touching the root survive. Visible nodes are the endpoints of
//! visible edges plus the root, which never disappears.

use indexmap::IndexSet;
use std::collections::HashSet;

use crate::components::CompanyEdge;
use crate::store::GraphStore;
use crate::value_objects::{CompanyId, EdgeFilter};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView {
    pub edges: Vec<CompanyEdge>,
    /// In store order
    pub node_ids: IndexSet<CompanyId>,
}

/// Edge visibility under `filter`
pub fn edge_visible(edge: &CompanyEdge, root: Option<&CompanyId>, filter: EdgeFilter) -> bool {
    if filter == EdgeFilter::All {
        return true;
    }
    if let Some(root) = root {
        if !edge.touches(root) {
            return false;
        }
    }
    filter.matches(edge.relation_type)
}

impl FilteredView {
    pub fn compute(store: &GraphStore, root: Option<&CompanyId>, filter: EdgeFilter) -> Self {
        let edges: Vec<CompanyEdge> = store
            .edges()
            .filter(|edge| edge_visible(edge, root, filter))
            .cloned()
            .collect();

        let endpoints: HashSet<&CompanyId> = edges
            .iter()
            .flat_map(|e| [&e.source, &e.target])
            .collect();
        let node_ids = store
            .nodes()
            .map(|n| &n.id)
            .filter(|id| Some(*id) == root || endpoints.contains(id))
            .cloned()
            .collect();

        Self { edges, node_ids }
    }

    pub fn contains_node(&self, id: &CompanyId) -> bool {
        self.node_ids.contains(id)
    }
}
