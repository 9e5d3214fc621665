//! Graph summary projection
//!
//! Counts over the current graph, and a running tally of explorer activity
//! built from events.

use serde::{Deserialize, Serialize};

use super::GraphProjection;
use crate::domain_events::ExplorerEvent;
use crate::handlers::ExplorerState;
use crate::value_objects::RelationType;

/// Point-in-time counts of the explorer graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub person_edges: usize,
    pub location_edges: usize,
    pub other_edges: usize,
    /// Nodes that currently own children
    pub expanded_nodes: usize,
}

impl GraphSummary {
    pub fn compute(state: &ExplorerState) -> Self {
        let store = state.store();
        Self {
            node_count: store.node_count(),
            edge_count: store.edge_count(),
            person_edges: store.count_by_relation(RelationType::Person),
            location_edges: store.count_by_relation(RelationType::Location),
            other_edges: store.count_by_relation(RelationType::Other),
            expanded_nodes: store
                .nodes()
                .filter(|n| state.ownership().is_expanded(&n.id))
                .count(),
        }
    }
}

/// Running tally of what happened in an explorer session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerActivity {
    pub expansions: usize,
    pub failed_expansions: usize,
    pub stale_expansions: usize,
    pub collapses: usize,
    pub nodes_introduced: usize,
    pub nodes_removed: usize,
}

impl GraphProjection for ExplorerActivity {
    fn handle_event(&mut self, event: &ExplorerEvent) {
        match event {
            ExplorerEvent::ExpansionApplied(e) => {
                self.expansions += 1;
                self.nodes_introduced += e.introduced.len();
            }
            ExplorerEvent::ExpansionFailed(_) => self.failed_expansions += 1,
            ExplorerEvent::StaleExpansionDiscarded(_) => self.stale_expansions += 1,
            ExplorerEvent::SubtreeCollapsed(e) => {
                self.collapses += 1;
                self.nodes_removed += e.removed_nodes.len();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::events::{ExpansionFailed, SubtreeCollapsed};
    use crate::value_objects::CompanyId;

    #[test]
    fn test_activity_tally() {
        let events = vec![
            ExplorerEvent::ExpansionFailed(ExpansionFailed {
                anchor: CompanyId::from("A"),
                error: FetchError::NotFound(CompanyId::from("A")),
            }),
            ExplorerEvent::SubtreeCollapsed(SubtreeCollapsed {
                parent: CompanyId::from("B"),
                removed_nodes: vec![CompanyId::from("E"), CompanyId::from("F")],
                removed_edges: 3,
            }),
        ];

        let mut activity = ExplorerActivity::default();
        activity.handle_events(&events);

        assert_eq!(activity.failed_expansions, 1);
        assert_eq!(activity.collapses, 1);
        assert_eq!(activity.nodes_removed, 2);
        assert_eq!(activity.expansions, 0);
    }
}
