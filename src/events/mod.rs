//! Explorer events
//!
//! Every state change the controller makes is reported as an event so that
//! a rendering layer can react without diffing snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::layout::Placement;
use crate::value_objects::{CompanyId, DisplayType, EdgeFilter};

/// An expansion fetch was merged into the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpansionApplied {
    /// The node that was expanded
    pub anchor: CompanyId,
    /// The graph's root after the merge
    pub root: CompanyId,
    /// Nodes that were not visible before this expansion
    pub introduced: Vec<CompanyId>,
    /// Positions assigned to the introduced nodes
    pub placements: Vec<Placement>,
    /// Number of edges that did not exist before
    pub edges_added: usize,
    pub applied_at: DateTime<Utc>,
}

/// An expansion fetch failed; the graph is unchanged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpansionFailed {
    pub anchor: CompanyId,
    pub error: FetchError,
}

/// A fetch finished after its anchor was collapsed and was dropped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaleExpansionDiscarded {
    pub anchor: CompanyId,
}

/// A node's owned subtree was removed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtreeCollapsed {
    pub parent: CompanyId,
    pub removed_nodes: Vec<CompanyId>,
    pub removed_edges: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionChanged {
    pub selected: Option<CompanyId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeFilterChanged {
    pub filter: EdgeFilter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightPathChanged {
    pub enabled: bool,
}

/// Display density changed for one node (`node` set) or as the default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayTypeChanged {
    pub node: Option<CompanyId>,
    pub display_type: DisplayType,
    /// Number of nodes whose display type actually changed
    pub affected: usize,
}
