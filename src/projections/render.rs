//! Render-ready view of the explorer
//!
//! Combines the edge-type filter, the root path and the selection into the
//! node and edge lists a drawing layer consumes.

use serde::{Deserialize, Serialize};

use super::{FilteredView, RootPath};
use crate::components::CompanyEdge;
use crate::handlers::ExplorerState;
use crate::session::ViewStatus;
use crate::value_objects::{CompanyId, DisplayType, EdgeFilter, NodeKind, Position2D};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeStyle {
    /// Plain line
    Straight,
    /// Line with relation badge and hover value
    Detailed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderNode {
    pub id: CompanyId,
    pub label: String,
    pub kind: NodeKind,
    /// Stored type, upgraded from minimal to standard on the root path
    pub display_type: DisplayType,
    pub position: Position2D,
    pub selected: bool,
    pub on_root_path: bool,
    /// Owns children, so the collapse action applies
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderEdge {
    pub edge: CompanyEdge,
    pub style: EdgeStyle,
    pub on_root_path: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderView {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
    /// False while premium-gated: drawn blurred, no dragging or selection
    pub interactive: bool,
}

/// Display type a node is drawn with given its root-path membership
pub fn effective_display(stored: DisplayType, on_root_path: bool) -> DisplayType {
    match stored {
        DisplayType::Minimal if on_root_path => DisplayType::Standard,
        other => other,
    }
}

impl RenderView {
    pub fn compute(state: &ExplorerState) -> Self {
        let root = state.root();
        let selected = state.selected();
        let path = RootPath::compute(state.ownership(), root, selected, state.highlight_path());
        let filtered = FilteredView::compute(state.store(), root, state.edge_filter());

        let edges = filtered
            .edges
            .iter()
            .map(|edge| {
                let on_root_path = path.contains_edge(edge);
                let touches_selection = selected.is_some_and(|s| edge.touches(s));
                RenderEdge {
                    style: if on_root_path || touches_selection {
                        EdgeStyle::Detailed
                    } else {
                        EdgeStyle::Straight
                    },
                    edge: edge.clone(),
                    on_root_path,
                }
            })
            .collect();

        // Under `all` every stored node is drawn, so a collapsed node left
        // without edges stays clickable
        let show_all = state.edge_filter() == EdgeFilter::All;
        let nodes = state
            .store()
            .nodes()
            .filter(|node| show_all || filtered.contains_node(&node.id))
            .map(|node| {
                let on_root_path = path.contains_node(&node.id);
                RenderNode {
                    id: node.id.clone(),
                    label: node.label.clone(),
                    kind: node.kind,
                    display_type: effective_display(node.display_type, on_root_path),
                    position: node.position.unwrap_or_default(),
                    selected: selected == Some(&node.id),
                    on_root_path,
                    expanded: state.ownership().is_expanded(&node.id),
                }
            })
            .collect();

        Self {
            nodes,
            edges,
            interactive: state.status() != ViewStatus::PremiumGated,
        }
    }

    pub fn node(&self, id: &CompanyId) -> Option<&RenderNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }
}
