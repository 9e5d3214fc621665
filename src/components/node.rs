//! Node component

use serde::{Deserialize, Serialize};

use crate::value_objects::{CompanyId, DisplayType, NodeKind, Position2D};

/// A company (or person/location) node in the explorer graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyNode {
    pub id: CompanyId,
    pub kind: NodeKind,
    pub display_type: DisplayType,
    /// `None` until the layout engine places the node
    pub position: Option<Position2D>,
    pub label: String,
    /// Polar angle this node was placed at relative to its owning parent
    pub branch_angle: Option<f64>,
}

impl CompanyNode {
    /// Create an unplaced node
    pub fn new(id: impl Into<CompanyId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Company,
            display_type: DisplayType::Standard,
            position: None,
            label: label.into(),
            branch_angle: None,
        }
    }

    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_display_type(mut self, display_type: DisplayType) -> Self {
        self.display_type = display_type;
        self
    }

    pub fn is_placed(&self) -> bool {
        self.position.is_some()
    }

    pub fn is_root(&self) -> bool {
        self.display_type == DisplayType::Root
    }

    /// Shallow-merge `incoming` into `self`: label, kind and display type
    /// overwrite, placement is kept once set
    pub fn merge_from(&mut self, incoming: CompanyNode) {
        self.label = incoming.label;
        self.kind = incoming.kind;
        self.display_type = incoming.display_type;
        if self.position.is_none() {
            self.position = incoming.position;
        }
        if self.branch_angle.is_none() {
            self.branch_angle = incoming.branch_angle;
        }
    }
}
