//! Explorer commands
//!
//! Commands represent user intent against the explorer: expansion and
//! collapse clicks, selection, and the settings panel. They are processed by
//! the controller, which emits the corresponding events.

use serde::{Deserialize, Serialize};

use crate::value_objects::{CompanyId, DisplayType, EdgeFilter};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GraphCommand {
    /// Fetch and merge a node's neighborhood
    Expand {
        node_id: CompanyId,
    },

    /// Remove a node's owned subtree
    Collapse {
        node_id: CompanyId,
    },

    /// Select a single node; replaces any previous selection
    Select {
        node_id: CompanyId,
    },

    ClearSelection,

    SetEdgeFilter {
        filter: EdgeFilter,
    },

    /// Enable or disable root-path highlighting
    SetHighlightPath {
        enabled: bool,
    },

    /// Change the density used for all non-root nodes
    SetDefaultDisplay {
        display_type: DisplayType,
    },

    /// Change one node's density
    SetNodeDisplay {
        node_id: CompanyId,
        display_type: DisplayType,
    },

    /// Swap a node between standard and minimal (double-click)
    ToggleNodeDisplay {
        node_id: CompanyId,
    },
}

impl GraphCommand {
    /// Whether handling the command needs a network fetch
    pub fn is_remote(&self) -> bool {
        matches!(self, GraphCommand::Expand { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serialization() {
        let cmd = GraphCommand::SetNodeDisplay {
            node_id: CompanyId::from("FN1"),
            display_type: DisplayType::Minimal,
        };

        let serialized = serde_json::to_string(&cmd).unwrap();
        let deserialized: GraphCommand = serde_json::from_str(&serialized).unwrap();

        match deserialized {
            GraphCommand::SetNodeDisplay { node_id, display_type } => {
                assert_eq!(node_id, CompanyId::from("FN1"));
                assert_eq!(display_type, DisplayType::Minimal);
            }
            _ => panic!("Expected SetNodeDisplay command"),
        }
    }

    #[test]
    fn test_only_expand_is_remote() {
        assert!(GraphCommand::Expand { node_id: CompanyId::from("A") }.is_remote());
        assert!(!GraphCommand::ClearSelection.is_remote());
    }
}
