//! Explorer event enum

use serde::{Deserialize, Serialize};

use crate::events::{
    DisplayTypeChanged, EdgeFilterChanged, ExpansionApplied, ExpansionFailed,
    HighlightPathChanged, SelectionChanged, StaleExpansionDiscarded, SubtreeCollapsed,
};

/// Enum wrapper for explorer events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExplorerEvent {
    /// Fetched neighborhood merged and laid out
    ExpansionApplied(ExpansionApplied),
    /// Fetch failed, nothing merged
    ExpansionFailed(ExpansionFailed),
    /// Late fetch for a collapsed node dropped
    StaleExpansionDiscarded(StaleExpansionDiscarded),
    /// Owned subtree removed
    SubtreeCollapsed(SubtreeCollapsed),
    SelectionChanged(SelectionChanged),
    EdgeFilterChanged(EdgeFilterChanged),
    HighlightPathChanged(HighlightPathChanged),
    DisplayTypeChanged(DisplayTypeChanged),
}

impl ExplorerEvent {
    /// Stable name for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ExpansionApplied(_) => "ExpansionApplied",
            Self::ExpansionFailed(_) => "ExpansionFailed",
            Self::StaleExpansionDiscarded(_) => "StaleExpansionDiscarded",
            Self::SubtreeCollapsed(_) => "SubtreeCollapsed",
            Self::SelectionChanged(_) => "SelectionChanged",
            Self::EdgeFilterChanged(_) => "EdgeFilterChanged",
            Self::HighlightPathChanged(_) => "HighlightPathChanged",
            Self::DisplayTypeChanged(_) => "DisplayTypeChanged",
        }
    }

    /// The node the event is about, if any
    pub fn subject(&self) -> Option<&crate::value_objects::CompanyId> {
        match self {
            Self::ExpansionApplied(e) => Some(&e.anchor),
            Self::ExpansionFailed(e) => Some(&e.anchor),
            Self::StaleExpansionDiscarded(e) => Some(&e.anchor),
            Self::SubtreeCollapsed(e) => Some(&e.parent),
            Self::SelectionChanged(e) => e.selected.as_ref(),
            Self::DisplayTypeChanged(e) => e.node.as_ref(),
            Self::EdgeFilterChanged(_) | Self::HighlightPathChanged(_) => None,
        }
    }
}
