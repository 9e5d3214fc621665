//! Graph projections
//!
//! Read models derived from the explorer state. Each one is recomputed on
//! demand from the current snapshot; none of them mutates the store.

pub mod edge_filter;
pub mod graph_summary;
pub mod render;
pub mod root_path;

pub use edge_filter::FilteredView;
pub use graph_summary::{ExplorerActivity, GraphSummary};
pub use render::{EdgeStyle, RenderEdge, RenderNode, RenderView};
pub use root_path::RootPath;

use crate::domain_events::ExplorerEvent;

/// A read model kept up to date by feeding it explorer events
pub trait GraphProjection {
    fn handle_event(&mut self, event: &ExplorerEvent);

    fn handle_events<'a>(&mut self, events: impl IntoIterator<Item = &'a ExplorerEvent>)
    where
        Self: Sized,
    {
        for event in events {
            self.handle_event(event);
        }
    }
}
