//! Expansion/collapse controller
//!
//! `GraphExplorer` serializes every mutation of the explorer state behind one
//! lock but never holds it across a fetch, so several expansions can be in
//! flight at once. Each completed fetch is merged independently; merges are
//! idempotent by id, so completion order does not matter.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use super::ExplorerState;
use crate::commands::GraphCommand;
use crate::components::Neighborhood;
use crate::config::ExplorerConfig;
use crate::adapter::NetworkSource;
use crate::domain_events::ExplorerEvent;
use crate::error::{ExplorerError, ExplorerResult};
use crate::events::{
    DisplayTypeChanged, EdgeFilterChanged, ExpansionFailed, HighlightPathChanged,
    SelectionChanged, StaleExpansionDiscarded,
};
use crate::layout::RadialLayout;
use crate::projections::{RenderView, RootPath};
use crate::session::{Session, ViewStatus};
use crate::value_objects::{CompanyId, DisplayType, EdgeFilter};

/// Interactive company-network explorer opened on one company
pub struct GraphExplorer<S: NetworkSource> {
    origin: CompanyId,
    source: Arc<S>,
    session: Session,
    config: ExplorerConfig,
    layout: RadialLayout,
    state: Mutex<ExplorerState>,
}

impl<S: NetworkSource> GraphExplorer<S> {
    /// Create an explorer for `origin`; nothing is fetched until `open`
    pub fn new(
        origin: impl Into<CompanyId>,
        source: Arc<S>,
        session: Session,
        config: ExplorerConfig,
    ) -> Self {
        let state = ExplorerState::new(config.default_display, config.highlight_path);
        Self {
            origin: origin.into(),
            layout: RadialLayout::new(config.layout.clone()),
            source,
            session,
            config,
            state: Mutex::new(state),
        }
    }

    pub fn origin(&self) -> &CompanyId {
        &self.origin
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Gate on the session's access tier, then expand the initiating company
    pub async fn open(&self) -> ViewStatus {
        if !self.session.has_premium_access() {
            info!(
                company_id = %self.origin,
                role = %self.session.role,
                "network view is premium-gated"
            );
            self.state.lock().status = ViewStatus::PremiumGated;
            return ViewStatus::PremiumGated;
        }

        let origin = self.origin.clone();
        if let Err(error) = self.expand(&origin).await {
            warn!(%error, "initial expansion rejected");
        }
        self.status()
    }

    /// Fetch `node_id`'s neighborhood and merge it. Fetch failures are logged
    /// and reported as `ExpansionFailed`; the graph keeps its last good state.
    #[instrument(skip(self), fields(company_id = %node_id))]
    pub async fn expand(&self, node_id: &CompanyId) -> ExplorerResult<Vec<ExplorerEvent>> {
        self.ensure_access()?;

        let (generation, ticket) = {
            let mut state = self.state.lock();
            if state.root.is_some() && !state.store.contains_node(node_id) {
                return Err(ExplorerError::UnknownNode(node_id.clone()));
            }
            let ticket = LoadingTicket::begin(&self.state, &mut state);
            (state.generation(node_id), ticket)
        };

        let result = self.source.fetch_neighborhood(node_id).await;
        drop(ticket);

        let mut state = self.state.lock();

        let hood = match result {
            Ok(hood) => hood,
            Err(error) => {
                warn!(%error, "expansion failed");
                state.status = ViewStatus::FetchError;
                return Ok(vec![ExplorerEvent::ExpansionFailed(ExpansionFailed {
                    anchor: node_id.clone(),
                    error,
                })]);
            }
        };

        if state.generation(node_id) != generation {
            debug!("node collapsed while fetching, discarding result");
            return Ok(vec![ExplorerEvent::StaleExpansionDiscarded(StaleExpansionDiscarded {
                anchor: node_id.clone(),
            })]);
        }
        if state.root.is_some() && !state.store.contains_node(node_id) {
            debug!("node removed while fetching, discarding result");
            return Ok(vec![ExplorerEvent::StaleExpansionDiscarded(StaleExpansionDiscarded {
                anchor: node_id.clone(),
            })]);
        }

        let applied = state.merge_neighborhood(&self.layout, node_id, hood);
        state.status = ViewStatus::Loaded;
        Ok(vec![ExplorerEvent::ExpansionApplied(applied)])
    }

    /// Merge an already fetched neighborhood as if `anchor` had been expanded
    pub fn apply_neighborhood(&self, anchor: &CompanyId, hood: Neighborhood) -> ExplorerEvent {
        let mut state = self.state.lock();
        let applied = state.merge_neighborhood(&self.layout, anchor, hood);
        state.status = ViewStatus::Loaded;
        ExplorerEvent::ExpansionApplied(applied)
    }

    /// Remove everything `node_id`'s expansions introduced, transitively.
    /// The node itself stays. No-op when it owns nothing.
    #[instrument(skip(self), fields(company_id = %node_id))]
    pub fn collapse(&self, node_id: &CompanyId) -> ExplorerResult<Vec<ExplorerEvent>> {
        let mut state = self.state.lock();
        if state.root.as_ref() == Some(node_id) {
            return Err(ExplorerError::RootNotCollapsible(node_id.clone()));
        }
        if !state.store.contains_node(node_id) {
            return Err(ExplorerError::UnknownNode(node_id.clone()));
        }

        let selected_before = state.selected.clone();
        let mut events = Vec::new();
        if let Some(collapsed) = state.collapse_subtree(node_id) {
            events.push(ExplorerEvent::SubtreeCollapsed(collapsed));
        }
        if state.selected != selected_before {
            events.push(ExplorerEvent::SelectionChanged(SelectionChanged { selected: None }));
        }
        Ok(events)
    }

    pub fn select(&self, node_id: &CompanyId) -> ExplorerResult<Vec<ExplorerEvent>> {
        let mut state = self.state.lock();
        if !state.store.contains_node(node_id) {
            return Err(ExplorerError::UnknownNode(node_id.clone()));
        }
        if state.selected.as_ref() == Some(node_id) {
            return Ok(Vec::new());
        }
        state.selected = Some(node_id.clone());
        Ok(vec![ExplorerEvent::SelectionChanged(SelectionChanged {
            selected: Some(node_id.clone()),
        })])
    }

    pub fn clear_selection(&self) -> Vec<ExplorerEvent> {
        let mut state = self.state.lock();
        match state.selected.take() {
            Some(_) => vec![ExplorerEvent::SelectionChanged(SelectionChanged { selected: None })],
            None => Vec::new(),
        }
    }

    pub fn set_edge_filter(&self, filter: EdgeFilter) -> Vec<ExplorerEvent> {
        let mut state = self.state.lock();
        if state.filter == filter {
            return Vec::new();
        }
        state.filter = filter;
        debug!(%filter, "edge filter changed");
        vec![ExplorerEvent::EdgeFilterChanged(EdgeFilterChanged { filter })]
    }

    pub fn set_highlight_path(&self, enabled: bool) -> Vec<ExplorerEvent> {
        let mut state = self.state.lock();
        if state.highlight_path == enabled {
            return Vec::new();
        }
        state.highlight_path = enabled;
        vec![ExplorerEvent::HighlightPathChanged(HighlightPathChanged { enabled })]
    }

    /// New default density for every non-root, non-selected node and for
    /// nodes introduced later
    pub fn set_default_display(
        &self,
        display_type: DisplayType,
    ) -> ExplorerResult<Vec<ExplorerEvent>> {
        if display_type == DisplayType::Root {
            return Err(ExplorerError::InvalidCommand(
                "root is not a default display type".to_string(),
            ));
        }
        let mut state = self.state.lock();
        state.default_display = display_type;
        let keep = state.selected.clone();
        let affected = state.store.retype_defaults(display_type, keep.as_ref());
        Ok(vec![ExplorerEvent::DisplayTypeChanged(DisplayTypeChanged {
            node: None,
            display_type,
            affected,
        })])
    }

    pub fn set_node_display(
        &self,
        node_id: &CompanyId,
        display_type: DisplayType,
    ) -> ExplorerResult<Vec<ExplorerEvent>> {
        if display_type == DisplayType::Root {
            return Err(ExplorerError::InvalidCommand(
                "only the graph root is displayed as root".to_string(),
            ));
        }
        let mut state = self.state.lock();
        let node = state
            .store
            .node_mut(node_id)
            .ok_or_else(|| ExplorerError::UnknownNode(node_id.clone()))?;
        if node.is_root() {
            return Err(ExplorerError::InvalidCommand(format!("{node_id} is the root")));
        }
        let affected = usize::from(node.display_type != display_type);
        node.display_type = display_type;
        Ok(vec![ExplorerEvent::DisplayTypeChanged(DisplayTypeChanged {
            node: Some(node_id.clone()),
            display_type,
            affected,
        })])
    }

    /// Swap a node between standard and minimal; the root is left as is
    pub fn toggle_node_display(&self, node_id: &CompanyId) -> ExplorerResult<Vec<ExplorerEvent>> {
        let current = {
            let state = self.state.lock();
            state
                .store
                .node(node_id)
                .map(|n| n.display_type)
                .ok_or_else(|| ExplorerError::UnknownNode(node_id.clone()))?
        };
        if current == DisplayType::Root {
            return Ok(Vec::new());
        }
        self.set_node_display(node_id, current.toggled())
    }

    /// Dispatch a command
    pub async fn handle(&self, command: GraphCommand) -> ExplorerResult<Vec<ExplorerEvent>> {
        self.ensure_access()?;
        match command {
            GraphCommand::Expand { node_id } => self.expand(&node_id).await,
            GraphCommand::Collapse { node_id } => self.collapse(&node_id),
            GraphCommand::Select { node_id } => self.select(&node_id),
            GraphCommand::ClearSelection => Ok(self.clear_selection()),
            GraphCommand::SetEdgeFilter { filter } => Ok(self.set_edge_filter(filter)),
            GraphCommand::SetHighlightPath { enabled } => Ok(self.set_highlight_path(enabled)),
            GraphCommand::SetDefaultDisplay { display_type } => {
                self.set_default_display(display_type)
            }
            GraphCommand::SetNodeDisplay { node_id, display_type } => {
                self.set_node_display(&node_id, display_type)
            }
            GraphCommand::ToggleNodeDisplay { node_id } => self.toggle_node_display(&node_id),
        }
    }

    pub fn status(&self) -> ViewStatus {
        self.state.lock().status
    }

    /// Whether the loading indicator should be visible at `now`
    pub fn show_spinner(&self, now: Instant) -> bool {
        self.state
            .lock()
            .loading
            .show_spinner(now, self.config.loading_debounce())
    }

    /// Clone of the current state
    pub fn snapshot(&self) -> ExplorerState {
        self.state.lock().clone()
    }

    pub fn render_view(&self) -> RenderView {
        self.state.lock().render_view()
    }

    pub fn root_path(&self) -> RootPath {
        self.state.lock().root_path()
    }

    fn ensure_access(&self) -> ExplorerResult<()> {
        if self.session.has_premium_access() {
            Ok(())
        } else {
            Err(ExplorerError::AccessDenied)
        }
    }
}

/// Outstanding-fetch registration, released when dropped so a cancelled
/// `expand` future does not leave the spinner running
struct LoadingTicket<'a> {
    state: &'a Mutex<ExplorerState>,
    ticket: u64,
}

impl<'a> LoadingTicket<'a> {
    fn begin(state: &'a Mutex<ExplorerState>, locked: &mut ExplorerState) -> Self {
        let ticket = locked.loading.begin(Instant::now());
        Self { state, ticket }
    }
}

impl Drop for LoadingTicket<'_> {
    fn drop(&mut self) {
        self.state.lock().loading.finish(self.ticket);
    }
}
