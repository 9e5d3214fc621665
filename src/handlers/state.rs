//! Mutable explorer state and the merge/collapse surgery on it

use chrono::Utc;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

use crate::components::{CompanyNode, Neighborhood};
use crate::events::{ExpansionApplied, SubtreeCollapsed};
use crate::layout::RadialLayout;
use crate::ownership::OwnershipIndex;
use crate::projections::{FilteredView, GraphSummary, RenderView, RootPath};
use crate::session::{LoadingTracker, ViewStatus};
use crate::store::GraphStore;
use crate::value_objects::{CompanyId, DisplayType, EdgeFilter};

/// Everything one explorer instance knows. Cloning yields a snapshot.
#[derive(Debug, Clone)]
pub struct ExplorerState {
    pub(crate) store: GraphStore,
    pub(crate) ownership: OwnershipIndex,
    pub(crate) root: Option<CompanyId>,
    pub(crate) selected: Option<CompanyId>,
    pub(crate) filter: EdgeFilter,
    pub(crate) highlight_path: bool,
    pub(crate) default_display: DisplayType,
    pub(crate) status: ViewStatus,
    pub(crate) loading: LoadingTracker,
    generations: HashMap<CompanyId, u64>,
}

impl ExplorerState {
    pub fn new(default_display: DisplayType, highlight_path: bool) -> Self {
        Self {
            store: GraphStore::new(),
            ownership: OwnershipIndex::new(),
            root: None,
            selected: None,
            filter: EdgeFilter::All,
            highlight_path,
            default_display,
            status: ViewStatus::Loading,
            loading: LoadingTracker::new(),
            generations: HashMap::new(),
        }
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn ownership(&self) -> &OwnershipIndex {
        &self.ownership
    }

    pub fn root(&self) -> Option<&CompanyId> {
        self.root.as_ref()
    }

    pub fn selected(&self) -> Option<&CompanyId> {
        self.selected.as_ref()
    }

    pub fn edge_filter(&self) -> EdgeFilter {
        self.filter
    }

    pub fn highlight_path(&self) -> bool {
        self.highlight_path
    }

    pub fn default_display(&self) -> DisplayType {
        self.default_display
    }

    pub fn status(&self) -> ViewStatus {
        self.status
    }

    pub fn loading(&self) -> &LoadingTracker {
        &self.loading
    }

    pub fn root_path(&self) -> RootPath {
        RootPath::compute(&self.ownership, self.root(), self.selected(), self.highlight_path)
    }

    pub fn filtered_view(&self) -> FilteredView {
        FilteredView::compute(&self.store, self.root(), self.filter)
    }

    pub fn render_view(&self) -> RenderView {
        RenderView::compute(self)
    }

    pub fn summary(&self) -> GraphSummary {
        GraphSummary::compute(self)
    }

    /// Root exists and is placed at the origin, and no edge dangles
    pub fn is_structurally_valid(&self) -> bool {
        let root_ok = match &self.root {
            Some(root) => self
                .store
                .node(root)
                .is_some_and(|n| n.is_root() && n.position.is_some_and(|p| p.is_origin())),
            None => self.store.node_count() == 0,
        };
        root_ok && self.store.is_consistent()
    }

    pub(crate) fn generation(&self, id: &CompanyId) -> u64 {
        self.generations.get(id).copied().unwrap_or(0)
    }

    fn bump_generation(&mut self, id: &CompanyId) {
        *self.generations.entry(id.clone()).or_insert(0) += 1;
    }

    /// Merge the neighborhood fetched for `requested`: type and upsert nodes,
    /// upsert edges, place the newly visible nodes and record them as owned
    /// by the anchor. The anchor is `requested` unless this is the first merge
    /// or `requested` is not in the graph, in which case it is `hood.root`.
    pub(crate) fn merge_neighborhood(
        &mut self,
        layout: &RadialLayout,
        requested: &CompanyId,
        hood: Neighborhood,
    ) -> ExpansionApplied {
        let visible_before = self.store.node_ids();
        let first_merge = self.root.is_none();

        let root = match &self.root {
            Some(root) => root.clone(),
            None => {
                info!(root = %hood.root, "graph root established");
                self.root = Some(hood.root.clone());
                hood.root.clone()
            }
        };

        let nodes: Vec<CompanyNode> = hood
            .nodes
            .into_iter()
            .map(|mut node| {
                node.display_type = match self.store.node(&node.id) {
                    Some(existing) => existing.display_type,
                    None if node.id == root => DisplayType::Root,
                    None => self.default_display,
                };
                node
            })
            .collect();
        let fetched: Vec<CompanyId> = nodes.iter().map(|n| n.id.clone()).collect();

        self.store.merge_nodes(nodes);
        let edges_added = self.store.merge_edges(hood.edges);

        // The first fetch, or one whose requested id the server renamed,
        // anchors on the company it actually returned
        let anchor = if first_merge || !self.store.contains_node(requested) {
            if requested != &hood.root {
                debug!(
                    requested = %requested,
                    returned = %hood.root,
                    "anchoring on returned company"
                );
            }
            &hood.root
        } else {
            requested
        };

        let introduced: Vec<CompanyId> = fetched
            .into_iter()
            .filter(|id| id != anchor && !visible_before.contains(id))
            .collect();

        let placements = layout.place(&mut self.store, anchor, Some(&root), &introduced);
        let adopted = self.ownership.adopt(anchor, &introduced);
        debug!(
            anchor = %anchor,
            introduced = introduced.len(),
            adopted = adopted.len(),
            edges_added,
            "neighborhood merged"
        );

        ExpansionApplied {
            anchor: anchor.clone(),
            root,
            introduced,
            placements,
            edges_added,
            applied_at: Utc::now(),
        }
    }

    /// Remove `parent`'s owned subtree. In-flight fetches for the parent or
    /// any removed node become stale. Returns `None` when nothing is owned.
    pub(crate) fn collapse_subtree(&mut self, parent: &CompanyId) -> Option<SubtreeCollapsed> {
        self.bump_generation(parent);

        let descendants = self.ownership.descendants(parent);
        if descendants.is_empty() {
            debug!(parent = %parent, "nothing to collapse");
            return None;
        }

        let removed: HashSet<CompanyId> = descendants.into_iter().collect();
        for id in &removed {
            self.bump_generation(id);
        }

        let removal = self.store.remove_subtree(parent, &removed);
        self.ownership.prune(&removed);
        if self.selected.as_ref().is_some_and(|s| removed.contains(s)) {
            self.selected = None;
        }

        info!(parent = %parent, removed = removal.nodes.len(), "subtree collapsed");
        Some(SubtreeCollapsed {
            parent: parent.clone(),
            removed_nodes: removal.nodes,
            removed_edges: removal.edges.len(),
        })
    }
}
