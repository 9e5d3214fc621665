//! Ownership index
//!
//! Records which expansion introduced which node. Unlike the relation edges,
//! which may contain cycles and cross-links, ownership is a forest: every
//! non-root node has at most one owner, the node whose expansion first
//! brought it into view. Layout, collapse and root-path queries all walk
//! this forest.

use indexmap::{IndexMap, IndexSet};
use std::collections::{HashMap, HashSet};

use crate::value_objects::CompanyId;

#[derive(Debug, Clone, Default)]
pub struct OwnershipIndex {
    children: IndexMap<CompanyId, IndexSet<CompanyId>>,
    parents: HashMap<CompanyId, CompanyId>,
}

impl OwnershipIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `children` as introduced by `parent`. Children that already
    /// have an owner, the parent itself and the parent's own ancestors are
    /// ignored. Returns the children actually adopted.
    pub fn adopt<'a>(
        &mut self,
        parent: &CompanyId,
        children: impl IntoIterator<Item = &'a CompanyId>,
    ) -> Vec<CompanyId> {
        let ancestors: HashSet<CompanyId> = self.ancestors(parent).into_iter().collect();
        let mut adopted = Vec::new();
        let entry = self.children.entry(parent.clone()).or_default();
        for child in children {
            if child == parent || ancestors.contains(child) || self.parents.contains_key(child) {
                continue;
            }
            entry.insert(child.clone());
            self.parents.insert(child.clone(), parent.clone());
            adopted.push(child.clone());
        }
        adopted
    }

    pub fn children_of(&self, parent: &CompanyId) -> impl Iterator<Item = &CompanyId> {
        self.children.get(parent).into_iter().flatten()
    }

    pub fn parent_of(&self, child: &CompanyId) -> Option<&CompanyId> {
        self.parents.get(child)
    }

    /// Whether `parent` currently owns any children
    pub fn is_expanded(&self, parent: &CompanyId) -> bool {
        self.children.get(parent).is_some_and(|c| !c.is_empty())
    }

    /// Owners of `id`, nearest first
    pub fn ancestors(&self, id: &CompanyId) -> Vec<CompanyId> {
        let mut out = Vec::new();
        let mut seen: HashSet<&CompanyId> = HashSet::from([id]);
        let mut current = id;
        while let Some(parent) = self.parents.get(current) {
            if !seen.insert(parent) {
                break;
            }
            out.push(parent.clone());
            current = parent;
        }
        out
    }

    /// Transitive owned descendants of `id` (not including `id`), depth-first
    pub fn descendants(&self, id: &CompanyId) -> IndexSet<CompanyId> {
        let mut out = IndexSet::new();
        let mut stack: Vec<&CompanyId> = self.children_of(id).collect();
        stack.reverse();
        while let Some(next) = stack.pop() {
            if next == id || !out.insert(next.clone()) {
                continue;
            }
            let mut grand: Vec<&CompanyId> = self.children_of(next).collect();
            grand.reverse();
            stack.extend(grand);
        }
        out
    }

    /// Forget every removed id, both as an owner and as a child
    pub fn prune(&mut self, removed: &HashSet<CompanyId>) {
        self.children.retain(|parent, _| !removed.contains(parent));
        for set in self.children.values_mut() {
            set.retain(|child| !removed.contains(child));
        }
        self.parents.retain(|child, _| !removed.contains(child));
    }

    /// Ordered path `root .. node` through the ownership forest. The walk stops
    /// early when a node has no owner or an id repeats, so the first element is
    /// `root` only when `node` is actually owned under it.
    pub fn path_to_root(&self, node: &CompanyId, root: &CompanyId) -> Vec<CompanyId> {
        let mut path = vec![node.clone()];
        let mut seen: HashSet<&CompanyId> = HashSet::from([node]);
        let mut current = node;
        while current != root {
            match self.parents.get(current) {
                Some(parent) if seen.insert(parent) => {
                    path.push(parent.clone());
                    current = parent;
                }
                _ => break,
            }
        }
        path.reverse();
        path
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}
