//! Edge component

use serde::{Deserialize, Serialize};

use crate::value_objects::{CompanyId, EdgeKey, RelationType};

/// A displayed relation between two nodes. Several raw relations between the
/// same pair coalesce into one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyEdge {
    /// `"{source}-{target}"` of the first observed orientation
    pub id: String,
    pub source: CompanyId,
    pub target: CompanyId,
    pub relation_type: RelationType,
    pub label: String,
    /// Representative value shown on hover
    pub value: Option<String>,
}

impl CompanyEdge {
    pub fn new(
        source: impl Into<CompanyId>,
        target: impl Into<CompanyId>,
        label: impl Into<String>,
    ) -> Self {
        let source = source.into();
        let target = target.into();
        let label = label.into();
        Self {
            id: format!("{source}-{target}"),
            relation_type: RelationType::from_label(&label),
            source,
            target,
            label,
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Unordered dedup key
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(&self.source, &self.target)
    }

    pub fn touches(&self, id: &CompanyId) -> bool {
        &self.source == id || &self.target == id
    }

    /// The endpoint opposite `id`, if `id` is an endpoint
    pub fn other_end(&self, id: &CompanyId) -> Option<&CompanyId> {
        if &self.source == id {
            Some(&self.target)
        } else if &self.target == id {
            Some(&self.source)
        } else {
            None
        }
    }

    /// Overwrite the payload fields; endpoints and id stay as first seen
    pub fn merge_from(&mut self, incoming: CompanyEdge) {
        self.relation_type = incoming.relation_type;
        self.label = incoming.label;
        if incoming.value.is_some() {
            self.value = incoming.value;
        }
    }
}
