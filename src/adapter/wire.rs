//! Wire format of `GET /api/v1/network/{id}`

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

use crate::components::{CompanyEdge, CompanyNode, Neighborhood};
use crate::error::FetchError;
use crate::value_objects::{CompanyId, NodeKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkResponse {
    /// `null` when the company is unknown
    pub company: Option<NetworkPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkPayload {
    pub firmenbuchnummer: String,
    #[serde(default)]
    pub nodes: Vec<RawNode>,
    #[serde(default)]
    pub edges: Vec<RawEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEdge {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

fn value_text(value: Option<serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Convert a payload into a `Neighborhood`. Duplicate nodes keep their first
/// occurrence, parallel relations are coalesced and edges to nodes outside
/// the payload are dropped; an empty id or a missing root node is a
/// malformed response.
pub fn normalize(payload: NetworkPayload) -> Result<Neighborhood, FetchError> {
    let root = CompanyId::from(payload.firmenbuchnummer);
    if root.is_empty() {
        return Err(FetchError::MalformedResponse("empty firmenbuchnummer".to_string()));
    }

    let mut hood = Neighborhood::new(root.clone());
    let mut seen: HashSet<CompanyId> = HashSet::with_capacity(payload.nodes.len());
    for raw in payload.nodes {
        let id = CompanyId::from(raw.id);
        if id.is_empty() {
            return Err(FetchError::MalformedResponse("node with empty id".to_string()));
        }
        if !seen.insert(id.clone()) {
            continue;
        }
        let kind = NodeKind::from_tag(raw.kind.as_deref());
        hood.nodes.push(CompanyNode::new(id, raw.label).with_kind(kind));
    }

    if !seen.contains(&root) {
        return Err(FetchError::MalformedResponse(format!(
            "company {root} missing from its own network"
        )));
    }

    for raw in payload.edges {
        let source = CompanyId::from(raw.source);
        let target = CompanyId::from(raw.target);
        if !seen.contains(&source) || !seen.contains(&target) {
            warn!(company_id = %root, %source, %target, "skipping edge outside the payload");
            continue;
        }
        let mut edge = CompanyEdge::new(source, target, raw.label);
        edge.value = value_text(raw.value);
        hood.edges.push(edge);
    }

    hood.dedup_edges();
    Ok(hood)
}
