//! Error types
//!
//! Fetch failures are caught at the controller's `expand` boundary and never
//! reach the caller as a hard error; `ExplorerError` covers requests the
//! controller rejects outright.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value_objects::CompanyId;

/// Failure of a single neighborhood fetch
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FetchError {
    #[error("Company not found: {0}")]
    NotFound(CompanyId),

    /// Request rejected or answered with a non-2xx status
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// Body did not match the expected network shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    /// Map a non-success HTTP status for `id`
    pub fn from_status(id: &CompanyId, status: u16) -> Self {
        match status {
            404 => FetchError::NotFound(id.clone()),
            _ => FetchError::NetworkFailure(format!("HTTP {status} for company {id}")),
        }
    }
}

/// Errors returned by explorer commands
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExplorerError {
    #[error("Node not in graph: {0}")]
    UnknownNode(CompanyId),

    #[error("The root node cannot be collapsed: {0}")]
    RootNotCollapsible(CompanyId),

    /// The session lacks the tier required to explore the network
    #[error("Network exploration requires a subscription")]
    AccessDenied,

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for explorer operations
pub type ExplorerResult<T> = Result<T, ExplorerError>;
