//! Remote data adapter
//!
//! Fetches a company's immediate network and normalizes it into explorer
//! components. `NetworkSource` is the seam the controller depends on; the
//! HTTP client talks to the company API, the static source serves canned
//! payloads.

mod http;
mod memory;
mod wire;

pub use http::HttpNetworkClient;
pub use memory::StaticNetworkSource;
pub use wire::{normalize, NetworkPayload, NetworkResponse, RawEdge, RawNode};

use async_trait::async_trait;
use std::sync::Arc;

use crate::components::Neighborhood;
use crate::error::FetchError;
use crate::value_objects::CompanyId;

/// Source of company neighborhoods. Calls for different ids are independent
/// and may run concurrently.
#[async_trait]
pub trait NetworkSource: Send + Sync {
    async fn fetch_neighborhood(&self, id: &CompanyId) -> Result<Neighborhood, FetchError>;
}

#[async_trait]
impl<S: NetworkSource + ?Sized> NetworkSource for Arc<S> {
    async fn fetch_neighborhood(&self, id: &CompanyId) -> Result<Neighborhood, FetchError> {
        (**self).fetch_neighborhood(id).await
    }
}
