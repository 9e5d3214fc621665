//! In-memory network source

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use super::wire::{normalize, NetworkPayload};
use super::NetworkSource;
use crate::components::Neighborhood;
use crate::error::FetchError;
use crate::value_objects::CompanyId;

/// Serves canned payloads keyed by company id. Ids without a payload are
/// `NotFound`; ids registered with `fail` return the given error.
#[derive(Debug, Default)]
pub struct StaticNetworkSource {
    payloads: RwLock<HashMap<CompanyId, NetworkPayload>>,
    failures: RwLock<HashMap<CompanyId, FetchError>>,
}

impl StaticNetworkSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, payload: NetworkPayload) {
        let id = CompanyId::from(payload.firmenbuchnummer.clone());
        self.payloads.write().insert(id, payload);
    }

    /// Register a payload from its JSON form (the `company` object)
    pub fn insert_json(&self, json: serde_json::Value) -> Result<(), FetchError> {
        let payload: NetworkPayload =
            serde_json::from_value(json).map_err(|e| FetchError::MalformedResponse(e.to_string()))?;
        self.insert(payload);
        Ok(())
    }

    pub fn fail(&self, id: impl Into<CompanyId>, error: FetchError) {
        self.failures.write().insert(id.into(), error);
    }

    pub fn clear_failure(&self, id: &CompanyId) {
        self.failures.write().remove(id);
    }
}

#[async_trait]
impl NetworkSource for StaticNetworkSource {
    async fn fetch_neighborhood(&self, id: &CompanyId) -> Result<Neighborhood, FetchError> {
        if let Some(error) = self.failures.read().get(id) {
            return Err(error.clone());
        }
        let payload = self
            .payloads
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(id.clone()))?;
        normalize(payload)
    }
}
