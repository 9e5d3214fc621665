//! HTTP client for the company network endpoint

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, instrument};

use super::wire::{normalize, NetworkResponse};
use super::NetworkSource;
use crate::components::Neighborhood;
use crate::config::ExplorerConfig;
use crate::error::{ExplorerError, ExplorerResult, FetchError};
use crate::session::Session;
use crate::value_objects::CompanyId;

#[derive(Clone)]
pub struct HttpNetworkClient {
    client: Client,
    base_url: Url,
    session: Session,
}

impl HttpNetworkClient {
    /// Build a client for `config.api_base_url`, authenticating as `session`
    pub fn new(config: &ExplorerConfig, session: Session) -> ExplorerResult<Self> {
        let base_url = Url::parse(config.api_base_url.trim_end_matches('/'))
            .map_err(|e| ExplorerError::Config(format!("invalid api_base_url: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ExplorerError::Config(format!(
                "api_base_url cannot be a base: {base_url}"
            )));
        }
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ExplorerError::Config(format!("http client: {e}")))?;

        Ok(Self { client, base_url, session })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// `{base}/api/v1/network/{id}` with the id percent-encoded as one segment
    pub fn network_url(&self, id: &CompanyId) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["api", "v1", "network", id.as_str()]);
        }
        url
    }
}

#[async_trait]
impl NetworkSource for HttpNetworkClient {
    #[instrument(skip(self), fields(company_id = %id))]
    async fn fetch_neighborhood(&self, id: &CompanyId) -> Result<Neighborhood, FetchError> {
        let url = self.network_url(id);
        let mut request = self.client.get(url);
        if let Some(token) = &self.session.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::NetworkFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::from_status(id, status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::NetworkFailure(e.to_string()))?;
        let parsed: NetworkResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;
        let payload = parsed.company.ok_or_else(|| FetchError::NotFound(id.clone()))?;

        let hood = normalize(payload)?;
        debug!(nodes = hood.nodes.len(), edges = hood.edges.len(), "fetched neighborhood");
        Ok(hood)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_url() {
        let config = ExplorerConfig {
            api_base_url: "https://api.example.test/".to_string(),
            ..ExplorerConfig::default()
        };
        let client = HttpNetworkClient::new(&config, Session::anonymous()).unwrap();
        assert_eq!(
            client.network_url(&CompanyId::from("123456 a")).as_str(),
            "https://api.example.test/api/v1/network/123456%20a"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ExplorerConfig {
            api_base_url: "not a url".to_string(),
            ..ExplorerConfig::default()
        };
        assert!(matches!(
            HttpNetworkClient::new(&config, Session::anonymous()),
            Err(ExplorerError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_failure() {
        let config = ExplorerConfig {
            api_base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_secs: 2,
            ..ExplorerConfig::default()
        };
        let client = HttpNetworkClient::new(&config, Session::anonymous()).unwrap();
        let result = client.fetch_neighborhood(&CompanyId::from("FN1")).await;
        assert!(matches!(result, Err(FetchError::NetworkFailure(_))));
    }
}
