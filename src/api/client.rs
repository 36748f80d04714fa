//! HTTP client for the panel application API
//!
//! Wraps reqwest with bearer auth and the small capability surface the
//! reconciliation engine needs: list nodes (paginated, with location and
//! allocation sub-resources), create allocations, delete an allocation.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::api::types::NodesPage;
use crate::errors::{PteroError, Result};

/// Capability surface over the remote panel.
///
/// The reconciliation engine depends on this trait, not on the concrete
/// client, so tests can substitute a recording fake.
#[async_trait]
pub trait PanelApi: Send + Sync {
    /// Fetch one page of the node listing with location and allocation
    /// sub-resources included.
    async fn list_nodes_page(&self, page: u32) -> Result<NodesPage>;

    /// Create allocations for every port in `ports` on `ip` of node `node_id`.
    async fn create_allocations(
        &self,
        node_id: u32,
        ip: &str,
        ports: &[u16],
        alias: Option<&str>,
    ) -> Result<()>;

    /// Delete a single allocation by id.
    async fn delete_allocation(&self, node_id: u32, allocation_id: u64) -> Result<()>;
}

/// Panel API client backed by reqwest
#[derive(Debug, Clone)]
pub struct PanelClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PanelClient {
    /// Create a new client for the given panel URL and application API key
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Map a response status to a result, draining the body into the error
    /// message on failure.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(PteroError::Api(format!(
            "panel returned {}: {}",
            status,
            body.chars().take(200).collect::<String>()
        )))
    }
}

#[async_trait]
impl PanelApi for PanelClient {
    async fn list_nodes_page(&self, page: u32) -> Result<NodesPage> {
        let url = self.url("/api/application/nodes");
        debug!(page, "fetching node listing page");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("include", "location,allocations".to_string()),
                ("page", page.to_string()),
            ])
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let page: NodesPage = response.json().await?;
        Ok(page)
    }

    async fn create_allocations(
        &self,
        node_id: u32,
        ip: &str,
        ports: &[u16],
        alias: Option<&str>,
    ) -> Result<()> {
        let url = self.url(&format!("/api/application/nodes/{}/allocations", node_id));
        debug!(node_id, ip, count = ports.len(), "creating allocations");

        // The panel expects port numbers as strings
        let ports: Vec<String> = ports.iter().map(|p| p.to_string()).collect();
        let body = json!({
            "ip": ip,
            "ports": ports,
            "alias": alias,
        });

        let response = self
            .http
            .post(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }

    async fn delete_allocation(&self, node_id: u32, allocation_id: u64) -> Result<()> {
        let url = self.url(&format!(
            "/api/application/nodes/{}/allocations/{}",
            node_id, allocation_id
        ));
        debug!(node_id, allocation_id, "deleting allocation");

        let response = self
            .http
            .delete(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }
}
