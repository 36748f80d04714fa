/**
 * inventory.rs
 * Inventory loader: paginated node listing flattened to domain records
 *
 * Pagination is strictly sequential (each request names the next page) and
 * all-or-nothing: any failed page aborts the load with RemoteUnavailable,
 * because every downstream filter and mutation depends on a complete
 * snapshot. A node without location data signals an API key permission gap;
 * it is surfaced as a warning and the node is kept with a null location.
 */

use tracing::warn;

use crate::api::types::{NodeAttributes, NodesPage};
use crate::api::PanelApi;
use crate::errors::{PteroError, Result};

/// A single (IP, port) reservation on a node
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub id: u64,
    pub node_id: u32,
    pub ip: String,
    pub alias: Option<String>,
    pub port: u16,
    pub assigned: bool,
}

/// A remote compute node with its allocation sub-resources
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: u32,
    pub name: String,
    pub fqdn: String,
    pub memory: u64,
    pub allocated_memory: u64,
    pub disk: u64,
    pub allocated_disk: u64,
    /// None when the API key cannot read locations
    pub location: Option<String>,
    pub allocations: Vec<Allocation>,
}

/// Load every node with location and allocation sub-resources, following
/// pagination until the panel reports no further pages.
///
/// Page order is preserved and pages are concatenated; no partial result is
/// ever returned.
pub async fn load_nodes(api: &dyn PanelApi) -> Result<Vec<Node>> {
    let mut nodes = Vec::new();
    let mut page = 1u32;

    loop {
        let batch: NodesPage = api.list_nodes_page(page).await.map_err(|e| {
            PteroError::RemoteUnavailable(format!("node listing page {} failed: {}", page, e))
        })?;

        let total_pages = batch.meta.pagination.total_pages;

        for obj in batch.data {
            nodes.push(flatten_node(obj.attributes));
        }

        if page >= total_pages {
            break;
        }
        page += 1;
    }

    Ok(nodes)
}

fn flatten_node(attrs: NodeAttributes) -> Node {
    let node_id = attrs.id;
    let mut location = None;
    let mut allocations = Vec::new();

    if let Some(rel) = attrs.relationships {
        location = rel.location.map(|l| l.attributes.short);

        if let Some(list) = rel.allocations {
            allocations = list
                .data
                .into_iter()
                .map(|a| Allocation {
                    id: a.attributes.id,
                    node_id,
                    ip: a.attributes.ip,
                    alias: a.attributes.alias,
                    port: a.attributes.port,
                    assigned: a.attributes.assigned,
                })
                .collect();
        }
    }

    if location.is_none() {
        warn!(
            node_id,
            "no location data found, check your API key permissions"
        );
    }

    Node {
        id: node_id,
        name: attrs.name,
        fqdn: attrs.fqdn,
        memory: attrs.memory,
        allocated_memory: attrs.allocated_resources.memory,
        disk: attrs.disk,
        allocated_disk: attrs.allocated_resources.disk,
        location,
        allocations,
    }
}
