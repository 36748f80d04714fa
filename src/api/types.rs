//! Wire types for the panel application API
//!
//! The panel wraps every resource in an `{object, attributes}` envelope and
//! paginates list responses under `meta.pagination`. Only the fields the
//! reconciliation engine reads are modeled here.

use serde::Deserialize;

/// One page of the node listing
#[derive(Debug, Clone, Deserialize)]
pub struct NodesPage {
    pub data: Vec<NodeObject>,
    pub meta: PageMeta,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeObject {
    pub attributes: NodeAttributes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeAttributes {
    pub id: u32,
    pub name: String,
    pub fqdn: String,
    pub memory: u64,
    pub disk: u64,
    pub allocated_resources: AllocatedResources,
    #[serde(default)]
    pub relationships: Option<NodeRelationships>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AllocatedResources {
    pub memory: u64,
    pub disk: u64,
}

/// Included sub-resources, present when the listing was requested with
/// `include=location,allocations`. Location comes back null when the API key
/// lacks location read permission.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeRelationships {
    #[serde(default)]
    pub location: Option<LocationObject>,
    #[serde(default)]
    pub allocations: Option<AllocationList>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationObject {
    pub attributes: LocationAttributes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationAttributes {
    pub short: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AllocationList {
    pub data: Vec<AllocationObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AllocationObject {
    pub attributes: AllocationAttributes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AllocationAttributes {
    pub id: u64,
    pub ip: String,
    pub alias: Option<String>,
    pub port: u16,
    pub assigned: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
}
