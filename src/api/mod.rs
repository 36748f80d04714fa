//! Panel API access: wire types and the reqwest-backed client

pub mod client;
pub mod types;

pub use client::{PanelApi, PanelClient};
pub use types::{
    AllocationAttributes, AllocationList, AllocationObject, NodeAttributes, NodeObject,
    NodeRelationships, NodesPage, PageMeta, Pagination,
};
