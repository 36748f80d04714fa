//! # PteroNode - Pterodactyl allocation management
//!
//! Manages network port allocations on Pterodactyl panel nodes: given node
//! and IP filters, adds or removes port ranges from each node's allocation
//! pool, with dry-run preview and partial-failure tolerance.
//!
//! ## Pipeline
//!
//! ```text
//! ┌───────────┐   ┌────────────┐   ┌──────────┐   ┌────────────┐
//! │ Inventory │──▶│  IP Index  │──▶│  Filter  │──▶│ Reconciler │──▶ panel API
//! │  Loader   │   │  Builder   │   │ Resolver │   │            │
//! └───────────┘   └────────────┘   └──────────┘   └────────────┘
//!                                                       ▲
//!                                            Port Range Expander
//! ```
//!
//! The inventory snapshot is rebuilt from scratch every run; nothing is
//! persisted locally and nothing guards against concurrent remote changes
//! between listing and mutating.

pub mod api;
pub mod config;
pub mod errors;
pub mod filter;
pub mod index;
pub mod inventory;
pub mod ports;
pub mod reconcile;
pub mod table;

pub use api::{PanelApi, PanelClient};
pub use config::Credentials;
pub use errors::PteroError;
pub use filter::resolve;
pub use index::{build_index, IpEntry, IpIndex};
pub use inventory::{load_nodes, Allocation, Node};
pub use ports::expand_ports;
pub use reconcile::{Action, MutationFailure, PreviewRow, Reconciler, Report};

/// Crate version, reported by the CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
