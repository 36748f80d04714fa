/**
 * index.rs
 * IP index builder: IP address -> owning node, alias, counters, port map
 *
 * Merge policy:
 * - Within one node, the first allocation seen on an IP fixes the entry's
 *   alias; later allocations on the same IP never overwrite it.
 * - ports[port] = allocation_id, last seen wins (a duplicate port on one IP
 *   is inconsistent remote state but is not rejected).
 * - Across nodes, a duplicate IP string is collapsed: the later node's entry
 *   replaces the earlier one wholesale, counts and ports included. Last node
 *   wins. This mirrors a known misconfiguration case and is tested as an
 *   explicit policy.
 *
 * The index preserves insertion order; filter resolution depends on it.
 */

use indexmap::IndexMap;
use std::collections::HashMap;

use crate::inventory::Node;

/// Per-IP view derived from the inventory
#[derive(Debug, Clone, PartialEq)]
pub struct IpEntry {
    pub node_id: u32,
    pub node_fqdn: String,
    pub alias: Option<String>,
    pub total_allocs: u32,
    pub used_allocs: u32,
    /// Port number -> allocation id, for delete resolution
    pub ports: HashMap<u16, u64>,
}

/// Insertion-ordered map from IP address to its entry
pub type IpIndex = IndexMap<String, IpEntry>;

/// Build the IP index from the full node inventory.
pub fn build_index(nodes: &[Node]) -> IpIndex {
    let mut index = IpIndex::new();

    for node in nodes {
        let mut node_ips: IndexMap<&str, IpEntry> = IndexMap::new();

        for alloc in &node.allocations {
            let entry = node_ips.entry(alloc.ip.as_str()).or_insert_with(|| IpEntry {
                node_id: node.id,
                node_fqdn: node.fqdn.clone(),
                alias: alloc.alias.clone(),
                total_allocs: 0,
                used_allocs: 0,
                ports: HashMap::new(),
            });

            entry.total_allocs += 1;
            if alloc.assigned {
                entry.used_allocs += 1;
            }
            entry.ports.insert(alloc.port, alloc.id);
        }

        // Last node wins on duplicate IP strings; IndexMap keeps the
        // original position when a key is replaced.
        for (ip, entry) in node_ips {
            index.insert(ip.to_string(), entry);
        }
    }

    index
}
