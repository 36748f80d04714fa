/**
 * filter.rs
 * Filter resolver: narrows the IP index to the set of IPs to act on
 *
 * Node filter: comma-separated integer node IDs. IDs absent from the
 * inventory are ignored with a warning. Malformed IDs are a fatal
 * InvalidFilter error, caught before any remote mutation.
 *
 * IP filter: comma-separated IP strings, intersected with the index and
 * restricted to eligible nodes. Entries that match nothing are ignored
 * with a warning.
 *
 * The result preserves the index's insertion order, not the filter's order,
 * and resolution is idempotent.
 */

use std::collections::HashSet;
use tracing::warn;

use crate::errors::{PteroError, Result};
use crate::index::IpIndex;
use crate::inventory::Node;

/// Parse a comma-separated node ID filter.
pub fn parse_node_filter(spec: &str) -> Result<Vec<u32>> {
    spec.split(',')
        .map(|component| {
            component.trim().parse::<u32>().map_err(|_| {
                PteroError::InvalidFilter(format!("node id '{}' is not an integer", component.trim()))
            })
        })
        .collect()
}

/// Parse a comma-separated IP address filter.
pub fn parse_ip_filter(spec: &str) -> Vec<String> {
    spec.split(',')
        .map(|component| component.trim().to_string())
        .filter(|component| !component.is_empty())
        .collect()
}

/// Resolve optional node and IP filters against the index.
///
/// Returns the target IPs in index insertion order.
pub fn resolve(
    index: &IpIndex,
    nodes: &[Node],
    node_filter: Option<&str>,
    ip_filter: Option<&str>,
) -> Result<Vec<String>> {
    let inventory_ids: HashSet<u32> = nodes.iter().map(|n| n.id).collect();

    let eligible: HashSet<u32> = match node_filter {
        Some(spec) => {
            let requested = parse_node_filter(spec)?;
            let mut eligible = HashSet::new();
            for id in requested {
                if inventory_ids.contains(&id) {
                    eligible.insert(id);
                } else {
                    warn!(node_id = id, "node filter entry not found in inventory, ignoring");
                }
            }
            eligible
        }
        None => inventory_ids,
    };

    let ip_wanted: Option<HashSet<String>> =
        ip_filter.map(|spec| parse_ip_filter(spec).into_iter().collect());

    let targets: Vec<String> = index
        .iter()
        .filter(|(ip, entry)| {
            eligible.contains(&entry.node_id)
                && ip_wanted.as_ref().map_or(true, |wanted| wanted.contains(*ip))
        })
        .map(|(ip, _)| ip.clone())
        .collect();

    if let Some(wanted) = &ip_wanted {
        let matched: HashSet<&str> = targets.iter().map(String::as_str).collect();
        for ip in wanted {
            if !matched.contains(ip.as_str()) {
                warn!(ip = ip.as_str(), "IP filter entry matched nothing, ignoring");
            }
        }
    }

    Ok(targets)
}
