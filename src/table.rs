//! Console table rendering for nodes, IPs, and reconciliation previews

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::index::IpIndex;
use crate::inventory::Node;
use crate::reconcile::PreviewRow;

fn base_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// Node summary table (ID, capacity, allocation counts)
pub fn nodes_table(nodes: &[Node]) -> Table {
    let mut table = base_table(vec![
        "ID",
        "Name",
        "FQDN",
        "Location",
        "Memory",
        "Allocated Memory",
        "Disk",
        "Allocated Disk",
        "Total Allocations",
        "Used Allocations",
    ]);

    for node in nodes {
        let total = node.allocations.len();
        let used = node.allocations.iter().filter(|a| a.assigned).count();
        table.add_row(vec![
            node.id.to_string(),
            node.name.clone(),
            node.fqdn.clone(),
            node.location.clone().unwrap_or_default(),
            node.memory.to_string(),
            node.allocated_memory.to_string(),
            node.disk.to_string(),
            node.allocated_disk.to_string(),
            total.to_string(),
            used.to_string(),
        ]);
    }

    table
}

/// IP index table (owner, alias, allocation counts)
pub fn ips_table(index: &IpIndex) -> Table {
    let mut table = base_table(vec![
        "Node ID",
        "FQDN",
        "IP Address",
        "IP Alias",
        "Total Allocations",
        "Used Allocations",
    ]);

    for (ip, entry) in index {
        table.add_row(vec![
            entry.node_id.to_string(),
            entry.node_fqdn.clone(),
            ip.clone(),
            entry.alias.clone().unwrap_or_default(),
            entry.total_allocs.to_string(),
            entry.used_allocs.to_string(),
        ]);
    }

    table
}

/// Reconciliation preview table: one row per target IP
pub fn preview_table(rows: &[PreviewRow]) -> Table {
    let mut table = base_table(vec![
        "Node ID",
        "Node FQDN",
        "IP Address",
        "IP Alias",
        "Allocations",
    ]);

    for row in rows {
        let ports = row
            .ports
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(",");
        table.add_row(vec![
            row.node_id.to_string(),
            row.node_fqdn.clone(),
            row.ip.clone(),
            row.alias.clone().unwrap_or_default(),
            ports,
        ]);
    }

    table
}
