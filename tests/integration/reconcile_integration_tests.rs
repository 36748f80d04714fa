// End-to-end reconciliation tests: inventory load -> index -> filter ->
// reconcile against a fake panel, covering the full pipeline the CLI drives.

use async_trait::async_trait;
use pteronode::api::types::{
    AllocatedResources, AllocationAttributes, AllocationList, AllocationObject,
    LocationAttributes, LocationObject, NodeAttributes, NodeObject, NodeRelationships, NodesPage,
    PageMeta, Pagination,
};
use pteronode::api::PanelApi;
use pteronode::errors::Result;
use pteronode::reconcile::{Action, Reconciler};
use pteronode::{build_index, load_nodes, resolve};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Create {
        node_id: u32,
        ip: String,
        ports: Vec<u16>,
        alias: Option<String>,
    },
    Delete {
        node_id: u32,
        allocation_id: u64,
    },
}

/// Fake panel: serves a fixed inventory and records every mutation.
struct FakePanel {
    pages: Vec<NodesPage>,
    calls: Mutex<Vec<Call>>,
}

impl FakePanel {
    fn new(pages: Vec<NodesPage>) -> Self {
        Self {
            pages,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PanelApi for FakePanel {
    async fn list_nodes_page(&self, page: u32) -> Result<NodesPage> {
        Ok(self.pages[(page - 1) as usize].clone())
    }

    async fn create_allocations(
        &self,
        node_id: u32,
        ip: &str,
        ports: &[u16],
        alias: Option<&str>,
    ) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Create {
            node_id,
            ip: ip.to_string(),
            ports: ports.to_vec(),
            alias: alias.map(String::from),
        });
        Ok(())
    }

    async fn delete_allocation(&self, node_id: u32, allocation_id: u64) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Delete {
            node_id,
            allocation_id,
        });
        Ok(())
    }
}

fn allocation(id: u64, ip: &str, alias: Option<&str>, port: u16, assigned: bool) -> AllocationObject {
    AllocationObject {
        attributes: AllocationAttributes {
            id,
            ip: ip.to_string(),
            alias: alias.map(String::from),
            port,
            assigned,
        },
    }
}

fn node_record(id: u32, fqdn: &str, allocs: Vec<AllocationObject>) -> NodeObject {
    NodeObject {
        attributes: NodeAttributes {
            id,
            name: format!("node-{}", id),
            fqdn: fqdn.to_string(),
            memory: 32768,
            disk: 512000,
            allocated_resources: AllocatedResources { memory: 0, disk: 0 },
            relationships: Some(NodeRelationships {
                location: Some(LocationObject {
                    attributes: LocationAttributes {
                        short: "us-east".to_string(),
                    },
                }),
                allocations: Some(AllocationList { data: allocs }),
            }),
        },
    }
}

fn one_page(data: Vec<NodeObject>) -> Vec<NodesPage> {
    vec![NodesPage {
        data,
        meta: PageMeta {
            pagination: Pagination {
                current_page: 1,
                total_pages: 1,
            },
        },
    }]
}

/// Panel with one node (id=7, n7.example.com) holding 10.0.0.5 ports
/// 25565 (assigned) and 25566 (unassigned).
fn scenario_panel() -> FakePanel {
    FakePanel::new(one_page(vec![node_record(
        7,
        "n7.example.com",
        vec![
            allocation(101, "10.0.0.5", Some("game.example.com"), 25565, true),
            allocation(102, "10.0.0.5", None, 25566, false),
        ],
    )]))
}

#[tokio::test]
async fn add_scenario_issues_one_create_call() {
    let panel = scenario_panel();

    let nodes = load_nodes(&panel).await.unwrap();
    let index = build_index(&nodes);
    let targets = resolve(&index, &nodes, None, None).unwrap();
    assert_eq!(targets, vec!["10.0.0.5"]);

    let report = Reconciler::new()
        .reconcile(&panel, &index, &targets, &[25567], Action::Add, false)
        .await;

    let calls = panel.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0],
        Call::Create {
            node_id: 7,
            ip: "10.0.0.5".to_string(),
            ports: vec![25567],
            alias: Some("game.example.com".to_string()),
        }
    );
    assert_eq!(report.attempted, 1);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 0);
}

#[tokio::test]
async fn delete_scenario_skips_unallocated_port() {
    let panel = scenario_panel();

    let nodes = load_nodes(&panel).await.unwrap();
    let index = build_index(&nodes);
    let targets = resolve(&index, &nodes, None, None).unwrap();

    let report = Reconciler::new()
        .reconcile(&panel, &index, &targets, &[25565, 9999], Action::Delete, false)
        .await;

    let calls = panel.calls.lock().unwrap();
    assert_eq!(calls.len(), 1, "9999 must contribute no call");
    assert_eq!(
        calls[0],
        Call::Delete {
            node_id: 7,
            allocation_id: 101
        }
    );
    assert_eq!(report.attempted, 1);
    assert_eq!(report.succeeded, 1);
}

#[tokio::test]
async fn dry_run_pipeline_previews_without_mutation() {
    let panel = scenario_panel();

    let nodes = load_nodes(&panel).await.unwrap();
    let index = build_index(&nodes);
    let targets = resolve(&index, &nodes, None, None).unwrap();

    let report = Reconciler::new()
        .reconcile(&panel, &index, &targets, &[25567, 25568], Action::Add, true)
        .await;

    assert!(panel.calls.lock().unwrap().is_empty());
    assert_eq!(report.attempted, 0);
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].ip, "10.0.0.5");
    assert_eq!(report.rows[0].node_fqdn, "n7.example.com");
    assert_eq!(report.rows[0].ports, vec![25567, 25568]);
}

#[tokio::test]
async fn multi_node_filter_pipeline() {
    let panel = FakePanel::new(one_page(vec![
        node_record(
            1,
            "a.example.com",
            vec![allocation(11, "10.0.0.1", None, 7000, false)],
        ),
        node_record(
            2,
            "b.example.com",
            vec![
                allocation(21, "10.0.1.1", None, 7000, true),
                allocation(22, "10.0.1.2", None, 7000, false),
            ],
        ),
    ]));

    let nodes = load_nodes(&panel).await.unwrap();
    let index = build_index(&nodes);

    // Only node 2, only one of its IPs
    let targets = resolve(&index, &nodes, Some("2"), Some("10.0.1.2")).unwrap();
    assert_eq!(targets, vec!["10.0.1.2"]);

    let report = Reconciler::new()
        .reconcile(&panel, &index, &targets, &[8000, 8001], Action::Add, false)
        .await;

    let calls = panel.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0],
        Call::Create {
            node_id: 2,
            ip: "10.0.1.2".to_string(),
            ports: vec![8000, 8001],
            alias: None,
        }
    );
    assert_eq!(report.tally(), "1 attempted, 1 succeeded, 0 failed");
}
