/**
 * reconcile.rs
 * Allocation reconciler: turns a target IP set and port list into remote
 * create/delete calls, with dry-run preview and partial-failure tolerance
 *
 * Policy:
 * - Dry run computes the preview only; zero remote calls.
 * - Add: one create_allocations call per target IP carrying the full port
 *   list and the IP's alias.
 * - Delete: one delete_allocation call per (IP, port) that resolves to an
 *   allocation id; a port with no allocation on that IP is a no-op, not a
 *   failure. N IPs x M ports can trip provider rate limits.
 * - One call's failure never prevents attempting the rest. Outcomes are
 *   folded into a single Report accumulator after the batch completes.
 * - An interrupt flag stops new calls from being issued; in-flight calls
 *   complete or fail naturally.
 */

use futures_util::stream::{self, StreamExt};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::api::PanelApi;
use crate::index::IpIndex;

/// Mutation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Add => write!(f, "add"),
            Action::Delete => write!(f, "delete"),
        }
    }
}

/// One preview line: what the reconciler intends for a target IP
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewRow {
    pub node_id: u32,
    pub node_fqdn: String,
    pub ip: String,
    pub alias: Option<String>,
    pub ports: Vec<u16>,
}

/// A single failed mutation, kept for diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct MutationFailure {
    pub node_id: u32,
    pub ip: String,
    /// None for add calls, which carry the whole port list
    pub port: Option<u16>,
    pub error: String,
}

/// Outcome of one reconciliation run
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub rows: Vec<PreviewRow>,
    pub attempted: u32,
    pub succeeded: u32,
    pub failed: u32,
    pub failures: Vec<MutationFailure>,
}

impl Report {
    pub fn tally(&self) -> String {
        format!(
            "{} attempted, {} succeeded, {} failed",
            self.attempted, self.succeeded, self.failed
        )
    }
}

enum Job {
    Create {
        node_id: u32,
        ip: String,
        alias: Option<String>,
    },
    Delete {
        node_id: u32,
        ip: String,
        port: u16,
        allocation_id: u64,
    },
}

/// Allocation reconciler with bounded mutation concurrency
pub struct Reconciler {
    concurrency: usize,
    interrupted: Arc<AtomicBool>,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}

impl Reconciler {
    /// Default concurrency is deliberately low; panels rate-limit eagerly.
    pub fn new() -> Self {
        Self {
            concurrency: 4,
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Share an interrupt flag; once set, no new calls are issued.
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupted = flag;
        self
    }

    /// Build the preview rows for a target set without touching the remote.
    pub fn preview(index: &IpIndex, targets: &[String], ports: &[u16]) -> Vec<PreviewRow> {
        targets
            .iter()
            .filter_map(|ip| {
                index.get(ip).map(|entry| PreviewRow {
                    node_id: entry.node_id,
                    node_fqdn: entry.node_fqdn.clone(),
                    ip: ip.clone(),
                    alias: entry.alias.clone(),
                    ports: ports.to_vec(),
                })
            })
            .collect()
    }

    /// Reconcile the target IPs against the remote.
    ///
    /// Never fails as a whole: per-call errors are collected in the Report.
    pub async fn reconcile(
        &self,
        api: &dyn PanelApi,
        index: &IpIndex,
        targets: &[String],
        ports: &[u16],
        action: Action,
        dry_run: bool,
    ) -> Report {
        let mut report = Report {
            rows: Self::preview(index, targets, ports),
            ..Default::default()
        };

        if dry_run {
            return report;
        }

        let mut jobs = Vec::new();
        for ip in targets {
            let entry = match index.get(ip) {
                Some(entry) => entry,
                None => continue,
            };

            match action {
                Action::Add => jobs.push(Job::Create {
                    node_id: entry.node_id,
                    ip: ip.clone(),
                    alias: entry.alias.clone(),
                }),
                Action::Delete => {
                    for &port in ports {
                        // A port with no allocation here is a no-op
                        if let Some(&allocation_id) = entry.ports.get(&port) {
                            jobs.push(Job::Delete {
                                node_id: entry.node_id,
                                ip: ip.clone(),
                                port,
                                allocation_id,
                            });
                        } else {
                            debug!(ip = ip.as_str(), port, "no allocation on port, skipping");
                        }
                    }
                }
            }
        }

        let interrupted = &self.interrupted;
        let outcomes: Vec<_> = stream::iter(jobs.into_iter().map(|job| async move {
            if interrupted.load(Ordering::SeqCst) {
                return None;
            }
            Some(match job {
                Job::Create { node_id, ip, alias } => {
                    let result = api
                        .create_allocations(node_id, &ip, ports, alias.as_deref())
                        .await;
                    (node_id, ip, None, result)
                }
                Job::Delete {
                    node_id,
                    ip,
                    port,
                    allocation_id,
                } => {
                    let result = api.delete_allocation(node_id, allocation_id).await;
                    (node_id, ip, Some(port), result)
                }
            })
        }))
        .buffer_unordered(self.concurrency)
        .collect()
        .await;

        // Single aggregation point for the whole batch
        for (node_id, ip, port, result) in outcomes.into_iter().flatten() {
            report.attempted += 1;
            match result {
                Ok(()) => report.succeeded += 1,
                Err(e) => {
                    report.failed += 1;
                    report.failures.push(MutationFailure {
                        node_id,
                        ip,
                        port,
                        error: e.to_string(),
                    });
                }
            }
        }

        report
    }
}
