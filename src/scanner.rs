use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::probe;
use crate::types::{PortState, SweepResults};

/// Sweep every (host, port) pair in the matrix using asynchronous TCP
/// connects with a concurrency limit.
///
/// - Limits concurrent connect attempts using a `Semaphore`.
/// - Each pair is probed exactly once; open pairs accumulate into a shared
///   vector and are grouped per host after all tasks have joined.
/// - Per-host port lists are sorted ascending before being returned, so the
///   outcome never depends on task completion order.
/// - Ctrl-C cancels the sweep; a cancelled sweep carries `cancelled = true`
///   and its partial results must not be persisted.
pub async fn sweep(
    hosts: &[String],
    ports: &[u16],
    concurrency: usize,
    timeout: Duration,
) -> Result<SweepResults> {
    sweep_internal(hosts, ports, concurrency, timeout, None).await
}

/// Variant that accepts a `CancellationToken` to allow external cancellation.
pub async fn sweep_with_cancel(
    hosts: &[String],
    ports: &[u16],
    concurrency: usize,
    timeout: Duration,
    cancel: CancellationToken,
) -> Result<SweepResults> {
    sweep_internal(hosts, ports, concurrency, timeout, Some(cancel)).await
}

async fn sweep_internal(
    hosts: &[String],
    ports: &[u16],
    concurrency: usize,
    timeout: Duration,
    cancel_opt: Option<CancellationToken>,
) -> Result<SweepResults> {
    let total = hosts.len() as u64 * ports.len() as u64;
    let probed_done = Arc::new(AtomicU64::new(0));
    let open_count = Arc::new(AtomicU64::new(0));
    let opens = Arc::new(Mutex::new(Vec::<(String, u16)>::new()));

    let sem = Arc::new(Semaphore::new(concurrency.clamp(1, 5_000)));
    let mut set = JoinSet::new();
    let cancel = cancel_opt.unwrap_or_default();

    // Ctrl-C cancels the sweep.
    let cancel_ctrlc = cancel.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        cancel_ctrlc.cancel();
    });

    for host in hosts {
        if cancel.is_cancelled() {
            break;
        }
        for &port in ports {
            if cancel.is_cancelled() {
                break;
            }
            let permit = sem
                .clone()
                .acquire_owned()
                .await
                .expect("semaphore in scope");
            let host = host.clone();
            let probed_done = probed_done.clone();
            let open_count = open_count.clone();
            let opens = opens.clone();
            let cancel = cancel.clone();

            set.spawn(async move {
                let _permit = permit; // keep permit until the probe completes

                if cancel.is_cancelled() {
                    return;
                }

                if let PortState::Open = probe::probe(&host, port, timeout).await {
                    open_count.fetch_add(1, Ordering::Relaxed);
                    let mut guard = opens.lock().await;
                    guard.push((host, port));
                }
                probed_done.fetch_add(1, Ordering::Relaxed);
            });
        }
    }

    while let Some(_res) = set.join_next().await {}

    let pairs = match Arc::try_unwrap(opens) {
        Ok(m) => m.into_inner(),
        // All tasks joined above; if a clone still lingers, copy the data out.
        Err(arc) => arc.lock().await.clone(),
    };

    let mut open_ports: BTreeMap<String, Vec<u16>> = BTreeMap::new();
    for (host, port) in pairs {
        open_ports.entry(host).or_default().push(port);
    }
    for list in open_ports.values_mut() {
        list.sort_unstable();
    }

    let cancelled = cancel.is_cancelled();
    if cancelled {
        debug!("sweep stopped before covering the full matrix");
    }

    Ok(SweepResults {
        probed_total: total,
        probed_done: probed_done.load(Ordering::Relaxed),
        open_count: open_count.load(Ordering::Relaxed),
        open_ports,
        cancelled,
    })
}
