use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use hostsweep::config::SweepConfig;
use hostsweep::report::{self, DEFAULT_REPORT_PATH};
use hostsweep::scanner;
use hostsweep::types::SweepResults;

/// Probe-count threshold above which the sweep size is called out before
/// scanning starts. Large sweeps are allowed, just not launched silently.
const LARGE_SWEEP_PROBES: u64 = 1 << 20;

/// hostsweep — brute-force async TCP connect sweep over an IPv4 host-suffix range.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hostsweep",
    version,
    about = "Brute-force async TCP connect sweep over an IPv4 host-suffix range.",
    long_about = None
)]
struct Cli {
    /// Base address prefix the host numbers are appended to (e.g., 192.168.1.).
    prefix: String,

    /// First host number of the inclusive range.
    start_host: u32,

    /// Last host number of the inclusive range.
    end_host: u32,

    /// First port of the inclusive range (1-65535).
    start_port: u32,

    /// Last port of the inclusive range (1-65535).
    end_port: u32,

    /// Socket connect timeout in milliseconds.
    #[arg(long = "timeout-ms", default_value_t = 1000)]
    timeout_ms: u64,

    /// Max concurrent TCP connect attempts.
    #[arg(long, default_value_t = 128)]
    concurrency: usize,

    /// Report destination, overwritten on every run that finds open ports.
    #[arg(long, default_value = DEFAULT_REPORT_PATH)]
    output: PathBuf,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Every failure path ends with a log line and a normal exit.
    if let Err(e) = run(cli).await {
        error!("sweep aborted: {e:#}");
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = SweepConfig {
        prefix: cli.prefix.clone(),
        start_host: cli.start_host,
        end_host: cli.end_host,
        start_port: cli.start_port,
        end_port: cli.end_port,
        timeout: Duration::from_millis(cli.timeout_ms),
        concurrency: cli.concurrency,
    };

    let plan = match config.plan() {
        Ok(plan) => plan,
        Err(e) => {
            error!(error = %e, "invalid input");
            return Ok(());
        }
    };

    println!("hostsweep configuration:");
    println!("  prefix       : {}", cli.prefix);
    println!("  hosts        : {}-{}", cli.start_host, cli.end_host);
    println!("  ports        : {}-{}", cli.start_port, cli.end_port);
    println!("  concurrency  : {}", plan.concurrency);
    println!("  timeout_ms   : {}", cli.timeout_ms);
    println!("  output       : {}", cli.output.display());

    let hosts: Vec<String> = plan.hosts.iter().collect();
    let probes = hosts.len() as u64 * plan.ports.len() as u64;
    if probes > LARGE_SWEEP_PROBES {
        warn!(probes, "large sweep requested; this may take a while");
    }

    let results = scanner::sweep(&hosts, &plan.ports, plan.concurrency, plan.timeout).await?;

    if results.cancelled {
        warn!("sweep cancelled; discarding partial results");
        return Ok(());
    }

    print_summary(&results);

    match report::assemble(&results) {
        Some(report) => {
            if let Err(e) = report.write(&cli.output) {
                error!("failed to write report: {e:#}");
            } else {
                info!(path = %cli.output.display(), "report generated");
            }
        }
        None => info!("no open ports found; skipping report"),
    }

    Ok(())
}

fn print_summary(results: &SweepResults) {
    println!(
        "\nOpen ports: {} (probed: {}/{})",
        results.open_count, results.probed_done, results.probed_total
    );
    if results.open_ports.is_empty() {
        return;
    }

    let host_w = results
        .open_ports
        .keys()
        .map(|h| h.len())
        .max()
        .unwrap_or(0)
        .max("host".len());
    println!("{:<host_w$}  ports", "host", host_w = host_w);
    for (host, ports) in &results.open_ports {
        let list = ports
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!("{:<host_w$}  {}", host, list, host_w = host_w);
    }
}
