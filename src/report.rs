use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::OffsetDateTime;

use crate::types::SweepResults;

/// Destination the report is written to unless the caller overrides it.
pub const DEFAULT_REPORT_PATH: &str = "report.json";

/// Final persisted summary of reachable ports per host.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub scan_date: String,
    pub open_ports: BTreeMap<String, Vec<u16>>,
}

/// Build a report from finished sweep results.
///
/// Hosts with no reachable ports are dropped. Returns `None` when nothing
/// remains; callers must then skip persistence entirely.
pub fn assemble(results: &SweepResults) -> Option<Report> {
    let mut open_ports = results.open_ports.clone();
    open_ports.retain(|_, ports| !ports.is_empty());
    if open_ports.is_empty() {
        return None;
    }
    Some(Report {
        scan_date: scan_date_now(),
        open_ports,
    })
}

impl Report {
    /// Write the report as pretty-printed JSON, overwriting prior content.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref()).with_context(|| {
            format!("failed to create report file: {}", path.as_ref().display())
        })?;
        serde_json::to_writer_pretty(file, self).with_context(|| {
            format!("failed to serialize report to {}", path.as_ref().display())
        })?;
        Ok(())
    }
}

/// Current UTC wall clock as `YYYY-MM-DD HH:MM:SS`.
fn scan_date_now() -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    OffsetDateTime::now_utc()
        .format(&format)
        .unwrap_or_else(|_| String::from("1970-01-01 00:00:00"))
}
