use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Outcome of one TCP connect attempt against a single (host, port) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortState {
    Open,
    Closed,
    Error,
}

impl fmt::Display for PortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortState::Open => write!(f, "open"),
            PortState::Closed => write!(f, "closed"),
            PortState::Error => write!(f, "error"),
        }
    }
}

/// Aggregate sweep outcome and progress counters.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SweepResults {
    pub probed_total: u64,
    pub probed_done: u64,
    pub open_count: u64,
    /// Host -> ascending list of reachable ports. Hosts with no open ports
    /// never gain an entry.
    pub open_ports: BTreeMap<String, Vec<u16>>,
    /// Set when the sweep was stopped before completing; partial results
    /// must not be reported.
    pub cancelled: bool,
}
