use std::time::Duration;

use crate::error::ScanError;
use crate::hosts::{self, HostRange};

/// Raw sweep parameters as collected from the caller, prior to validation.
///
/// Port bounds are carried as `u32` so out-of-range values reach
/// [`SweepConfig::plan`] and are rejected with a typed error instead of
/// failing at parse time.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub prefix: String,
    pub start_host: u32,
    pub end_host: u32,
    pub start_port: u32,
    pub end_port: u32,
    pub timeout: Duration,
    pub concurrency: usize,
}

/// A validated sweep: the expanded host range plus the concrete port list.
#[derive(Debug, Clone)]
pub struct SweepPlan {
    pub hosts: HostRange,
    pub ports: Vec<u16>,
    pub timeout: Duration,
    pub concurrency: usize,
}

impl SweepConfig {
    /// Validate every input rule and produce a runnable plan.
    ///
    /// Rules: the base prefix must compose into a syntactically valid IPv4
    /// address, the host bounds must not be inverted, and both ports must
    /// lie in 1..=65535 with `start_port <= end_port`. No probe is issued
    /// unless all of them hold.
    pub fn plan(&self) -> Result<SweepPlan, ScanError> {
        hosts::validate_prefix(&self.prefix)?;
        if self.start_host > self.end_host {
            return Err(ScanError::HostRangeInverted(self.start_host, self.end_host));
        }
        for port in [self.start_port, self.end_port] {
            if port < 1 || port > 65535 {
                return Err(ScanError::PortOutOfRange(port));
            }
        }
        if self.start_port > self.end_port {
            return Err(ScanError::PortRangeInverted(self.start_port, self.end_port));
        }

        let ports: Vec<u16> = (self.start_port as u16..=self.end_port as u16).collect();
        Ok(SweepPlan {
            hosts: HostRange::new(self.prefix.clone(), self.start_host, self.end_host),
            ports,
            timeout: self.timeout,
            concurrency: self.concurrency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SweepConfig {
        SweepConfig {
            prefix: "10.0.0.".to_string(),
            start_host: 1,
            end_host: 2,
            start_port: 80,
            end_port: 81,
            timeout: Duration::from_millis(1000),
            concurrency: 128,
        }
    }

    #[test]
    fn valid_input_produces_plan() {
        let plan = config().plan().expect("plan ok");
        assert_eq!(plan.hosts.len(), 2);
        assert_eq!(plan.ports, vec![80, 81]);
    }

    #[test]
    fn bad_prefix_is_rejected() {
        let mut c = config();
        c.prefix = "10.0.0".to_string();
        assert_eq!(
            c.plan().unwrap_err(),
            ScanError::InvalidPrefix("10.0.0".to_string())
        );
    }

    #[test]
    fn inverted_host_range_is_rejected() {
        let mut c = config();
        c.start_host = 10;
        c.end_host = 5;
        assert_eq!(c.plan().unwrap_err(), ScanError::HostRangeInverted(10, 5));
    }

    #[test]
    fn port_above_65535_is_rejected() {
        let mut c = config();
        c.start_port = 70000;
        assert_eq!(c.plan().unwrap_err(), ScanError::PortOutOfRange(70000));
    }

    #[test]
    fn port_zero_is_rejected() {
        let mut c = config();
        c.start_port = 0;
        assert_eq!(c.plan().unwrap_err(), ScanError::PortOutOfRange(0));
    }

    #[test]
    fn inverted_port_range_is_rejected() {
        let mut c = config();
        c.start_port = 443;
        c.end_port = 80;
        assert_eq!(c.plan().unwrap_err(), ScanError::PortRangeInverted(443, 80));
    }
}
