use thiserror::Error;

/// Input validation failures that stop a sweep before any probe is issued.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("base prefix `{0}` does not form a valid IPv4 address")]
    InvalidPrefix(String),
    #[error("start host number {0} must be less than or equal to end host number {1}")]
    HostRangeInverted(u32, u32),
    #[error("port {0} is outside the valid range 1-65535")]
    PortOutOfRange(u32),
    #[error("start port {0} must be less than or equal to end port {1}")]
    PortRangeInverted(u32, u32),
}
