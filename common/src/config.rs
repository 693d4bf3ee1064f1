use std::time::Duration;

use crate::network::range::EndBound;
use crate::network::target::ResolutionTarget;

pub const DEFAULT_DNS_PORT: u16 = 53;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Everything a mapping run needs, built once from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    /// First CIDR bound, parsed non-strictly.
    pub start_cidr: String,
    /// Last CIDR bound, parsed non-strictly.
    pub end_cidr: String,
    /// Whether the end block is enumerated up to its network or last address.
    pub end_bound: EndBound,
    pub target: ResolutionTarget,
    /// Port used when querying a specific DNS server.
    pub dns_port: u16,
    /// How long one lookup may block before it counts as unresolved.
    pub timeout: Duration,
    /// Fixes the random source used for colors and layout.
    pub seed: Option<u64>,
    pub no_banner: bool,
    pub quiet: u8,
}

impl Config {
    pub fn new(
        start_cidr: impl Into<String>,
        end_cidr: impl Into<String>,
        target: ResolutionTarget,
    ) -> Self {
        Self {
            start_cidr: start_cidr.into(),
            end_cidr: end_cidr.into(),
            end_bound: EndBound::default(),
            target,
            dns_port: DEFAULT_DNS_PORT,
            timeout: DEFAULT_TIMEOUT,
            seed: None,
            no_banner: false,
            quiet: 0,
        }
    }
}
