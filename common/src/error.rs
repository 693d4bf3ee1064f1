use std::net::Ipv4Addr;

use thiserror::Error;

/// Raised while turning the user's CIDR bounds into address blocks.
///
/// Both variants are fatal: the run stops before a single lookup is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("Invalid CIDR range format '{input}': {reason}")]
    InvalidCidr { input: String, reason: String },

    #[error("End network {end} precedes start network {start}")]
    Reversed { start: Ipv4Addr, end: Ipv4Addr },
}
