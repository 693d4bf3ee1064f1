//! # IPv4 Ranges and CIDR Summarization
//!
//! Turns the two CIDR bounds given on the command line into the minimal,
//! ordered list of [`SubnetBlock`]s that covers the address range between them.
//!
//! Bounds are parsed non-strictly: `10.0.0.77/24` is read as `10.0.0.0/24`.

use std::fmt;
use std::net::Ipv4Addr;

use pnet::ipnetwork::Ipv4Network;
use tracing::debug;

use crate::error::RangeError;

/// Represents a continuous range of IPv4 addresses, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Ipv4Addr> + Clone + use<> {
        let start: u32 = u32::from(self.start_addr);
        let end: u32 = u32::from(self.end_addr);
        (start..=end).map(Ipv4Addr::from)
    }

    /// Number of addresses in the range, zero when start > end.
    pub fn len(&self) -> u64 {
        let start: u64 = u64::from(u32::from(self.start_addr));
        let end: u64 = u64::from(u32::from(self.end_addr));
        if start > end { 0 } else { end - start + 1 }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Splits the range into the fewest CIDR blocks that cover it exactly.
    pub fn summarize(&self) -> Result<Vec<SubnetBlock>, RangeError> {
        summarize(self.start_addr, self.end_addr)
    }
}

/// A CIDR block produced by range summarization.
///
/// The network address always has its host bits cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubnetBlock {
    network: Ipv4Addr,
    prefix: u8,
}

impl SubnetBlock {
    /// Creates the block containing `ip` with the given prefix length.
    pub fn new(ip: Ipv4Addr, prefix: u8) -> Result<Self, RangeError> {
        if prefix > 32 {
            return Err(RangeError::InvalidCidr {
                input: format!("{ip}/{prefix}"),
                reason: format!("Invalid prefix: {prefix} > 32"),
            });
        }
        let network = u32::from(ip) & mask(prefix);
        Ok(Self {
            network: Ipv4Addr::from(network),
            prefix,
        })
    }

    pub fn network(&self) -> Ipv4Addr {
        self.network
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.network) | !mask(self.prefix))
    }

    /// Address count, `2^(32 - prefix)`.
    pub fn size(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix))
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        u32::from(ip) & mask(self.prefix) == u32::from(self.network)
    }

    pub fn as_range(&self) -> Ipv4Range {
        Ipv4Range::new(self.network, self.broadcast())
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Ipv4Addr> + Clone + use<> {
        self.as_range().iter()
    }
}

impl fmt::Display for SubnetBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix)
    }
}

/// Which address of the end block closes the range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EndBound {
    /// Stop at the end block's network address.
    NetworkAddress,
    /// Run through the end block's last address.
    #[default]
    LastAddress,
}

fn mask(prefix: u8) -> u32 {
    if prefix == 0 {
        0
    } else {
        u32::MAX << (32 - u32::from(prefix))
    }
}

/// Parses a CIDR string without strictness, keeping host bits out of the result.
///
/// A bare address is read as a `/32`.
pub fn parse_block(input: &str) -> Result<SubnetBlock, RangeError> {
    let network: Ipv4Network =
        input
            .trim()
            .parse()
            .map_err(|e: pnet::ipnetwork::IpNetworkError| RangeError::InvalidCidr {
                input: input.to_string(),
                reason: e.to_string(),
            })?;

    SubnetBlock::new(network.ip(), network.prefix())
}

/// Computes the minimal ordered set of CIDR blocks covering `first..=last`.
pub fn summarize(first: Ipv4Addr, last: Ipv4Addr) -> Result<Vec<SubnetBlock>, RangeError> {
    let mut cursor: u64 = u64::from(u32::from(first));
    let last_u64: u64 = u64::from(u32::from(last));

    if cursor > last_u64 {
        return Err(RangeError::Reversed {
            start: first,
            end: last,
        });
    }

    let mut blocks: Vec<SubnetBlock> = Vec::new();
    while cursor <= last_u64 {
        let remaining: u64 = last_u64 - cursor + 1;
        let aligned_bits: u32 = cursor.trailing_zeros().min(32);
        let fitting_bits: u32 = 63 - remaining.leading_zeros();
        let host_bits: u32 = aligned_bits.min(fitting_bits);

        blocks.push(SubnetBlock {
            network: Ipv4Addr::from(cursor as u32),
            prefix: (32 - host_bits) as u8,
        });
        cursor += 1u64 << host_bits;
    }

    Ok(blocks)
}

/// Parses both bounds and summarizes the range between them.
///
/// The start always begins at its network address; `end_bound` decides
/// whether the end block contributes only its network address or all of it.
pub fn expand(
    start_cidr: &str,
    end_cidr: &str,
    end_bound: EndBound,
) -> Result<Vec<SubnetBlock>, RangeError> {
    let start: SubnetBlock = parse_block(start_cidr)?;
    let end: SubnetBlock = parse_block(end_cidr)?;

    if end.network() < start.network() {
        return Err(RangeError::Reversed {
            start: start.network(),
            end: end.network(),
        });
    }

    let last: Ipv4Addr = match end_bound {
        EndBound::NetworkAddress => end.network(),
        EndBound::LastAddress => end.broadcast(),
    };

    let blocks: Vec<SubnetBlock> = summarize(start.network(), last)?;
    debug!(
        "Summarized {} - {} into {} block(s)",
        start.network(),
        last,
        blocks.len()
    );
    Ok(blocks)
}

/// Total number of addresses across `blocks`.
pub fn address_count(blocks: &[SubnetBlock]) -> u64 {
    blocks.iter().map(SubnetBlock::size).sum()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
