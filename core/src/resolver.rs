//! Reverse lookups, one address at a time.
//!
//! Every failure mode (NXDOMAIN, timeout, unreachable server, garbage reply)
//! collapses into `None`. Callers cannot tell a timeout from a missing PTR
//! record; the reason is only visible in `debug` traces.

use std::io;
use std::net::Ipv4Addr;

use ptrmap_common::config::Config;
use ptrmap_common::network::range::SubnetBlock;
use ptrmap_common::network::target::ResolutionTarget;

mod server;
mod system;

pub use server::DnsServerResolver;
pub use system::SystemResolver;

/// An address and the hostname it resolved to, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHost {
    pub ip: Ipv4Addr,
    pub hostname: Option<String>,
}

impl ResolvedHost {
    pub fn new(ip: Ipv4Addr, hostname: Option<String>) -> Self {
        Self { ip, hostname }
    }

    /// The hostname, unless the lookup failed or came back empty.
    pub fn name(&self) -> Option<&str> {
        self.hostname.as_deref().filter(|name| !name.is_empty())
    }

    pub fn is_resolved(&self) -> bool {
        self.name().is_some()
    }
}

/// Resolves an IPv4 address to a hostname through a PTR lookup.
pub trait ReverseLookup {
    fn lookup(&self, ip: Ipv4Addr) -> Option<String>;

    /// Human readable name of whatever answers the lookups.
    fn describe(&self) -> String;
}

/// Receives progress while the pipeline walks the range.
///
/// All methods default to doing nothing.
pub trait LookupObserver {
    fn on_start(&mut self, _blocks: &[SubnetBlock]) {}

    fn on_lookup(&mut self, _host: &ResolvedHost) {}

    fn on_block(&mut self, _block: &SubnetBlock, _resolved: usize) {}
}

/// Observer that ignores every event.
pub struct Silent;

impl LookupObserver for Silent {}

impl<F> LookupObserver for F
where
    F: FnMut(&ResolvedHost),
{
    fn on_lookup(&mut self, host: &ResolvedHost) {
        self(host)
    }
}

/// Builds the resolver matching the configured target.
pub fn from_config(config: &Config) -> io::Result<Box<dyn ReverseLookup>> {
    match config.target {
        ResolutionTarget::Server(addr) => Ok(Box::new(DnsServerResolver::new(
            addr,
            config.dns_port,
            config.timeout,
        )?)),
        ResolutionTarget::System => Ok(Box::new(SystemResolver::new())),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hostname_is_unresolved() {
        let ip = Ipv4Addr::new(10, 0, 0, 1);
        assert!(!ResolvedHost::new(ip, Some(String::new())).is_resolved());
        assert!(!ResolvedHost::new(ip, None).is_resolved());
        assert_eq!(ResolvedHost::new(ip, Some("host1".into())).name(), Some("host1"));
    }

    #[test]
    fn closures_observe_lookups() {
        let mut seen: Vec<Ipv4Addr> = Vec::new();
        {
            let mut observer = |host: &ResolvedHost| seen.push(host.ip);
            observer.on_lookup(&ResolvedHost::new(Ipv4Addr::LOCALHOST, None));
        }
        assert_eq!(seen, vec![Ipv4Addr::LOCALHOST]);
    }

    #[test]
    fn from_config_picks_system_resolver() {
        let config = Config::new("10.0.0.0/30", "10.0.0.0/30", ResolutionTarget::System);
        let resolver = from_config(&config).unwrap();
        assert_eq!(resolver.describe(), "system resolver");
    }

    #[test]
    fn from_config_picks_server_resolver() {
        let target = ResolutionTarget::Server(Ipv4Addr::LOCALHOST);
        let config = Config::new("10.0.0.0/30", "10.0.0.0/30", target);
        let resolver = from_config(&config).unwrap();
        assert_eq!(resolver.describe(), "DNS server 127.0.0.1:53");
    }
}
