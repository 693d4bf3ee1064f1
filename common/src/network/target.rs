//! # Resolution Target
//!
//! Where reverse lookups are sent. Either a specific DNS server, queried
//! directly over UDP, or whatever the operating system resolver is configured
//! to use.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionTarget {
    /// Query this DNS server directly.
    Server(Ipv4Addr),
    /// Defer to the platform resolver.
    System,
}

impl ResolutionTarget {
    /// Label of the root node that every subnet hangs off.
    pub fn root_label(&self) -> String {
        match self {
            ResolutionTarget::Server(addr) => format!("DNS Server ({addr})"),
            ResolutionTarget::System => String::from("System Resolver"),
        }
    }
}

impl From<Option<Ipv4Addr>> for ResolutionTarget {
    fn from(server: Option<Ipv4Addr>) -> Self {
        server.map_or(ResolutionTarget::System, ResolutionTarget::Server)
    }
}

impl FromStr for ResolutionTarget {
    type Err = String;

    /// Parses `"system"` (case-insensitive) or an IPv4 address.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("system") {
            return Ok(ResolutionTarget::System);
        }

        trimmed
            .parse::<Ipv4Addr>()
            .map(ResolutionTarget::Server)
            .map_err(|e| format!("Invalid DNS server '{trimmed}': {e}"))
    }
}

impl fmt::Display for ResolutionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionTarget::Server(addr) => write!(f, "{addr}"),
            ResolutionTarget::System => write!(f, "system resolver"),
        }
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
    fn test_from_str() {
        assert_eq!(
            ResolutionTarget::from_str("SYSTEM"),
            Ok(ResolutionTarget::System)
        );
        assert_eq!(
            ResolutionTarget::from_str(" 10.0.0.53 "),
            Ok(ResolutionTarget::Server(Ipv4Addr::new(10, 0, 0, 53)))
        );
        assert!(ResolutionTarget::from_str("dns.example").is_err());
        assert!(ResolutionTarget::from_str("::1").is_err());
    }

    #[test]
    fn test_root_label() {
        let server = ResolutionTarget::Server(Ipv4Addr::new(192, 168, 0, 1));
        assert_eq!(server.root_label(), "DNS Server (192.168.0.1)");
        assert_eq!(ResolutionTarget::System.root_label(), "System Resolver");
    }

    #[test]
    fn test_from_option() {
        assert_eq!(ResolutionTarget::from(None), ResolutionTarget::System);
        assert_eq!(
            ResolutionTarget::from(Some(Ipv4Addr::LOCALHOST)),
            ResolutionTarget::Server(Ipv4Addr::LOCALHOST)
        );
    }
}
