use std::net::{IpAddr, Ipv4Addr};

use ptrmap_common::utils::ip;
use tracing::{debug, info};

use super::ReverseLookup;

/// Reverse lookups through the platform resolver (`getnameinfo`).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

impl SystemResolver {
    pub fn new() -> Self {
        Self
    }
}

/// `getnameinfo` hands back the numeric address when no name exists.
fn hostname_from_answer(ip: Ipv4Addr, answer: &str) -> Option<String> {
    if answer.trim() == ip.to_string() {
        return None;
    }
    ip::normalize_hostname(answer)
}

impl ReverseLookup for SystemResolver {
    fn lookup(&self, ip: Ipv4Addr) -> Option<String> {
        match dns_lookup::lookup_addr(&IpAddr::V4(ip)) {
            Ok(answer) => match hostname_from_answer(ip, &answer) {
                Some(hostname) => {
                    info!("Reverse DNS lookup on {ip} using the system resolver returned hostname: {hostname}");
                    Some(hostname)
                }
                None => {
                    debug!("No PTR record for {ip}");
                    None
                }
            },
            Err(e) => {
                debug!("Reverse lookup for {ip} failed: {e}");
                None
            }
        }
    }

    fn describe(&self) -> String {
        String::from("system resolver")
    }
}
