use std::net::Ipv4Addr;

/// Builds the `in-addr.arpa` name queried for a PTR record.
pub fn reverse_address_to_ptr(ip_addr: &Ipv4Addr) -> String {
    let [a, b, c, d] = ip_addr.octets();
    format!("{d}.{c}.{b}.{a}.in-addr.arpa")
}

/// Strips the trailing root label and surrounding whitespace from a hostname.
pub fn normalize_hostname(name: &str) -> Option<String> {
    let trimmed: &str = name.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
