//! IP address syntax checks
//!
//! Only syntax is validated: no canonicalization, so `::1` and `0:0:0:0:0:0:0:1` stay
//! distinct keys everywhere else in the crate.

use std::net::{Ipv4Addr, Ipv6Addr};

/// True when `text` is a dotted-quad IPv4 address or an IPv6 address, optionally with a
/// zone index (`fe80::1%lo0`).
pub fn is_ip(text: &str) -> bool {
    is_ipv4(text) || is_ipv6(text)
}

pub fn is_ipv4(text: &str) -> bool {
    text.parse::<Ipv4Addr>().is_ok()
}

pub fn is_ipv6(text: &str) -> bool {
    let (addr, zone) = match text.split_once('%') {
        Some((addr, zone)) => (addr, Some(zone)),
        None => (text, None),
    };
    if let Some(zone) = zone {
        if zone.is_empty() || !zone.chars().all(|c| c.is_ascii_alphanumeric()) {
            return false;
        }
    }
    addr.parse::<Ipv6Addr>().is_ok()
}
