//! IP address records.

use std::net::{Ipv4Addr, Ipv6Addr};

use crate::errors::CodecError;

/// Parse a dotted quad into its 4 octets.
pub fn parse_ipv4(text: &str) -> Result<[u8; 4], CodecError> {
    text.parse::<Ipv4Addr>()
        .map(|addr| addr.octets())
        .map_err(|_| CodecError::InvalidIpv4(text.to_string()))
}

/// Parse an IPv6 address (with optional `::` expansion) into 16 bytes.
pub fn parse_ipv6(text: &str) -> Result<[u8; 16], CodecError> {
    text.parse::<Ipv6Addr>()
        .map(|addr| addr.octets())
        .map_err(|_| CodecError::InvalidIpv6(text.to_string()))
}

/// Render 4 octets as a dotted quad.
pub fn format_ipv4(octets: [u8; 4]) -> String {
    Ipv4Addr::from(octets).to_string()
}

/// Render 16 bytes as eight lowercase hex groups, replacing the longest run
/// of two or more zero groups with `::` (the leftmost run on a tie).
///
/// Unlike `Ipv6Addr`'s `Display`, IPv4-mapped addresses stay in hex form.
pub fn format_ipv6(octets: [u8; 16]) -> String {
    let groups: Vec<u16> = octets
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();

    // (start, len) of the longest zero run
    let mut best: Option<(usize, usize)> = None;
    let mut i = 0;
    while i < groups.len() {
        if groups[i] != 0 {
            i += 1;
            continue;
        }
        let start = i;
        while i < groups.len() && groups[i] == 0 {
            i += 1;
        }
        let len = i - start;
        if len >= 2 && best.map_or(true, |(_, best_len)| len > best_len) {
            best = Some((start, len));
        }
    }

    let render = |slice: &[u16]| {
        slice
            .iter()
            .map(|group| format!("{group:x}"))
            .collect::<Vec<_>>()
            .join(":")
    };

    match best {
        Some((start, len)) => format!(
            "{}::{}",
            render(&groups[..start]),
            render(&groups[start + len..])
        ),
        None => render(&groups),
    }
}
