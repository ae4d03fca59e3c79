use ipnet::IpNet;
use std::fmt::{Debug, Display, Formatter};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::error::ParserError;
use crate::models::Afi;

/// A route prefix in CIDR form: `(prefix_length, address bytes)`.
///
/// Wrapping [`ipnet::IpNet`] gives `Display`/`FromStr` and correct, standard
/// compressed IPv6 CIDR formatting for free. The reference implementation
/// this system reimplements builds IPv6 prefix strings a byte at a time with
/// `hex()` and has an off-by-one on the final segment; going through `ipnet`
/// avoids reproducing that bug.
#[derive(Copy, Clone, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkPrefix {
    pub prefix: IpNet,
}

impl NetworkPrefix {
    pub fn new(prefix: IpNet) -> NetworkPrefix {
        NetworkPrefix { prefix }
    }

    pub fn prefix_bits(&self) -> u8 {
        self.prefix.prefix_len()
    }

    /// Wire octet count for a prefix length: `ceil(prefix_bits / 8)`.
    pub const fn wire_octets(prefix_bits: u8) -> usize {
        (prefix_bits as usize + 7) / 8
    }

    /// Decodes a `(prefix_bits, ceil(prefix_bits/8) address bytes)` pair as
    /// found in withdrawn routes, NLRI, and MP_(UN)REACH_NLRI tails.
    ///
    /// `bytes` must hold at least `wire_octets(prefix_bits)` bytes; the
    /// caller bounds-checks against the enclosing region before calling
    /// this.
    pub fn from_wire(afi: Afi, prefix_bits: u8, bytes: &[u8]) -> Result<Self, ParserError> {
        let byte_len = Self::wire_octets(prefix_bits);
        if bytes.len() < byte_len {
            return Err(ParserError::DecodeError(format!(
                "route prefix_bits={prefix_bits} needs {byte_len} bytes, got {}",
                bytes.len()
            )));
        }
        let prefix = match afi {
            Afi::Ipv4 => {
                if prefix_bits > 32 {
                    return Err(ParserError::DecodeError(format!(
                        "IPv4 prefix length {prefix_bits} exceeds 32"
                    )));
                }
                let mut octets = [0u8; 4];
                octets[..byte_len].copy_from_slice(&bytes[..byte_len]);
                IpNet::V4(
                    ipnet::Ipv4Net::new(Ipv4Addr::from(octets), prefix_bits)
                        .map_err(|e| ParserError::DecodeError(e.to_string()))?,
                )
            }
            Afi::Ipv6 => {
                if prefix_bits > 128 {
                    return Err(ParserError::DecodeError(format!(
                        "IPv6 prefix length {prefix_bits} exceeds 128"
                    )));
                }
                let mut octets = [0u8; 16];
                octets[..byte_len].copy_from_slice(&bytes[..byte_len]);
                IpNet::V6(
                    ipnet::Ipv6Net::new(Ipv6Addr::from(octets), prefix_bits)
                        .map_err(|e| ParserError::DecodeError(e.to_string()))?,
                )
            }
        };
        Ok(NetworkPrefix::new(prefix))
    }

    /// Re-encodes as `(prefix_bits byte, ceil(prefix_bits/8) address bytes)`,
    /// the inverse of [`NetworkPrefix::from_wire`].
    pub fn to_wire(&self) -> Vec<u8> {
        let bits = self.prefix_bits();
        let byte_len = Self::wire_octets(bits);
        let mut out = Vec::with_capacity(1 + byte_len);
        out.push(bits);
        match self.prefix {
            IpNet::V4(n) => out.extend_from_slice(&n.addr().octets()[..byte_len]),
            IpNet::V6(n) => out.extend_from_slice(&n.addr().octets()[..byte_len]),
        }
        out
    }
}

impl PartialEq for NetworkPrefix {
    fn eq(&self, other: &Self) -> bool {
        self.prefix == other.prefix
    }
}

impl Debug for NetworkPrefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prefix)
    }
}

impl Display for NetworkPrefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prefix)
    }
}

impl FromStr for NetworkPrefix {
    type Err = ParserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let prefix = IpNet::from_str(s).map_err(|e| ParserError::DecodeError(e.to_string()))?;
        Ok(NetworkPrefix::new(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fromstr() {
        let network_prefix = NetworkPrefix::from_str("192.168.0.0/24").unwrap();
        assert_eq!(
            network_prefix.prefix,
            IpNet::from_str("192.168.0.0/24").unwrap()
        );
    }

    #[test]
    fn test_wire_octets_boundary_table() {
        let cases = [
            (0u8, 0usize),
            (8, 1),
            (9, 2),
            (16, 2),
            (17, 3),
            (24, 3),
            (25, 4),
            (32, 4),
        ];
        for (bits, octets) in cases {
            assert_eq!(NetworkPrefix::wire_octets(bits), octets, "bits={bits}");
        }
    }

    #[test]
    fn test_from_wire_ipv4_zero_pads_low_octets() {
        let prefix = NetworkPrefix::from_wire(Afi::Ipv4, 8, &[10]).unwrap();
        assert_eq!(prefix.to_string(), "10.0.0.0/8");
    }

    #[test]
    fn test_from_wire_ipv4_24() {
        let prefix = NetworkPrefix::from_wire(Afi::Ipv4, 24, &[192, 168, 1]).unwrap();
        assert_eq!(prefix.to_string(), "192.168.1.0/24");
    }

    #[test]
    fn test_roundtrip_to_wire() {
        let prefix = NetworkPrefix::from_str("192.0.2.0/24").unwrap();
        let wire = prefix.to_wire();
        assert_eq!(wire, vec![24, 192, 0, 2]);
        let parsed = NetworkPrefix::from_wire(Afi::Ipv4, wire[0], &wire[1..]).unwrap();
        assert_eq!(parsed, prefix);
    }

    #[test]
    fn test_ipv6_compressed_cidr_formatting() {
        // standard compressed form, not the off-by-one hand-rolled routine
        // this reimplements
        let prefix = NetworkPrefix::from_wire(Afi::Ipv6, 32, &[0x20, 0x01, 0x0d, 0xb8]).unwrap();
        assert_eq!(prefix.to_string(), "2001:db8::/32");
    }

    #[test]
    fn test_from_wire_rejects_truncated_input() {
        let err = NetworkPrefix::from_wire(Afi::Ipv4, 24, &[192, 168]);
        assert!(err.is_err());
    }

    #[test]
    fn test_display() {
        let network_prefix = NetworkPrefix::from_str("192.168.0.0/24").unwrap();
        assert_eq!(network_prefix.to_string(), "192.168.0.0/24");
    }
}
