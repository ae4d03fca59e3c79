/*!
MP_REACH_NLRI (type 14) and MP_UNREACH_NLRI (type 15) decoding (RFC 4760).
*/
use std::net::{Ipv4Addr, Ipv6Addr};

use bytes::{Buf, Bytes};

use crate::error::ParserError;
use crate::models::{Afi, MpReachNlri, MpUnreachNlri, NetworkPrefix, NextHopAddress};
use crate::parser::utils::{read_n_bytes, ReadUtils};

fn ipv6_from_slice(bytes: &[u8]) -> Ipv6Addr {
    let mut octets = [0u8; 16];
    octets.copy_from_slice(bytes);
    Ipv6Addr::from(octets)
}

fn decode_next_hops(afi: Afi, bytes: &[u8]) -> Result<Vec<NextHopAddress>, ParserError> {
    match afi {
        Afi::Ipv4 => {
            if bytes.len() % 4 != 0 {
                return Err(ParserError::DecodeError(format!(
                    "IPv4 next-hop length {} is not a multiple of 4",
                    bytes.len()
                )));
            }
            Ok(bytes
                .chunks(4)
                .map(|c| NextHopAddress::Ipv4(Ipv4Addr::new(c[0], c[1], c[2], c[3])))
                .collect())
        }
        Afi::Ipv6 => match bytes.len() {
            16 => Ok(vec![NextHopAddress::Ipv6(ipv6_from_slice(bytes))]),
            32 => Ok(vec![NextHopAddress::Ipv6LinkLocal(
                ipv6_from_slice(&bytes[..16]),
                ipv6_from_slice(&bytes[16..]),
            )]),
            other => Err(ParserError::DecodeError(format!(
                "IPv6 next-hop length {other} is neither 16 nor 32"
            ))),
        },
    }
}

fn parse_prefix_list(data: &mut Bytes, afi: Afi) -> Result<Vec<NetworkPrefix>, ParserError> {
    let mut prefixes = Vec::new();
    while data.has_remaining() {
        let prefix_bits = data.read_u8()?;
        let byte_len = NetworkPrefix::wire_octets(prefix_bits);
        let addr_bytes = read_n_bytes(data, byte_len)?;
        prefixes.push(NetworkPrefix::from_wire(afi, prefix_bits, &addr_bytes)?);
    }
    Ok(prefixes)
}

pub fn parse_mp_reach_nlri(mut data: Bytes) -> Result<MpReachNlri, ParserError> {
    let afi = data.read_afi()?;
    let safi = data.read_safi()?;
    let next_hop_len = data.read_u8()? as usize;
    let hop_bytes = read_n_bytes(&mut data, next_hop_len)?;
    let next_hops = decode_next_hops(afi, hop_bytes.as_ref())?;
    let _reserved = data.read_u8()?;
    let prefixes = parse_prefix_list(&mut data, afi)?;
    Ok(MpReachNlri {
        afi,
        safi,
        next_hops,
        prefixes,
    })
}

pub fn parse_mp_unreach_nlri(mut data: Bytes) -> Result<MpUnreachNlri, ParserError> {
    let afi = data.read_afi()?;
    let safi = data.read_safi()?;
    let prefixes = parse_prefix_list(&mut data, afi)?;
    Ok(MpUnreachNlri { afi, safi, prefixes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mp_reach_nlri_ipv4() {
        let mut bytes = vec![0x00, 0x01]; // afi=1 (ipv4)
        bytes.push(0x01); // safi=1 (unicast)
        bytes.push(4); // next_hop_len
        bytes.extend_from_slice(&[192, 0, 2, 1]); // next hop
        bytes.push(0); // reserved
        bytes.push(24); // prefix len
        bytes.extend_from_slice(&[10, 0, 0]); // prefix bytes

        let parsed = parse_mp_reach_nlri(Bytes::from(bytes)).unwrap();
        assert_eq!(parsed.next_hops, vec![NextHopAddress::Ipv4(Ipv4Addr::new(192, 0, 2, 1))]);
        assert_eq!(parsed.prefixes.len(), 1);
        assert_eq!(parsed.prefixes[0].to_string(), "10.0.0.0/24");
    }

    #[test]
    fn test_parse_mp_unreach_nlri_no_next_hop_section() {
        let mut bytes = vec![0x00, 0x02]; // afi=2 (ipv6)
        bytes.push(0x01); // safi
        bytes.push(32); // prefix len
        bytes.extend_from_slice(&[0x20, 0x01, 0x0d, 0xb8]); // 4 bytes for /32
        let parsed = parse_mp_unreach_nlri(Bytes::from(bytes)).unwrap();
        assert_eq!(parsed.prefixes[0].to_string(), "2001:db8::/32");
    }

    #[test]
    fn test_invalid_ipv6_next_hop_length_errors() {
        let mut bytes = vec![0x00, 0x02, 0x01, 5];
        bytes.extend_from_slice(&[0; 5]);
        bytes.push(0);
        assert!(parse_mp_reach_nlri(Bytes::from(bytes)).is_err());
    }
}
