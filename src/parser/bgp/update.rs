/*!
UPDATE message decoding (RFC 4271 §4.3): withdrawn routes, path attributes,
and announced NLRI, each length-prefixed and framed back to back.
*/
use bytes::Bytes;

use crate::error::ParserError;
use crate::models::{Afi, AsnLength, NetworkPrefix, UpdateMessage};
use crate::parser::bgp::attributes::parse_attributes;
use crate::parser::utils::{read_n_bytes, ReadUtils};

/// Classic (non-MP) NLRI/withdrawn-routes encoding: a back-to-back sequence
/// of `prefix_bits(u8) | ceil(prefix_bits/8) bytes` entries, always IPv4
/// since MP_REACH/MP_UNREACH carry every other address family.
fn parse_prefix_section(mut data: Bytes) -> Result<Vec<NetworkPrefix>, ParserError> {
    let mut prefixes = Vec::new();
    while !data.is_empty() {
        let prefix_bits = data.read_u8()?;
        let byte_len = NetworkPrefix::wire_octets(prefix_bits);
        let addr_bytes = read_n_bytes(&mut data, byte_len)?;
        prefixes.push(NetworkPrefix::from_wire(Afi::Ipv4, prefix_bits, &addr_bytes)?);
    }
    Ok(prefixes)
}

pub fn parse_update_message(mut data: Bytes) -> Result<UpdateMessage, ParserError> {
    let withdrawn_routes_length = data.read_u16()?;
    let withdrawn_bytes = read_n_bytes(&mut data, withdrawn_routes_length as usize)?;
    let withdrawn_routes = parse_prefix_section(withdrawn_bytes)?;

    let path_attributes_length = data.read_u16()?;
    let attr_bytes = read_n_bytes(&mut data, path_attributes_length as usize)?;
    // AGGREGATOR (type 7) is always 2-octet ASN by definition; AS4_AGGREGATOR
    // (type 18) and AS4_PATH always resolve their own 4-octet width.
    let path_attributes = parse_attributes(attr_bytes, AsnLength::Bits16)?;

    let nlri = parse_prefix_section(data)?;

    Ok(UpdateMessage {
        withdrawn_routes_length,
        withdrawn_routes,
        path_attributes_length,
        path_attributes,
        nlri,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_update_announce_only() {
        let mut bytes = vec![0x00, 0x00]; // withdrawn_routes_length = 0
        bytes.extend_from_slice(&0u16.to_be_bytes()); // path_attributes_length = 0
        bytes.push(24); // nlri prefix
        bytes.extend_from_slice(&[10, 0, 0]);

        let update = parse_update_message(Bytes::from(bytes)).unwrap();
        assert!(update.withdrawn_routes.is_empty());
        assert_eq!(update.nlri.len(), 1);
        assert_eq!(update.nlri[0].to_string(), "10.0.0.0/24");
        assert_eq!(update.subtype(), crate::models::UpdateSubtype::Announce);
    }

    #[test]
    fn test_parse_update_withdrawal_only() {
        let mut bytes = vec![];
        bytes.extend_from_slice(&3u16.to_be_bytes()); // withdrawn_routes_length
        bytes.push(16);
        bytes.extend_from_slice(&[172, 16]);
        bytes.extend_from_slice(&0u16.to_be_bytes()); // path_attributes_length

        let update = parse_update_message(Bytes::from(bytes)).unwrap();
        assert_eq!(update.withdrawn_routes.len(), 1);
        assert!(update.nlri.is_empty());
        assert_eq!(update.subtype(), crate::models::UpdateSubtype::Withdrawal);
    }

    #[test]
    fn test_parse_update_empty_is_keepalive_like() {
        let bytes = vec![0x00, 0x00, 0x00, 0x00];
        let update = parse_update_message(Bytes::from(bytes)).unwrap();
        assert_eq!(update.subtype(), crate::models::UpdateSubtype::None);
    }
}
