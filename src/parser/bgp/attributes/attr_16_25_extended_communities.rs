//! BGP Extended Communities Attribute
//!
//! RFC4360: <https://datatracker.ietf.org/doc/html/rfc4360#section-4.5>
//! IANA Codes: <https://www.iana.org/assignments/bgp-extended-communities/bgp-extended-communities.xhtml>
use bytes::{Buf, Bytes};

use crate::error::ParserError;
use crate::models::ExtendedCommunity;

/// EXTENDED_COMMUNITIES: a sequence of 8-byte `type(1) | subtype(1) |
/// global_admin(2) | local_admin(4)` entries.
pub fn parse_extended_communities(mut data: Bytes) -> Result<Vec<ExtendedCommunity>, ParserError> {
    if data.remaining() % 8 != 0 {
        return Err(ParserError::DecodeError(format!(
            "EXTENDED_COMMUNITIES length {} is not a multiple of 8",
            data.remaining()
        )));
    }
    let mut communities = Vec::with_capacity(data.remaining() / 8);
    while data.has_remaining() {
        let community_type = data.get_u8();
        let community_subtype = data.get_u8();
        let global_admin = data.get_u16();
        let local_admin = data.get_u32();
        communities.push(ExtendedCommunity::new(
            community_type,
            community_subtype,
            global_admin,
            local_admin,
        ));
    }
    Ok(communities)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extended_communities_route_target() {
        let mut bytes = vec![0x00, 0x02];
        bytes.extend_from_slice(&64500u16.to_be_bytes());
        bytes.extend_from_slice(&1u32.to_be_bytes());
        let communities = parse_extended_communities(Bytes::from(bytes)).unwrap();
        assert_eq!(communities, vec![ExtendedCommunity::new(0x00, 0x02, 64500, 1)]);
        assert_eq!(communities[0].label(), Some("route-target"));
    }

    #[test]
    fn test_parse_extended_communities_bad_length() {
        assert!(parse_extended_communities(Bytes::from_static(&[0; 7])).is_err());
    }
}
