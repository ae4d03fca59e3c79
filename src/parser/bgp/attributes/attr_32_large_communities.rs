use bytes::{Buf, Bytes};

use crate::error::ParserError;
use crate::models::LargeCommunity;

/// LARGE_COMMUNITIES (RFC 8092): a sequence of 12-byte `(global, local1,
/// local2)` triples, each a u32.
pub fn parse_large_communities(mut data: Bytes) -> Result<Vec<LargeCommunity>, ParserError> {
    if data.remaining() % 12 != 0 {
        return Err(ParserError::DecodeError(format!(
            "LARGE_COMMUNITIES length {} is not a multiple of 12",
            data.remaining()
        )));
    }
    let mut communities = Vec::with_capacity(data.remaining() / 12);
    while data.has_remaining() {
        let global_admin = data.get_u32();
        let local_1 = data.get_u32();
        let local_2 = data.get_u32();
        communities.push(LargeCommunity::new(global_admin, local_1, local_2));
    }
    Ok(communities)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_large_communities() {
        let mut bytes = vec![];
        bytes.extend_from_slice(&65535u32.to_be_bytes());
        bytes.extend_from_slice(&666u32.to_be_bytes());
        bytes.extend_from_slice(&0u32.to_be_bytes());
        let communities = parse_large_communities(Bytes::from(bytes)).unwrap();
        assert_eq!(communities, vec![LargeCommunity::new(65535, 666, 0)]);
        assert!(communities[0].is_blackhole());
    }

    #[test]
    fn test_parse_large_communities_bad_length() {
        assert!(parse_large_communities(Bytes::from_static(&[0; 11])).is_err());
    }
}
