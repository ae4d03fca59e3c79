use bytes::{Buf, Bytes};

use crate::error::ParserError;
use crate::models::Community;

/// COMMUNITIES: a sequence of 4-byte `(asn: u16, value: u16)` entries.
pub fn parse_communities(mut data: Bytes) -> Result<Vec<Community>, ParserError> {
    if data.remaining() % 4 != 0 {
        return Err(ParserError::DecodeError(format!(
            "COMMUNITIES length {} is not a multiple of 4",
            data.remaining()
        )));
    }
    let mut communities = Vec::with_capacity(data.remaining() / 4);
    while data.has_remaining() {
        let asn = data.get_u16();
        let value = data.get_u16();
        communities.push(Community::new(asn, value));
    }
    Ok(communities)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_communities() {
        let data = Bytes::from_static(&[0xFF, 0xFF, 0xFF, 0x01, 0x00, 0x64, 0x00, 0x02]);
        let communities = parse_communities(data).unwrap();
        assert_eq!(communities, vec![Community::NO_EXPORT, Community::new(100, 2)]);
    }

    #[test]
    fn test_parse_communities_bad_length() {
        assert!(parse_communities(Bytes::from_static(&[0, 0, 0])).is_err());
    }
}
