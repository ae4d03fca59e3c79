/*!
AGGREGATOR (type 7, 2-octet ASN) and AS4_AGGREGATOR (type 18, 4-octet ASN)
share this decoder; the caller picks the ASN width.
*/
use std::net::Ipv4Addr;

use bytes::{Buf, Bytes};

use crate::error::ParserError;
use crate::models::AsnLength;

pub fn parse_aggregator(mut data: Bytes, asn_len: AsnLength) -> Result<(u32, Ipv4Addr), ParserError> {
    let needed = asn_len.octets() + 4;
    if data.remaining() < needed {
        return Err(ParserError::DecodeError(format!(
            "AGGREGATOR needs {needed} bytes, got {}",
            data.remaining()
        )));
    }
    let asn = match asn_len {
        AsnLength::Bits16 => data.get_u16() as u32,
        AsnLength::Bits32 => data.get_u32(),
    };
    let id = Ipv4Addr::from(data.get_u32());
    Ok((asn, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aggregator_2_octet() {
        let data = Bytes::from_static(&[0, 100, 192, 0, 2, 1]);
        let (asn, id) = parse_aggregator(data, AsnLength::Bits16).unwrap();
        assert_eq!(asn, 100);
        assert_eq!(id, Ipv4Addr::new(192, 0, 2, 1));
    }

    #[test]
    fn test_parse_aggregator_4_octet() {
        let data = Bytes::from_static(&[0, 0, 0, 100, 192, 0, 2, 1]);
        let (asn, id) = parse_aggregator(data, AsnLength::Bits32).unwrap();
        assert_eq!(asn, 100);
        assert_eq!(id, Ipv4Addr::new(192, 0, 2, 1));
    }
}
