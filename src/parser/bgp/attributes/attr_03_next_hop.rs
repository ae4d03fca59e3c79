use std::net::Ipv4Addr;

use bytes::{Buf, Bytes};

use crate::error::ParserError;

pub fn parse_next_hop(mut data: Bytes) -> Result<Ipv4Addr, ParserError> {
    if data.remaining() < 4 {
        return Err(ParserError::DecodeError(format!(
            "NEXT_HOP needs 4 bytes, got {}",
            data.remaining()
        )));
    }
    Ok(Ipv4Addr::from(data.get_u32()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_next_hop() {
        let data = Bytes::from_static(&[192, 0, 2, 1]);
        assert_eq!(parse_next_hop(data).unwrap(), Ipv4Addr::new(192, 0, 2, 1));
    }

    #[test]
    fn test_parse_next_hop_too_short() {
        assert!(parse_next_hop(Bytes::from_static(&[1, 2])).is_err());
    }
}
