use std::net::Ipv4Addr;

use bytes::{Buf, Bytes};

use crate::error::ParserError;

pub fn parse_originator_id(mut data: Bytes) -> Result<Ipv4Addr, ParserError> {
    if data.remaining() < 4 {
        return Err(ParserError::DecodeError(format!(
            "ORIGINATOR_ID needs 4 bytes, got {}",
            data.remaining()
        )));
    }
    Ok(Ipv4Addr::from(data.get_u32()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_originator_id() {
        let data = Bytes::from_static(&[10, 0, 0, 1]);
        assert_eq!(parse_originator_id(data).unwrap(), Ipv4Addr::new(10, 0, 0, 1));
    }
}
