use bytes::{Buf, Bytes};

use crate::error::ParserError;

pub fn parse_local_pref(mut data: Bytes) -> Result<u32, ParserError> {
    if data.remaining() < 4 {
        return Err(ParserError::DecodeError(format!(
            "LOCAL_PREF needs 4 bytes, got {}",
            data.remaining()
        )));
    }
    Ok(data.get_u32())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local_pref() {
        assert_eq!(
            parse_local_pref(Bytes::from_static(&[0, 0, 0, 100])).unwrap(),
            100
        );
    }
}
