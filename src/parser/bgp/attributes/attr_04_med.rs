use bytes::{Buf, Bytes};

use crate::error::ParserError;

pub fn parse_med(mut data: Bytes) -> Result<u32, ParserError> {
    if data.remaining() < 4 {
        return Err(ParserError::DecodeError(format!(
            "MULTI_EXIT_DISC needs 4 bytes, got {}",
            data.remaining()
        )));
    }
    Ok(data.get_u32())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_med() {
        assert_eq!(parse_med(Bytes::from_static(&[0, 0, 0, 42])).unwrap(), 42);
    }
}
