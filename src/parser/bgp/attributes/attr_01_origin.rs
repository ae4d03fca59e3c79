use bytes::Bytes;

use crate::error::ParserError;
use crate::models::Origin;

pub fn parse_origin(data: Bytes) -> Result<Origin, ParserError> {
    if data.is_empty() {
        return Err(ParserError::DecodeError("ORIGIN attribute has no data".into()));
    }
    Origin::from_u8(data[0]).ok_or_else(|| {
        ParserError::DecodeError(format!("invalid ORIGIN value: {}", data[0]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origin_igp() {
        assert_eq!(parse_origin(Bytes::from_static(&[0])).unwrap(), Origin::Igp);
    }

    #[test]
    fn test_parse_origin_invalid() {
        assert!(parse_origin(Bytes::from_static(&[9])).is_err());
    }
}
