/*!
KEEPALIVE decoding (RFC 4271 §4.4): no body, just the 19-byte header.
*/
use bytes::Bytes;

use crate::error::ParserError;
use crate::models::KeepaliveMessage;

pub fn parse_keepalive_message(data: Bytes) -> Result<KeepaliveMessage, ParserError> {
    if !data.is_empty() {
        return Err(ParserError::DecodeError(format!(
            "KEEPALIVE carries a {}-byte body, expected none",
            data.len()
        )));
    }
    Ok(KeepaliveMessage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keepalive_empty() {
        assert_eq!(parse_keepalive_message(Bytes::new()).unwrap(), KeepaliveMessage);
    }

    #[test]
    fn test_parse_keepalive_with_body_errors() {
        assert!(parse_keepalive_message(Bytes::from_static(&[1])).is_err());
    }
}
