/*!
NOTIFICATION decoding (RFC 4271 §4.5). Treated as opaque per this pipeline's
data model: the body is carried through without decoding the per-error-code
substructure.
*/
use bytes::Bytes;

use crate::error::ParserError;
use crate::models::NotificationMessage;

pub fn parse_notification_message(data: Bytes) -> Result<NotificationMessage, ParserError> {
    Ok(NotificationMessage { body: data.to_vec() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_notification_body() {
        let msg = parse_notification_message(Bytes::from_static(&[6, 4])).unwrap();
        assert_eq!(msg.body, vec![6, 4]);
    }
}
