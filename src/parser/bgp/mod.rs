/*!
BGP message decoding: the shared 3-byte header (§4.2) dispatching to one
decoder per message type.
*/
pub mod attributes;
mod keepalive;
mod notification;
mod open;
mod route_refresh;
mod update;

use bytes::Bytes;
use log::debug;

use crate::error::ParserError;
use crate::models::{BgpMessage, BgpMessageBody, BgpMessageType, PcapContext};
use crate::parser::utils::ReadUtils;

use keepalive::parse_keepalive_message;
use notification::parse_notification_message;
use open::parse_open_message;
use route_refresh::parse_route_refresh_message;
use update::parse_update_message;

/// Decodes one marker-delimited slice (as produced by
/// [`crate::parser::splitter::split_messages`]) into a [`BgpMessage`].
///
/// A header/length mismatch is a [`ParserError::FactoryError`] and the slice
/// is dropped outright. Once the header validates, a body decode failure is
/// recorded as `parse_error = true` on a best-effort body rather than
/// dropping the message -- the header alone is enough to prove this was a
/// real (if malformed) BGP message.
pub fn parse_bgp_message(slice: Bytes, pcap_context: PcapContext) -> Result<BgpMessage, ParserError> {
    let slice_len = slice.len();
    let mut cursor = slice;
    let declared_length = cursor.read_u16()?;
    let type_code = cursor.read_u8()?;

    if declared_length as usize != slice_len + 16 {
        return Err(ParserError::FactoryError(format!(
            "declared BGP length {declared_length} does not match slice length {slice_len} + 16"
        )));
    }

    let msg_type = BgpMessageType::from_code(type_code)
        .ok_or_else(|| ParserError::FactoryError(format!("unknown BGP message type code {type_code}")))?;

    let body_bytes = cursor;

    let (body, parse_error) = match msg_type {
        BgpMessageType::Open => match parse_open_message(body_bytes) {
            Ok(open) => (BgpMessageBody::Open(open), false),
            Err(e) => {
                debug!("OPEN body failed to decode: {e}");
                (BgpMessageBody::Open(Default::default()), true)
            }
        },
        BgpMessageType::Update => match parse_update_message(body_bytes) {
            Ok(update) => (BgpMessageBody::Update(update), false),
            Err(e) => {
                debug!("UPDATE body failed to decode: {e}");
                (BgpMessageBody::Update(Default::default()), true)
            }
        },
        BgpMessageType::Notification => match parse_notification_message(body_bytes) {
            Ok(notification) => (BgpMessageBody::Notification(notification), false),
            Err(e) => {
                debug!("NOTIFICATION body failed to decode: {e}");
                (BgpMessageBody::Notification(Default::default()), true)
            }
        },
        BgpMessageType::Keepalive => match parse_keepalive_message(body_bytes) {
            Ok(keepalive) => (BgpMessageBody::Keepalive(keepalive), false),
            Err(e) => {
                debug!("KEEPALIVE body failed to decode: {e}");
                (BgpMessageBody::Keepalive(Default::default()), true)
            }
        },
        BgpMessageType::RouteRefresh => match parse_route_refresh_message(body_bytes) {
            Ok(route_refresh) => (BgpMessageBody::RouteRefresh(route_refresh), false),
            Err(e) => {
                debug!("ROUTE-REFRESH body failed to decode: {e}");
                (BgpMessageBody::RouteRefresh(Default::default()), true)
            }
        },
    };

    Ok(BgpMessage {
        length: declared_length,
        parse_success: true,
        parse_error,
        pcap_context,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> PcapContext {
        PcapContext {
            timestamp_sec: 0,
            timestamp_usec: 0,
            source_mac: None,
            destination_mac: None,
            source_ip: "10.0.0.1".parse().unwrap(),
            destination_ip: "10.0.0.2".parse().unwrap(),
            source_port: 179,
            destination_port: 54321,
            vlan_tags: vec![],
        }
    }

    #[test]
    fn test_parse_keepalive_message() {
        let bytes = vec![0x00, 0x13, 0x04];
        let msg = parse_bgp_message(Bytes::from(bytes), ctx()).unwrap();
        assert_eq!(msg.length, 19);
        assert!(!msg.parse_error);
        assert_eq!(msg.msg_type(), BgpMessageType::Keepalive);
    }

    #[test]
    fn test_length_mismatch_is_factory_error() {
        let bytes = vec![0x00, 0x14, 0x04];
        assert!(matches!(
            parse_bgp_message(Bytes::from(bytes), ctx()),
            Err(ParserError::FactoryError(_))
        ));
    }

    #[test]
    fn test_unknown_type_is_factory_error() {
        let bytes = vec![0x00, 0x13, 0x09];
        assert!(matches!(
            parse_bgp_message(Bytes::from(bytes), ctx()),
            Err(ParserError::FactoryError(_))
        ));
    }
}
