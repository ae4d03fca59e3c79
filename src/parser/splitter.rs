/*!
Finds candidate BGP message slices inside a TCP payload by splitting on
the 16-byte all-ones marker (RFC 4271 §4.1).
*/
use bytes::Bytes;

use crate::error::ParserError;

const MARKER_LEN: usize = 16;
const MARKER: [u8; MARKER_LEN] = [0xFF; MARKER_LEN];

/// Splits `payload` into message slices on the marker, discarding empty
/// slices. A payload containing no marker yields [`ParserError::NoMessages`]
/// rather than an empty vec, matching §4.1's "silently dropped" contract.
pub fn split_messages(payload: &Bytes) -> Result<Vec<Bytes>, ParserError> {
    let mut slices = Vec::new();
    let mut start = 0usize;
    let mut found_marker = false;
    let mut i = 0usize;

    while i + MARKER_LEN <= payload.len() {
        if payload[i..i + MARKER_LEN] == MARKER {
            found_marker = true;
            if i > start {
                slices.push(payload.slice(start..i));
            }
            i += MARKER_LEN;
            start = i;
            continue;
        }
        i += 1;
    }
    if start < payload.len() {
        slices.push(payload.slice(start..payload.len()));
    }

    if !found_marker {
        return Err(ParserError::NoMessages);
    }

    slices.retain(|s| !s.is_empty());
    if slices.is_empty() {
        return Err(ParserError::NoMessages);
    }
    Ok(slices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_marker_yields_no_messages() {
        let payload = Bytes::from_static(&[0x01, 0x02, 0x03]);
        assert!(matches!(
            split_messages(&payload),
            Err(ParserError::NoMessages)
        ));
    }

    #[test]
    fn test_single_message_after_marker() {
        let mut bytes = vec![0xFFu8; 16];
        bytes.extend_from_slice(&[0x00, 0x13, 0x04]);
        let payload = Bytes::from(bytes);
        let messages = split_messages(&payload).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].as_ref(), &[0x00, 0x13, 0x04]);
    }

    #[test]
    fn test_two_back_to_back_messages() {
        let mut bytes = vec![0xFFu8; 16];
        bytes.extend_from_slice(&[0x00, 0x13, 0x04]);
        bytes.extend_from_slice(&[0xFFu8; 16]);
        bytes.extend_from_slice(&[0x00, 0x13, 0x04]);
        let payload = Bytes::from(bytes);
        let messages = split_messages(&payload).unwrap();
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn test_leading_junk_before_first_marker_is_its_own_slice() {
        // Bytes before the first marker are not discarded: they become a
        // candidate slice of their own, to be rejected independently at
        // decode time (§4.1).
        let mut bytes = vec![0xAB, 0xCD];
        bytes.extend_from_slice(&[0xFFu8; 16]);
        bytes.extend_from_slice(&[0x00, 0x13, 0x04]);
        let payload = Bytes::from(bytes);
        let messages = split_messages(&payload).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].as_ref(), &[0xAB, 0xCD]);
        assert_eq!(messages[1].as_ref(), &[0x00, 0x13, 0x04]);
    }
}
