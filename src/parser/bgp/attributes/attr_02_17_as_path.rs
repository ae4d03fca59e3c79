/*!
AS_PATH (type 2) and AS4_PATH (type 17) decoding, including the 2-vs-4-octet
ASN width heuristic (§4.3).

AS4_PATH always carries 4-octet ASNs (RFC 6793) so it skips the heuristic;
AS_PATH does not signal its width on the wire at all, so every AS_PATH
attribute runs the disambiguation below.
*/
use bytes::{Buf, Bytes};

use crate::error::ParserError;
use crate::models::{AsPath, AsPathSegment, AsPathSegmentType, AsnLength};

/// Segment header size (type + count) assumed while probing for the width.
const SEGMENT_HEADER_LEN: usize = 2;

/// Implements the Wireshark-derived heuristic, verbatim and bug-compatible:
/// when the byte just past a hypothetical 2-octet first segment does *not*
/// look like a plausible next segment type, the fallback is 4-octet, not
/// 2-octet -- easy to get backwards, since it reads as though "implausible
/// means stick with the cheaper guess."
pub fn detect_as_path_width(payload: &[u8]) -> AsnLength {
    if payload.len() < SEGMENT_HEADER_LEN {
        return AsnLength::Bits16;
    }
    let seg_count = payload[1] as usize;
    let offset_check = 2 + 2 * seg_count;

    if offset_check == payload.len() {
        return AsnLength::Bits16;
    }

    let next_byte = payload.get(offset_check).copied();
    let plausible_next_segment = next_byte.is_some_and(|b| AsPathSegmentType::from_u8(b).is_some());

    if !plausible_next_segment {
        return AsnLength::Bits32;
    }

    let first_segment_has_zero_asn = (0..seg_count).any(|i| {
        let off = 2 + i * 2;
        off + 2 <= payload.len() && payload[off] == 0 && payload[off + 1] == 0
    });

    if first_segment_has_zero_asn {
        AsnLength::Bits32
    } else {
        AsnLength::Bits16
    }
}

fn walk_segments(payload: &[u8], width: AsnLength) -> Option<Vec<AsPathSegment>> {
    let mut data = payload;
    let mut segments = Vec::new();
    while !data.is_empty() {
        if data.len() < SEGMENT_HEADER_LEN {
            return None;
        }
        let seg_type = AsPathSegmentType::from_u8(data[0])?;
        let count = data[1] as usize;
        let width_bytes = width.octets();
        let needed = SEGMENT_HEADER_LEN + count * width_bytes;
        if data.len() < needed {
            return None;
        }
        let mut cursor = &data[SEGMENT_HEADER_LEN..needed];
        let mut asns = Vec::with_capacity(count);
        for _ in 0..count {
            let asn = match width {
                AsnLength::Bits16 => cursor.get_u16() as u32,
                AsnLength::Bits32 => cursor.get_u32(),
            };
            asns.push(asn);
        }
        segments.push(AsPathSegment::new(seg_type, asns));
        data = &data[needed..];
    }
    Some(segments)
}

/// Decodes an AS_PATH attribute body, applying the width heuristic. Per §8
/// invariant 4, if the chosen width's walk doesn't land exactly on the
/// payload end the attribute is reported as an error rather than guessed
/// at further.
pub fn parse_as_path(data: Bytes) -> Result<AsPath, ParserError> {
    let payload = data.as_ref();
    if payload.is_empty() {
        return Ok(AsPath::default());
    }
    let width = detect_as_path_width(payload);
    let segments = walk_segments(payload, width)
        .ok_or_else(|| ParserError::DecodeError("AS_PATH does not walk to end of payload under either width".into()))?;
    Ok(AsPath::new(segments))
}

/// Decodes an AS4_PATH attribute body: always 4-octet ASNs, no heuristic.
pub fn parse_as4_path(data: Bytes) -> Result<AsPath, ParserError> {
    let payload = data.as_ref();
    let segments = walk_segments(payload, AsnLength::Bits32)
        .ok_or_else(|| ParserError::DecodeError("AS4_PATH does not walk to end of payload".into()))?;
    Ok(AsPath::new(segments))
}
