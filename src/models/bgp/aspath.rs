use std::fmt::{Display, Formatter};

/// One segment of an AS_PATH/AS4_PATH attribute.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AsPathSegmentType {
    Set = 1,
    Sequence = 2,
    ConfedSequence = 3,
    ConfedSet = 4,
}

impl AsPathSegmentType {
    /// The four segment types the width heuristic treats as plausible
    /// continuations when peeking past the first segment.
    pub const fn from_u8(v: u8) -> Option<AsPathSegmentType> {
        Some(match v {
            1 => AsPathSegmentType::Set,
            2 => AsPathSegmentType::Sequence,
            3 => AsPathSegmentType::ConfedSequence,
            4 => AsPathSegmentType::ConfedSet,
            _ => return None,
        })
    }
}

/// A single `(segment_type, asns)` segment. ASN width (2 or 4 octets) is
/// resolved once per AS_PATH attribute, not stored per segment -- every
/// segment in one attribute shares the width the heuristic picked.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AsPathSegment {
    pub segment_type: AsPathSegmentType,
    pub asns: Vec<u32>,
}

impl AsPathSegment {
    pub fn new(segment_type: AsPathSegmentType, asns: Vec<u32>) -> AsPathSegment {
        AsPathSegment { segment_type, asns }
    }
}

/// A full decoded AS_PATH: an ordered list of segments plus the width the
/// heuristic settled on.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AsPath {
    pub segments: Vec<AsPathSegment>,
}

impl AsPath {
    pub fn new(segments: Vec<AsPathSegment>) -> AsPath {
        AsPath { segments }
    }

    /// Every ASN across every segment, in order -- used by the `Asn` post-filter.
    pub fn iter_asns(&self) -> impl Iterator<Item = u32> + '_ {
        self.segments.iter().flat_map(|s| s.asns.iter().copied())
    }

    /// The last ASN of the last `Sequence` segment -- used by the
    /// `LastAsn` post-filter.
    pub fn last_asn(&self) -> Option<u32> {
        self.segments
            .iter()
            .rev()
            .find(|s| s.segment_type == AsPathSegmentType::Sequence)
            .and_then(|s| s.asns.last().copied())
    }
}

impl Display for AsPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .segments
            .iter()
            .map(|seg| {
                let joined = seg
                    .asns
                    .iter()
                    .map(|a| a.to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                match seg.segment_type {
                    AsPathSegmentType::Set | AsPathSegmentType::ConfedSet => {
                        format!("{{{joined}}}")
                    }
                    AsPathSegmentType::Sequence | AsPathSegmentType::ConfedSequence => joined,
                }
            })
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_asn() {
        let path = AsPath::new(vec![AsPathSegment::new(
            AsPathSegmentType::Sequence,
            vec![10, 20, 30],
        )]);
        assert_eq!(path.last_asn(), Some(30));
    }

    #[test]
    fn test_iter_asns() {
        let path = AsPath::new(vec![
            AsPathSegment::new(AsPathSegmentType::Sequence, vec![10, 20]),
            AsPathSegment::new(AsPathSegmentType::Set, vec![30]),
        ]);
        let all: Vec<u32> = path.iter_asns().collect();
        assert_eq!(all, vec![10, 20, 30]);
    }

    #[test]
    fn test_display_set_braces() {
        let path = AsPath::new(vec![AsPathSegment::new(AsPathSegmentType::Set, vec![10, 20])]);
        assert_eq!(path.to_string(), "{10 20}");
    }
}
