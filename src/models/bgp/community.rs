use std::fmt::{Display, Formatter};

/// RFC 1997 regular community: two 16-bit halves, `(asn, value)`.
///
/// The well-known values `NO_EXPORT` (0xFFFFFF01), `NO_ADVERTISE`
/// (0xFFFFFF02), and `NO_EXPORT_SUBCONFED` (0xFFFFFF03) are ordinary
/// `(asn, value)` pairs here rather than dedicated enum variants; a
/// formatter that wants the mnemonic names can match on `(asn, value)`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Community {
    pub asn: u16,
    pub value: u16,
}

impl Community {
    pub const NO_EXPORT: Community = Community {
        asn: 0xFFFF,
        value: 0xFF01,
    };
    pub const NO_ADVERTISE: Community = Community {
        asn: 0xFFFF,
        value: 0xFF02,
    };
    pub const NO_EXPORT_SUBCONFED: Community = Community {
        asn: 0xFFFF,
        value: 0xFF03,
    };

    pub const fn new(asn: u16, value: u16) -> Community {
        Community { asn, value }
    }
}

impl Display for Community {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.asn, self.value)
    }
}

/// RFC 8092 large community: three 32-bit unsigned integers.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LargeCommunity {
    pub global_admin: u32,
    pub local_1: u32,
    pub local_2: u32,
}

impl LargeCommunity {
    pub const fn new(global_admin: u32, local_1: u32, local_2: u32) -> LargeCommunity {
        LargeCommunity {
            global_admin,
            local_1,
            local_2,
        }
    }

    /// RFC 7999 blackhole community: `65535:666:0`.
    pub const fn is_blackhole(&self) -> bool {
        self.global_admin == 65535 && self.local_1 == 666
    }
}

impl Display for LargeCommunity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.global_admin, self.local_1, self.local_2)
    }
}

/// RFC 4360 extended community, packed into 8 bytes on the wire as
/// `type(1) | subtype(1) | global_admin(2) | local_admin(4)`.
///
/// This reimplementation keeps the flat 4-field shape rather than the
/// per-subtype variant hierarchy a fuller RFC 4360 decoder would carry,
/// since nothing downstream needs more than the raw numbers plus a label.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtendedCommunity {
    pub community_type: u8,
    pub community_subtype: u8,
    pub global_admin: u16,
    pub local_admin: u32,
}

impl ExtendedCommunity {
    pub const fn new(
        community_type: u8,
        community_subtype: u8,
        global_admin: u16,
        local_admin: u32,
    ) -> ExtendedCommunity {
        ExtendedCommunity {
            community_type,
            community_subtype,
            global_admin,
            local_admin,
        }
    }

    /// Looks up the translation table for known `(type, subtype)` pairs.
    /// Unrecognized pairs carry only the raw numbers, per spec.
    pub fn label(&self) -> Option<&'static str> {
        match (self.community_type, self.community_subtype) {
            (0x00, 0x02) => Some("route-target"),
            (0x00, 0x03) => Some("route-origin"),
            (0x40, 0x02) => Some("route-target"),
            (0x40, 0x03) => Some("route-origin"),
            (0x02, 0x02) => Some("route-target"),
            (0x02, 0x03) => Some("route-origin"),
            _ => None,
        }
    }
}

impl Display for ExtendedCommunity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.community_type, self.community_subtype, self.global_admin, self.local_admin
        )
    }
}
