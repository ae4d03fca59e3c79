use std::fmt::{Display, Formatter};
use std::net::Ipv4Addr;

use bitflags::bitflags;

use crate::models::bgp::aspath::AsPath;
use crate::models::bgp::community::{Community, ExtendedCommunity, LargeCommunity};
use crate::models::network::{Afi, NetworkPrefix, NextHopAddress, Safi};

bitflags! {
    /// Path attribute flag octet (RFC 4271 §4.3).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct AttrFlags: u8 {
        const EXTENDED  = 0b0001_0000;
        const PARTIAL   = 0b0010_0000;
        const TRANSITIVE = 0b0100_0000;
        const OPTIONAL  = 0b1000_0000;
    }
}

/// Attribute type codes this pipeline recognizes (RFC 4271 §5, RFC 4760,
/// RFC 1997, RFC 4360, RFC 6793, RFC 8092).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttrType {
    Origin,
    AsPath,
    NextHop,
    MultiExitDisc,
    LocalPref,
    AtomicAggregate,
    Aggregator,
    Communities,
    OriginatorId,
    ClusterList,
    MpReachNlri,
    MpUnreachNlri,
    ExtendedCommunities,
    As4Path,
    As4Aggregator,
    LargeCommunities,
    Unknown(u8),
}

impl AttrType {
    pub const fn code(&self) -> u8 {
        match self {
            AttrType::Origin => 1,
            AttrType::AsPath => 2,
            AttrType::NextHop => 3,
            AttrType::MultiExitDisc => 4,
            AttrType::LocalPref => 5,
            AttrType::AtomicAggregate => 6,
            AttrType::Aggregator => 7,
            AttrType::Communities => 8,
            AttrType::OriginatorId => 9,
            AttrType::ClusterList => 10,
            AttrType::MpReachNlri => 14,
            AttrType::MpUnreachNlri => 15,
            AttrType::ExtendedCommunities => 16,
            AttrType::As4Path => 17,
            AttrType::As4Aggregator => 18,
            AttrType::LargeCommunities => 32,
            AttrType::Unknown(code) => *code,
        }
    }

    pub const fn from_code(code: u8) -> AttrType {
        match code {
            1 => AttrType::Origin,
            2 => AttrType::AsPath,
            3 => AttrType::NextHop,
            4 => AttrType::MultiExitDisc,
            5 => AttrType::LocalPref,
            6 => AttrType::AtomicAggregate,
            7 => AttrType::Aggregator,
            8 => AttrType::Communities,
            9 => AttrType::OriginatorId,
            10 => AttrType::ClusterList,
            14 => AttrType::MpReachNlri,
            15 => AttrType::MpUnreachNlri,
            16 => AttrType::ExtendedCommunities,
            17 => AttrType::As4Path,
            18 => AttrType::As4Aggregator,
            32 => AttrType::LargeCommunities,
            other => AttrType::Unknown(other),
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            AttrType::Origin => "ORIGIN",
            AttrType::AsPath => "AS_PATH",
            AttrType::NextHop => "NEXT_HOP",
            AttrType::MultiExitDisc => "MULTI_EXIT_DISC",
            AttrType::LocalPref => "LOCAL_PREF",
            AttrType::AtomicAggregate => "ATOMIC_AGGREGATE",
            AttrType::Aggregator => "AGGREGATOR",
            AttrType::Communities => "COMMUNITIES",
            AttrType::OriginatorId => "ORIGINATOR_ID",
            AttrType::ClusterList => "CLUSTER_LIST",
            AttrType::MpReachNlri => "MP_REACH_NLRI",
            AttrType::MpUnreachNlri => "MP_UNREACH_NLRI",
            AttrType::ExtendedCommunities => "EXTENDED_COMMUNITIES",
            AttrType::As4Path => "AS4_PATH",
            AttrType::As4Aggregator => "AS4_AGGREGATOR",
            AttrType::LargeCommunities => "LARGE_COMMUNITIES",
            AttrType::Unknown(_) => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Origin {
    Igp,
    Egp,
    Incomplete,
}

impl Origin {
    pub const fn from_u8(v: u8) -> Option<Origin> {
        Some(match v {
            0 => Origin::Igp,
            1 => Origin::Egp,
            2 => Origin::Incomplete,
            _ => return None,
        })
    }

    pub const fn as_u8(&self) -> u8 {
        match self {
            Origin::Igp => 0,
            Origin::Egp => 1,
            Origin::Incomplete => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MpReachNlri {
    pub afi: Afi,
    pub safi: Safi,
    pub next_hops: Vec<NextHopAddress>,
    pub prefixes: Vec<NetworkPrefix>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MpUnreachNlri {
    pub afi: Afi,
    pub safi: Safi,
    pub prefixes: Vec<NetworkPrefix>,
}

/// A decoded path attribute value, tagged by variant rather than carrying
/// flags (flags live alongside the value in [`PathAttribute`]).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathAttributeValue {
    Origin(Origin),
    AsPath { path: AsPath, is_as4: bool },
    NextHop(Ipv4Addr),
    MultiExitDisc(u32),
    LocalPref(u32),
    AtomicAggregate,
    Aggregator { asn: u32, id: Ipv4Addr, is_as4: bool },
    Communities(Vec<Community>),
    OriginatorId(Ipv4Addr),
    ClusterList(Vec<Ipv4Addr>),
    MpReachNlri(MpReachNlri),
    MpUnreachNlri(MpUnreachNlri),
    ExtendedCommunities(Vec<ExtendedCommunity>),
    LargeCommunities(Vec<LargeCommunity>),
    /// Unrecognized attribute type, carried opaquely.
    Unknown { attr_type: u8, bytes: Vec<u8> },
}

impl PathAttributeValue {
    pub const fn attr_type(&self) -> AttrType {
        match self {
            PathAttributeValue::Origin(_) => AttrType::Origin,
            PathAttributeValue::AsPath { is_as4: false, .. } => AttrType::AsPath,
            PathAttributeValue::AsPath { is_as4: true, .. } => AttrType::As4Path,
            PathAttributeValue::NextHop(_) => AttrType::NextHop,
            PathAttributeValue::MultiExitDisc(_) => AttrType::MultiExitDisc,
            PathAttributeValue::LocalPref(_) => AttrType::LocalPref,
            PathAttributeValue::AtomicAggregate => AttrType::AtomicAggregate,
            PathAttributeValue::Aggregator { is_as4: false, .. } => AttrType::Aggregator,
            PathAttributeValue::Aggregator { is_as4: true, .. } => AttrType::As4Aggregator,
            PathAttributeValue::Communities(_) => AttrType::Communities,
            PathAttributeValue::OriginatorId(_) => AttrType::OriginatorId,
            PathAttributeValue::ClusterList(_) => AttrType::ClusterList,
            PathAttributeValue::MpReachNlri(_) => AttrType::MpReachNlri,
            PathAttributeValue::MpUnreachNlri(_) => AttrType::MpUnreachNlri,
            PathAttributeValue::ExtendedCommunities(_) => AttrType::ExtendedCommunities,
            PathAttributeValue::LargeCommunities(_) => AttrType::LargeCommunities,
            PathAttributeValue::Unknown { attr_type, .. } => AttrType::Unknown(*attr_type),
        }
    }
}

impl Display for PathAttributeValue {
    /// Rendering for the Human and Line formatters -- one value per line,
    /// space-joined when multi-valued.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PathAttributeValue::Origin(origin) => write!(
                f,
                "{}",
                match origin {
                    Origin::Igp => "IGP",
                    Origin::Egp => "EGP",
                    Origin::Incomplete => "INCOMPLETE",
                }
            ),
            PathAttributeValue::AsPath { path, .. } => write!(f, "{path}"),
            PathAttributeValue::NextHop(addr) => write!(f, "{addr}"),
            PathAttributeValue::MultiExitDisc(v) => write!(f, "{v}"),
            PathAttributeValue::LocalPref(v) => write!(f, "{v}"),
            PathAttributeValue::AtomicAggregate => write!(f, "AGGREGATED"),
            PathAttributeValue::Aggregator { asn, id, .. } => write!(f, "{asn} {id}"),
            PathAttributeValue::Communities(cs) => {
                let joined: Vec<String> = cs.iter().map(|c| c.to_string()).collect();
                write!(f, "{}", joined.join(" "))
            }
            PathAttributeValue::OriginatorId(id) => write!(f, "{id}"),
            PathAttributeValue::ClusterList(ids) => {
                let joined: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
                write!(f, "{}", joined.join(" "))
            }
            PathAttributeValue::MpReachNlri(nlri) => {
                let joined: Vec<String> = nlri.prefixes.iter().map(|p| p.to_string()).collect();
                write!(f, "{}", joined.join(" "))
            }
            PathAttributeValue::MpUnreachNlri(nlri) => {
                let joined: Vec<String> = nlri.prefixes.iter().map(|p| p.to_string()).collect();
                write!(f, "{}", joined.join(" "))
            }
            PathAttributeValue::ExtendedCommunities(cs) => {
                let joined: Vec<String> = cs.iter().map(|c| c.to_string()).collect();
                write!(f, "{}", joined.join(" "))
            }
            PathAttributeValue::LargeCommunities(cs) => {
                let joined: Vec<String> = cs.iter().map(|c| c.to_string()).collect();
                write!(f, "{}", joined.join(" "))
            }
            PathAttributeValue::Unknown { attr_type, bytes } => {
                write!(f, "type={attr_type} bytes={}", bytes.len())
            }
        }
    }
}

/// A decoded attribute plus its flags, one entry per TLV walked in §4.3.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathAttribute {
    pub flags: AttrFlags,
    pub value: PathAttributeValue,
}

impl PathAttribute {
    pub fn attr_type(&self) -> AttrType {
        self.value.attr_type()
    }
}
