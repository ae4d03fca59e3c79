//! BGP message variants and the structures they're built from.

pub mod aspath;
pub mod attributes;
pub mod capabilities;
pub mod community;
pub mod keepalive;
pub mod notification;
pub mod open;
pub mod route_refresh;
pub mod update;

pub use aspath::*;
pub use attributes::*;
pub use capabilities::*;
pub use community::*;
pub use keepalive::*;
pub use notification::*;
pub use open::*;
pub use route_refresh::*;
pub use update::*;

use crate::models::pcap::PcapContext;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum BgpMessageType {
    Open = 1,
    Update = 2,
    Notification = 3,
    Keepalive = 4,
    RouteRefresh = 5,
}

impl BgpMessageType {
    pub const fn from_code(code: u8) -> Option<BgpMessageType> {
        Some(match code {
            1 => BgpMessageType::Open,
            2 => BgpMessageType::Update,
            3 => BgpMessageType::Notification,
            4 => BgpMessageType::Keepalive,
            5 => BgpMessageType::RouteRefresh,
            _ => return None,
        })
    }

    pub const fn code(&self) -> u8 {
        match self {
            BgpMessageType::Open => 1,
            BgpMessageType::Update => 2,
            BgpMessageType::Notification => 3,
            BgpMessageType::Keepalive => 4,
            BgpMessageType::RouteRefresh => 5,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            BgpMessageType::Open => "OPEN",
            BgpMessageType::Update => "UPDATE",
            BgpMessageType::Notification => "NOTIFICATION",
            BgpMessageType::Keepalive => "KEEPALIVE",
            BgpMessageType::RouteRefresh => "ROUTE-REFRESH",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BgpMessageBody {
    Open(OpenMessage),
    Update(UpdateMessage),
    Notification(NotificationMessage),
    Keepalive(KeepaliveMessage),
    RouteRefresh(RouteRefreshMessage),
}

impl BgpMessageBody {
    pub const fn msg_type(&self) -> BgpMessageType {
        match self {
            BgpMessageBody::Open(_) => BgpMessageType::Open,
            BgpMessageBody::Update(_) => BgpMessageType::Update,
            BgpMessageBody::Notification(_) => BgpMessageType::Notification,
            BgpMessageBody::Keepalive(_) => BgpMessageType::Keepalive,
            BgpMessageBody::RouteRefresh(_) => BgpMessageType::RouteRefresh,
        }
    }
}

/// A decoded BGP message plus the envelope fields every formatter and
/// post-filter needs regardless of variant.
///
/// Invariants (§3): `length == raw_length + 16`; `parse_success` is true
/// even when `parse_error` is true, since the factory always attempts a
/// decode once the header validates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BgpMessage {
    pub length: u16,
    pub parse_success: bool,
    pub parse_error: bool,
    pub pcap_context: PcapContext,
    pub body: BgpMessageBody,
}

impl BgpMessage {
    pub const fn msg_type(&self) -> BgpMessageType {
        self.body.msg_type()
    }
}
