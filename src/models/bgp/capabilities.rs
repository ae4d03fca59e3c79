use crate::models::network::{Afi, Safi};

/// Known BGP capability codes.
///
/// <https://www.iana.org/assignments/capability-codes/capability-codes.xhtml>
#[allow(non_camel_case_types)]
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum BgpCapabilityType {
    MultiprotocolExtensions = 1,
    RouteRefresh = 2,
    OutboundRouteFiltering = 3,
    MultipleRoutesToDestination = 4,
    ExtendedNextHopEncoding = 5,
    BgpExtendedMessage = 6,
    GracefulRestart = 64,
    FourOctetAsNumber = 65,
    DynamicCapability = 67,
    MultisessionBgp = 68,
    AddPath = 69,
    EnhancedRouteRefresh = 70,
    LongLivedGracefulRestart = 71,
    Fqdn = 73,
    RouteRefreshLegacy = 128,
}

impl BgpCapabilityType {
    pub const fn from_code(code: u8) -> Option<BgpCapabilityType> {
        use BgpCapabilityType::*;
        Some(match code {
            1 => MultiprotocolExtensions,
            2 => RouteRefresh,
            3 => OutboundRouteFiltering,
            4 => MultipleRoutesToDestination,
            5 => ExtendedNextHopEncoding,
            6 => BgpExtendedMessage,
            64 => GracefulRestart,
            65 => FourOctetAsNumber,
            67 => DynamicCapability,
            68 => MultisessionBgp,
            69 => AddPath,
            70 => EnhancedRouteRefresh,
            71 => LongLivedGracefulRestart,
            73 => Fqdn,
            128 => RouteRefreshLegacy,
            _ => return None,
        })
    }

    pub const fn code(&self) -> u8 {
        use BgpCapabilityType::*;
        match self {
            MultiprotocolExtensions => 1,
            RouteRefresh => 2,
            OutboundRouteFiltering => 3,
            MultipleRoutesToDestination => 4,
            ExtendedNextHopEncoding => 5,
            BgpExtendedMessage => 6,
            GracefulRestart => 64,
            FourOctetAsNumber => 65,
            DynamicCapability => 67,
            MultisessionBgp => 68,
            AddPath => 69,
            EnhancedRouteRefresh => 70,
            LongLivedGracefulRestart => 71,
            Fqdn => 73,
            RouteRefreshLegacy => 128,
        }
    }
}

/// A decoded capability carried in an OPEN optional parameter.
///
/// Known codes beyond [`MultiprotocolExtensions`](Capability::MultiprotocolExtensions)
/// carry their raw value bytes rather than a fully modeled struct -- the
/// pipeline only needs to recognize and pass these through, not interpret
/// their internals.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Capability {
    MultiprotocolExtensions { afi: Afi, reserved: u8, safi: Safi },
    RouteRefresh,
    OutboundRouteFiltering(Vec<u8>),
    MultipleRoutesToDestination(Vec<u8>),
    ExtendedNextHopEncoding(Vec<u8>),
    BgpExtendedMessage,
    GracefulRestart(Vec<u8>),
    FourOctetAsNumber(u32),
    DynamicCapability(Vec<u8>),
    MultisessionBgp(Vec<u8>),
    AddPath(Vec<u8>),
    EnhancedRouteRefresh,
    LongLivedGracefulRestart(Vec<u8>),
    Fqdn(Vec<u8>),
    RouteRefreshLegacy,
    /// Unrecognized capability code, carried opaquely.
    Unknown(u8, Vec<u8>),
}

impl Capability {
    pub const fn code(&self) -> u8 {
        match self {
            Capability::MultiprotocolExtensions { .. } => BgpCapabilityType::MultiprotocolExtensions.code(),
            Capability::RouteRefresh => BgpCapabilityType::RouteRefresh.code(),
            Capability::OutboundRouteFiltering(_) => BgpCapabilityType::OutboundRouteFiltering.code(),
            Capability::MultipleRoutesToDestination(_) => BgpCapabilityType::MultipleRoutesToDestination.code(),
            Capability::ExtendedNextHopEncoding(_) => BgpCapabilityType::ExtendedNextHopEncoding.code(),
            Capability::BgpExtendedMessage => BgpCapabilityType::BgpExtendedMessage.code(),
            Capability::GracefulRestart(_) => BgpCapabilityType::GracefulRestart.code(),
            Capability::FourOctetAsNumber(_) => BgpCapabilityType::FourOctetAsNumber.code(),
            Capability::DynamicCapability(_) => BgpCapabilityType::DynamicCapability.code(),
            Capability::MultisessionBgp(_) => BgpCapabilityType::MultisessionBgp.code(),
            Capability::AddPath(_) => BgpCapabilityType::AddPath.code(),
            Capability::EnhancedRouteRefresh => BgpCapabilityType::EnhancedRouteRefresh.code(),
            Capability::LongLivedGracefulRestart(_) => BgpCapabilityType::LongLivedGracefulRestart.code(),
            Capability::Fqdn(_) => BgpCapabilityType::Fqdn.code(),
            Capability::RouteRefreshLegacy => BgpCapabilityType::RouteRefreshLegacy.code(),
            Capability::Unknown(code, _) => *code,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Capability::MultiprotocolExtensions { .. } => "Multiprotocol Extensions",
            Capability::RouteRefresh => "Route Refresh",
            Capability::OutboundRouteFiltering(_) => "Outbound Route Filtering",
            Capability::MultipleRoutesToDestination(_) => "Multiple Routes to Destination",
            Capability::ExtendedNextHopEncoding(_) => "Extended Next Hop Encoding",
            Capability::BgpExtendedMessage => "BGP Extended Message",
            Capability::GracefulRestart(_) => "Graceful Restart",
            Capability::FourOctetAsNumber(_) => "Four-Octet ASN",
            Capability::DynamicCapability(_) => "Dynamic Capability",
            Capability::MultisessionBgp(_) => "Multisession BGP",
            Capability::AddPath(_) => "Add Path",
            Capability::EnhancedRouteRefresh => "Enhanced Route Refresh",
            Capability::LongLivedGracefulRestart(_) => "Long-Lived Graceful Restart",
            Capability::Fqdn(_) => "FQDN",
            Capability::RouteRefreshLegacy => "Route Refresh (legacy)",
            Capability::Unknown(..) => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_type_roundtrip() {
        for code in [1u8, 2, 3, 4, 5, 6, 64, 65, 67, 68, 69, 70, 71, 73, 128] {
            let ty = BgpCapabilityType::from_code(code).unwrap();
            assert_eq!(ty.code(), code);
        }
    }

    #[test]
    fn test_unknown_capability_code() {
        assert!(BgpCapabilityType::from_code(9).is_none());
    }
}
