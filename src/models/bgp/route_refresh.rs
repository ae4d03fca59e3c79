/// Opaque ROUTE-REFRESH body -- see [`crate::models::bgp::notification`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteRefreshMessage {
    pub body: Vec<u8>,
}
