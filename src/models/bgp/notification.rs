/// NOTIFICATION and ROUTE-REFRESH bodies are treated as opaque per this
/// spec (§3): only header presence is recognized, not the per-error-code
/// internal structure RFC 4271 §4.5 defines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NotificationMessage {
    pub body: Vec<u8>,
}
