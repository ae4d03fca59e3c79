/// A KEEPALIVE carries no body; the type alone exists to preserve the
/// `declared_length == 19` invariant check at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeepaliveMessage;
