use crate::models::bgp::attributes::PathAttribute;
use crate::models::network::NetworkPrefix;

/// Derived from `|nlri|`/`|withdrawn|`, bitwise-OR'd (§8 invariant 5):
/// `Announce` iff NLRI non-empty, `Withdrawal` iff withdrawn non-empty,
/// `Both` iff both, `None` iff neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpdateSubtype {
    None,
    Announce,
    Withdrawal,
    Both,
}

impl UpdateSubtype {
    pub const fn derive(nlri_empty: bool, withdrawn_empty: bool) -> UpdateSubtype {
        match (!nlri_empty, !withdrawn_empty) {
            (false, false) => UpdateSubtype::None,
            (true, false) => UpdateSubtype::Announce,
            (false, true) => UpdateSubtype::Withdrawal,
            (true, true) => UpdateSubtype::Both,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            UpdateSubtype::None => "NONE",
            UpdateSubtype::Announce => "ANNOUNCE",
            UpdateSubtype::Withdrawal => "WITHDRAWAL",
            UpdateSubtype::Both => "BOTH",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpdateMessage {
    pub withdrawn_routes_length: u16,
    pub withdrawn_routes: Vec<NetworkPrefix>,
    pub path_attributes_length: u16,
    pub path_attributes: Vec<PathAttribute>,
    pub nlri: Vec<NetworkPrefix>,
}

impl UpdateMessage {
    pub fn subtype(&self) -> UpdateSubtype {
        UpdateSubtype::derive(self.nlri.is_empty(), self.withdrawn_routes.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtype_derivation_table() {
        assert_eq!(UpdateSubtype::derive(true, true), UpdateSubtype::None);
        assert_eq!(UpdateSubtype::derive(false, true), UpdateSubtype::Announce);
        assert_eq!(UpdateSubtype::derive(true, false), UpdateSubtype::Withdrawal);
        assert_eq!(UpdateSubtype::derive(false, false), UpdateSubtype::Both);
    }

    #[test]
    fn test_empty_update_is_none() {
        let update = UpdateMessage::default();
        assert_eq!(update.subtype(), UpdateSubtype::None);
    }
}
