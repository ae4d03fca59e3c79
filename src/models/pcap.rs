use std::net::IpAddr;

/// Per-frame envelope handed to the decoder by the capture/demux stage.
///
/// Created once per frame by [`crate::parser::capture`] and held immutable
/// for the lifetime of every [`crate::models::bgp::BgpMessage`] decoded from
/// that frame's TCP payload.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcapContext {
    pub timestamp_sec: u32,
    pub timestamp_usec: u32,
    pub source_mac: Option<[u8; 6]>,
    pub destination_mac: Option<[u8; 6]>,
    pub source_ip: IpAddr,
    pub destination_ip: IpAddr,
    pub source_port: u16,
    pub destination_port: u16,
    /// 802.1Q/802.1ad VLAN tags encountered while walking the link layer,
    /// outermost first.
    pub vlan_tags: Vec<u16>,
}

impl PcapContext {
    /// `sec.usec`, the timestamp rendering used by every formatter.
    pub fn timestamp_string(&self) -> String {
        format!("{}.{:06}", self.timestamp_sec, self.timestamp_usec)
    }
}

fn mac_to_hex(mac: [u8; 6]) -> String {
    mac.iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join("")
}

impl PcapContext {
    pub fn source_mac_hex(&self) -> Option<String> {
        self.source_mac.map(mac_to_hex)
    }

    pub fn destination_mac_hex(&self) -> Option<String> {
        self.destination_mac.map(mac_to_hex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn sample() -> PcapContext {
        PcapContext {
            timestamp_sec: 1_700_000_000,
            timestamp_usec: 123_456,
            source_mac: Some([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]),
            destination_mac: None,
            source_ip: IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)),
            destination_ip: IpAddr::V4(Ipv4Addr::new(192, 0, 2, 2)),
            source_port: 179,
            destination_port: 52345,
            vlan_tags: vec![],
        }
    }

    #[test]
    fn test_timestamp_string() {
        assert_eq!(sample().timestamp_string(), "1700000000.123456");
    }

    #[test]
    fn test_mac_hex_stripped_of_punctuation() {
        assert_eq!(sample().source_mac_hex().unwrap(), "001122334455");
        assert_eq!(sample().destination_mac_hex(), None);
    }
}
