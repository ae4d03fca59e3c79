/*!
Pre-filters (§4.5): evaluated on [`PcapContext`] before BGP decoding.
*/
use crate::models::PcapContext;
use crate::parser::filter::match_any;

#[derive(Debug, Clone)]
pub enum PreFilter {
    SourceIp(Vec<String>),
    DestinationIp(Vec<String>),
    SourceMac(Vec<String>),
    DestinationMac(Vec<String>),
    Timestamp(Vec<String>),
}

impl PreFilter {
    pub fn apply(&self, ctx: &PcapContext) -> bool {
        match self {
            PreFilter::SourceIp(values) => match_any(values, |v| v == ctx.source_ip.to_string()),
            PreFilter::DestinationIp(values) => {
                match_any(values, |v| v == ctx.destination_ip.to_string())
            }
            PreFilter::SourceMac(values) => match ctx.source_mac_hex() {
                Some(mac) => match_any(values, |v| v == mac),
                None => false,
            },
            PreFilter::DestinationMac(values) => match ctx.destination_mac_hex() {
                Some(mac) => match_any(values, |v| v == mac),
                None => false,
            },
            PreFilter::Timestamp(values) => {
                match_any(values, |v| v.parse::<u32>().is_ok_and(|ts| ts == ctx.timestamp_sec))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> PcapContext {
        PcapContext {
            timestamp_sec: 1_700_000_000,
            timestamp_usec: 0,
            source_mac: Some([0, 0x11, 0x22, 0x33, 0x44, 0x55]),
            destination_mac: None,
            source_ip: "192.0.2.1".parse().unwrap(),
            destination_ip: "192.0.2.2".parse().unwrap(),
            source_port: 179,
            destination_port: 5000,
            vlan_tags: vec![],
        }
    }

    #[test]
    fn test_source_ip_match() {
        let filter = PreFilter::SourceIp(vec!["192.0.2.1".to_string()]);
        assert!(filter.apply(&ctx()));
    }

    #[test]
    fn test_source_ip_negated() {
        let filter = PreFilter::SourceIp(vec!["~192.0.2.1".to_string()]);
        assert!(!filter.apply(&ctx()));
    }

    #[test]
    fn test_destination_mac_absent_never_matches() {
        let filter = PreFilter::DestinationMac(vec!["001122334455".to_string()]);
        assert!(!filter.apply(&ctx()));
    }

    #[test]
    fn test_timestamp_equality() {
        let filter = PreFilter::Timestamp(vec!["1700000000".to_string()]);
        assert!(filter.apply(&ctx()));
    }
}
