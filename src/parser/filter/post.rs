/*!
Post-filters (§4.6): evaluated on a decoded [`BgpMessage`].
*/
use crate::models::{BgpMessage, BgpMessageBody, BgpMessageType, PathAttributeValue};
use crate::parser::filter::match_any;

#[derive(Debug, Clone)]
pub enum PostFilter {
    MessageType(Vec<String>),
    MessageSubType(Vec<String>),
    MessageSize(Vec<String>),
    Nlri(Vec<String>),
    Withdrawn(Vec<String>),
    NextHop(Vec<String>),
    Asn(Vec<String>),
    LastAsn(Vec<String>),
    CommunityAsn(Vec<String>),
    CommunityValue(Vec<String>),
    LargeCommunity(Vec<String>),
    Blackhole(Vec<String>),
    Error,
}

fn message_type_label_or_code(value: &str, msg_type: BgpMessageType) -> bool {
    let matches_label = value.eq_ignore_ascii_case(msg_type.label())
        || (value.eq_ignore_ascii_case("ROUTEREFRESH") && msg_type == BgpMessageType::RouteRefresh);
    let matches_code = value.parse::<u8>().is_ok_and(|code| code == msg_type.code());
    matches_label || matches_code
}

fn update_body(msg: &BgpMessage) -> Option<&crate::models::UpdateMessage> {
    match &msg.body {
        BgpMessageBody::Update(update) => Some(update),
        _ => None,
    }
}

fn large_community_matches(value: &str, community: &crate::models::LargeCommunity) -> bool {
    let parts: Vec<&str> = value.split(':').collect();
    if parts.len() != 3 {
        return false;
    }
    let actual = [
        community.global_admin.to_string(),
        community.local_1.to_string(),
        community.local_2.to_string(),
    ];
    parts
        .iter()
        .zip(actual.iter())
        .all(|(want, have)| *want == "*" || want == have)
}

impl PostFilter {
    pub fn apply(&self, msg: &BgpMessage) -> bool {
        match self {
            PostFilter::MessageType(values) => {
                match_any(values, |v| message_type_label_or_code(v, msg.msg_type()))
            }
            PostFilter::MessageSubType(values) => match update_body(msg) {
                Some(update) => match_any(values, |v| v.eq_ignore_ascii_case(update.subtype().label())),
                None => false,
            },
            PostFilter::MessageSize(values) => {
                match_any(values, |v| v.parse::<u16>().is_ok_and(|n| n == msg.length))
            }
            PostFilter::Nlri(values) => match update_body(msg) {
                Some(update) => {
                    match_any(values, |v| update.nlri.iter().any(|p| p.to_string() == v))
                }
                None => false,
            },
            PostFilter::Withdrawn(values) => match update_body(msg) {
                Some(update) => {
                    match_any(values, |v| update.withdrawn_routes.iter().any(|p| p.to_string() == v))
                }
                None => false,
            },
            PostFilter::NextHop(values) => match update_body(msg) {
                Some(update) => match_any(values, |v| {
                    update.path_attributes.iter().any(|attr| {
                        matches!(&attr.value, PathAttributeValue::NextHop(ip) if ip.to_string() == v)
                    })
                }),
                None => false,
            },
            PostFilter::Asn(values) => match update_body(msg) {
                Some(update) => match_any(values, |v| {
                    v.parse::<u32>().is_ok_and(|asn| {
                        update.path_attributes.iter().any(|attr| match &attr.value {
                            PathAttributeValue::AsPath { path, .. } => path.iter_asns().any(|a| a == asn),
                            _ => false,
                        })
                    })
                }),
                None => false,
            },
            PostFilter::LastAsn(values) => match update_body(msg) {
                Some(update) => match_any(values, |v| {
                    v.parse::<u32>().is_ok_and(|asn| {
                        update.path_attributes.iter().any(|attr| match &attr.value {
                            PathAttributeValue::AsPath { path, .. } => path.last_asn() == Some(asn),
                            _ => false,
                        })
                    })
                }),
                None => false,
            },
            PostFilter::CommunityAsn(values) => match update_body(msg) {
                Some(update) => match_any(values, |v| {
                    v.parse::<u16>().is_ok_and(|asn| {
                        update.path_attributes.iter().any(|attr| match &attr.value {
                            PathAttributeValue::Communities(cs) => cs.iter().any(|c| c.asn == asn),
                            _ => false,
                        })
                    })
                }),
                None => false,
            },
            PostFilter::CommunityValue(values) => match update_body(msg) {
                Some(update) => match_any(values, |v| {
                    v.parse::<u16>().is_ok_and(|value| {
                        update.path_attributes.iter().any(|attr| match &attr.value {
                            PathAttributeValue::Communities(cs) => cs.iter().any(|c| c.value == value),
                            _ => false,
                        })
                    })
                }),
                None => false,
            },
            PostFilter::LargeCommunity(values) => match update_body(msg) {
                Some(update) => match_any(values, |v| {
                    update.path_attributes.iter().any(|attr| match &attr.value {
                        PathAttributeValue::LargeCommunities(cs) => {
                            cs.iter().any(|c| large_community_matches(v, c))
                        }
                        _ => false,
                    })
                }),
                None => false,
            },
            PostFilter::Blackhole(values) => match update_body(msg) {
                Some(update) => {
                    let next_hop_match = match_any(values, |v| {
                        update.path_attributes.iter().any(|attr| {
                            matches!(&attr.value, PathAttributeValue::NextHop(ip) if ip.to_string() == v)
                        })
                    });
                    let community_match = update.path_attributes.iter().any(|attr| match &attr.value {
                        PathAttributeValue::Communities(cs) => {
                            cs.iter().any(|c| c.asn == 65535 && c.value == 666)
                        }
                        PathAttributeValue::LargeCommunities(cs) => cs.iter().any(|c| c.is_blackhole()),
                        _ => false,
                    });
                    next_hop_match || community_match
                }
                None => false,
            },
            PostFilter::Error => !msg.parse_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{KeepaliveMessage, PcapContext};

    fn ctx() -> PcapContext {
        PcapContext {
            timestamp_sec: 0,
            timestamp_usec: 0,
            source_mac: None,
            destination_mac: None,
            source_ip: "10.0.0.1".parse().unwrap(),
            destination_ip: "10.0.0.2".parse().unwrap(),
            source_port: 179,
            destination_port: 5000,
            vlan_tags: vec![],
        }
    }

    fn keepalive() -> BgpMessage {
        BgpMessage {
            length: 19,
            parse_success: true,
            parse_error: false,
            pcap_context: ctx(),
            body: BgpMessageBody::Keepalive(KeepaliveMessage),
        }
    }

    #[test]
    fn test_message_type_by_label() {
        let filter = PostFilter::MessageType(vec!["KEEPALIVE".to_string()]);
        assert!(filter.apply(&keepalive()));
    }

    #[test]
    fn test_message_type_by_code() {
        let filter = PostFilter::MessageType(vec!["4".to_string()]);
        assert!(filter.apply(&keepalive()));
    }

    #[test]
    fn test_message_type_does_not_match_every_value() {
        // Regression: an OR-chain-of-constants bug would make any label or
        // code match every message type. A KEEPALIVE must not match "OPEN".
        let filter = PostFilter::MessageType(vec!["OPEN".to_string()]);
        assert!(!filter.apply(&keepalive()));
    }

    #[test]
    fn test_error_filter_passes_clean_message() {
        assert!(PostFilter::Error.apply(&keepalive()));
    }

    #[test]
    fn test_large_community_wildcard() {
        use crate::models::LargeCommunity;
        let community = LargeCommunity::new(64500, 1, 2);
        assert!(large_community_matches("64500:*:*", &community));
        assert!(!large_community_matches("64501:*:*", &community));
    }

    fn update_with_attribute(value: PathAttributeValue) -> BgpMessage {
        use crate::models::{AttrFlags, PathAttribute, UpdateMessage};
        BgpMessage {
            length: 23,
            parse_success: true,
            parse_error: false,
            pcap_context: ctx(),
            body: BgpMessageBody::Update(UpdateMessage {
                path_attributes: vec![PathAttribute {
                    flags: AttrFlags::OPTIONAL | AttrFlags::TRANSITIVE,
                    value,
                }],
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_blackhole_matches_classic_community() {
        use crate::models::Community;
        let msg = update_with_attribute(PathAttributeValue::Communities(vec![Community::new(
            65535, 666,
        )]));
        assert!(PostFilter::Blackhole(vec![]).apply(&msg));
    }

    #[test]
    fn test_blackhole_matches_large_community() {
        use crate::models::LargeCommunity;
        let msg = update_with_attribute(PathAttributeValue::LargeCommunities(vec![
            LargeCommunity::new(65535, 666, 0),
        ]));
        assert!(PostFilter::Blackhole(vec![]).apply(&msg));
    }

    #[test]
    fn test_blackhole_rejects_non_blackhole_community() {
        use crate::models::Community;
        let msg = update_with_attribute(PathAttributeValue::Communities(vec![Community::new(
            65000, 100,
        )]));
        assert!(!PostFilter::Blackhole(vec![]).apply(&msg));
    }
}
