/*!
Human-readable rendering (§4.7): a multi-line, indented dump of one
message, grounded in the original formatter's fixed section layout.
*/
use crate::models::{
    BgpMessage, BgpMessageBody, OptionalParameterValue, PathAttributeValue,
};

/// Indent prefix for depth `d >= 0` is `"|-" + "--"*d + " "`; depth `-1`
/// is bare `"|"`, used as a blank divider line between the PCAP header
/// block and the per-type body.
fn prefix(depth: i32) -> String {
    if depth == -1 {
        "|".to_string()
    } else {
        format!("|-{} ", "--".repeat(depth as usize))
    }
}

#[derive(Debug, Clone, Default)]
pub struct HumanFormatter;

impl HumanFormatter {
    pub fn render(&self, message: &BgpMessage) -> String {
        let ctx = &message.pcap_context;
        let mut out = format!(
            "[BGPMessage {}] - {} Bytes\n",
            message.msg_type().label(),
            message.length
        );

        out += &format!(
            "{}MAC: {} -> {}\n",
            prefix(0),
            ctx.source_mac_hex().as_deref().unwrap_or("unknown"),
            ctx.destination_mac_hex().as_deref().unwrap_or("unknown"),
        );
        out += &format!(
            "{}IP: {}:{} -> {}:{}\n",
            prefix(0),
            ctx.source_ip,
            ctx.source_port,
            ctx.destination_ip,
            ctx.destination_port,
        );
        out += &format!("{}Timestamp: {}\n", prefix(0), ctx.timestamp_string());

        match &message.body {
            BgpMessageBody::Open(open) => {
                out += &format!("{}\n", prefix(-1));
                out += &format!("{}Version: {}\n", prefix(0), open.version);
                out += &format!("{}My ASN: {}\n", prefix(0), open.my_asn);
                out += &format!("{}Hold Time: {}\n", prefix(0), open.hold_time);
                out += &format!("{}BGP Identifier: {}\n", prefix(0), open.bgp_identifier);
                out += &format!(
                    "{}Optional Parameters Length: {} Bytes\n",
                    prefix(0),
                    open.optional_parameters_length
                );
                if !open.optional_parameters.is_empty() {
                    out += &format!("{}Optional Parameters:\n", prefix(0));
                    for param in &open.optional_parameters {
                        match &param.value {
                            OptionalParameterValue::Capabilities(caps) => {
                                out += &format!("{}Parameter: Capability\n", prefix(1));
                                for cap in caps {
                                    out += &format!("{}{} ({})\n", prefix(2), cap.label(), cap.code());
                                }
                            }
                            OptionalParameterValue::Authentication(_) => {
                                out += &format!("{}Parameter: Authentication\n", prefix(1));
                            }
                            OptionalParameterValue::Reserved(_) => {
                                out += &format!("{}Parameter: Reserved\n", prefix(1));
                            }
                        }
                    }
                }
            }
            BgpMessageBody::Update(update) => {
                out += &format!("{}\n", prefix(-1));
                out += &format!("{}Update Message Sub-Type: {}\n", prefix(0), update.subtype().label());
                out += &format!(
                    "{}Withdrawn Routes Length: {} Bytes\n",
                    prefix(0),
                    update.withdrawn_routes_length
                );
                out += &format!(
                    "{}Total Path Attribute Length: {} Bytes\n",
                    prefix(0),
                    update.path_attributes_length
                );

                if !update.nlri.is_empty() {
                    out += &format!("{}Prefix (NLRI):\n", prefix(0));
                    for route in &update.nlri {
                        out += &format!("{}{}\n", prefix(1), route);
                    }
                }

                if !update.path_attributes.is_empty() {
                    out += &format!("{}Path Attributes:\n", prefix(0));
                    for attr in &update.path_attributes {
                        match &attr.value {
                            PathAttributeValue::ExtendedCommunities(cs) => {
                                out += &format!("{}{}:\n", prefix(1), attr.attr_type().label());
                                for community in cs {
                                    out += &format!("{}{}\n", prefix(2), community);
                                }
                            }
                            other => {
                                out += &format!("{}{}: {}\n", prefix(1), attr.attr_type().label(), other);
                            }
                        }
                    }
                }

                if !update.withdrawn_routes.is_empty() {
                    out += &format!("{}Withdrawn Routes:\n", prefix(0));
                    for route in &update.withdrawn_routes {
                        out += &format!("{}{}\n", prefix(1), route);
                    }
                }
            }
            BgpMessageBody::Keepalive(_)
            | BgpMessageBody::Notification(_)
            | BgpMessageBody::RouteRefresh(_) => {}
        }

        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{KeepaliveMessage, PcapContext};

    fn ctx() -> PcapContext {
        PcapContext {
            timestamp_sec: 1_700_000_000,
            timestamp_usec: 123_456,
            source_mac: Some([0x11; 6]),
            destination_mac: Some([0x22; 6]),
            source_ip: "192.0.2.1".parse().unwrap(),
            destination_ip: "192.0.2.2".parse().unwrap(),
            source_port: 179,
            destination_port: 54321,
            vlan_tags: vec![],
        }
    }

    #[test]
    fn test_keepalive_has_no_body_block() {
        let msg = BgpMessage {
            length: 19,
            parse_success: true,
            parse_error: false,
            pcap_context: ctx(),
            body: BgpMessageBody::Keepalive(KeepaliveMessage),
        };
        let rendered = HumanFormatter.render(&msg);
        assert!(rendered.starts_with("[BGPMessage KEEPALIVE]"));
        assert!(rendered.contains("Timestamp: 1700000000.123456"));
    }

    #[test]
    fn test_depth_minus_one_is_bare_pipe() {
        assert_eq!(prefix(-1), "|");
        assert_eq!(prefix(0), "|- ");
        assert_eq!(prefix(2), "|----- ");
    }
}
