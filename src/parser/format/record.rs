/*!
Structured JSON rendering (§4.7), grounded in the original JSON formatter's
top-level shape and its per-attribute `.json()` methods. Gated behind the
`serde_json` feature since it is the one formatter with a hard dependency
on it.
*/
#![cfg(all(feature = "serde", feature = "serde_json"))]

use serde::Serialize;
use serde_json::{json, Value};

use crate::models::{
    BgpMessage, BgpMessageBody, Capability, OptionalParameter, OptionalParameterValue,
    PathAttribute, PathAttributeValue,
};

#[derive(Debug, Clone, Serialize)]
pub struct StructuredRecord {
    pub timestamp: String,
    pub message_type: u8,
    pub message_type_string: &'static str,
    pub length: u16,
    pub source_mac: Option<String>,
    pub destination_mac: Option<String>,
    pub source_ip: String,
    pub destination_ip: String,
    pub message_data: Option<Value>,
}

impl From<&BgpMessage> for StructuredRecord {
    fn from(message: &BgpMessage) -> StructuredRecord {
        let ctx = &message.pcap_context;
        StructuredRecord {
            timestamp: ctx.timestamp_string(),
            message_type: message.msg_type().code(),
            message_type_string: message.msg_type().label(),
            length: message.length,
            source_mac: ctx.source_mac_hex(),
            destination_mac: ctx.destination_mac_hex(),
            source_ip: ctx.source_ip.to_string(),
            destination_ip: ctx.destination_ip.to_string(),
            message_data: message_data(message),
        }
    }
}

fn message_data(message: &BgpMessage) -> Option<Value> {
    match &message.body {
        BgpMessageBody::Open(open) => Some(json!({
            "asn": open.my_asn,
            "hold_time": open.hold_time,
            "identifier": open.bgp_identifier.to_string(),
            "optional_parameter_length": open.optional_parameters_length,
            "optional_parameters": open.optional_parameters.iter().map(optional_parameter_json).collect::<Vec<_>>(),
        })),
        BgpMessageBody::Update(update) => Some(json!({
            "sub_type_string": update.subtype().label(),
            "withdrawn_routes_length": update.withdrawn_routes_length,
            "path_attributes_length": update.path_attributes_length,
            "path_attributes": update.path_attributes.iter().map(attribute_json).collect::<Vec<_>>(),
            "withdrawn_routes": update.withdrawn_routes.iter().map(|r| r.to_string()).collect::<Vec<_>>(),
            "nlri": update.nlri.iter().map(|r| r.to_string()).collect::<Vec<_>>(),
        })),
        BgpMessageBody::Notification(notification) => Some(json!({
            "length": notification.body.len(),
        })),
        BgpMessageBody::RouteRefresh(refresh) => Some(json!({
            "length": refresh.body.len(),
        })),
        BgpMessageBody::Keepalive(_) => None,
    }
}

fn optional_parameter_json(param: &OptionalParameter) -> Value {
    match &param.value {
        OptionalParameterValue::Capabilities(caps) => json!({
            "type": param.param_type,
            "type_string": "Capability",
            "capabilities": caps.iter().map(capability_json).collect::<Vec<_>>(),
        }),
        OptionalParameterValue::Authentication(bytes) => json!({
            "type": param.param_type,
            "type_string": "Authentication",
            "length": bytes.len(),
        }),
        OptionalParameterValue::Reserved(bytes) => json!({
            "type": param.param_type,
            "type_string": "Reserved",
            "length": bytes.len(),
        }),
    }
}

fn capability_json(cap: &Capability) -> Value {
    match cap {
        Capability::MultiprotocolExtensions { afi, safi, .. } => json!({
            "code": cap.code(),
            "type_string": cap.label(),
            "afi": *afi as u8,
            "safi": *safi as u8,
        }),
        Capability::FourOctetAsNumber(asn) => json!({
            "code": cap.code(),
            "type_string": cap.label(),
            "asn": asn,
        }),
        _ => json!({
            "code": cap.code(),
            "type_string": cap.label(),
        }),
    }
}

fn attribute_json(attr: &PathAttribute) -> Value {
    let base_type = attr.attr_type().code();
    let base_type_string = attr.attr_type().label();

    match &attr.value {
        PathAttributeValue::Origin(origin) => json!({
            "type": base_type,
            "type_string": base_type_string,
            "error": false,
            "origin": origin.as_u8(),
            "origin_string": attr.value.to_string(),
        }),
        PathAttributeValue::AsPath { path, .. } => json!({
            "type": base_type,
            "type_string": base_type_string,
            "error": false,
            "path_segments": path.segments.iter().map(|segment| json!({
                "type": segment.segment_type as u8,
                "asns": segment.asns,
            })).collect::<Vec<_>>(),
        }),
        PathAttributeValue::NextHop(addr) => json!({
            "type": base_type,
            "type_string": base_type_string,
            "error": false,
            "next_hop": addr.to_string(),
        }),
        PathAttributeValue::MultiExitDisc(v) => json!({
            "type": base_type,
            "type_string": base_type_string,
            "error": false,
            "multi_exit_disc": v,
        }),
        PathAttributeValue::LocalPref(v) => json!({
            "type": base_type,
            "type_string": base_type_string,
            "error": false,
            "local_pref": v,
        }),
        PathAttributeValue::AtomicAggregate => json!({
            "type": base_type,
            "type_string": base_type_string,
            "error": false,
        }),
        PathAttributeValue::Aggregator { asn, id, .. } => json!({
            "type": base_type,
            "type_string": base_type_string,
            "error": false,
            "asn": asn,
            "id": id.to_string(),
        }),
        PathAttributeValue::Communities(cs) => json!({
            "type": base_type,
            "type_string": base_type_string,
            "error": false,
            "communities": cs.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
        }),
        PathAttributeValue::OriginatorId(id) => json!({
            "type": base_type,
            "type_string": base_type_string,
            "error": false,
            "originator_id": id.to_string(),
        }),
        PathAttributeValue::ClusterList(ids) => json!({
            "type": base_type,
            "type_string": base_type_string,
            "error": false,
            "cluster_list": ids.iter().map(|id| id.to_string()).collect::<Vec<_>>(),
        }),
        PathAttributeValue::MpReachNlri(nlri) => json!({
            "type": base_type,
            "type_string": base_type_string,
            "error": false,
            "afi": nlri.afi as u8,
            "safi": nlri.safi as u8,
            "next_hops": nlri.next_hops.iter().map(|h| h.to_string()).collect::<Vec<_>>(),
            "nlri": nlri.prefixes.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
        }),
        PathAttributeValue::MpUnreachNlri(nlri) => json!({
            "type": base_type,
            "type_string": base_type_string,
            "error": false,
            "afi": nlri.afi as u8,
            "safi": nlri.safi as u8,
            "withdrawn_routes": nlri.prefixes.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
        }),
        PathAttributeValue::ExtendedCommunities(cs) => json!({
            "type": base_type,
            "type_string": base_type_string,
            "error": false,
            "extended_communities": cs.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
        }),
        PathAttributeValue::LargeCommunities(cs) => json!({
            "type": base_type,
            "type_string": base_type_string,
            "error": false,
            "large_communities": cs.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
        }),
        PathAttributeValue::Unknown { attr_type, bytes } => json!({
            "type": attr_type,
            "type_string": base_type_string,
            "error": false,
            "length": bytes.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{KeepaliveMessage, PcapContext};

    fn ctx() -> PcapContext {
        PcapContext {
            timestamp_sec: 1_700_000_000,
            timestamp_usec: 0,
            source_mac: None,
            destination_mac: None,
            source_ip: "192.0.2.1".parse().unwrap(),
            destination_ip: "192.0.2.2".parse().unwrap(),
            source_port: 179,
            destination_port: 54321,
            vlan_tags: vec![],
        }
    }

    #[test]
    fn test_keepalive_has_no_message_data() {
        let msg = BgpMessage {
            length: 19,
            parse_success: true,
            parse_error: false,
            pcap_context: ctx(),
            body: BgpMessageBody::Keepalive(KeepaliveMessage),
        };
        let record = StructuredRecord::from(&msg);
        assert!(record.message_data.is_none());
        assert_eq!(record.message_type_string, "KEEPALIVE");
    }

    #[test]
    fn test_record_serializes_to_json() {
        let msg = BgpMessage {
            length: 19,
            parse_success: true,
            parse_error: false,
            pcap_context: ctx(),
            body: BgpMessageBody::Keepalive(KeepaliveMessage),
        };
        let record = StructuredRecord::from(&msg);
        let rendered = serde_json::to_string(&record).unwrap();
        assert!(rendered.contains("\"message_data\":null"));
    }
}
