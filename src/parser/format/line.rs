/*!
Tab-separated column rendering over a user-chosen ordered field list
(§4.7), aliases grounded in the original line formatter's `REGISTERED_FIELDS`.
*/
use crate::error::ParserError;
use crate::models::{BgpMessage, BgpMessageBody, PathAttributeValue};

/// One registered field name. Each carries the full set of accepted
/// aliases a `--fields` argument may spell it with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineField {
    Timestamp,
    SourceIp,
    DestinationIp,
    SourceMac,
    DestinationMac,
    Length,
    MessageType,
    Subtype,
    PathAttributesLength,
    WithdrawnRoutesLength,
    WithdrawnRoutes,
    Nlri,
    PrefixLength,
    Origin,
    AsPath,
    AsPathLastAsn,
    NextHop,
    Communities,
    LargeCommunities,
    MyAsn,
    HoldTime,
    Version,
    BgpIdentifier,
}

impl LineField {
    /// All aliases this field is recognized under, first one canonical.
    const fn aliases(&self) -> &'static [&'static str] {
        match self {
            LineField::Timestamp => &["timestamp"],
            LineField::SourceIp => &["source_ip", "src_ip"],
            LineField::DestinationIp => &["destination_ip", "dst_ip"],
            LineField::SourceMac => &["source_mac", "src_mac", "mac_src", "mac_source"],
            LineField::DestinationMac => &["destination_mac", "dst_mac", "mac_dst", "mac_destination"],
            LineField::Length => &["length"],
            LineField::MessageType => &["type"],
            LineField::Subtype => &["subtype"],
            LineField::PathAttributesLength => &["path_attributes_length"],
            LineField::WithdrawnRoutesLength => &["withdrawn_routes_length"],
            LineField::WithdrawnRoutes => &["withdrawn_routes", "withdrawn_route", "withdrawals"],
            LineField::Nlri => &["prefixes", "prefix", "nlri"],
            LineField::PrefixLength => &["prefix_length"],
            LineField::Origin => &["origin"],
            LineField::AsPath => &["as_path"],
            LineField::AsPathLastAsn => &["as_path_last_asn"],
            LineField::NextHop => &["next_hop"],
            LineField::Communities => &["communities"],
            LineField::LargeCommunities => &["large_communities"],
            LineField::MyAsn => &["myasn", "my_asn", "asn"],
            LineField::HoldTime => &["hold_time", "holdtime", "holdtimer", "hold_timer"],
            LineField::Version => &["version"],
            LineField::BgpIdentifier => &["bgp_identifier"],
        }
    }

    const ALL: &'static [LineField] = &[
        LineField::Timestamp,
        LineField::SourceIp,
        LineField::DestinationIp,
        LineField::SourceMac,
        LineField::DestinationMac,
        LineField::Length,
        LineField::MessageType,
        LineField::Subtype,
        LineField::PathAttributesLength,
        LineField::WithdrawnRoutesLength,
        LineField::WithdrawnRoutes,
        LineField::Nlri,
        LineField::PrefixLength,
        LineField::Origin,
        LineField::AsPath,
        LineField::AsPathLastAsn,
        LineField::NextHop,
        LineField::Communities,
        LineField::LargeCommunities,
        LineField::MyAsn,
        LineField::HoldTime,
        LineField::Version,
        LineField::BgpIdentifier,
    ];

    /// The default field set when `--fields` is not supplied.
    pub fn defaults() -> Vec<LineField> {
        vec![
            LineField::Timestamp,
            LineField::MessageType,
            LineField::Subtype,
            LineField::Nlri,
            LineField::WithdrawnRoutes,
        ]
    }

    /// Parses a comma-separated `--fields` argument, rejecting unknown names.
    pub fn parse_list(raw: &str) -> Result<Vec<LineField>, ParserError> {
        raw.split(',')
            .map(str::trim)
            .map(|name| {
                LineField::ALL
                    .iter()
                    .find(|field| field.aliases().contains(&name))
                    .copied()
                    .ok_or_else(|| ParserError::ConfigError(format!("unrecognized field name: {name}")))
            })
            .collect()
    }
}

fn update(message: &BgpMessage) -> Option<&crate::models::UpdateMessage> {
    match &message.body {
        BgpMessageBody::Update(update) => Some(update),
        _ => None,
    }
}

fn open(message: &BgpMessage) -> Option<&crate::models::OpenMessage> {
    match &message.body {
        BgpMessageBody::Open(open) => Some(open),
        _ => None,
    }
}

fn attr_values<'a>(
    update: &'a crate::models::UpdateMessage,
    pick: impl Fn(&PathAttributeValue) -> bool,
) -> Vec<&'a PathAttributeValue> {
    update
        .path_attributes
        .iter()
        .map(|a| &a.value)
        .filter(|v| pick(v))
        .collect()
}

/// Renders one column's value; `None` for an inapplicable field leaves an
/// empty column, matching the original formatter's behavior.
fn field_value(field: LineField, message: &BgpMessage) -> Option<String> {
    match field {
        LineField::Timestamp => Some(message.pcap_context.timestamp_string()),
        LineField::SourceIp => Some(message.pcap_context.source_ip.to_string()),
        LineField::DestinationIp => Some(message.pcap_context.destination_ip.to_string()),
        LineField::SourceMac => message.pcap_context.source_mac_hex(),
        LineField::DestinationMac => message.pcap_context.destination_mac_hex(),
        LineField::Length => Some(message.length.to_string()),
        LineField::MessageType => Some(message.msg_type().label().to_string()),
        LineField::Subtype => update(message).map(|u| u.subtype().label().to_string()),
        LineField::PathAttributesLength => update(message).map(|u| u.path_attributes_length.to_string()),
        LineField::WithdrawnRoutesLength => update(message).map(|u| u.withdrawn_routes_length.to_string()),
        LineField::WithdrawnRoutes => update(message).map(|u| {
            u.withdrawn_routes.iter().map(|r| r.to_string()).collect::<Vec<_>>().join(" ")
        }),
        LineField::Nlri => update(message).map(|u| {
            u.nlri.iter().map(|r| r.to_string()).collect::<Vec<_>>().join(" ")
        }),
        LineField::PrefixLength => update(message).map(|u| {
            u.nlri.iter().map(|r| r.prefix_bits().to_string()).collect::<Vec<_>>().join(" ")
        }),
        LineField::Origin => update(message).map(|u| {
            attr_values(u, |v| matches!(v, PathAttributeValue::Origin(_)))
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        }),
        LineField::AsPath => update(message).map(|u| {
            attr_values(u, |v| matches!(v, PathAttributeValue::AsPath { .. }))
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        }),
        LineField::AsPathLastAsn => update(message).and_then(|u| {
            u.path_attributes.iter().find_map(|a| match &a.value {
                PathAttributeValue::AsPath { path, .. } => path.last_asn().map(|asn| asn.to_string()),
                _ => None,
            })
        }),
        LineField::NextHop => update(message).map(|u| {
            attr_values(u, |v| matches!(v, PathAttributeValue::NextHop(_)))
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        }),
        LineField::Communities => update(message).map(|u| {
            attr_values(u, |v| matches!(v, PathAttributeValue::Communities(_)))
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        }),
        LineField::LargeCommunities => update(message).map(|u| {
            attr_values(u, |v| matches!(v, PathAttributeValue::LargeCommunities(_)))
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        }),
        LineField::MyAsn => open(message).map(|o| o.my_asn.to_string()),
        LineField::HoldTime => open(message).map(|o| o.hold_time.to_string()),
        LineField::Version => open(message).map(|o| o.version.to_string()),
        LineField::BgpIdentifier => open(message).map(|o| o.bgp_identifier.to_string()),
    }
}

#[derive(Debug, Clone)]
pub struct LineFormatter {
    fields: Vec<LineField>,
}

impl LineFormatter {
    pub fn new(fields: Vec<LineField>) -> LineFormatter {
        LineFormatter { fields }
    }

    pub fn render(&self, message: &BgpMessage) -> String {
        self.fields
            .iter()
            .map(|f| field_value(*f, message).unwrap_or_default())
            .collect::<Vec<_>>()
            .join("\t")
    }
}
