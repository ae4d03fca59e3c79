use std::net::Ipv4Addr;

use crate::error::DecodeWarnings;
use crate::models::bgp::capabilities::Capability;

/// The value carried by an OPEN optional parameter.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionalParameterValue {
    Capabilities(Vec<Capability>),
    Authentication(Vec<u8>),
    Reserved(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionalParameter {
    pub param_type: u8,
    pub param_length: u8,
    pub value: OptionalParameterValue,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenMessage {
    pub version: u8,
    pub my_asn: u16,
    pub hold_time: u16,
    pub bgp_identifier: Ipv4Addr,
    pub optional_parameters_length: u8,
    pub optional_parameters: Vec<OptionalParameter>,
    /// Non-fatal per-parameter/per-capability decode issues. The message
    /// still decodes successfully; this is diagnostic only.
    pub decode_warnings: DecodeWarnings,
}
