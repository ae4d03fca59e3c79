/*!
OPEN message decoding (RFC 4271 §4.2) including the optional parameters
list and, within it, BGP capability advertisements (RFC 5492).
*/
use std::net::Ipv4Addr;

use bytes::Bytes;
use log::debug;

use crate::error::{DecodeWarnings, ParserError};
use crate::models::{Capability, OpenMessage, OptionalParameter, OptionalParameterValue};
use crate::parser::utils::{read_n_bytes, ReadUtils};

const CAPABILITY_PARAM_TYPE: u8 = 2;
const AUTHENTICATION_PARAM_TYPE: u8 = 1;

/// Decodes one capability's value. A decode failure (e.g. a `FourOctetAsNumber`
/// capability with a truncated value) is recorded in `warnings` and falls back
/// to [`Capability::Unknown`] carrying the raw bytes, rather than aborting the
/// enclosing CAPABILITY parameter -- mirroring the per-attribute isolation in
/// [`crate::parser::bgp::attributes::parse_attributes`].
fn parse_capability(code: u8, value: Bytes, warnings: &mut DecodeWarnings) -> Capability {
    use crate::models::{Afi, Safi};
    let raw = value.clone();
    let decoded = (|| -> Result<Capability, ParserError> {
        let mut value = value;
        Ok(match code {
            1 => {
                let afi = value.read_afi()?;
                let reserved = value.read_u8()?;
                let safi = value.read_safi()?;
                Capability::MultiprotocolExtensions { afi, reserved, safi }
            }
            2 => Capability::RouteRefresh,
            3 => Capability::OutboundRouteFiltering(value.to_vec()),
            4 => Capability::MultipleRoutesToDestination(value.to_vec()),
            5 => Capability::ExtendedNextHopEncoding(value.to_vec()),
            6 => Capability::BgpExtendedMessage,
            64 => Capability::GracefulRestart(value.to_vec()),
            65 => Capability::FourOctetAsNumber(value.read_u32()?),
            67 => Capability::DynamicCapability(value.to_vec()),
            68 => Capability::MultisessionBgp(value.to_vec()),
            69 => Capability::AddPath(value.to_vec()),
            70 => Capability::EnhancedRouteRefresh,
            71 => Capability::LongLivedGracefulRestart(value.to_vec()),
            73 => Capability::Fqdn(value.to_vec()),
            128 => Capability::RouteRefreshLegacy,
            other => Capability::Unknown(other, value.to_vec()),
        })
    })();

    match decoded {
        Ok(cap) => cap,
        Err(e) => {
            debug!("capability code {code} failed to decode: {e}");
            warnings.push(format!("capability code {code}: {e}"));
            Capability::Unknown(code, raw.to_vec())
        }
    }
}

/// A single CAPABILITY optional parameter's value may pack more than one
/// capability advertisement back-to-back, each framed `code(1) | len(1) |
/// value(len)`. Only the sub-TLV framing itself (an unreadable code/length/
/// value triplet) is fatal to the walk; a capability that decodes badly
/// once framed is retained as [`Capability::Unknown`] via [`parse_capability`].
fn parse_capabilities(mut data: Bytes, warnings: &mut DecodeWarnings) -> Result<Vec<Capability>, ParserError> {
    let mut capabilities = Vec::new();
    while !data.is_empty() {
        let code = data.read_u8()?;
        let len = data.read_u8()? as usize;
        let value = read_n_bytes(&mut data, len)?;
        capabilities.push(parse_capability(code, value, warnings));
    }
    Ok(capabilities)
}

pub fn parse_open_message(mut data: Bytes) -> Result<OpenMessage, ParserError> {
    let version = data.read_u8()?;
    let my_asn = data.read_u16()?;
    let hold_time = data.read_u16()?;
    let bgp_identifier = Ipv4Addr::from(data.read_u32()?);
    let optional_parameters_length = data.read_u8()?;
    let params_bytes = read_n_bytes(&mut data, optional_parameters_length as usize)?;

    let mut remaining = params_bytes;
    let mut optional_parameters = Vec::new();
    let mut warnings = DecodeWarnings::new();
    while !remaining.is_empty() {
        let param_type = remaining.read_u8()?;
        let param_length = remaining.read_u8()?;
        let value_bytes = read_n_bytes(&mut remaining, param_length as usize)?;

        // A CAPABILITY parameter whose sub-TLV framing is itself malformed is
        // retained opaquely rather than aborting the whole OPEN body: one bad
        // optional parameter must not discard every parameter already parsed.
        let value = match param_type {
            CAPABILITY_PARAM_TYPE => match parse_capabilities(value_bytes.clone(), &mut warnings) {
                Ok(caps) => OptionalParameterValue::Capabilities(caps),
                Err(e) => {
                    debug!("CAPABILITY parameter failed to decode: {e}");
                    warnings.push(format!("CAPABILITY parameter: {e}"));
                    OptionalParameterValue::Reserved(value_bytes.to_vec())
                }
            },
            AUTHENTICATION_PARAM_TYPE => OptionalParameterValue::Authentication(value_bytes.to_vec()),
            _ => OptionalParameterValue::Reserved(value_bytes.to_vec()),
        };

        optional_parameters.push(OptionalParameter {
            param_type,
            param_length,
            value,
        });
    }

    Ok(OpenMessage {
        version,
        my_asn,
        hold_time,
        bgp_identifier,
        optional_parameters_length,
        optional_parameters,
        decode_warnings: warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_open_no_params() {
        let bytes = vec![4, 0, 100, 0, 90, 10, 0, 0, 1, 0];
        let open = parse_open_message(Bytes::from(bytes)).unwrap();
        assert_eq!(open.version, 4);
        assert_eq!(open.my_asn, 100);
        assert_eq!(open.hold_time, 90);
        assert_eq!(open.bgp_identifier, Ipv4Addr::new(10, 0, 0, 1));
        assert!(open.optional_parameters.is_empty());
    }

    #[test]
    fn test_parse_open_with_four_octet_asn_capability() {
        let mut bytes = vec![4, 0, 100, 0, 90, 10, 0, 0, 1];
        // opt params: one CAPABILITY param (type 2) wrapping one capability (code 65, 4-byte ASN)
        bytes.push(8); // optional_parameters_length
        bytes.push(2); // param_type = capability
        bytes.push(6); // param_length
        bytes.push(65); // capability code = four octet asn
        bytes.push(4); // capability length
        bytes.extend_from_slice(&100_000u32.to_be_bytes());

        let open = parse_open_message(Bytes::from(bytes)).unwrap();
        assert_eq!(open.optional_parameters.len(), 1);
        match &open.optional_parameters[0].value {
            OptionalParameterValue::Capabilities(caps) => {
                assert_eq!(caps, &vec![Capability::FourOctetAsNumber(100_000)]);
            }
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_capability_does_not_abort_open_message() {
        let mut bytes = vec![4, 0, 100, 0, 90, 10, 0, 0, 1];
        // Two CAPABILITY params back to back: the first wraps a FourOctetAsNumber
        // whose declared value is only 2 bytes (too short for the u32 it needs),
        // the second wraps a well-formed RouteRefresh. The first must not
        // discard the second, nor abort the OPEN body.
        bytes.push(10); // optional_parameters_length (6 + 4)
        bytes.push(2); // param_type = capability
        bytes.push(4); // param_length
        bytes.push(65); // capability code = four octet asn
        bytes.push(2); // capability length (too short for a u32)
        bytes.push(0);
        bytes.push(0);
        bytes.push(2); // param_type = capability
        bytes.push(2); // param_length
        bytes.push(2); // capability code = route refresh
        bytes.push(0); // capability length

        let open = parse_open_message(Bytes::from(bytes)).unwrap();
        assert_eq!(open.optional_parameters.len(), 2);
        assert!(open.decode_warnings.has_any());

        match &open.optional_parameters[0].value {
            OptionalParameterValue::Capabilities(caps) => {
                assert_eq!(caps.len(), 1);
                assert!(matches!(caps[0], Capability::Unknown(65, _)));
            }
            other => panic!("unexpected value: {other:?}"),
        }
        match &open.optional_parameters[1].value {
            OptionalParameterValue::Capabilities(caps) => {
                assert_eq!(caps, &vec![Capability::RouteRefresh]);
            }
            other => panic!("unexpected value: {other:?}"),
        }
    }
}
