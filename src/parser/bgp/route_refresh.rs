/*!
ROUTE-REFRESH decoding (RFC 2918). Treated as opaque, see
[`crate::parser::bgp::notification`].
*/
use bytes::Bytes;

use crate::error::ParserError;
use crate::models::RouteRefreshMessage;

pub fn parse_route_refresh_message(data: Bytes) -> Result<RouteRefreshMessage, ParserError> {
    Ok(RouteRefreshMessage { body: data.to_vec() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_route_refresh_body() {
        let msg = parse_route_refresh_message(Bytes::from_static(&[0, 1, 1, 0])).unwrap();
        assert_eq!(msg.body, vec![0, 1, 1, 0]);
    }
}
