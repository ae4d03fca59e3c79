use std::net::Ipv4Addr;

use bytes::{Buf, Bytes};

use crate::error::ParserError;

/// CLUSTER_LIST: a sequence of 4-byte cluster IDs, rendered as IPv4
/// addresses (RFC 4456).
pub fn parse_cluster_list(mut data: Bytes) -> Result<Vec<Ipv4Addr>, ParserError> {
    if data.remaining() % 4 != 0 {
        return Err(ParserError::DecodeError(format!(
            "CLUSTER_LIST length {} is not a multiple of 4",
            data.remaining()
        )));
    }
    let mut clusters = Vec::with_capacity(data.remaining() / 4);
    while data.has_remaining() {
        clusters.push(Ipv4Addr::from(data.get_u32()));
    }
    Ok(clusters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cluster_list() {
        let data = Bytes::from_static(&[10, 0, 0, 1, 10, 0, 0, 2]);
        let clusters = parse_cluster_list(data).unwrap();
        assert_eq!(clusters, vec![Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 2)]);
    }
}
