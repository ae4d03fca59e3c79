//! Wire-level data types: BGP messages and their sub-structures, network
//! address/prefix types, and the pcap envelope each message carries.

pub mod bgp;
pub mod network;
pub mod pcap;

pub use bgp::*;
pub use network::*;
pub use pcap::*;
