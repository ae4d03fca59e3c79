/*!
Frame sources behind `--pcap`/`--stdin`/`--interface` (§4.9): each yields
already-demultiplexed `(PcapContext, tcp_payload)` pairs to the pipeline
driver. Grounded in the teacher's `Box<dyn Read>` reader-selection idiom
in its own `io.rs`, generalized from "pick a decompressor" to "pick a
packet source."
*/
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::path::{Path, PathBuf};

use bytes::Bytes;
use log::{debug, warn};

use crate::error::ParserError;
use crate::models::PcapContext;

const ETHERTYPE_IPV4: u16 = 0x0800;
const ETHERTYPE_IPV6: u16 = 0x86DD;
const ETHERTYPE_VLAN: u16 = 0x8100;
const ETHERTYPE_VLAN_QINQ: u16 = 0x88A8;

const LINKTYPE_ETHERNET: u32 = 1;
const LINKTYPE_LINUX_SLL: u32 = 113;

const IPPROTO_TCP: u8 = 6;

/// A source of frames already stripped down to their TCP payload, plus
/// the envelope metadata the decoder and formatters need.
pub trait CaptureSource {
    /// Returns the next frame, or `None` once the source is exhausted.
    fn next_frame(&mut self) -> Result<Option<(PcapContext, Bytes)>, ParserError>;
}

/// Expands a `--pcap` argument, which may be a single path or a glob
/// pattern, into a sorted list of files to read in sequence.
pub fn expand_pcap_paths(pattern: &str) -> Result<Vec<PathBuf>, ParserError> {
    let mut paths: Vec<PathBuf> = glob::glob(pattern)
        .map_err(|e| ParserError::ConfigError(format!("invalid --pcap pattern {pattern}: {e}")))?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("skipping unreadable glob entry: {e}");
                None
            }
        })
        .collect();
    paths.sort();
    if paths.is_empty() {
        return Err(ParserError::ConfigError(format!(
            "--pcap pattern {pattern} matched no files"
        )));
    }
    Ok(paths)
}

#[derive(Debug, Clone, Copy)]
struct PcapHeader {
    big_endian: bool,
    nanosecond_resolution: bool,
    linktype: u32,
}

fn read_exact_or_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<bool, ParserError> {
    match reader.read_exact(buf) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(ParserError::CaptureError(e.to_string())),
    }
}

fn read_u32(buf: &[u8; 4], big_endian: bool) -> u32 {
    if big_endian {
        u32::from_be_bytes(*buf)
    } else {
        u32::from_le_bytes(*buf)
    }
}

/// Reads the 24-byte libpcap global header, classifying byte order and
/// timestamp resolution from the magic number.
fn read_global_header<R: Read>(reader: &mut R) -> Result<PcapHeader, ParserError> {
    let mut header = [0u8; 24];
    reader
        .read_exact(&mut header)
        .map_err(|e| ParserError::CaptureError(format!("failed to read pcap global header: {e}")))?;
    let magic = u32::from_le_bytes(header[0..4].try_into().unwrap());
    let (big_endian, nanosecond_resolution) = match magic {
        0xa1b2_c3d4 => (false, false),
        0xa1b2_3c4d => (false, true),
        0xd4c3_b2a1 => (true, false),
        0x4d3c_b2a1 => (true, true),
        other => {
            return Err(ParserError::CaptureError(format!(
                "unrecognized pcap magic number {other:#x}"
            )))
        }
    };
    let linktype = read_u32(&header[20..24].try_into().unwrap(), big_endian);
    Ok(PcapHeader { big_endian, nanosecond_resolution, linktype })
}

struct RecordHeader {
    ts_sec: u32,
    ts_usec: u32,
    incl_len: u32,
}

fn read_record_header<R: Read>(
    reader: &mut R,
    header: &PcapHeader,
) -> Result<Option<RecordHeader>, ParserError> {
    let mut buf = [0u8; 16];
    if !read_exact_or_eof(reader, &mut buf)? {
        return Ok(None);
    }
    let ts_sec = read_u32(&buf[0..4].try_into().unwrap(), header.big_endian);
    let ts_frac = read_u32(&buf[4..8].try_into().unwrap(), header.big_endian);
    let incl_len = read_u32(&buf[8..12].try_into().unwrap(), header.big_endian);
    let ts_usec = if header.nanosecond_resolution { ts_frac / 1000 } else { ts_frac };
    Ok(Some(RecordHeader { ts_sec, ts_usec, incl_len }))
}

/// Walks Ethernet (with optional VLAN tags), IPv4/IPv6, and TCP headers to
/// find the byte range of a TCP segment's payload. Returns `None` for
/// anything other than a single-encapsulation IPv4-or-IPv6-over-TCP frame;
/// no IP fragmentation or reassembly is attempted.
fn demux_frame(linktype: u32, data: &[u8]) -> Option<(PcapContext, Bytes)> {
    let mut cursor = data;
    let mut vlan_tags = Vec::new();

    let (source_mac, destination_mac, ethertype, payload) = match linktype {
        LINKTYPE_ETHERNET => {
            if cursor.len() < 14 {
                return None;
            }
            let destination_mac: [u8; 6] = cursor[0..6].try_into().unwrap();
            let source_mac: [u8; 6] = cursor[6..12].try_into().unwrap();
            let mut ethertype = u16::from_be_bytes(cursor[12..14].try_into().unwrap());
            cursor = &cursor[14..];
            while ethertype == ETHERTYPE_VLAN || ethertype == ETHERTYPE_VLAN_QINQ {
                if cursor.len() < 4 {
                    return None;
                }
                let tci = u16::from_be_bytes(cursor[0..2].try_into().unwrap());
                vlan_tags.push(tci & 0x0FFF);
                ethertype = u16::from_be_bytes(cursor[2..4].try_into().unwrap());
                cursor = &cursor[4..];
            }
            (Some(source_mac), Some(destination_mac), ethertype, cursor)
        }
        LINKTYPE_LINUX_SLL => {
            if cursor.len() < 16 {
                return None;
            }
            let ethertype = u16::from_be_bytes(cursor[14..16].try_into().unwrap());
            (None, None, ethertype, &cursor[16..])
        }
        other => {
            debug!("unsupported link type {other}, dropping frame");
            return None;
        }
    };

    let (source_ip, destination_ip, tcp_segment) = match ethertype {
        ETHERTYPE_IPV4 => demux_ipv4(payload)?,
        ETHERTYPE_IPV6 => demux_ipv6(payload)?,
        other => {
            debug!("unsupported ethertype {other:#06x}, dropping frame");
            return None;
        }
    };

    let (source_port, destination_port, tcp_payload) = demux_tcp(tcp_segment)?;

    let ctx = PcapContext {
        timestamp_sec: 0,
        timestamp_usec: 0,
        source_mac,
        destination_mac,
        source_ip,
        destination_ip,
        source_port,
        destination_port,
        vlan_tags,
    };
    Some((ctx, Bytes::copy_from_slice(tcp_payload)))
}

fn demux_ipv4(data: &[u8]) -> Option<(IpAddr, IpAddr, &[u8])> {
    if data.len() < 20 {
        return None;
    }
    let version = data[0] >> 4;
    if version != 4 {
        return None;
    }
    let ihl = (data[0] & 0x0F) as usize * 4;
    if ihl < 20 || data.len() < ihl {
        return None;
    }
    if data[9] != IPPROTO_TCP {
        return None;
    }
    let source_ip = IpAddr::V4(Ipv4Addr::new(data[12], data[13], data[14], data[15]));
    let destination_ip = IpAddr::V4(Ipv4Addr::new(data[16], data[17], data[18], data[19]));
    Some((source_ip, destination_ip, &data[ihl..]))
}

fn demux_ipv6(data: &[u8]) -> Option<(IpAddr, IpAddr, &[u8])> {
    if data.len() < 40 {
        return None;
    }
    let version = data[0] >> 4;
    if version != 6 {
        return None;
    }
    if data[6] != IPPROTO_TCP {
        return None;
    }
    let source_ip = IpAddr::V6(Ipv6Addr::from(<[u8; 16]>::try_from(&data[8..24]).unwrap()));
    let destination_ip = IpAddr::V6(Ipv6Addr::from(<[u8; 16]>::try_from(&data[24..40]).unwrap()));
    Some((source_ip, destination_ip, &data[40..]))
}

fn demux_tcp(data: &[u8]) -> Option<(u16, u16, &[u8])> {
    if data.len() < 20 {
        return None;
    }
    let source_port = u16::from_be_bytes(data[0..2].try_into().unwrap());
    let destination_port = u16::from_be_bytes(data[2..4].try_into().unwrap());
    let data_offset = (data[12] >> 4) as usize * 4;
    if data_offset < 20 || data.len() < data_offset {
        return None;
    }
    Some((source_port, destination_port, &data[data_offset..]))
}

/// Reads a libpcap file, or a sequence of them expanded from a glob
/// pattern, one record at a time.
pub struct PcapFileSource {
    paths: Vec<PathBuf>,
    path_index: usize,
    reader: Option<BufReader<File>>,
    header: Option<PcapHeader>,
}

impl PcapFileSource {
    pub fn open(pattern: &str) -> Result<PcapFileSource, ParserError> {
        let paths = expand_pcap_paths(pattern)?;
        Ok(PcapFileSource { paths, path_index: 0, reader: None, header: None })
    }

    fn advance_to_next_file(&mut self) -> Result<bool, ParserError> {
        if self.path_index >= self.paths.len() {
            return Ok(false);
        }
        let path: &Path = &self.paths[self.path_index];
        debug!("opening pcap file {}", path.display());
        let file = File::open(path)
            .map_err(|e| ParserError::CaptureError(format!("{}: {e}", path.display())))?;
        let mut reader = BufReader::new(file);
        let header = read_global_header(&mut reader)?;
        self.reader = Some(reader);
        self.header = Some(header);
        self.path_index += 1;
        Ok(true)
    }
}

impl CaptureSource for PcapFileSource {
    fn next_frame(&mut self) -> Result<Option<(PcapContext, Bytes)>, ParserError> {
        loop {
            if self.reader.is_none() && !self.advance_to_next_file()? {
                return Ok(None);
            }
            let header = *self.header.as_ref().unwrap();
            let reader = self.reader.as_mut().unwrap();
            let record = match read_record_header(reader, &header)? {
                Some(record) => record,
                None => {
                    self.reader = None;
                    continue;
                }
            };
            let mut data = vec![0u8; record.incl_len as usize];
            if !read_exact_or_eof(reader, &mut data)? {
                self.reader = None;
                continue;
            }
            match demux_frame(header.linktype, &data) {
                Some((mut ctx, payload)) => {
                    ctx.timestamp_sec = record.ts_sec;
                    ctx.timestamp_usec = record.ts_usec;
                    return Ok(Some((ctx, payload)));
                }
                None => continue,
            }
        }
    }
}

/// Reads the same libpcap per-record framing from standard input.
pub struct StdinSource<R: Read> {
    reader: R,
    header: PcapHeader,
}

impl StdinSource<io::Stdin> {
    pub fn open() -> Result<StdinSource<io::Stdin>, ParserError> {
        let mut reader = io::stdin();
        let header = read_global_header(&mut reader)?;
        Ok(StdinSource { reader, header })
    }
}

impl<R: Read> CaptureSource for StdinSource<R> {
    fn next_frame(&mut self) -> Result<Option<(PcapContext, Bytes)>, ParserError> {
        loop {
            let record = match read_record_header(&mut self.reader, &self.header)? {
                Some(record) => record,
                None => return Ok(None),
            };
            let mut data = vec![0u8; record.incl_len as usize];
            if !read_exact_or_eof(&mut self.reader, &mut data)? {
                return Ok(None);
            }
            match demux_frame(self.header.linktype, &data) {
                Some((mut ctx, payload)) => {
                    ctx.timestamp_sec = record.ts_sec;
                    ctx.timestamp_usec = record.ts_usec;
                    return Ok(Some((ctx, payload)));
                }
                None => continue,
            }
        }
    }
}

/// Live capture is accepted on the CLI surface but not implemented: the
/// teacher's dependency graph carries no libpcap FFI binding to ground it on.
pub struct InterfaceSource;

impl InterfaceSource {
    pub fn open(_interface: &str) -> Result<InterfaceSource, ParserError> {
        Err(ParserError::ConfigError(
            "live interface capture is not supported by this build".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn ethernet_ipv4_tcp_frame() -> Vec<u8> {
        let mut frame = Vec::new();
        frame.extend_from_slice(&[0x00, 0x11, 0x22, 0x33, 0x44, 0x55]); // dst mac
        frame.extend_from_slice(&[0x00, 0x66, 0x77, 0x88, 0x99, 0xaa]); // src mac
        frame.extend_from_slice(&[0x08, 0x00]); // ipv4 ethertype

        let mut ip = vec![0x45, 0x00, 0x00, 0x00, 0, 0, 0, 0, 64, IPPROTO_TCP, 0, 0];
        ip.extend_from_slice(&[192, 0, 2, 1]);
        ip.extend_from_slice(&[192, 0, 2, 2]);

        let mut tcp = vec![0x00, 179, 0x13, 0x89]; // src port 179, dst port 5001
        tcp.extend_from_slice(&[0, 0, 0, 1]); // seq
        tcp.extend_from_slice(&[0, 0, 0, 0]); // ack
        tcp.push(0x50); // data offset 5 (20 bytes), no options
        tcp.push(0x18);
        tcp.extend_from_slice(&[0xff, 0xff]); // window
        tcp.extend_from_slice(&[0, 0]); // checksum
        tcp.extend_from_slice(&[0, 0]); // urgent pointer
        tcp.extend_from_slice(b"payload");

        let total_len = (ip.len() + tcp.len()) as u16;
        ip[2..4].copy_from_slice(&total_len.to_be_bytes());

        frame.extend_from_slice(&ip);
        frame.extend_from_slice(&tcp);
        frame
    }

    #[test]
    fn test_demux_ethernet_ipv4_tcp() {
        let frame = ethernet_ipv4_tcp_frame();
        let (ctx, payload) = demux_frame(LINKTYPE_ETHERNET, &frame).unwrap();
        assert_eq!(ctx.source_ip.to_string(), "192.0.2.1");
        assert_eq!(ctx.destination_ip.to_string(), "192.0.2.2");
        assert_eq!(ctx.source_port, 179);
        assert_eq!(payload.as_ref(), b"payload");
    }

    #[test]
    fn test_demux_rejects_non_tcp() {
        let mut frame = ethernet_ipv4_tcp_frame();
        frame[14 + 9] = 17; // flip protocol to UDP
        assert!(demux_frame(LINKTYPE_ETHERNET, &frame).is_none());
    }

    #[test]
    fn test_pcap_file_source_reads_one_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.pcap");
        let mut file = File::create(&path).unwrap();

        let mut global = vec![0xd4, 0xc3, 0xb2, 0xa1]; // little-endian magic
        global.extend_from_slice(&2u16.to_le_bytes());
        global.extend_from_slice(&4u16.to_le_bytes());
        global.extend_from_slice(&0i32.to_le_bytes());
        global.extend_from_slice(&0u32.to_le_bytes());
        global.extend_from_slice(&65535u32.to_le_bytes());
        global.extend_from_slice(&LINKTYPE_ETHERNET.to_le_bytes());
        file.write_all(&global).unwrap();

        let frame = ethernet_ipv4_tcp_frame();
        file.write_all(&1_700_000_000u32.to_le_bytes()).unwrap();
        file.write_all(&0u32.to_le_bytes()).unwrap();
        file.write_all(&(frame.len() as u32).to_le_bytes()).unwrap();
        file.write_all(&(frame.len() as u32).to_le_bytes()).unwrap();
        file.write_all(&frame).unwrap();
        drop(file);

        let mut source = PcapFileSource::open(path.to_str().unwrap()).unwrap();
        let (ctx, payload) = source.next_frame().unwrap().unwrap();
        assert_eq!(ctx.timestamp_sec, 1_700_000_000);
        assert_eq!(payload.as_ref(), b"payload");
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_unmatched_glob_is_config_error() {
        assert!(matches!(
            expand_pcap_paths("/nonexistent/path/*.pcap"),
            Err(ParserError::ConfigError(_))
        ));
    }
}
