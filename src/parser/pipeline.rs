/*!
Ties a [`CaptureSource`] to the filter/format/sink chain (§4.9): decode
link/IP/TCP, build a [`PcapContext`], pre-filter, split and decode BGP
messages, then post-filter/format/write each one. Single-threaded,
cooperative, and cancellable between frames.
*/
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, warn};

use crate::error::ParserError;
use crate::parser::capture::CaptureSource;
use crate::parser::filter::FilterSet;
use crate::parser::format::Formatter;
use crate::parser::sink::{Sink, SinkHandle};
use crate::parser::splitter::split_messages;
use crate::parser::bgp::parse_bgp_message;

pub struct PipelineConfig {
    pub filters: FilterSet,
    pub formatter: Formatter,
}

pub struct PipelineDriver {
    config: PipelineConfig,
    cancelled: Arc<AtomicBool>,
}

impl PipelineDriver {
    pub fn new(config: PipelineConfig) -> PipelineDriver {
        PipelineDriver { config, cancelled: Arc::new(AtomicBool::new(false)) }
    }

    /// Installs a Ctrl+C handler that flips the shared cancellation flag,
    /// checked once per frame in [`Self::run`].
    pub fn install_ctrlc_handler(&self) -> Result<(), ParserError> {
        let cancelled = self.cancelled.clone();
        ctrlc::set_handler(move || {
            debug!("received interrupt signal, stopping after current record");
            cancelled.store(true, Ordering::SeqCst);
        })
        .map_err(|e| ParserError::ConfigError(format!("failed to install signal handler: {e}")))
    }

    /// Drives `source` to exhaustion (or until cancelled), writing every
    /// surviving record to `sink`. Returns the count of records written.
    pub fn run(
        &self,
        mut source: Box<dyn CaptureSource>,
        sink: &mut SinkHandle,
    ) -> Result<u64, ParserError> {
        let mut written = 0u64;

        while !self.cancelled.load(Ordering::SeqCst) {
            let (ctx, payload) = match source.next_frame()? {
                Some(frame) => frame,
                None => break,
            };

            if !self.config.filters.apply_pre(&ctx) {
                continue;
            }

            let slices = match split_messages(&payload) {
                Ok(slices) => slices,
                Err(ParserError::NoMessages) => continue,
                Err(e) => {
                    warn!("failed to split TCP payload into BGP messages: {e}");
                    continue;
                }
            };

            for slice in slices {
                let message = match parse_bgp_message(slice, ctx.clone()) {
                    Ok(message) => message,
                    Err(e) => {
                        debug!("dropping malformed BGP message: {e}");
                        continue;
                    }
                };

                if !self.config.filters.apply_post(&message) {
                    continue;
                }

                let record = match self.config.formatter.format(&message) {
                    Ok(record) => record,
                    Err(e) => {
                        warn!("formatter failed, dropping record: {e}");
                        continue;
                    }
                };

                if sink.write(&record).is_ok() {
                    written += 1;
                }
            }
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PcapContext;
    use bytes::Bytes;

    struct OneFrameSource {
        frame: Option<(PcapContext, Bytes)>,
    }

    impl CaptureSource for OneFrameSource {
        fn next_frame(&mut self) -> Result<Option<(PcapContext, Bytes)>, ParserError> {
            Ok(self.frame.take())
        }
    }

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

    fn keepalive_frame() -> Bytes {
        let mut bytes = vec![0xFFu8; 16];
        bytes.extend_from_slice(&19u16.to_be_bytes());
        bytes.push(4);
        Bytes::from(bytes)
    }

    #[test]
    fn test_run_writes_decoded_message() {
        let driver = PipelineDriver::new(PipelineConfig {
            filters: FilterSet::default(),
            formatter: Formatter::Human,
        });
        let source = Box::new(OneFrameSource { frame: Some((ctx(), keepalive_frame())) });
        let mut sink = SinkHandle::Stdout(crate::parser::sink::StdoutSink);
        let written = driver.run(source, &mut sink).unwrap();
        assert_eq!(written, 1);
    }

    #[test]
    fn test_run_stops_on_empty_source() {
        let driver = PipelineDriver::new(PipelineConfig {
            filters: FilterSet::default(),
            formatter: Formatter::Human,
        });
        let source = Box::new(OneFrameSource { frame: None });
        let mut sink = SinkHandle::Stdout(crate::parser::sink::StdoutSink);
        let written = driver.run(source, &mut sink).unwrap();
        assert_eq!(written, 0);
    }
}
