/*!
Decodes BGP sessions carried over captured TCP traffic into structured
records.

This crate reads packet captures (libpcap files, standard input, or -- where
a source is available -- a live interface), reassembles the BGP messages
each stream carries, and runs each message through a user-configured
pre-filter / post-filter / format / sink chain. It is the library half of
the `bgp-capture-pipeline` binary; the binary itself is a thin `clap` CLI
wrapper over the types here.

# Example

```no_run
use bgp_capture_pipeline::parser::capture::PcapFileSource;
use bgp_capture_pipeline::parser::filter::FilterSet;
use bgp_capture_pipeline::parser::format::Formatter;
use bgp_capture_pipeline::parser::pipeline::{PipelineConfig, PipelineDriver};
use bgp_capture_pipeline::parser::sink::{SinkHandle, StdoutSink};

let source = Box::new(PcapFileSource::open("capture.pcap").unwrap());
let driver = PipelineDriver::new(PipelineConfig {
    filters: FilterSet::default(),
    formatter: Formatter::Human,
});
let mut sink = SinkHandle::Stdout(StdoutSink);
driver.run(source, &mut sink).unwrap();
```

# Modules

- [`models`] -- the decoded BGP and packet-capture data types.
- [`parser`] -- capture sources, the BGP decoder, filters, formatters, sinks,
  and the pipeline driver that ties them together.
- [`error`] -- the [`error::ParserError`] taxonomy shared across every stage.
*/
pub mod error;
pub mod models;
pub mod parser;
