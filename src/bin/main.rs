use std::path::PathBuf;
use std::process::exit;

use clap::{Parser, ValueEnum};
use log::error;

use bgp_capture_pipeline::error::ParserError;
use bgp_capture_pipeline::parser::capture::{CaptureSource, InterfaceSource, PcapFileSource, StdinSource};
use bgp_capture_pipeline::parser::filter::{FilterSet, PostFilter, PreFilter};
use bgp_capture_pipeline::parser::format::{Formatter, LineField};
use bgp_capture_pipeline::parser::pipeline::{PipelineConfig, PipelineDriver};
use bgp_capture_pipeline::parser::sink::{BrokerSink, FileSink, SinkHandle, StdoutSink};

/// Decodes BGP sessions out of a packet capture, filters and formats each
/// message, and writes the result to a sink.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Opts {
    /// Output rendering for each decoded message.
    #[arg(long, value_enum, default_value_t = FormatterArg::HumanReadable)]
    formatter: FormatterArg,

    /// Comma-separated ordered field list for `--formatter LINE`.
    #[arg(long)]
    fields: Option<String>,

    /// Output transport.
    #[arg(long, value_enum, default_value_t = PipeArg::Stdout)]
    pipe: PipeArg,

    /// Output file path, required when `--pipe FILE`.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Kafka bootstrap server, required when `--pipe KAFKA`.
    #[arg(long)]
    kafka_server: Option<String>,

    /// Kafka topic, required when `--pipe KAFKA`.
    #[arg(long)]
    kafka_topic: Option<String>,

    /// Read frames from a live interface. Not supported by this build.
    #[arg(long, conflicts_with_all = ["pcap", "stdin"])]
    interface: Option<String>,

    /// Read frames from one libpcap file or a glob of files.
    #[arg(long, conflicts_with_all = ["interface", "stdin"])]
    pcap: Option<String>,

    /// Read frames from standard input.
    #[arg(long, conflicts_with_all = ["interface", "pcap"])]
    stdin: bool,

    /// Raise the log level to Debug.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Lower the log level to Error.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(flatten)]
    filters: FilterArgs,
}

#[derive(Parser, Debug)]
struct FilterArgs {
    #[arg(long, value_delimiter = ',')]
    filter_message_type: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    filter_message_subtype: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    filter_message_size: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    filter_timestamp: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    filter_nlri: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    filter_withdrawn: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    filter_next_hop: Vec<String>,
    #[arg(long = "filter-as", value_delimiter = ',')]
    filter_as: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    filter_last_as: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    filter_community_as: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    filter_community_value: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    filter_large_community: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    filter_source_ip: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    filter_destination_ip: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    filter_source_mac: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    filter_destination_mac: Vec<String>,
}

impl FilterArgs {
    fn into_filter_set(self) -> FilterSet {
        let mut pre = Vec::new();
        let mut post = Vec::new();

        if !self.filter_source_ip.is_empty() {
            pre.push(PreFilter::SourceIp(self.filter_source_ip));
        }
        if !self.filter_destination_ip.is_empty() {
            pre.push(PreFilter::DestinationIp(self.filter_destination_ip));
        }
        if !self.filter_source_mac.is_empty() {
            pre.push(PreFilter::SourceMac(self.filter_source_mac));
        }
        if !self.filter_destination_mac.is_empty() {
            pre.push(PreFilter::DestinationMac(self.filter_destination_mac));
        }
        if !self.filter_timestamp.is_empty() {
            pre.push(PreFilter::Timestamp(self.filter_timestamp));
        }

        if !self.filter_message_type.is_empty() {
            post.push(PostFilter::MessageType(self.filter_message_type));
        }
        if !self.filter_message_subtype.is_empty() {
            post.push(PostFilter::MessageSubType(self.filter_message_subtype));
        }
        if !self.filter_message_size.is_empty() {
            post.push(PostFilter::MessageSize(self.filter_message_size));
        }
        if !self.filter_nlri.is_empty() {
            post.push(PostFilter::Nlri(self.filter_nlri));
        }
        if !self.filter_withdrawn.is_empty() {
            post.push(PostFilter::Withdrawn(self.filter_withdrawn));
        }
        if !self.filter_next_hop.is_empty() {
            post.push(PostFilter::NextHop(self.filter_next_hop));
        }
        if !self.filter_as.is_empty() {
            post.push(PostFilter::Asn(self.filter_as));
        }
        if !self.filter_last_as.is_empty() {
            post.push(PostFilter::LastAsn(self.filter_last_as));
        }
        if !self.filter_community_as.is_empty() {
            post.push(PostFilter::CommunityAsn(self.filter_community_as));
        }
        if !self.filter_community_value.is_empty() {
            post.push(PostFilter::CommunityValue(self.filter_community_value));
        }
        if !self.filter_large_community.is_empty() {
            post.push(PostFilter::LargeCommunity(self.filter_large_community));
        }

        FilterSet { pre, post }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatterArg {
    #[value(name = "JSON")]
    Json,
    #[value(name = "HUMAN_READABLE")]
    HumanReadable,
    #[value(name = "LINE")]
    Line,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PipeArg {
    #[value(name = "FILE")]
    File,
    #[value(name = "STDOUT")]
    Stdout,
    #[value(name = "KAFKA")]
    Kafka,
}

fn build_formatter(opts: &Opts) -> Result<Formatter, ParserError> {
    match opts.formatter {
        FormatterArg::Json => Ok(Formatter::Json),
        FormatterArg::HumanReadable => Ok(Formatter::Human),
        FormatterArg::Line => {
            let fields = match &opts.fields {
                Some(raw) => LineField::parse_list(raw)?,
                None => LineField::defaults(),
            };
            Ok(Formatter::Line(fields))
        }
    }
}

fn build_sink(opts: &Opts) -> Result<SinkHandle, ParserError> {
    match opts.pipe {
        PipeArg::Stdout => Ok(SinkHandle::Stdout(StdoutSink)),
        PipeArg::File => {
            let path = opts
                .output
                .as_ref()
                .ok_or_else(|| ParserError::ConfigError("--pipe FILE requires --output".to_string()))?;
            Ok(SinkHandle::File(FileSink::open(path)?))
        }
        PipeArg::Kafka => {
            let server = opts
                .kafka_server
                .as_deref()
                .ok_or_else(|| ParserError::ConfigError("--pipe KAFKA requires --kafka-server".to_string()))?;
            let topic = opts
                .kafka_topic
                .as_deref()
                .ok_or_else(|| ParserError::ConfigError("--pipe KAFKA requires --kafka-topic".to_string()))?;
            Ok(SinkHandle::Broker(BrokerSink::connect(server, topic)?))
        }
    }
}

fn build_source(opts: &Opts) -> Result<Box<dyn CaptureSource>, ParserError> {
    if let Some(interface) = &opts.interface {
        return Ok(Box::new(InterfaceSource::open(interface)?));
    }
    if let Some(pattern) = &opts.pcap {
        if pattern == "-" {
            return Ok(Box::new(StdinSource::open()?));
        }
        return Ok(Box::new(PcapFileSource::open(pattern)?));
    }
    if opts.stdin {
        return Ok(Box::new(StdinSource::open()?));
    }
    Err(ParserError::ConfigError(
        "one of --interface, --pcap, or --stdin is required".to_string(),
    ))
}

fn run(opts: Opts) -> Result<u64, ParserError> {
    let formatter = build_formatter(&opts)?;
    let mut sink = build_sink(&opts)?;
    let source = build_source(&opts)?;
    let filters = opts.filters.into_filter_set();

    let driver = PipelineDriver::new(PipelineConfig { filters, formatter });
    driver.install_ctrlc_handler()?;
    driver.run(source, &mut sink)
}

fn main() {
    let opts = Opts::parse();

    let level = match (opts.verbose, opts.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        (false, false) => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(opts) {
        Ok(count) => {
            log::info!("pipeline finished, wrote {count} records");
        }
        Err(e) => {
            error!("{e}");
            exit(1);
        }
    }
}
