/*!
Output transports (§4.8): file, stdout, and a Kafka broker producer. Each
sink accepts one already-formatted record at a time; write failures are
logged and the record is dropped, except at broker startup where a
connect failure is fatal.
*/
mod broker;
mod file;
mod stdout;

pub use broker::BrokerSink;
pub use file::FileSink;
pub use stdout::StdoutSink;

use crate::error::ParserError;

pub trait Sink {
    fn write(&mut self, record: &str) -> Result<(), ParserError>;
}

pub enum SinkHandle {
    File(FileSink),
    Stdout(StdoutSink),
    Broker(BrokerSink),
}

impl Sink for SinkHandle {
    fn write(&mut self, record: &str) -> Result<(), ParserError> {
        match self {
            SinkHandle::File(sink) => sink.write(record),
            SinkHandle::Stdout(sink) => sink.write(record),
            SinkHandle::Broker(sink) => sink.write(record),
        }
    }
}
