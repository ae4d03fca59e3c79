use std::time::Duration;

use kafka::producer::{Producer, Record, RequiredAcks};
use log::error;

use crate::error::ParserError;
use crate::parser::sink::Sink;

/// Publishes one record per write to a fixed topic. Connection is
/// established once at construction; a failure there is fatal (§4.8).
pub struct BrokerSink {
    producer: Producer,
    topic: String,
}

impl BrokerSink {
    pub fn connect(server: &str, topic: &str) -> Result<BrokerSink, ParserError> {
        let producer = Producer::from_hosts(vec![server.to_string()])
            .with_ack_timeout(Duration::from_secs(1))
            .with_required_acks(RequiredAcks::One)
            .create()
            .map_err(|e| ParserError::SinkError(format!("failed to connect to kafka broker {server}: {e}")))?;
        Ok(BrokerSink { producer, topic: topic.to_string() })
    }
}

impl Sink for BrokerSink {
    fn write(&mut self, record: &str) -> Result<(), ParserError> {
        if let Err(e) = self.producer.send(&Record::from_value(&self.topic, record.as_bytes())) {
            error!("failed to publish record to kafka topic {}: {e}", self.topic);
            return Err(ParserError::SinkError(e.to_string()));
        }
        Ok(())
    }
}
