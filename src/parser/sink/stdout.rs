use std::io::{self, Write};

use log::error;

use crate::error::ParserError;
use crate::parser::sink::Sink;

#[derive(Debug, Default)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn write(&mut self, record: &str) -> Result<(), ParserError> {
        let mut stdout = io::stdout();
        if let Err(e) = writeln!(stdout, "{record}") {
            error!("failed to write record to stdout: {e}");
            return Err(ParserError::SinkError(e.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdout_sink_accepts_record() {
        let mut sink = StdoutSink;
        assert!(sink.write("hello").is_ok());
    }
}
