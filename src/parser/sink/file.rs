use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use log::error;

use crate::error::ParserError;
use crate::parser::sink::Sink;

/// Appends one record per line to a file opened once at construction and
/// flushed on every write (the pipeline has no notion of batching).
pub struct FileSink {
    writer: BufWriter<File>,
}

impl FileSink {
    pub fn open(path: &Path) -> Result<FileSink, ParserError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| ParserError::SinkError(format!("failed to open output file {}: {e}", path.display())))?;
        Ok(FileSink { writer: BufWriter::new(file) })
    }
}

impl Sink for FileSink {
    fn write(&mut self, record: &str) -> Result<(), ParserError> {
        if let Err(e) = writeln!(self.writer, "{record}") {
            error!("failed to write record to file sink: {e}");
            return Err(ParserError::SinkError(e.to_string()));
        }
        if let Err(e) = self.writer.flush() {
            error!("failed to flush file sink: {e}");
            return Err(ParserError::SinkError(e.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_sink_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut sink = FileSink::open(&path).unwrap();
        sink.write("one").unwrap();
        sink.write("two").unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "one\ntwo\n");
    }
}
