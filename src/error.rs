/*!
error module defines the error types used by the capture/decode/filter/format/sink pipeline.
*/
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::{error::Error, fmt, io};

/// The error taxonomy for the pipeline.
///
/// Propagation policy is aggressive local recovery: one malformed attribute
/// does not break a message, one malformed message does not break a frame,
/// one malformed frame does not break the capture. Only `ConfigError` and a
/// startup-time `SinkError` are fatal.
#[derive(Debug)]
pub enum ParserError {
    /// Capture source I/O failure.
    CaptureError(String),
    /// A TCP payload yielded no BGP messages. Informational; never surfaced
    /// above `debug` level.
    NoMessages,
    /// The BGP header disagrees with the slice length; the slice is dropped.
    FactoryError(String),
    /// A per-attribute, per-capability, or per-parameter decode failure. The
    /// containing structure is marked errored and retained.
    DecodeError(String),
    /// A filter could not be evaluated; treated as a filter miss.
    FilterError(String),
    /// A formatter failed to render a record; the record is dropped.
    FormatError(String),
    /// A sink failed to accept a record (write time) or to initialize
    /// (startup time, fatal).
    SinkError(String),
    /// Unrecognized formatter/sink/field name; fatal at startup.
    ConfigError(String),
    IoError(io::Error),
    EofError(io::Error),
}

impl Error for ParserError {}

impl Display for ParserError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParserError::CaptureError(s) => write!(f, "Error: {s}"),
            ParserError::NoMessages => write!(f, "Error: no BGP messages found in payload"),
            ParserError::FactoryError(s) => write!(f, "Error: {s}"),
            ParserError::DecodeError(s) => write!(f, "Error: {s}"),
            ParserError::FilterError(s) => write!(f, "Error: {s}"),
            ParserError::FormatError(s) => write!(f, "Error: {s}"),
            ParserError::SinkError(s) => write!(f, "Error: {s}"),
            ParserError::ConfigError(s) => write!(f, "Error: {s}"),
            ParserError::IoError(e) => write!(f, "Error: {e}"),
            ParserError::EofError(e) => write!(f, "Error: {e}"),
        }
    }
}

impl From<io::Error> for ParserError {
    fn from(io_error: io::Error) -> Self {
        match io_error.kind() {
            ErrorKind::UnexpectedEof => ParserError::EofError(io_error),
            _ => ParserError::IoError(io_error),
        }
    }
}

/// Non-fatal issues collected while decoding a composite structure (an
/// UPDATE's attribute list, an OPEN's parameter list). The containing
/// structure keeps going; the caller derives `parse_error` from
/// `has_any()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodeWarnings {
    pub messages: Vec<String>,
}

impl DecodeWarnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, msg: impl Into<String>) {
        self.messages.push(msg.into());
    }

    pub fn has_any(&self) -> bool {
        !self.messages.is_empty()
    }
}
