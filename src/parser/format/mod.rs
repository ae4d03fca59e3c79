/*!
Output rendering (§4.7): one of three textures over a decoded message.
*/
mod human;
mod line;
#[cfg(all(feature = "serde", feature = "serde_json"))]
mod record;

pub use human::HumanFormatter;
pub use line::{LineField, LineFormatter};
#[cfg(all(feature = "serde", feature = "serde_json"))]
pub use record::StructuredRecord;

use crate::error::ParserError;
use crate::models::BgpMessage;

#[derive(Debug, Clone)]
pub enum Formatter {
    Json,
    Human,
    Line(Vec<LineField>),
}

impl Formatter {
    pub fn format(&self, message: &BgpMessage) -> Result<String, ParserError> {
        match self {
            Formatter::Human => Ok(HumanFormatter.render(message)),
            Formatter::Line(fields) => Ok(LineFormatter::new(fields.clone()).render(message)),
            Formatter::Json => json_format(message),
        }
    }
}

#[cfg(all(feature = "serde", feature = "serde_json"))]
fn json_format(message: &BgpMessage) -> Result<String, ParserError> {
    let record = StructuredRecord::from(message);
    serde_json::to_string(&record)
        .map_err(|e| ParserError::FormatError(format!("failed to serialize record: {e}")))
}

#[cfg(not(all(feature = "serde", feature = "serde_json")))]
fn json_format(_message: &BgpMessage) -> Result<String, ParserError> {
    Err(ParserError::ConfigError(
        "JSON formatter requires the serde_json feature".to_string(),
    ))
}
