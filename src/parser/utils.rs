/*!
Bounds-checked reading helpers built on `bytes::Bytes`/`Buf`, used by every
decoder in [`crate::parser::bgp`].
*/
use bytes::{Buf, Bytes};

use crate::error::ParserError;
use crate::models::{Afi, Safi};

/// Extension trait giving [`bytes::Bytes`] bounds-checked reads that
/// return [`ParserError::DecodeError`] instead of panicking on underflow.
pub trait ReadUtils: Buf {
    fn has_n_remaining(&self, n: usize) -> Result<(), ParserError> {
        if self.remaining() < n {
            return Err(ParserError::DecodeError(format!(
                "expected at least {n} bytes, got {}",
                self.remaining()
            )));
        }
        Ok(())
    }

    fn read_u8(&mut self) -> Result<u8, ParserError> {
        self.has_n_remaining(1)?;
        Ok(self.get_u8())
    }

    fn read_u16(&mut self) -> Result<u16, ParserError> {
        self.has_n_remaining(2)?;
        Ok(self.get_u16())
    }

    fn read_u32(&mut self) -> Result<u32, ParserError> {
        self.has_n_remaining(4)?;
        Ok(self.get_u32())
    }

    fn read_afi(&mut self) -> Result<Afi, ParserError> {
        let code = self.read_u16()?;
        Afi::try_from(code).map_err(|_| ParserError::DecodeError(format!("unknown AFI: {code}")))
    }

    fn read_safi(&mut self) -> Result<Safi, ParserError> {
        let code = self.read_u8()?;
        Safi::try_from(code).map_err(|_| ParserError::DecodeError(format!("unknown SAFI: {code}")))
    }
}

impl ReadUtils for Bytes {}

/// Splits off the next `n` bytes, bounds-checked.
pub fn read_n_bytes(data: &mut Bytes, n: usize) -> Result<Bytes, ParserError> {
    data.has_n_remaining(n)?;
    Ok(data.split_to(n))
}
