use tinyvec::ArrayVec;

pub mod checksum;
mod fields;
pub mod gga;
pub mod parser;
pub mod records;
pub mod rmc;

pub use parser::NmeaParser;
pub use records::{Date, FixQuality, GgaData, RmcData, Talker, Time};

// NMEA-0183 caps a sentence at 82 characters, "$" through "\r\n" inclusive.
const NMEA_BUFSIZE: usize = 82;

#[derive(Default, Debug, Copy, Clone)]
pub(crate) struct NmeaBuf(pub ArrayVec<[u8; NMEA_BUFSIZE]>);

#[cfg(feature = "defmt")]
impl defmt::Format for NmeaBuf {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.0.as_slice())
    }
}

impl core::ops::Deref for NmeaBuf {
    type Target = ArrayVec<[u8; NMEA_BUFSIZE]>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl core::ops::DerefMut for NmeaBuf {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Decode errors a [`NmeaParser`] can report. The parser keeps the last
/// error until [`NmeaParser::clear_error`] is called; a later successful
/// decode never clears it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A framed sentence failed XOR checksum verification.
    #[error("sentence checksum mismatch")]
    Checksum,
    /// An RMC sentence carried an empty or unrecognized status field.
    #[error("malformed RMC sentence")]
    Rmc,
}
